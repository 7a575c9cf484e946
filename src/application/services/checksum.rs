//! Card number checksum (Luhn) and synthetic number generation

use rand::Rng;

use crate::application::errors::CommandError;
use crate::domain::entities::ValidationOutcome;

/// Length of a generated card number
pub const GENERATED_LENGTH: usize = 16;

/// Stateless checksum engine
pub struct ChecksumEngine;

impl ChecksumEngine {
    /// Evaluate the Luhn checksum of a digit string.
    ///
    /// Whitespace anywhere in the input is ignored. Anything else that is
    /// not an ASCII digit, or an input that is empty once whitespace is
    /// gone, fails with `CommandError::InvalidFormat`.
    pub fn validate(input: &str) -> Result<ValidationOutcome, CommandError> {
        let normalized: String = input.chars().filter(|c| !c.is_whitespace()).collect();

        if normalized.is_empty() {
            return Err(CommandError::InvalidFormat("no digits supplied".to_string()));
        }
        if !normalized.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CommandError::InvalidFormat(format!(
                "'{}' contains non-digit characters",
                normalized
            )));
        }

        let sum: u32 = normalized
            .bytes()
            .rev()
            .enumerate()
            .map(|(i, b)| {
                let mut digit = u32::from(b - b'0');
                if i % 2 == 1 {
                    digit *= 2;
                    if digit > 9 {
                        digit -= 9;
                    }
                }
                digit
            })
            .sum();

        Ok(ValidationOutcome {
            normalized_input: normalized,
            is_valid: sum % 10 == 0,
        })
    }

    /// Generate a 16-digit synthetic number from the thread-local RNG.
    ///
    /// No checksum correction is applied.
    pub fn generate() -> String {
        Self::generate_with(&mut rand::thread_rng())
    }

    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> String {
        (0..GENERATED_LENGTH)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect()
    }
}

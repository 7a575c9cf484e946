/// Fallback rendered for any issuer field the lookup service left out
pub const UNKNOWN: &str = "Unknown";

/// Result of a checksum evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    /// Input with all whitespace removed
    pub normalized_input: String,
    pub is_valid: bool,
}

/// Issuer metadata for a bank identification number
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinRecord {
    pub bin: Option<String>,
    pub scheme: Option<String>,
    pub card_type: Option<String>,
    pub category: Option<String>,
    pub bank_name: Option<String>,
    pub country_name: Option<String>,
}

impl BinRecord {
    pub fn bin(&self) -> &str {
        self.bin.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn scheme(&self) -> &str {
        self.scheme.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn card_type(&self) -> &str {
        self.card_type.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn category(&self) -> &str {
        self.category.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn bank_name(&self) -> &str {
        self.bank_name.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn country_name(&self) -> &str {
        self.country_name.as_deref().unwrap_or(UNKNOWN)
    }
}

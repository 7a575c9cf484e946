//! Card commands: generate, check, bin

use std::sync::Arc;

use async_trait::async_trait;

use super::{escape_markdown, replies, CommandHandler};
use crate::application::errors::CommandError;
use crate::application::services::ChecksumEngine;
use crate::domain::entities::{BinRecord, CommandRequest, CommandResult};
use crate::domain::traits::BinLookup;

pub struct GenerateCommand;

#[async_trait]
impl CommandHandler for GenerateCommand {
    fn description(&self) -> &str {
        "Generate a random credit card number"
    }

    async fn handle(&self, _request: &CommandRequest) -> Result<CommandResult, CommandError> {
        let number = ChecksumEngine::generate();
        Ok(CommandResult::rich(format!(
            "🎟️ Your generated credit card number is:\n`{}`",
            number
        )))
    }
}

pub struct CheckCommand;

#[async_trait]
impl CommandHandler for CheckCommand {
    fn description(&self) -> &str {
        "Validate a credit card number"
    }

    fn missing_argument(&self) -> Option<&str> {
        Some(replies::MISSING_CARD)
    }

    async fn handle(&self, request: &CommandRequest) -> Result<CommandResult, CommandError> {
        let outcome = ChecksumEngine::validate(&request.joined_args())?;
        let verdict = if outcome.is_valid { "Valid ✅" } else { "Invalid ❌" };
        Ok(CommandResult::rich(format!(
            "🔍 Card Number: `{}`\n*Validity:* {}",
            outcome.normalized_input, verdict
        )))
    }
}

pub struct BinCommand {
    lookup: Arc<dyn BinLookup>,
}

impl BinCommand {
    pub fn new(lookup: Arc<dyn BinLookup>) -> Self {
        Self { lookup }
    }
}

#[async_trait]
impl CommandHandler for BinCommand {
    fn description(&self) -> &str {
        "Lookup BIN information"
    }

    fn missing_argument(&self) -> Option<&str> {
        Some(replies::MISSING_BIN)
    }

    async fn handle(&self, request: &CommandRequest) -> Result<CommandResult, CommandError> {
        let bin: String = request
            .joined_args()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        let record = self.lookup.lookup(&bin).await?;
        Ok(CommandResult::rich(render_bin(&record)))
    }
}

fn render_bin(record: &BinRecord) -> String {
    format!(
        "🔍 BIN Lookup Result:\n\
         *BIN:* {}\n\
         *Brand:* {}\n\
         *Type:* {}\n\
         *Category:* {}\n\
         *Bank:* {}\n\
         *Country:* {}",
        escape_markdown(record.bin()),
        escape_markdown(record.scheme()),
        escape_markdown(record.card_type()),
        escape_markdown(record.category()),
        escape_markdown(record.bank_name()),
        escape_markdown(record.country_name()),
    )
}

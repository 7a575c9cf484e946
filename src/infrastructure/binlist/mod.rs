//! binlist.net lookup client

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::application::errors::{BotError, CommandError, ConfigError};
use crate::domain::entities::BinRecord;
use crate::domain::traits::BinLookup;

#[derive(Debug, Deserialize)]
struct BinlistResponse {
    number: Option<Value>,
    scheme: Option<String>,
    #[serde(rename = "type")]
    card_type: Option<String>,
    category: Option<String>,
    bank: Option<NamedEntity>,
    country: Option<NamedEntity>,
}

#[derive(Debug, Deserialize)]
struct NamedEntity {
    name: Option<String>,
}

impl BinlistResponse {
    fn into_record(self, queried: &str) -> BinRecord {
        // binlist v3 answers `number` with a `{length, luhn}` object
        let bin = match self.number {
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Object(_)) => Some(queried.to_string()),
            _ => None,
        };

        BinRecord {
            bin,
            scheme: self.scheme,
            card_type: self.card_type,
            category: self.category,
            bank_name: self.bank.and_then(|b| b.name),
            country_name: self.country.and_then(|c| c.name),
        }
    }
}

/// HTTP client for the BIN lookup service
pub struct BinlistClient {
    client: Client,
    base_url: Url,
}

impl BinlistClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BotError> {
        let base_url = Url::parse(base_url).map_err(|e| {
            BotError::Config(ConfigError::InvalidValue {
                field: "bin-lookup.base-url".to_string(),
                value: format!("{} ({})", base_url, e),
            })
        })?;

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("card-utility-bot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BotError::Network(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// Base URL with the BIN appended as a single, escaped path segment
    fn lookup_url(&self, bin: &str) -> Result<Url, CommandError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                CommandError::UpstreamLookupFailed(format!("cannot append to {}", self.base_url))
            })?;
            segments.pop_if_empty().push(bin);
        }
        Ok(url)
    }
}

#[async_trait]
impl BinLookup for BinlistClient {
    async fn lookup(&self, bin: &str) -> Result<BinRecord, CommandError> {
        let url = self.lookup_url(bin)?;
        tracing::debug!("BIN lookup: {}", url);

        let response = self
            .client
            .get(url)
            .header("Accept-Version", "3")
            .send()
            .await
            .map_err(|e| CommandError::UpstreamLookupFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CommandError::UpstreamLookupFailed(format!(
                "lookup service answered {}",
                response.status()
            )));
        }

        let data: BinlistResponse = response
            .json()
            .await
            .map_err(|e| CommandError::UpstreamLookupFailed(e.to_string()))?;

        Ok(data.into_record(bin))
    }
}

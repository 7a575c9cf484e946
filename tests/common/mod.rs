//! Test doubles shared by the integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use card_utility_bot::application::commands::{Access, CommandHandler};
use card_utility_bot::application::errors::{BotError, CommandError};
use card_utility_bot::domain::entities::{BinRecord, CommandRequest, CommandResult, TextFormat};
use card_utility_bot::domain::traits::{BinLookup, Bot, BotInfo, KeyboardButton};

pub const OWNER_ID: i64 = 1000;

static INIT: Once = Once::new();

pub fn ensure_init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A delivered reply
#[derive(Debug, Clone)]
pub struct Sent {
    pub chat_id: i64,
    pub text: String,
    pub format: TextFormat,
    pub keyboard: Option<Vec<Vec<KeyboardButton>>>,
}

/// Bot that records everything it is asked to send
#[derive(Default)]
pub struct RecordingBot {
    pub sent: Mutex<Vec<Sent>>,
    pub answered: Mutex<Vec<String>>,
}

impl RecordingBot {
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn answered(&self) -> Vec<String> {
        self.answered.lock().unwrap().clone()
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn start(&self) -> Result<(), BotError> {
        Ok(())
    }

    async fn send_message(&self, chat_id: i64, text: &str, format: TextFormat) -> Result<i64, BotError> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(Sent {
            chat_id,
            text: text.to_string(),
            format,
            keyboard: None,
        });
        Ok(sent.len() as i64)
    }

    async fn send_with_keyboard(
        &self,
        chat_id: i64,
        text: &str,
        format: TextFormat,
        buttons: Vec<Vec<KeyboardButton>>,
    ) -> Result<i64, BotError> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(Sent {
            chat_id,
            text: text.to_string(),
            format,
            keyboard: Some(buttons),
        });
        Ok(sent.len() as i64)
    }

    async fn answer_callback(&self, callback_id: &str, _text: Option<&str>) -> Result<(), BotError> {
        self.answered.lock().unwrap().push(callback_id.to_string());
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        BotInfo {
            id: "test".to_string(),
            name: "test".to_string(),
            username: "test_bot".to_string(),
        }
    }
}

/// BinLookup returning a canned answer and counting calls
pub struct StubLookup {
    answer: Result<BinRecord, CommandError>,
    pub calls: AtomicUsize,
    pub last_bin: Mutex<Option<String>>,
}

impl StubLookup {
    pub fn ok(record: BinRecord) -> Arc<Self> {
        Arc::new(Self {
            answer: Ok(record),
            calls: AtomicUsize::new(0),
            last_bin: Mutex::new(None),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            answer: Err(CommandError::UpstreamLookupFailed("connection refused".to_string())),
            calls: AtomicUsize::new(0),
            last_bin: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BinLookup for StubLookup {
    async fn lookup(&self, bin: &str) -> Result<BinRecord, CommandError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_bin.lock().unwrap() = Some(bin.to_string());
        self.answer.clone()
    }
}

/// Owner-only handler that counts how often it actually ran
#[derive(Clone, Default)]
pub struct CountingHandler {
    pub runs: Arc<AtomicUsize>,
}

impl CountingHandler {
    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CommandHandler for CountingHandler {
    fn description(&self) -> &str {
        "privileged probe"
    }

    fn access(&self) -> Access {
        Access::OwnerOnly
    }

    async fn handle(&self, _request: &CommandRequest) -> Result<CommandResult, CommandError> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        Ok(CommandResult::plain("privileged work done"))
    }
}

pub fn sample_record() -> BinRecord {
    BinRecord {
        bin: Some("457173".to_string()),
        scheme: Some("visa".to_string()),
        card_type: Some("debit".to_string()),
        category: None,
        bank_name: Some("Jyske Bank".to_string()),
        country_name: Some("Denmark".to_string()),
    }
}

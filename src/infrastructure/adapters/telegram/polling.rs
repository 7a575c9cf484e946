//! Long-polling loop over getUpdates

use std::sync::Arc;
use std::time::Duration;

use super::TelegramAdapter;
use crate::application::errors::BotError;
use crate::application::messaging::InboundAdapter;
use crate::application::services::{respond, CommandRouter};

/// Seconds Telegram holds a getUpdates request open
const POLL_TIMEOUT_SECONDS: i64 = 30;
const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Poll Telegram until Ctrl-C, handling each update on its own task
pub async fn run_polling(
    bot: Arc<TelegramAdapter>,
    router: Arc<CommandRouter>,
    inbound: Arc<InboundAdapter>,
) -> Result<(), BotError> {
    let mut offset: i64 = 0;

    tracing::info!("Starting message loop...");

    loop {
        let polled = tokio::select! {
            polled = bot.get_updates(offset, POLL_TIMEOUT_SECONDS) => polled,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown requested, leaving message loop");
                return Ok(());
            }
        };

        let updates = match polled {
            Ok(updates) => updates,
            Err(e) => {
                tracing::error!("Failed to get updates: {}", e);
                tokio::time::sleep(RETRY_DELAY).await;
                continue;
            }
        };

        if !updates.is_empty() {
            tracing::info!("Received {} updates", updates.len());
        }
        offset = TelegramAdapter::get_next_offset(&updates, offset);

        for update in updates {
            let update_id = update.update_id;
            let Some(raw) = update.into_inbound(inbound.parser()) else {
                tracing::debug!("Update {} has nothing to route", update_id);
                continue;
            };

            let event = match inbound.normalize(raw) {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!("Update {} dropped: {}", update_id, e);
                    continue;
                }
            };

            let bot = Arc::clone(&bot);
            let router = Arc::clone(&router);
            tokio::spawn(async move {
                respond(bot.as_ref(), &router, &event).await;
            });
        }
    }
}

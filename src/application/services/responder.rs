use crate::application::messaging::InboundEvent;
use crate::application::services::CommandRouter;
use crate::domain::entities::CommandResult;
use crate::domain::traits::Bot;

/// Route one normalized event and deliver the reply through `bot`.
///
/// Delivery failures are logged, not returned: one undeliverable reply must
/// not affect other events.
pub async fn respond<B: Bot + ?Sized>(bot: &B, router: &CommandRouter, event: &InboundEvent) -> CommandResult {
    if let Some(callback_id) = &event.callback_id {
        if let Err(e) = bot.answer_callback(callback_id, None).await {
            tracing::warn!("Failed to answer callback {}: {}", callback_id, e);
        }
    }

    let result = router.dispatch(&event.request).await;

    if let Err(e) = bot.deliver(event.request.chat_id, &result).await {
        tracing::error!("Failed to send message to {}: {}", event.request.chat_id, e);
    }

    result
}

use async_trait::async_trait;

/// A communication channel (console, web chat, SMS, ...).
///
/// Each implementation handles transport-specific delivery. Multiple
/// `send_text` calls within one turn must reach the user in call order.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Unique name for this channel (e.g., "console").
    fn name(&self) -> String;

    /// Send a text message to a conversation.
    async fn send_text(&self, conversation_id: &str, text: &str) -> anyhow::Result<()>;
}

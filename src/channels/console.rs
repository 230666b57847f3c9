use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::traits::Channel;

/// Local console transport: outbound messages go to stdout.
pub struct ConsoleChannel;

#[async_trait]
impl Channel for ConsoleChannel {
    fn name(&self) -> String {
        "console".to_string()
    }

    async fn send_text(&self, _conversation_id: &str, text: &str) -> anyhow::Result<()> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(format!("bot> {text}\n").as_bytes()).await?;
        stdout.flush().await?;
        Ok(())
    }
}

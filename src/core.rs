use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::channels::ConsoleChannel;
use crate::config::AppConfig;
use crate::dialogue::{Pacing, TurnDispatcher};
use crate::state::SqliteStateStore;
use crate::traits::Channel;
use crate::types::Activity;

pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    // 1. State store
    let state = Arc::new(SqliteStateStore::new(&config.state.db_path).await?);
    info!(db_path = %config.state.db_path, "state store initialized");

    // 2. Dispatcher
    let dispatcher = TurnDispatcher::new(state, Pacing::from(&config.pacing));

    // 3. Channel
    let channel = ConsoleChannel;
    info!(channel = %channel.name(), "channel ready");

    // 4. Cancellation on ctrl-c
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    // 5. Turn loop. One stdin line is one message activity; a turn runs to
    // completion before the next line is read, which serializes turns for
    // this conversation.
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    info!("triviad ready; type a message");
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let activity = Activity::message(
                    config.console.user_id.as_str(),
                    config.console.conversation_id.as_str(),
                    line,
                );
                dispatcher.handle_turn(&activity, &channel, &cancel).await?;
            }
        }
    }

    info!("shutting down");
    Ok(())
}

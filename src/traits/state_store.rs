use async_trait::async_trait;

use crate::dialogue::ConversationStage;
use crate::trivia::TriviaProgress;
use crate::types::UserProfile;

/// Conversation-scoped stage persistence.
#[async_trait]
pub trait StageStore: Send + Sync {
    /// Load the stage record for a conversation. Returns a zero-value record
    /// when none exists yet.
    async fn load_stage(&self, conversation_id: &str) -> anyhow::Result<ConversationStage>;

    /// Buffer the stage record for a conversation. Durable after `commit`.
    async fn save_stage(
        &self,
        conversation_id: &str,
        stage: &ConversationStage,
    ) -> anyhow::Result<()>;
}

/// User-scoped profile persistence.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn load_profile(&self, user_id: &str) -> anyhow::Result<UserProfile>;

    async fn save_profile(&self, user_id: &str, profile: &UserProfile) -> anyhow::Result<()>;
}

/// User-scoped trivia progress persistence.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    async fn load_progress(&self, user_id: &str) -> anyhow::Result<TriviaProgress>;

    async fn save_progress(&self, user_id: &str, progress: &TriviaProgress)
        -> anyhow::Result<()>;
}

/// End-of-turn durability boundary.
#[async_trait]
pub trait TurnCommit: Send + Sync {
    /// Durably persist all writes buffered so far in the turn.
    /// Failures propagate to the host; the store does not retry.
    async fn commit(&self, conversation_id: &str) -> anyhow::Result<()>;
}

/// Brings the focused store traits into scope so their methods are callable
/// through `Arc<dyn StateStore>`.
pub mod store_prelude {
    pub use super::{ProfileStore, ProgressStore, StageStore, TurnCommit};
}

/// Facade trait so call sites can hold one `Arc<dyn StateStore>`, while
/// implementations and tests can depend on the focused store traits.
pub trait StateStore: Send + Sync + StageStore + ProfileStore + ProgressStore + TurnCommit {}

impl<T> StateStore for T where
    T: Send + Sync + StageStore + ProfileStore + ProgressStore + TurnCommit
{
}

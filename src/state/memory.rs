use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::dialogue::ConversationStage;
use crate::traits::{ProfileStore, ProgressStore, StageStore, TurnCommit};
use crate::trivia::TriviaProgress;
use crate::types::UserProfile;

/// In-memory state store. Commit is a no-op. Used by tests and by hosts
/// that don't need durability.
#[derive(Default)]
pub struct MemoryStateStore {
    stages: RwLock<HashMap<String, ConversationStage>>,
    profiles: RwLock<HashMap<String, UserProfile>>,
    progress: RwLock<HashMap<String, TriviaProgress>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StageStore for MemoryStateStore {
    async fn load_stage(&self, conversation_id: &str) -> anyhow::Result<ConversationStage> {
        Ok(self
            .stages
            .read()
            .await
            .get(conversation_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn save_stage(
        &self,
        conversation_id: &str,
        stage: &ConversationStage,
    ) -> anyhow::Result<()> {
        self.stages
            .write()
            .await
            .insert(conversation_id.to_string(), stage.clone());
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for MemoryStateStore {
    async fn load_profile(&self, user_id: &str) -> anyhow::Result<UserProfile> {
        Ok(self
            .profiles
            .read()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn save_profile(&self, user_id: &str, profile: &UserProfile) -> anyhow::Result<()> {
        self.profiles
            .write()
            .await
            .insert(user_id.to_string(), profile.clone());
        Ok(())
    }
}

#[async_trait]
impl ProgressStore for MemoryStateStore {
    async fn load_progress(&self, user_id: &str) -> anyhow::Result<TriviaProgress> {
        Ok(self
            .progress
            .read()
            .await
            .get(user_id)
            .copied()
            .unwrap_or_default())
    }

    async fn save_progress(
        &self,
        user_id: &str,
        progress: &TriviaProgress,
    ) -> anyhow::Result<()> {
        self.progress
            .write()
            .await
            .insert(user_id.to_string(), *progress);
        Ok(())
    }
}

#[async_trait]
impl TurnCommit for MemoryStateStore {
    async fn commit(&self, _conversation_id: &str) -> anyhow::Result<()> {
        Ok(())
    }
}

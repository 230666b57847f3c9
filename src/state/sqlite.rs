use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use tokio::sync::Mutex;
use tracing::info;

use crate::dialogue::ConversationStage;
use crate::traits::{ProfileStore, ProgressStore, StageStore, TurnCommit};
use crate::trivia::{TriviaProgress, QUESTION_COUNT};
use crate::types::UserProfile;

/// Writes buffered between `save_*` calls and the end-of-turn `commit`.
#[derive(Default)]
struct Pending {
    stages: HashMap<String, ConversationStage>,
    profiles: HashMap<String, UserProfile>,
    progress: HashMap<String, TriviaProgress>,
}

impl Pending {
    fn is_empty(&self) -> bool {
        self.stages.is_empty() && self.profiles.is_empty() && self.progress.is_empty()
    }
}

/// SQLite-backed state store.
///
/// `save_*` buffers writes in memory; `commit` flushes everything buffered
/// in one transaction. Loads consult the buffer first, so a turn reads its
/// own writes before they are durable. Commit failures propagate to the
/// caller; buffered writes are not retried.
pub struct SqliteStateStore {
    pool: SqlitePool,
    pending: Mutex<Pending>,
}

impl SqliteStateStore {
    pub async fn new(db_path: &str) -> anyhow::Result<Self> {
        let opts = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(opts)
            .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS conversation_stage (
                conversation_id TEXT PRIMARY KEY,
                turn_count INTEGER NOT NULL DEFAULT 0,
                said_hello INTEGER NOT NULL DEFAULT 0,
                greeted_name INTEGER NOT NULL DEFAULT 0,
                offer_game INTEGER NOT NULL DEFAULT 0,
                play_a_game INTEGER NOT NULL DEFAULT 0,
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            )",
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS user_profile (
                user_id TEXT PRIMARY KEY,
                name TEXT,
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            )",
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS trivia_progress (
                user_id TEXT PRIMARY KEY,
                points INTEGER NOT NULL DEFAULT 0,
                answered TEXT NOT NULL DEFAULT '[]',
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            )",
        )
        .execute(&pool)
        .await?;

        info!(db_path, "sqlite state store ready");
        Ok(Self {
            pool,
            pending: Mutex::new(Pending::default()),
        })
    }
}

#[async_trait]
impl StageStore for SqliteStateStore {
    async fn load_stage(&self, conversation_id: &str) -> anyhow::Result<ConversationStage> {
        if let Some(stage) = self.pending.lock().await.stages.get(conversation_id) {
            return Ok(stage.clone());
        }
        let row = sqlx::query(
            "SELECT turn_count, said_hello, greeted_name, offer_game, play_a_game
             FROM conversation_stage WHERE conversation_id = ?",
        )
        .bind(conversation_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(match row {
            Some(row) => ConversationStage {
                turn_count: row.get::<i64, _>("turn_count") as u32,
                said_hello: row.get("said_hello"),
                greeted_name: row.get("greeted_name"),
                offer_game: row.get("offer_game"),
                play_a_game: row.get("play_a_game"),
            },
            None => ConversationStage::default(),
        })
    }

    async fn save_stage(
        &self,
        conversation_id: &str,
        stage: &ConversationStage,
    ) -> anyhow::Result<()> {
        self.pending
            .lock()
            .await
            .stages
            .insert(conversation_id.to_string(), stage.clone());
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for SqliteStateStore {
    async fn load_profile(&self, user_id: &str) -> anyhow::Result<UserProfile> {
        if let Some(profile) = self.pending.lock().await.profiles.get(user_id) {
            return Ok(profile.clone());
        }
        let row = sqlx::query("SELECT name FROM user_profile WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(match row {
            Some(row) => UserProfile {
                name: row.get::<Option<String>, _>("name"),
            },
            None => UserProfile::default(),
        })
    }

    async fn save_profile(&self, user_id: &str, profile: &UserProfile) -> anyhow::Result<()> {
        self.pending
            .lock()
            .await
            .profiles
            .insert(user_id.to_string(), profile.clone());
        Ok(())
    }
}

#[async_trait]
impl ProgressStore for SqliteStateStore {
    async fn load_progress(&self, user_id: &str) -> anyhow::Result<TriviaProgress> {
        if let Some(progress) = self.pending.lock().await.progress.get(user_id) {
            return Ok(*progress);
        }
        let row = sqlx::query("SELECT points, answered FROM trivia_progress WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(TriviaProgress::default());
        };

        let answered_json: String = row.get("answered");
        let answered_vec: Vec<bool> = serde_json::from_str(&answered_json)?;
        let mut answered = [false; QUESTION_COUNT];
        for (slot, value) in answered.iter_mut().zip(answered_vec) {
            *slot = value;
        }

        Ok(TriviaProgress {
            points: row.get::<i64, _>("points") as u32,
            answered,
        })
    }

    async fn save_progress(
        &self,
        user_id: &str,
        progress: &TriviaProgress,
    ) -> anyhow::Result<()> {
        self.pending
            .lock()
            .await
            .progress
            .insert(user_id.to_string(), *progress);
        Ok(())
    }
}

#[async_trait]
impl TurnCommit for SqliteStateStore {
    async fn commit(&self, _conversation_id: &str) -> anyhow::Result<()> {
        // Turns are serialized by the host, so flushing the whole buffer is
        // equivalent to flushing the current conversation's writes.
        let pending = {
            let mut guard = self.pending.lock().await;
            std::mem::take(&mut *guard)
        };
        if pending.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;

        for (conversation_id, stage) in &pending.stages {
            sqlx::query(
                "INSERT INTO conversation_stage
                    (conversation_id, turn_count, said_hello, greeted_name, offer_game,
                     play_a_game, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?, datetime('now'))
                 ON CONFLICT(conversation_id) DO UPDATE SET
                    turn_count = excluded.turn_count,
                    said_hello = excluded.said_hello,
                    greeted_name = excluded.greeted_name,
                    offer_game = excluded.offer_game,
                    play_a_game = excluded.play_a_game,
                    updated_at = excluded.updated_at",
            )
            .bind(conversation_id)
            .bind(stage.turn_count as i64)
            .bind(stage.said_hello)
            .bind(stage.greeted_name)
            .bind(stage.offer_game)
            .bind(stage.play_a_game)
            .execute(&mut *tx)
            .await?;
        }

        for (user_id, profile) in &pending.profiles {
            sqlx::query(
                "INSERT INTO user_profile (user_id, name, updated_at)
                 VALUES (?, ?, datetime('now'))
                 ON CONFLICT(user_id) DO UPDATE SET
                    name = excluded.name,
                    updated_at = excluded.updated_at",
            )
            .bind(user_id)
            .bind(&profile.name)
            .execute(&mut *tx)
            .await?;
        }

        for (user_id, progress) in &pending.progress {
            sqlx::query(
                "INSERT INTO trivia_progress (user_id, points, answered, updated_at)
                 VALUES (?, ?, ?, datetime('now'))
                 ON CONFLICT(user_id) DO UPDATE SET
                    points = excluded.points,
                    answered = excluded.answered,
                    updated_at = excluded.updated_at",
            )
            .bind(user_id)
            .bind(progress.points as i64)
            .bind(serde_json::to_string(&progress.answered)?)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

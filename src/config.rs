use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub state: StateConfig,
    #[serde(default)]
    pub pacing: PacingConfig,
    #[serde(default)]
    pub console: ConsoleConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StateConfig {
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

fn default_db_path() -> String {
    "triviad.db".to_string()
}

/// Pauses applied between consecutive sends within a turn, in milliseconds.
#[derive(Debug, Deserialize, Clone)]
pub struct PacingConfig {
    /// Pause before the right/wrong feedback line.
    #[serde(default = "default_feedback_ms")]
    pub feedback_ms: u64,
    /// Pause before the next question or the closing verdict.
    #[serde(default = "default_score_ms")]
    pub score_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            feedback_ms: default_feedback_ms(),
            score_ms: default_score_ms(),
        }
    }
}

fn default_feedback_ms() -> u64 {
    2000
}

fn default_score_ms() -> u64 {
    1000
}

/// Identity the console transport reports for the local session.
#[derive(Debug, Deserialize, Clone)]
pub struct ConsoleConfig {
    #[serde(default = "default_user_id")]
    pub user_id: String,
    #[serde(default = "default_conversation_id")]
    pub conversation_id: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            user_id: default_user_id(),
            conversation_id: default_conversation_id(),
        }
    }
}

fn default_user_id() -> String {
    "local".to_string()
}

fn default_conversation_id() -> String {
    "console".to_string()
}

impl AppConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load config.toml when present; otherwise run on defaults.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.state.db_path, "triviad.db");
        assert_eq!(config.pacing.feedback_ms, 2000);
        assert_eq!(config.pacing.score_ms, 1000);
        assert_eq!(config.console.user_id, "local");
        assert_eq!(config.console.conversation_id, "console");
    }

    #[test]
    fn partial_sections_fill_in() {
        let config: AppConfig = toml::from_str(
            r#"
            [state]
            db_path = "/tmp/test.db"

            [pacing]
            feedback_ms = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.state.db_path, "/tmp/test.db");
        assert_eq!(config.pacing.feedback_ms, 0);
        assert_eq!(config.pacing.score_ms, 1000);
    }

    #[test]
    fn load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.state.db_path, "triviad.db");
    }
}

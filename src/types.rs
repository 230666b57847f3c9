use std::time::Duration;

use serde::{Deserialize, Serialize};

/// What kind of activity arrived from the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    /// A text message from the user — the only kind that drives the state machine.
    Message,
    /// Anything else (typing indicators, membership updates, ...).
    Other,
}

/// One inbound activity, as delivered by the transport layer.
#[derive(Debug, Clone)]
pub struct Activity {
    pub kind: ActivityKind,
    pub text: String,
    pub user_id: String,
    pub conversation_id: String,
}

impl Activity {
    pub fn message(
        user_id: impl Into<String>,
        conversation_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            kind: ActivityKind::Message,
            text: text.into(),
            user_id: user_id.into(),
            conversation_id: conversation_id.into(),
        }
    }

    /// The console transport only produces messages; other activity kinds
    /// come from richer transports (and tests).
    #[allow(dead_code)]
    pub fn other(user_id: impl Into<String>, conversation_id: impl Into<String>) -> Self {
        Self {
            kind: ActivityKind::Other,
            text: String::new(),
            user_id: user_id.into(),
            conversation_id: conversation_id.into(),
        }
    }
}

/// Per-user profile. Created on first interaction; the name is written once,
/// when the name-capture stage completes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: Option<String>,
}

impl UserProfile {
    /// Name to address the user by. The stage ordering guarantees a name is
    /// on file before any reply that uses it, so the fallback is cosmetic.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("friend")
    }
}

/// One outbound message, with an optional pause to apply before sending it.
///
/// Delays are data rather than sleeps so the turn logic stays a pure
/// function of its inputs; the delivery loop applies them.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub delay_before: Option<Duration>,
}

impl Reply {
    pub fn now(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            delay_before: None,
        }
    }

    pub fn after(delay: Duration, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            delay_before: Some(delay),
        }
    }
}

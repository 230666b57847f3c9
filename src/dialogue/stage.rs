use serde::{Deserialize, Serialize};

use crate::trivia::TriviaProgress;

/// Persisted per-conversation onboarding record.
///
/// `turn_count` bumps once per message turn. The onboarding flags are
/// monotonic; `play_a_game` is the one exception — it gates exactly one
/// accept/decline decision and is cleared when that decision is consumed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationStage {
    pub turn_count: u32,
    pub said_hello: bool,
    pub greeted_name: bool,
    pub offer_game: bool,
    pub play_a_game: bool,
}

/// The current point in the onboarding/quiz sequence.
///
/// Derived once per turn from the persisted records. First match wins, and
/// the stage is never reevaluated mid-turn, so exactly one branch runs per
/// message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Nothing has happened yet: introduce the bot and ask for a name.
    Greeting,
    /// The next message is the user's name.
    NameCapture,
    /// Offer the trivia game.
    GameOffer,
    /// The next message is the accept/decline decision.
    GameDecision,
    /// Waiting on the answer to question `i` (0-based).
    Question(usize),
    /// All questions answered: terminal chit-chat.
    Wrapped,
}

impl Stage {
    pub fn of(stage: &ConversationStage, progress: &TriviaProgress) -> Self {
        if !stage.said_hello {
            Stage::Greeting
        } else if !stage.greeted_name {
            Stage::NameCapture
        } else if !stage.offer_game {
            Stage::GameOffer
        } else if stage.play_a_game {
            Stage::GameDecision
        } else if let Some(index) = progress.next_question() {
            Stage::Question(index)
        } else {
            Stage::Wrapped
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_conversation_starts_at_greeting() {
        let stage = ConversationStage::default();
        let progress = TriviaProgress::default();
        assert_eq!(Stage::of(&stage, &progress), Stage::Greeting);
    }

    #[test]
    fn onboarding_flags_walk_the_stages_in_order() {
        let mut stage = ConversationStage::default();
        let progress = TriviaProgress::default();

        stage.said_hello = true;
        assert_eq!(Stage::of(&stage, &progress), Stage::NameCapture);

        stage.greeted_name = true;
        assert_eq!(Stage::of(&stage, &progress), Stage::GameOffer);

        stage.offer_game = true;
        stage.play_a_game = true;
        assert_eq!(Stage::of(&stage, &progress), Stage::GameDecision);

        stage.play_a_game = false;
        assert_eq!(Stage::of(&stage, &progress), Stage::Question(0));
    }

    #[test]
    fn question_gates_are_symmetric_for_all_five_indices() {
        let stage = ConversationStage {
            turn_count: 4,
            said_hello: true,
            greeted_name: true,
            offer_game: true,
            play_a_game: false,
        };
        let mut progress = TriviaProgress::default();
        for i in 0..5 {
            assert_eq!(Stage::of(&stage, &progress), Stage::Question(i));
            progress.score(i, false);
        }
        assert_eq!(Stage::of(&stage, &progress), Stage::Wrapped);
    }
}

use serde::{Deserialize, Serialize};

use super::bank::QUESTION_COUNT;

/// Per-user quiz record: running score plus one completion flag per question.
/// Never reset once created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriviaProgress {
    pub points: u32,
    pub answered: [bool; QUESTION_COUNT],
}

impl TriviaProgress {
    /// Index of the first unanswered question, if any.
    pub fn next_question(&self) -> Option<usize> {
        self.answered.iter().position(|done| !done)
    }

    /// Number of questions scored so far.
    #[allow(dead_code)] // Invariant helper: points <= answered_count always holds.
    pub fn answered_count(&self) -> usize {
        self.answered.iter().filter(|done| **done).count()
    }

    /// Score question `index`: mark it answered and award a point when
    /// correct. A question already scored stays as it was.
    pub fn score(&mut self, index: usize, correct: bool) {
        if !self.answered[index] {
            self.answered[index] = true;
            if correct {
                self.points += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_question_walks_in_order() {
        let mut progress = TriviaProgress::default();
        assert_eq!(progress.next_question(), Some(0));
        progress.score(0, true);
        assert_eq!(progress.next_question(), Some(1));
        for i in 1..QUESTION_COUNT {
            progress.score(i, false);
        }
        assert_eq!(progress.next_question(), None);
    }

    #[test]
    fn points_never_exceed_answered_count() {
        let mut progress = TriviaProgress::default();
        progress.score(0, true);
        progress.score(1, false);
        progress.score(2, true);
        assert_eq!(progress.points, 2);
        assert!(progress.points as usize <= progress.answered_count());
    }

    #[test]
    fn scoring_an_answered_question_changes_nothing() {
        let mut progress = TriviaProgress::default();
        progress.score(0, false);
        let before = progress;
        progress.score(0, true);
        assert_eq!(progress, before);
    }
}

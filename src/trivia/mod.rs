mod bank;
mod progress;

pub use bank::{questions, Question, QUESTION_COUNT};
pub use progress::TriviaProgress;

mod dispatcher;
mod replies;
mod stage;

pub use dispatcher::{step, Pacing, Snapshot, StepOutcome, TurnDispatcher, TurnEvent};
pub use stage::{ConversationStage, Stage};

#[cfg(test)]
pub use replies::{VERDICT_GOOD, VERDICT_HARSH, VERDICT_PERFECT};

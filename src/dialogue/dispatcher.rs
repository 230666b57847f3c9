use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::PacingConfig;
use crate::dialogue::replies;
use crate::dialogue::stage::{ConversationStage, Stage};
use crate::traits::store_prelude::*;
use crate::traits::{Channel, StateStore};
use crate::trivia::{self, TriviaProgress, QUESTION_COUNT};
use crate::types::{Activity, ActivityKind, Reply, UserProfile};

/// The trigger fed into the state machine for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnEvent {
    /// A text message from the user.
    Message { text: String },
    /// Any non-message activity. Produces at most a reacknowledgment and
    /// never mutates state.
    Other,
}

impl From<&Activity> for TurnEvent {
    fn from(activity: &Activity) -> Self {
        match activity.kind {
            ActivityKind::Message => TurnEvent::Message {
                text: activity.text.clone(),
            },
            ActivityKind::Other => TurnEvent::Other,
        }
    }
}

/// Immutable view of all persisted records for one turn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub stage: ConversationStage,
    pub profile: UserProfile,
    pub progress: TriviaProgress,
}

/// Everything one turn produced: the replies to deliver, the records to
/// write back, and which of the user-scoped records actually changed.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub replies: Vec<Reply>,
    pub stage: ConversationStage,
    pub profile: UserProfile,
    pub progress: TriviaProgress,
    pub profile_dirty: bool,
    pub progress_dirty: bool,
    /// Whether the stage record is saved and committed. True for every
    /// message turn regardless of branch; false for non-message activities.
    pub persist: bool,
}

/// Pauses applied between consecutive sends within a turn.
#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    pub feedback: Duration,
    pub score: Duration,
}

impl Pacing {
    /// No pauses; tests run on this.
    #[allow(dead_code)]
    pub const fn zero() -> Self {
        Self {
            feedback: Duration::ZERO,
            score: Duration::ZERO,
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            feedback: Duration::from_millis(2000),
            score: Duration::from_millis(1000),
        }
    }
}

impl From<&PacingConfig> for Pacing {
    fn from(config: &PacingConfig) -> Self {
        Self {
            feedback: Duration::from_millis(config.feedback_ms),
            score: Duration::from_millis(config.score_ms),
        }
    }
}

/// Advance the state machine by one turn.
///
/// Pure function of (snapshot, event): identical inputs produce identical
/// outputs. Exactly one stage handler runs per message, chosen once up
/// front — completing an earlier stage never cascades into a later one
/// within the same turn.
pub fn step(snapshot: &Snapshot, event: &TurnEvent, pacing: Pacing) -> StepOutcome {
    let mut out = StepOutcome {
        replies: Vec::new(),
        stage: snapshot.stage.clone(),
        profile: snapshot.profile.clone(),
        progress: snapshot.progress,
        profile_dirty: false,
        progress_dirty: false,
        persist: false,
    };

    let text = match event {
        TurnEvent::Message { text } => text,
        TurnEvent::Other => {
            if let Some(name) = &out.profile.name {
                out.replies.push(Reply::now(replies::still_here(name)));
            }
            return out;
        }
    };

    out.persist = true;
    out.stage.turn_count += 1;

    let current = Stage::of(&snapshot.stage, &snapshot.progress);
    debug!(stage = ?current, turn = out.stage.turn_count, "dispatching turn");

    match current {
        Stage::Greeting => greet(&mut out),
        Stage::NameCapture => capture_name(&mut out, text),
        Stage::GameOffer => offer_game(&mut out),
        Stage::GameDecision => decide_game(&mut out, text),
        Stage::Question(index) => score_answer(&mut out, index, text, pacing),
        Stage::Wrapped => repeat_offer(&mut out),
    }

    out
}

fn greet(out: &mut StepOutcome) {
    out.replies.push(Reply::now(replies::GREETING));
    out.stage.said_hello = true;
}

fn capture_name(out: &mut StepOutcome, text: &str) {
    // The inbound text is the name, stored verbatim.
    out.profile.name = Some(text.to_string());
    out.profile_dirty = true;
    out.replies.push(Reply::now(replies::name_ack(text)));
    out.stage.greeted_name = true;
}

fn offer_game(out: &mut StepOutcome) {
    out.replies
        .push(Reply::now(replies::game_offer(out.profile.display_name())));
    out.stage.offer_game = true;
    out.stage.play_a_game = true;
}

fn decide_game(out: &mut StepOutcome, text: &str) {
    if text.to_lowercase() == "yes" {
        out.replies
            .push(Reply::now(replies::first_question(&trivia::questions()[0])));
    } else {
        out.replies.push(Reply::now(replies::DECLINE));
    }
    out.stage.play_a_game = false;
}

fn score_answer(out: &mut StepOutcome, index: usize, text: &str, pacing: Pacing) {
    let question = &trivia::questions()[index];
    let correct = question.is_correct(text);
    out.progress.score(index, correct);
    out.progress_dirty = true;

    let feedback = if correct {
        question.right_feedback
    } else {
        question.wrong_feedback
    };
    out.replies.push(Reply::now(replies::FEEDBACK_LEAD_IN));
    out.replies.push(Reply::after(pacing.feedback, feedback));
    out.replies
        .push(Reply::now(replies::score_report(out.progress.points)));

    if index + 1 < QUESTION_COUNT {
        out.replies.push(Reply::after(
            pacing.score,
            replies::next_question(index + 1, &trivia::questions()[index + 1]),
        ));
    } else {
        out.replies
            .push(Reply::after(pacing.score, replies::verdict(out.progress.points)));
    }
}

fn repeat_offer(out: &mut StepOutcome) {
    out.replies
        .push(Reply::now(replies::repeat_offer(out.profile.display_name())));
}

/// The turn-processing engine: load records, run the pure step, deliver the
/// replies with pacing, write back what changed.
pub struct TurnDispatcher {
    state: Arc<dyn StateStore>,
    pacing: Pacing,
}

impl TurnDispatcher {
    pub fn new(state: Arc<dyn StateStore>, pacing: Pacing) -> Self {
        Self { state, pacing }
    }

    /// Process one inbound activity to completion.
    ///
    /// The host must serialize calls per conversation; no locking happens
    /// here. Delivery honors `cancel` between a pause and the send that
    /// follows it: once cancelled, remaining replies are dropped but the
    /// turn's state is still written back and committed.
    pub async fn handle_turn(
        &self,
        activity: &Activity,
        channel: &dyn Channel,
        cancel: &CancellationToken,
    ) -> anyhow::Result<()> {
        let snapshot = Snapshot {
            stage: self.state.load_stage(&activity.conversation_id).await?,
            profile: self.state.load_profile(&activity.user_id).await?,
            progress: self.state.load_progress(&activity.user_id).await?,
        };

        let event = TurnEvent::from(activity);
        let outcome = step(&snapshot, &event, self.pacing);

        deliver(channel, &activity.conversation_id, &outcome.replies, cancel).await?;

        if outcome.persist {
            if outcome.profile_dirty {
                self.state
                    .save_profile(&activity.user_id, &outcome.profile)
                    .await?;
            }
            if outcome.progress_dirty {
                self.state
                    .save_progress(&activity.user_id, &outcome.progress)
                    .await?;
            }
            self.state
                .save_stage(&activity.conversation_id, &outcome.stage)
                .await?;
            self.state.commit(&activity.conversation_id).await?;
        }

        Ok(())
    }
}

/// Send replies in order, honoring per-reply pauses. The cancellation token
/// is checked between each pause and the send that follows it, so a
/// cancelled turn stops pacing out feedback instead of running to the end.
async fn deliver(
    channel: &dyn Channel,
    conversation_id: &str,
    replies: &[Reply],
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    for reply in replies {
        if let Some(delay) = reply.delay_before {
            tokio::time::sleep(delay).await;
        }
        if cancel.is_cancelled() {
            debug!(conversation_id, "delivery cancelled mid-turn");
            return Ok(());
        }
        channel.send_text(conversation_id, &reply.text).await?;
    }
    Ok(())
}

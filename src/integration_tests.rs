//! End-to-end turn flow tests: real dispatcher, in-memory state, capturing
//! channel. Exercises whole conversations rather than single steps.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::dialogue::{Pacing, TurnDispatcher, VERDICT_GOOD, VERDICT_PERFECT};
use crate::state::MemoryStateStore;
use crate::traits::{Channel, ProfileStore, ProgressStore, StageStore};
use crate::types::Activity;

/// Test channel that records every outbound message in order.
struct CapturingChannel {
    messages: Mutex<Vec<(String, String)>>, // (conversation_id, text)
}

impl CapturingChannel {
    fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
        }
    }

    /// Take everything sent since the last drain.
    async fn drain(&self) -> Vec<String> {
        self.messages
            .lock()
            .await
            .drain(..)
            .map(|(_, text)| text)
            .collect()
    }
}

#[async_trait]
impl Channel for CapturingChannel {
    fn name(&self) -> String {
        "test".to_string()
    }

    async fn send_text(&self, conversation_id: &str, text: &str) -> anyhow::Result<()> {
        self.messages
            .lock()
            .await
            .push((conversation_id.to_string(), text.to_string()));
        Ok(())
    }
}

struct Harness {
    state: Arc<MemoryStateStore>,
    dispatcher: TurnDispatcher,
    channel: CapturingChannel,
    cancel: CancellationToken,
}

impl Harness {
    fn new() -> Self {
        let state = Arc::new(MemoryStateStore::new());
        let dispatcher = TurnDispatcher::new(state.clone(), Pacing::zero());
        Self {
            state,
            dispatcher,
            channel: CapturingChannel::new(),
            cancel: CancellationToken::new(),
        }
    }

    /// Send one message turn and return the replies it produced.
    async fn say(&self, text: &str) -> Vec<String> {
        let activity = Activity::message("user-1", "conv-1", text);
        self.dispatcher
            .handle_turn(&activity, &self.channel, &self.cancel)
            .await
            .unwrap();
        self.channel.drain().await
    }

    /// Send one non-message activity and return the replies it produced.
    async fn event(&self) -> Vec<String> {
        let activity = Activity::other("user-1", "conv-1");
        self.dispatcher
            .handle_turn(&activity, &self.channel, &self.cancel)
            .await
            .unwrap();
        self.channel.drain().await
    }
}

#[tokio::test]
async fn perfect_run_from_hello_to_verdict() {
    let h = Harness::new();

    let replies = h.say("hello").await;
    assert_eq!(replies, vec!["Hi, my name is Bot, what is your name?"]);

    let replies = h.say("Alice").await;
    assert_eq!(replies, vec!["Hi, Alice, it is nice to meet you!"]);

    let replies = h.say("nice to meet you too").await;
    assert_eq!(
        replies,
        vec!["Alice, do you want to play a lucky C# developer game?"]
    );

    let replies = h.say("yes").await;
    assert_eq!(replies.len(), 1);
    assert!(replies[0].contains("signed byte"));
    assert!(replies[0].contains("D : ToInt32"));

    for answer in ["b", "c", "b", "d"] {
        let replies = h.say(answer).await;
        assert_eq!(replies[1], "right answer!!!");
        assert!(replies[3].contains("question"));
    }

    let replies = h.say("a").await;
    assert_eq!(replies[2], "Your current number of points is 5");
    assert_eq!(replies[3], VERDICT_PERFECT);

    // Terminal stage from here on.
    let replies = h.say("that was fun").await;
    assert_eq!(
        replies,
        vec!["Alice, do you want to play a lucky trivial game?"]
    );

    // Persisted state reflects the finished game.
    let progress = h.state.load_progress("user-1").await.unwrap();
    assert_eq!(progress.points, 5);
    assert_eq!(progress.answered, [true; 5]);
    let stage = h.state.load_stage("conv-1").await.unwrap();
    assert_eq!(stage.turn_count, 10);
}

#[tokio::test]
async fn four_right_answers_get_the_good_relationship_verdict() {
    let h = Harness::new();
    h.say("hi").await;
    h.say("Alice").await;
    h.say("ok").await;
    h.say("yes").await;

    for answer in ["b", "c", "b", "d"] {
        h.say(answer).await;
    }
    let replies = h.say("wrong one").await;
    assert_eq!(replies[2], "Your current number of points is 4");
    assert_eq!(replies[3], VERDICT_GOOD);
}

#[tokio::test]
async fn declining_the_game_leaves_the_quiz_reachable() {
    let h = Harness::new();
    h.say("hi").await;
    h.say("Bob").await;
    h.say("ok").await;

    let replies = h.say("no thanks").await;
    assert_eq!(
        replies,
        vec!["Unfortunately there is no more functionality! Goodbye!"]
    );

    // The decline only clears the gate; the next message starts question 1.
    let stage = h.state.load_stage("conv-1").await.unwrap();
    assert!(!stage.play_a_game);
    let progress = h.state.load_progress("user-1").await.unwrap();
    assert_eq!(progress.answered, [false; 5]);
}

#[tokio::test]
async fn non_message_activities_never_mutate_state() {
    let h = Harness::new();

    // Before a name is on file: silence.
    assert!(h.event().await.is_empty());

    h.say("hi").await;
    h.say("Alice").await;
    let turn_count_before = h.state.load_stage("conv-1").await.unwrap().turn_count;

    let replies = h.event().await;
    assert_eq!(replies, vec!["We hope you are still here, Alice"]);

    let stage = h.state.load_stage("conv-1").await.unwrap();
    assert_eq!(stage.turn_count, turn_count_before);
}

#[tokio::test]
async fn profile_and_progress_are_keyed_by_user() {
    let h = Harness::new();
    h.say("hi").await;
    h.say("Alice").await;

    assert_eq!(
        h.state.load_profile("user-1").await.unwrap().name.as_deref(),
        Some("Alice")
    );
    assert_eq!(h.state.load_profile("user-2").await.unwrap().name, None);
}

#[tokio::test]
async fn cancelled_turn_drops_replies_but_still_persists() {
    let h = Harness::new();
    h.cancel.cancel();

    let replies = h.say("hello").await;
    assert!(replies.is_empty());

    // The greeting stage still completed and was committed.
    let stage = h.state.load_stage("conv-1").await.unwrap();
    assert!(stage.said_hello);
    assert_eq!(stage.turn_count, 1);
}

//! Every outbound message text in one place.

use crate::trivia::Question;

pub const GREETING: &str = "Hi, my name is Bot, what is your name?";

pub const DECLINE: &str = "Unfortunately there is no more functionality! Goodbye!";

/// Sent first on every scored answer; the right/wrong verdict follows after
/// a pause.
pub const FEEDBACK_LEAD_IN: &str = "And this is ";

pub const VERDICT_HARSH: &str = "Unfortunately, you and C# are not even acquaintances yet.";
pub const VERDICT_GOOD: &str = "Man, you are in good relationship with C#!";
pub const VERDICT_PERFECT: &str = "You are you, object?";

pub fn name_ack(name: &str) -> String {
    format!("Hi, {name}, it is nice to meet you!")
}

pub fn game_offer(name: &str) -> String {
    format!("{name}, do you want to play a lucky C# developer game?")
}

pub fn repeat_offer(name: &str) -> String {
    format!("{name}, do you want to play a lucky trivial game?")
}

pub fn still_here(name: &str) -> String {
    format!("We hope you are still here, {name}")
}

pub fn score_report(points: u32) -> String {
    format!("Your current number of points is {points}")
}

pub fn first_question(question: &Question) -> String {
    format!("That's great!\nSo the first question is:\n{}", question.full_text())
}

pub fn next_question(index: usize, question: &Question) -> String {
    const ORDINALS: [&str; 5] = ["first", "second", "third", "fourth", "fifth"];
    format!(
        "And now it is time for the {} question:\n{}",
        ORDINALS[index],
        question.full_text()
    )
}

/// Closing verdict after the fifth answer is scored.
pub fn verdict(points: u32) -> &'static str {
    match points {
        0..=2 => VERDICT_HARSH,
        3..=4 => VERDICT_GOOD,
        _ => VERDICT_PERFECT,
    }
}

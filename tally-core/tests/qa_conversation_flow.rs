//! QA tests for the conversational tracking flow.
//!
//! These walk full user scenarios through the public session API:
//! - staging via tracking utterances
//! - restaging the same item with a new value
//! - help, fallback, and no-match replies
//! - the category-mention gate on matching

use tally_core::testing::{assert_ledger_empty, assert_staged, assert_staged_count, TestHarness};
use tally_core::{Intent, Sender, SessionError};

#[test]
fn qa_track_calories_end_to_end() {
    let mut harness = TestHarness::new();
    let reply = harness.say("Track 2000 calories in Nutrition");

    assert_eq!(reply.intent, Intent::Tracking);
    assert_eq!(
        reply.text,
        "I'll track Calories as 2000 kcal in Nutrition. Anything else you'd like to track?"
    );

    let (nutrition, calories) = harness.ids("Nutrition", "Calories");
    assert_staged_count(&harness, 1);
    assert_staged(&harness, nutrition, calories, "2000");
}

#[test]
fn qa_restating_updates_value_in_place() {
    let mut harness = TestHarness::new();
    harness.say("Track 2000 calories in Nutrition");
    harness.say("Log 8000 steps in Fitness");
    harness.say("Track 2200 calories in Nutrition");

    // Still two entries; calories kept its original position with the
    // latest value.
    assert_staged_count(&harness, 2);
    let (nutrition, calories) = harness.ids("Nutrition", "Calories");
    let first = &harness.session.staged()[0];
    assert_eq!((first.category_id, first.item_id), (nutrition, calories));
    assert_eq!(first.value, "2200");
}

#[test]
fn qa_item_without_category_mention_matches_nothing() {
    // "Steps" exists, but its category "Fitness" is not in the utterance.
    let mut harness = TestHarness::new();
    let reply = harness.say("Log 50 Steps");

    assert_eq!(reply.intent, Intent::Tracking);
    assert!(reply.candidates.is_empty());
    assert_ledger_empty(&harness);
    assert_eq!(
        reply.text,
        "I'm not sure what you want to track. You can track items from these categories: Fitness, Nutrition. Can you be more specific?"
    );
}

#[test]
fn qa_one_number_fans_out_to_every_matched_item() {
    // Known product behavior: extraction is global to the utterance, so
    // both items capture the same literal.
    let mut harness = TestHarness::new();
    let reply = harness.say("Track 100 calories and protein in Nutrition");

    assert_eq!(reply.candidates.len(), 2);
    assert_staged_count(&harness, 2);

    let (nutrition, calories) = harness.ids("Nutrition", "Calories");
    let (_, protein) = harness.ids("Nutrition", "Protein");
    assert_staged(&harness, nutrition, calories, "100");
    assert_staged(&harness, nutrition, protein, "100");
}

#[test]
fn qa_help_request_appends_one_assistant_turn() {
    let mut harness = TestHarness::new();
    let before = harness.turn_count();

    let reply = harness.say("How do I use this?");

    assert_eq!(reply.intent, Intent::Help);
    assert!(reply.text.contains("Track 2000 calories in Nutrition"));
    assert_ledger_empty(&harness);

    // Exactly one user turn and one assistant turn were appended.
    assert_eq!(harness.turn_count(), before + 2);
    let turns = harness.session.turns();
    assert_eq!(turns[turns.len() - 2].sender, Sender::User);
    assert_eq!(turns[turns.len() - 1].sender, Sender::Assistant);
}

#[test]
fn qa_unclassifiable_utterance_falls_back() {
    // Neither a known category name nor any intent keyword.
    let mut harness = TestHarness::new();
    let reply = harness.say("good evening to you");

    assert_eq!(reply.intent, Intent::Fallback);
    assert_eq!(
        reply.text,
        "What would you like to track today? You can tell me something like 'Track 60kg weight in Fitness'."
    );
    assert_ledger_empty(&harness);
}

#[test]
fn qa_blank_utterance_is_rejected_without_a_turn() {
    let mut harness = TestHarness::new();
    let before = harness.turn_count();

    assert!(matches!(harness.try_say(""), Err(SessionError::EmptyInput)));
    assert!(matches!(
        harness.try_say("   \t  "),
        Err(SessionError::EmptyInput)
    ));
    assert_eq!(harness.turn_count(), before);
}

#[test]
fn qa_conversation_opens_with_greeting() {
    let harness = TestHarness::new();
    assert_eq!(harness.turn_count(), 1);
    assert_eq!(
        harness.last_reply(),
        Some("Hi there! What would you like to track today?")
    );
}

#[test]
fn qa_removing_a_staged_entry_shifts_positions() {
    let mut harness = TestHarness::new();
    harness.say("Track 2000 calories in Nutrition");
    harness.say("Log 8000 steps in Fitness");
    harness.say("Record 70 weight in Fitness");

    let removed = harness.session.remove_staged(1).unwrap();
    assert_eq!(removed.value, "8000");

    assert_staged_count(&harness, 2);
    assert_eq!(harness.session.staged()[0].value, "2000");
    assert_eq!(harness.session.staged()[1].value, "70");

    // Removing past the end is a caller error, not a silent no-op.
    assert!(matches!(
        harness.session.remove_staged(5),
        Err(SessionError::Ledger(_))
    ));
}

#[test]
fn qa_decimal_values_are_captured_literally() {
    let mut harness = TestHarness::new();
    let reply = harness.say("Record 72.5 weight in Fitness");

    assert_eq!(
        reply.text,
        "I'll track Weight as 72.5 kg in Fitness. Anything else you'd like to track?"
    );
    let (fitness, weight) = harness.ids("Fitness", "Weight");
    assert_staged(&harness, fitness, weight, "72.5");
}

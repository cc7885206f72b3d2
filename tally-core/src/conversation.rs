//! Chat turns, intent classification, and assistant reply text.
//!
//! The conversation history is an append-only sequence of turns; turns
//! are never rewritten once recorded. Reply text lives here so every
//! surface renders the same wording.

use crate::catalog::Catalog;
use crate::matcher::CandidateMatch;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for chat turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnId(pub Uuid);

impl TurnId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TurnId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who authored a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// One message in the conversation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub id: TurnId,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl ChatTurn {
    fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: TurnId::new(),
            text: text.into(),
            sender,
            timestamp: Utc::now(),
        }
    }
}

/// Append-only conversation history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationLog {
    turns: Vec<ChatTurn>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a user turn.
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.turns.push(ChatTurn::new(Sender::User, text));
    }

    /// Record an assistant turn.
    pub fn push_assistant(&mut self, text: impl Into<String>) {
        self.turns.push(ChatTurn::new(Sender::Assistant, text));
    }

    /// The full history, oldest first.
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&ChatTurn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

// ============================================================================
// Intent Classification
// ============================================================================

/// What the user appears to want from one utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// A request to stage one or more measurements.
    Tracking,
    /// A request for usage guidance.
    Help,
    /// Anything the classifier cannot place.
    Fallback,
}

/// Keywords that signal a tracking request. Checked before help keywords,
/// so "how do I log steps" classifies as tracking.
const TRACKING_KEYWORDS: [&str; 3] = ["track", "log", "record"];

/// Keywords that signal a request for help.
const HELP_KEYWORDS: [&str; 3] = ["help", "how", "?"];

/// Classify an utterance by case-insensitive keyword containment.
pub fn classify_intent(utterance: &str) -> Intent {
    let text = utterance.to_lowercase();
    if TRACKING_KEYWORDS.iter().any(|k| text.contains(k)) {
        Intent::Tracking
    } else if HELP_KEYWORDS.iter().any(|k| text.contains(k)) {
        Intent::Help
    } else {
        Intent::Fallback
    }
}

// ============================================================================
// Reply Text
// ============================================================================

/// Default greeting that opens a fresh conversation.
pub const GREETING: &str = "Hi there! What would you like to track today?";

/// Fixed instructional reply for help requests.
pub const HELP_REPLY: &str = "To track something, try saying something like 'Track 2000 calories in Nutrition' or 'Log 8000 steps in Fitness'. You can see all available categories and items in the Categories section.";

/// Fixed prompt for utterances the classifier cannot place.
pub const FALLBACK_REPLY: &str = "What would you like to track today? You can tell me something like 'Track 60kg weight in Fitness'.";

/// One confirmation clause per staged candidate, then a closing prompt.
///
/// Candidates whose ids no longer resolve in the catalog contribute no
/// clause; the catalog is read-only for the duration of a turn, so that
/// only happens if a caller fabricates candidates.
pub fn tracking_reply(candidates: &[CandidateMatch], catalog: &Catalog) -> String {
    let mut clauses = Vec::with_capacity(candidates.len() + 1);
    for candidate in candidates {
        let Some(category) = catalog.category(candidate.category_id) else {
            continue;
        };
        let Some(item) = catalog.item(candidate.category_id, candidate.item_id) else {
            continue;
        };
        let unit = item
            .unit
            .as_deref()
            .map(|u| format!(" {u}"))
            .unwrap_or_default();
        clauses.push(format!(
            "I'll track {} as {}{} in {}.",
            item.name, candidate.value, unit, category.name
        ));
    }
    clauses.push("Anything else you'd like to track?".to_string());
    clauses.join(" ")
}

/// Clarification reply when a tracking request matched nothing.
pub fn no_match_reply(catalog: &Catalog) -> String {
    let names = catalog.category_names().join(", ");
    format!(
        "I'm not sure what you want to track. You can track items from these categories: {names}. Can you be more specific?"
    )
}

/// Confirmation appended to the chat after a successful commit.
pub fn commit_reply(count: usize) -> String {
    let noun = if count == 1 { "item" } else { "items" };
    format!("Great! I've logged {count} {noun} for you. What else would you like to track?")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample_catalog;
    use crate::matcher::scan;

    #[test]
    fn test_log_appends_in_order() {
        let mut log = ConversationLog::new();
        log.push_assistant(GREETING);
        log.push_user("Track 2000 calories in Nutrition");

        assert_eq!(log.len(), 2);
        assert_eq!(log.turns()[0].sender, Sender::Assistant);
        assert_eq!(log.turns()[1].sender, Sender::User);
        assert_eq!(log.last().unwrap().text, "Track 2000 calories in Nutrition");
    }

    #[test]
    fn test_turn_ids_distinct() {
        let mut log = ConversationLog::new();
        log.push_user("one");
        log.push_user("two");
        assert_ne!(log.turns()[0].id, log.turns()[1].id);
    }

    #[test]
    fn test_classify_tracking() {
        assert_eq!(classify_intent("Track 2000 calories"), Intent::Tracking);
        assert_eq!(classify_intent("please LOG my steps"), Intent::Tracking);
        assert_eq!(classify_intent("record 70 kg"), Intent::Tracking);
    }

    #[test]
    fn test_classify_tracking_beats_help() {
        // Contains both "how" and "log": tracking wins.
        assert_eq!(classify_intent("how do I log steps"), Intent::Tracking);
    }

    #[test]
    fn test_classify_help() {
        assert_eq!(classify_intent("How do I use this?"), Intent::Help);
        assert_eq!(classify_intent("help"), Intent::Help);
        assert_eq!(classify_intent("what is this?"), Intent::Help);
    }

    #[test]
    fn test_classify_fallback() {
        assert_eq!(classify_intent("good morning"), Intent::Fallback);
        assert_eq!(classify_intent("2000 calories"), Intent::Fallback);
    }

    #[test]
    fn test_tracking_reply_single() {
        let catalog = sample_catalog();
        let report = scan("Track 2000 calories in Nutrition", &catalog);
        let reply = tracking_reply(&report.candidates, &catalog);
        assert_eq!(
            reply,
            "I'll track Calories as 2000 kcal in Nutrition. Anything else you'd like to track?"
        );
    }

    #[test]
    fn test_tracking_reply_without_unit() {
        let mut catalog = sample_catalog();
        let nutrition = catalog.categories()[1].id;
        let calories = catalog.categories()[1].items[0].id;
        catalog.set_item_unit(nutrition, calories, None);

        let report = scan("Track 2000 calories in Nutrition", &catalog);
        let reply = tracking_reply(&report.candidates, &catalog);
        assert_eq!(
            reply,
            "I'll track Calories as 2000 in Nutrition. Anything else you'd like to track?"
        );
    }

    #[test]
    fn test_tracking_reply_multiple_clauses() {
        let catalog = sample_catalog();
        let report = scan("Track 100 calories and protein in Nutrition", &catalog);
        let reply = tracking_reply(&report.candidates, &catalog);
        assert_eq!(
            reply,
            "I'll track Calories as 100 kcal in Nutrition. I'll track Protein as 100 g in Nutrition. Anything else you'd like to track?"
        );
    }

    #[test]
    fn test_no_match_reply_lists_categories() {
        let catalog = sample_catalog();
        assert_eq!(
            no_match_reply(&catalog),
            "I'm not sure what you want to track. You can track items from these categories: Fitness, Nutrition. Can you be more specific?"
        );
    }

    #[test]
    fn test_commit_reply_pluralizes() {
        assert_eq!(
            commit_reply(1),
            "Great! I've logged 1 item for you. What else would you like to track?"
        );
        assert_eq!(
            commit_reply(3),
            "Great! I've logged 3 items for you. What else would you like to track?"
        );
    }
}

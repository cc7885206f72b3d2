//! Scripted walkthrough of a tracking conversation.

use tally_core::{SessionConfig, Sender, SessionError, TrackerSession};

fn main() -> Result<(), SessionError> {
    let mut session = TrackerSession::in_memory(SessionConfig::new());

    let script = [
        "How do I use this?",
        "Track 2000 calories in Nutrition",
        "Log 8000 steps in Fitness",
        "Track 2200 calories in Nutrition",
    ];

    for utterance in script {
        session.submit(utterance)?;
    }

    println!("=== Conversation ===\n");
    for turn in session.turns() {
        let who = match turn.sender {
            Sender::User => "you",
            Sender::Assistant => "tally",
        };
        println!("[{who}] {}", turn.text);
    }

    println!("\n=== Staged for review ===\n");
    for (index, entry) in session.staged().iter().enumerate() {
        let name = session
            .catalog()
            .item(entry.category_id, entry.item_id)
            .map(|i| i.name.as_str())
            .unwrap_or("?");
        println!("{index}. {name}: {}", entry.value);
    }

    let receipt = session.commit()?;
    println!(
        "\nCommitted {} records at {}",
        receipt.committed, receipt.timestamp
    );

    Ok(())
}

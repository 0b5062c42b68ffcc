use anyhow::Result;
use textcleaner::{
    EditSession, HistoryEntry, MemoryStore, PlainRenderer, Range, Replacement, RuleHistory,
    TranslationStore,
};

fn main() -> Result<()> {
    let message = include_str!("../fixtures/text/message_before.txt");

    println!("=== Original Message ===");
    println!("{}", message);

    let ranges = vec![Range::new("<think>", "</think>"), Range::new("(OOC:", ")")];
    let replacements = vec![Replacement::new("traveller", "traveler")];

    // Clean the message
    let mut session = EditSession::new(message);
    session.process(&ranges, &replacements);

    println!("\n=== Cleaned Message ===");
    println!("{}", session.current());

    // Compare it with the original
    let pair = session.compare_with(&PlainRenderer::default())?;

    println!("\n=== Original (marked) ===");
    println!("{}", pair.old);
    println!("\n=== Cleaned (marked) ===");
    println!("{}", pair.new);

    // Remember the rules and keep the result
    let mut history = RuleHistory::new();
    let final_text = session.commit(&mut history, &ranges, &replacements);
    assert_eq!(final_text, session.current());

    println!("\n=== Rule History ===");
    for entry in history.entries() {
        println!("{}", entry);
    }
    assert!(matches!(history.entries().next(), Some(HistoryEntry::Replace(_))));

    let mut store = MemoryStore::new();
    session.commit_translation(&mut store)?;
    assert_eq!(store.get(message)?.as_deref(), Some(session.current()));

    Ok(())
}

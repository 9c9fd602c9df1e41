//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `tallynote_core` linkage.
//! - Exercise one counter and one notes use case against an in-memory store.

use tallynote_core::{
    CounterService, KvCounterRepository, KvNotesRepository, MemoryStore, NotesService,
};

fn main() {
    println!("tallynote_core ping={}", tallynote_core::ping());
    println!("tallynote_core version={}", tallynote_core::core_version());

    let store = MemoryStore::new();
    let counters = CounterService::new(KvCounterRepository::new(&store));
    match counters.increment_counter() {
        Ok(counter) => println!("counter value={}", counter.value().number()),
        Err(err) => println!("counter error={} message={err}", err.code()),
    }

    let notes = NotesService::new(KvNotesRepository::new(&store));
    match notes.add_note("smoke note") {
        Ok(collection) => println!(
            "notes count={} capacity={}",
            collection.len(),
            collection.capacity()
        ),
        Err(err) => println!("notes error={} message={err}", err.code()),
    }
}

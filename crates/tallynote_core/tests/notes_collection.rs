use proptest::prelude::*;
use std::collections::HashSet;
use tallynote_core::{
    Failure, Note, NoteContent, NoteId, NotesCollection, DEFAULT_NOTES_CAPACITY,
};

fn note(text: &str) -> Note {
    Note::create(NoteContent::create(text).unwrap())
}

fn texts(collection: &NotesCollection) -> Vec<&str> {
    collection
        .iter()
        .map(|note| note.content().text())
        .collect()
}

#[test]
fn empty_collection_uses_default_capacity() {
    let collection = NotesCollection::empty();
    assert!(collection.is_empty());
    assert_eq!(collection.capacity(), DEFAULT_NOTES_CAPACITY);
    assert_eq!(DEFAULT_NOTES_CAPACITY, 100);
}

#[test]
fn add_appends_in_insertion_order() {
    let collection = NotesCollection::empty()
        .add(note("one"))
        .unwrap()
        .add(note("two"))
        .unwrap()
        .add(note("three"))
        .unwrap();

    assert_eq!(texts(&collection), vec!["one", "two", "three"]);
}

#[test]
fn add_rejects_duplicate_id() {
    let first = note("one");
    let collection = NotesCollection::empty().add(first.clone()).unwrap();

    let duplicate = first.update_content("other text").unwrap();
    let err = collection.add(duplicate).unwrap_err();
    assert_eq!(err, Failure::DuplicateId { id: first.id() });
}

#[test]
fn add_rejects_when_full() {
    let mut collection = NotesCollection::with_capacity(3);
    for idx in 0..3 {
        collection = collection.add(note(&format!("note {idx}"))).unwrap();
    }

    let err = collection.add(note("overflow")).unwrap_err();
    assert_eq!(err, Failure::CapacityExceeded { capacity: 3 });
    assert_eq!(collection.len(), 3);
}

#[test]
fn remove_drops_only_the_target() {
    let (a, b, c) = (note("a"), note("b"), note("c"));
    let collection = NotesCollection::empty()
        .add(a)
        .unwrap()
        .add(b.clone())
        .unwrap()
        .add(c)
        .unwrap();

    let removed = collection.remove(b.id()).unwrap();
    assert_eq!(texts(&removed), vec!["a", "c"]);
    assert!(!removed.contains(b.id()));
}

#[test]
fn remove_unknown_id_is_not_found() {
    let missing = NoteId::generate();
    let err = NotesCollection::empty().remove(missing).unwrap_err();
    assert_eq!(err, Failure::NotFound { id: missing });
}

#[test]
fn archive_replaces_in_place() {
    let (a, b, c) = (note("a"), note("b"), note("c"));
    let collection = NotesCollection::empty()
        .add(a)
        .unwrap()
        .add(b.clone())
        .unwrap()
        .add(c)
        .unwrap();

    let archived = collection.archive(b.id()).unwrap();
    assert_eq!(texts(&archived), vec!["a", "b", "c"]);
    assert!(archived.items()[1].is_archived());
    assert!(!archived.items()[0].is_archived());
    assert!(!archived.items()[2].is_archived());

    let again = archived.archive(b.id()).unwrap();
    assert!(again.items()[1].is_archived());
}

#[test]
fn archive_unknown_id_is_not_found() {
    let missing = NoteId::generate();
    let collection = NotesCollection::empty().add(note("a")).unwrap();
    assert_eq!(
        collection.archive(missing).unwrap_err(),
        Failure::NotFound { id: missing }
    );
}

#[test]
fn toggle_archived_flips_back_and_forth() {
    let target = note("a");
    let collection = NotesCollection::empty().add(target.clone()).unwrap();

    let archived = collection.toggle_archived(target.id()).unwrap();
    assert!(archived.get(target.id()).unwrap().is_archived());

    let restored = archived.toggle_archived(target.id()).unwrap();
    assert!(!restored.get(target.id()).unwrap().is_archived());

    let unarchived = archived.unarchive(target.id()).unwrap();
    assert!(!unarchived.get(target.id()).unwrap().is_archived());
}

#[test]
fn update_content_keeps_position_and_identity() {
    let (a, b) = (note("a"), note("b"));
    let collection = NotesCollection::empty()
        .add(a.clone())
        .unwrap()
        .add(b)
        .unwrap();

    let updated = collection
        .update_content(a.id(), NoteContent::create("edited").unwrap())
        .unwrap();
    assert_eq!(texts(&updated), vec!["edited", "b"]);
    assert_eq!(updated.items()[0].created_at(), a.created_at());
}

proptest! {
    #[test]
    fn invariants_hold_for_any_operation_sequence(
        capacity in 0usize..6,
        ops in prop::collection::vec((0u8..3, 0usize..8), 0..40),
    ) {
        let pool: Vec<Note> = (0..8).map(|idx| note(&format!("note {idx}"))).collect();
        let mut collection = NotesCollection::with_capacity(capacity);

        for (kind, index) in ops {
            let target = &pool[index];
            let existed = collection.contains(target.id());
            let before_len = collection.len();

            let outcome = match kind {
                0 => collection.add(target.clone()),
                1 => collection.remove(target.id()),
                _ => collection.archive(target.id()),
            };

            match (kind, outcome) {
                (0, Ok(next)) => {
                    prop_assert!(!existed && before_len < capacity);
                    prop_assert_eq!(next.len(), before_len + 1);
                    collection = next;
                }
                (0, Err(Failure::CapacityExceeded { capacity: reported })) => {
                    prop_assert_eq!(reported, capacity);
                    prop_assert!(before_len >= capacity);
                }
                (0, Err(Failure::DuplicateId { id })) => {
                    prop_assert!(existed && before_len < capacity);
                    prop_assert_eq!(id, target.id());
                }
                (1, Ok(next)) => {
                    prop_assert!(existed);
                    prop_assert_eq!(next.len(), before_len - 1);
                    collection = next;
                }
                (_, Ok(next)) => {
                    prop_assert!(existed);
                    prop_assert_eq!(next.len(), before_len);
                    prop_assert!(next.get(target.id()).unwrap().is_archived());
                    collection = next;
                }
                (_, Err(Failure::NotFound { id })) => {
                    prop_assert!(kind != 0 && !existed);
                    prop_assert_eq!(id, target.id());
                }
                (_, Err(other)) => prop_assert!(false, "undocumented failure: {other}"),
            }

            let unique: HashSet<NoteId> = collection.iter().map(|note| note.id()).collect();
            prop_assert_eq!(unique.len(), collection.len());
            prop_assert!(collection.len() <= collection.capacity());
        }
    }
}

use std::cell::Cell;
use tallynote_core::{
    AddNote, ArchiveNote, ClearAllNotes, CoreResult, CounterService, DecrementCounter,
    DeleteNote, Failure, GetAllNotes, IncrementCounter, KeyValueStore, KvCounterRepository,
    KvNotesRepository, MemoryStore, Note, NoteContent, NoteId, NotesCollection,
    NotesRepository, NotesService, ResetCounter, UpdateNote, ValidationError,
    COUNTER_STORAGE_KEY, NOTES_STORAGE_KEY,
};

/// Notes repository that records how often it was called.
struct SpyRepository {
    inner: KvNotesRepository<MemoryStore>,
    loads: Cell<usize>,
    saves: Cell<usize>,
}

impl SpyRepository {
    fn new() -> Self {
        Self {
            inner: KvNotesRepository::new(MemoryStore::new()),
            loads: Cell::new(0),
            saves: Cell::new(0),
        }
    }
}

impl NotesRepository for SpyRepository {
    fn load(&self) -> CoreResult<NotesCollection> {
        self.loads.set(self.loads.get() + 1);
        self.inner.load()
    }

    fn save(&self, collection: &NotesCollection) -> CoreResult<()> {
        self.saves.set(self.saves.get() + 1);
        self.inner.save(collection)
    }

    fn clear(&self) -> CoreResult<()> {
        self.inner.clear()
    }
}

/// Repository that loads fine but refuses every write.
struct ReadOnlyRepository {
    collection: NotesCollection,
}

impl NotesRepository for ReadOnlyRepository {
    fn load(&self) -> CoreResult<NotesCollection> {
        Ok(self.collection.clone())
    }

    fn save(&self, _collection: &NotesCollection) -> CoreResult<()> {
        Err(Failure::storage("read-only"))
    }

    fn clear(&self) -> CoreResult<()> {
        Err(Failure::storage("read-only"))
    }
}

fn full_collection(capacity: usize) -> NotesCollection {
    (0..capacity).fold(NotesCollection::with_capacity(capacity), |acc, idx| {
        acc.add(Note::create(
            NoteContent::create(&format!("note {idx}")).unwrap(),
        ))
        .unwrap()
    })
}

fn assert_same_notes(left: &NotesCollection, right: &NotesCollection) {
    assert_eq!(left.len(), right.len());
    for (a, b) in left.iter().zip(right.iter()) {
        assert_eq!(a.id(), b.id());
        assert_eq!(a.content(), b.content());
        assert_eq!(a.created_at(), b.created_at());
        assert_eq!(a.is_archived(), b.is_archived());
    }
}

#[test]
fn add_note_on_empty_collection_succeeds() {
    let repo = KvNotesRepository::new(MemoryStore::new());

    let collection = AddNote::new(&repo).execute("Buy milk").unwrap();

    assert_eq!(collection.len(), 1);
    assert_eq!(collection.capacity(), 100);
    assert_eq!(collection.items()[0].content().text(), "Buy milk");
    assert_same_notes(&repo.load().unwrap(), &collection);
}

#[test]
fn add_note_validation_failure_never_touches_the_repository() {
    let repo = SpyRepository::new();

    let err = AddNote::new(&repo).execute("").unwrap_err();

    assert_eq!(err, Failure::Validation(ValidationError::EmptyContent));
    assert_eq!(repo.loads.get(), 0);
    assert_eq!(repo.saves.get(), 0);
}

#[test]
fn add_note_loads_once_and_saves_once_on_success() {
    let repo = SpyRepository::new();

    AddNote::new(&repo).execute("hello").unwrap();

    assert_eq!(repo.loads.get(), 1);
    assert_eq!(repo.saves.get(), 1);
}

#[test]
fn add_note_at_capacity_fails_and_leaves_persisted_state_unchanged() {
    let store = MemoryStore::new();
    let repo = KvNotesRepository::new(&store);
    repo.save(&full_collection(100)).unwrap();
    let before = store.get(NOTES_STORAGE_KEY).unwrap();

    let err = AddNote::new(&repo).execute("x").unwrap_err();

    assert_eq!(err, Failure::CapacityExceeded { capacity: 100 });
    assert_eq!(store.get(NOTES_STORAGE_KEY).unwrap(), before);
}

#[test]
fn save_failure_is_returned_unchanged() {
    let repo = ReadOnlyRepository {
        collection: NotesCollection::empty(),
    };

    let err = AddNote::new(&repo).execute("hello").unwrap_err();
    assert_eq!(err, Failure::storage("read-only"));
}

#[test]
fn archive_and_delete_round_trip_through_storage() {
    let repo = KvNotesRepository::new(MemoryStore::new());
    AddNote::new(&repo).execute("first").unwrap();
    let collection = AddNote::new(&repo).execute("second").unwrap();
    let first_id = collection.items()[0].id();

    let archived = ArchiveNote::new(&repo).execute(first_id).unwrap();
    assert!(archived.items()[0].is_archived());
    assert!(repo.load().unwrap().items()[0].is_archived());

    let deleted = DeleteNote::new(&repo).execute(first_id).unwrap();
    assert_eq!(deleted.len(), 1);
    assert_eq!(repo.load().unwrap().items()[0].content().text(), "second");
}

#[test]
fn mutating_unknown_note_fails_without_saving() {
    let repo = SpyRepository::new();
    let missing = NoteId::generate();

    assert_eq!(
        ArchiveNote::new(&repo).execute(missing).unwrap_err(),
        Failure::NotFound { id: missing }
    );
    assert_eq!(
        DeleteNote::new(&repo).execute(missing).unwrap_err(),
        Failure::NotFound { id: missing }
    );
    assert_eq!(
        UpdateNote::new(&repo).execute(missing, "text").unwrap_err(),
        Failure::NotFound { id: missing }
    );
    assert_eq!(repo.saves.get(), 0);
}

#[test]
fn update_note_validates_before_loading() {
    let repo = SpyRepository::new();

    let err = UpdateNote::new(&repo)
        .execute(NoteId::generate(), "   ")
        .unwrap_err();

    assert!(matches!(err, Failure::Validation(_)));
    assert_eq!(repo.loads.get(), 0);
}

#[test]
fn get_all_notes_is_idempotent() {
    let repo = KvNotesRepository::new(MemoryStore::new());
    AddNote::new(&repo).execute("a").unwrap();
    AddNote::new(&repo).execute("b").unwrap();

    let first = GetAllNotes::new(&repo).execute().unwrap();
    let second = GetAllNotes::new(&repo).execute().unwrap();

    assert_same_notes(&first, &second);
}

#[test]
fn clear_all_notes_empties_storage() {
    let repo = KvNotesRepository::new(MemoryStore::new());
    AddNote::new(&repo).execute("a").unwrap();

    ClearAllNotes::new(&repo).execute().unwrap();

    assert!(GetAllNotes::new(&repo).execute().unwrap().is_empty());
}

#[test]
fn decrement_at_zero_succeeds_with_zero() {
    let repo = KvCounterRepository::new(MemoryStore::new());

    let counter = DecrementCounter::new(&repo).execute().unwrap();

    assert_eq!(counter.value().number(), 0);
}

#[test]
fn counter_use_cases_persist_each_step() {
    let store = MemoryStore::new();
    let repo = KvCounterRepository::new(&store);

    IncrementCounter::new(&repo).execute().unwrap();
    let counter = IncrementCounter::new(&repo).execute().unwrap();
    assert_eq!(counter.value().number(), 2);
    assert_eq!(
        store.get(COUNTER_STORAGE_KEY).unwrap().as_deref(),
        Some(r#"{"value":2}"#)
    );

    let counter = ResetCounter::new(&repo).execute().unwrap();
    assert_eq!(counter.value().number(), 0);
    assert_eq!(
        store.get(COUNTER_STORAGE_KEY).unwrap().as_deref(),
        Some(r#"{"value":0}"#)
    );
}

#[test]
fn notes_service_exposes_entry_points() {
    let service = NotesService::new(KvNotesRepository::new(MemoryStore::new()));

    let added = service.add_note("  Buy milk  ").unwrap();
    let id = added.items()[0].id();
    assert_eq!(added.items()[0].content().text(), "Buy milk");

    let updated = service.update_note(id, "Buy oat milk").unwrap();
    assert_eq!(updated.items()[0].content().text(), "Buy oat milk");

    assert!(service.archive_note(id).unwrap().items()[0].is_archived());
    assert!(!service.toggle_archived(id).unwrap().items()[0].is_archived());
    assert!(service.delete_note(id).unwrap().is_empty());

    service.add_note("again").unwrap();
    service.clear_all_notes().unwrap();
    assert!(service.get_all_notes().unwrap().is_empty());
}

#[test]
fn counter_service_exposes_entry_points() {
    let service = CounterService::new(KvCounterRepository::new(MemoryStore::new()));

    assert_eq!(service.get_counter().unwrap().value().number(), 0);
    assert_eq!(service.increment_counter().unwrap().value().number(), 1);
    assert_eq!(service.decrement_counter().unwrap().value().number(), 0);
    assert_eq!(service.decrement_counter().unwrap().value().number(), 0);
    service.increment_counter().unwrap();
    assert_eq!(service.reset_counter().unwrap().value().number(), 0);
}

#[test]
fn concurrent_adds_through_one_service_are_not_lost() {
    let service = NotesService::new(KvNotesRepository::new(MemoryStore::new()));

    std::thread::scope(|scope| {
        for worker in 0..4 {
            let service = &service;
            scope.spawn(move || {
                for idx in 0..5 {
                    service.add_note(&format!("w{worker} n{idx}")).unwrap();
                }
            });
        }
    });

    assert_eq!(service.get_all_notes().unwrap().len(), 20);
}

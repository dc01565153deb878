use honeypad_core::{NoteFields, NoteQuery, NoteStore, StoreOptions};
use std::sync::Arc;
use std::thread;

const WRITES: usize = 200;

fn shared_store() -> Arc<NoteStore> {
    Arc::new(NoteStore::open_in_memory(&StoreOptions::default()).unwrap())
}

#[test]
fn store_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<NoteStore>();
}

#[test]
fn concurrent_inserts_never_expose_half_written_rows() {
    let store = shared_store();

    let writer = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for i in 0..WRITES {
                store
                    .insert(&NoteFields::new(format!("note-{i}"), format!("body-{i}")))
                    .unwrap();
            }
        })
    };

    let reader = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            let mut last_seen = 0;
            while last_seen < WRITES {
                let notes: Vec<_> = store.query(&NoteQuery::default()).unwrap().collect();
                assert!(notes.len() >= last_seen, "snapshot went backwards");
                for note in &notes {
                    let suffix = note.title.trim_start_matches("note-");
                    assert_eq!(note.body, format!("body-{suffix}"));
                }
                last_seen = notes.len();
            }
        })
    };

    writer.join().unwrap();
    reader.join().unwrap();
    assert_eq!(store.query(&NoteQuery::default()).unwrap().len(), WRITES);
}

#[test]
fn concurrent_updates_apply_title_and_body_together() {
    let store = shared_store();
    let id = store.insert(&NoteFields::new("v0", "v0")).unwrap();

    let writers: Vec<_> = (0..4)
        .map(|worker| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..50 {
                    let version = format!("w{worker}-{i}");
                    assert_eq!(
                        store
                            .update(id, &NoteFields::new(version.clone(), version))
                            .unwrap(),
                        1
                    );
                }
            })
        })
        .collect();

    let reader = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for _ in 0..200 {
                let note = store.query_by_id(id).unwrap().expect("note must exist");
                assert_eq!(note.title, note.body);
            }
        })
    };

    for writer in writers {
        writer.join().unwrap();
    }
    reader.join().unwrap();

    let note = store.query_by_id(id).unwrap().unwrap();
    assert_eq!(note.title, note.body);
}

#[test]
fn concurrent_batch_deletes_count_each_note_once() {
    let store = shared_store();
    let ids: Vec<i64> = (0..100)
        .map(|i| store.insert(&NoteFields::title(format!("n{i}"))).unwrap())
        .collect();
    let ids = Arc::new(ids);

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            let ids = Arc::clone(&ids);
            thread::spawn(move || store.delete_many(&ids).unwrap())
        })
        .collect();

    let total: usize = workers
        .into_iter()
        .map(|worker| worker.join().unwrap())
        .sum();
    assert_eq!(total, 100);
    assert!(store.query(&NoteQuery::default()).unwrap().is_empty());
}

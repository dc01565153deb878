use honeypad_core::{
    AsciiCollator, FoldingCollator, NoteFields, NoteQuery, NoteStore, StoreOptions,
};
use std::cmp::Ordering;

fn store_with(options: StoreOptions, titles: &[&str]) -> NoteStore {
    let store = NoteStore::open_in_memory(&options).unwrap();
    for title in titles {
        store.insert(&NoteFields::title(*title)).unwrap();
    }
    store
}

fn listed_titles(store: &NoteStore) -> Vec<String> {
    store
        .query(&NoteQuery::default())
        .unwrap()
        .map(|note| note.title)
        .collect()
}

#[test]
fn default_listing_is_case_insensitive_ascending() {
    let store = store_with(
        StoreOptions::default().with_collator(AsciiCollator),
        &["banana", "Apple", "cherry"],
    );
    assert_eq!(listed_titles(&store), vec!["Apple", "banana", "cherry"]);
}

#[test]
fn default_collator_orders_ascii_input_the_same_way() {
    let store = store_with(StoreOptions::default(), &["banana", "Apple", "cherry"]);
    assert_eq!(listed_titles(&store), vec!["Apple", "banana", "cherry"]);
}

#[test]
fn default_collator_ignores_accents() {
    let store = store_with(
        StoreOptions::default().with_collator(FoldingCollator),
        &["Zoo", "étude", "Eagle", "ecology"],
    );
    assert_eq!(
        listed_titles(&store),
        vec!["Eagle", "ecology", "étude", "Zoo"]
    );
}

#[test]
fn summaries_follow_the_store_collation() {
    let store = store_with(
        StoreOptions::default().with_collator(AsciiCollator),
        &["b", "C", "a"],
    );
    let titles: Vec<String> = store
        .query_summaries(&NoteQuery::default())
        .unwrap()
        .map(|summary| summary.title)
        .collect();
    assert_eq!(titles, vec!["a", "b", "C"]);
}

#[test]
fn duplicate_titles_fall_back_to_insertion_order() {
    let store = NoteStore::open_in_memory(&StoreOptions::default()).unwrap();
    let first = store.insert(&NoteFields::new("same", "1")).unwrap();
    let second = store.insert(&NoteFields::new("same", "2")).unwrap();

    let ids: Vec<i64> = store
        .query(&NoteQuery::default())
        .unwrap()
        .map(|note| note.id)
        .collect();
    assert_eq!(ids, vec![first, second]);
}

#[test]
fn custom_collator_is_pluggable() {
    // Orders by title length, then alphabetically.
    let by_length = |a: &str, b: &str| -> Ordering { a.len().cmp(&b.len()).then_with(|| a.cmp(b)) };
    let store = store_with(
        StoreOptions::default().with_collator(by_length),
        &["ccc", "a", "bb"],
    );
    assert_eq!(listed_titles(&store), vec!["a", "bb", "ccc"]);
}

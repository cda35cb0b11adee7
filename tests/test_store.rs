//! Memory store tests: catalog seeding, snapshot loading, ordering,
//! document-store absence semantics.

mod common;

use std::io::Write;

use common::sample_store;
use tcg_binder::models::{CardRef, CollectionEntry, License};
use tcg_binder::store::{CardStore, EntryChange, MemoryStore};

// ---------------------------------------------------------------------------
// series listing
// ---------------------------------------------------------------------------

#[test]
fn all_series_is_sorted_by_date_descending() {
    let cat = sample_store();
    let series = cat.store.all_series(None).unwrap();
    assert_eq!(series.len(), 2);
    // OP08 (2024-09-13) released after SV6 (2024-04-26)
    assert_eq!(series[0].set_id, "OP08");
    assert_eq!(series[1].set_id, "SV6");
}

#[test]
fn all_series_filters_by_licence() {
    let cat = sample_store();
    let series = cat.store.all_series(Some(License::Pokemon)).unwrap();
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].set_id, "SV6");
}

#[test]
fn series_by_set_id_is_exact() {
    let cat = sample_store();
    assert!(cat.store.series_by_set_id("SV6").unwrap().is_some());
    // Lookup uses the canonical uppercase id; raw lowercase is not a match
    assert!(cat.store.series_by_set_id("sv6").unwrap().is_none());
}

// ---------------------------------------------------------------------------
// absence semantics
// ---------------------------------------------------------------------------

#[test]
fn unknown_series_sub_collection_is_empty_not_error() {
    let cat = sample_store();
    assert!(cat.store.cards_in_series("no-such-id").unwrap().is_empty());
    assert!(cat
        .store
        .cards_by_number("no-such-id", "52")
        .unwrap()
        .is_empty());
}

#[test]
fn card_by_ref_round_trips() {
    let cat = sample_store();
    let card = cat.store.card_by_ref(&cat.pikachu).unwrap().unwrap();
    assert_eq!(card.card_name, "Pikachu");
    assert_eq!(card.reference, cat.pikachu);

    let bogus = CardRef::new(&cat.sv6_id, "no-such-card");
    assert!(cat.store.card_by_ref(&bogus).unwrap().is_none());
}

#[test]
fn card_refs_embed_their_series_id() {
    let cat = sample_store();
    assert_eq!(cat.pikachu.series_id(), cat.sv6_id);
    assert!(cat.pikachu.path().starts_with(&format!("series/{}/cards/", cat.sv6_id)));
}

// ---------------------------------------------------------------------------
// snapshot loading
// ---------------------------------------------------------------------------

#[test]
fn load_snapshot_builds_the_catalog() {
    let snapshot = serde_json::json!([
        {
            "set_id": "OP08",
            "serie_name": "Two Legends",
            "licence": "one piece",
            "date": "2024-09-13",
            "serie_logo": "op08-logo.webp",
            "cards": [
                { "card_number": "OP08-001", "card_name": "Tony Tony.Chopper", "card_img": "op08-001.webp" },
                { "card_number": "OP08-002", "card_name": "Nami" }
            ]
        },
        {
            "set_id": "SV6",
            "serie_name": "Mask of Change",
            "licence": "pokemon",
            "date": "2024-04-26"
        }
    ]);

    // Round-trip through a file, the way the server binary loads it
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{snapshot}").unwrap();
    file.flush().unwrap();
    let json = std::fs::read_to_string(file.path()).unwrap();

    let store = MemoryStore::new();
    assert_eq!(store.load_snapshot(&json).unwrap(), 2);

    let op08 = store.series_by_set_id("OP08").unwrap().unwrap();
    assert_eq!(op08.licence, License::OnePiece);
    assert_eq!(op08.serie_logo, "op08-logo.webp");

    let cards = store.cards_in_series(&op08.id).unwrap();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].card_number, "OP08-001");
    assert_eq!(cards[1].card_img, "");

    let sv6 = store.series_by_set_id("SV6").unwrap().unwrap();
    assert!(store.cards_in_series(&sv6.id).unwrap().is_empty());
}

#[test]
fn load_snapshot_rejects_malformed_json() {
    let store = MemoryStore::new();
    assert!(store.load_snapshot("{not json").is_err());
}

#[test]
fn add_card_to_unknown_series_fails() {
    let store = MemoryStore::new();
    let err = store.add_card("no-such-id", "1", "Card", "").unwrap_err();
    assert!(matches!(err, tcg_binder::BinderError::NotFound(_)));
}

// ---------------------------------------------------------------------------
// entry transactions
// ---------------------------------------------------------------------------

const USER: &str = "ash@example.com";

#[test]
fn transact_keep_leaves_the_entry_untouched() {
    let cat = sample_store();
    let entry = CollectionEntry::new(
        "e1".to_string(),
        cat.pikachu.clone(),
        3,
        License::Pokemon,
    )
    .unwrap();
    cat.store
        .transact_entry(USER, &cat.pikachu, &mut |_| {
            Ok(EntryChange::Put(entry.clone()))
        })
        .unwrap();

    // A transaction that decides nothing needs to change commits nothing
    cat.store
        .transact_entry(USER, &cat.pikachu, &mut |current| {
            assert_eq!(current.map(|e| e.count), Some(3));
            Ok(EntryChange::Keep)
        })
        .unwrap();

    let entries = cat.store.collection_entries(USER).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, "e1");
    assert_eq!(entries[0].count, 3);
}

#[test]
fn transact_keep_on_absent_entry_creates_nothing() {
    let cat = sample_store();
    cat.store
        .transact_entry(USER, &cat.pikachu, &mut |current| {
            assert!(current.is_none());
            Ok(EntryChange::Keep)
        })
        .unwrap();
    assert!(cat.store.collection_entries(USER).unwrap().is_empty());
}

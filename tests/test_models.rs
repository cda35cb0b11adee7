//! Model serde and invariant tests: wire forms of licences and candidates,
//! card reference path validation.

use std::str::FromStr;

use tcg_binder::models::{CardRef, CollectionEntry, License, RawCandidate};

// ---------------------------------------------------------------------------
// License
// ---------------------------------------------------------------------------

#[test]
fn licence_wire_forms() {
    assert_eq!(serde_json::to_string(&License::Pokemon).unwrap(), "\"pokemon\"");
    assert_eq!(
        serde_json::to_string(&License::OnePiece).unwrap(),
        "\"one piece\""
    );
}

#[test]
fn licence_accepts_common_variants() {
    for form in ["\"one piece\"", "\"one_piece\"", "\"one-piece\"", "\"One Piece\""] {
        let licence: License = serde_json::from_str(form).unwrap();
        assert_eq!(licence, License::OnePiece, "form = {form}");
    }
    let licence: License = serde_json::from_str("\"Pokemon\"").unwrap();
    assert_eq!(licence, License::Pokemon);
}

#[test]
fn licence_from_str() {
    assert_eq!(License::from_str("pokemon").unwrap(), License::Pokemon);
    assert_eq!(License::from_str(" ONE_PIECE ").unwrap(), License::OnePiece);
    assert!(License::from_str("yugioh").is_err());
}

// ---------------------------------------------------------------------------
// RawCandidate
// ---------------------------------------------------------------------------

#[test]
fn raw_candidate_accepts_license_spelling() {
    // The model is prompted with "license"; the catalog uses "licence"
    let json = r#"{"license": "pokemon", "set_id": "SV6", "card_number": "52", "card_name": null}"#;
    let cand: RawCandidate = serde_json::from_str(json).unwrap();
    assert_eq!(cand.licence, License::Pokemon);
    assert!(cand.card_name.is_none());
}

#[test]
fn raw_candidate_fields_are_nullable() {
    let json = r#"{"licence": "one piece", "set_id": null, "card_number": "OP08-001", "card_name": null}"#;
    let cand: RawCandidate = serde_json::from_str(json).unwrap();
    assert!(cand.set_id.is_none());
    assert_eq!(cand.card_number.as_deref(), Some("OP08-001"));
}

// ---------------------------------------------------------------------------
// CardRef
// ---------------------------------------------------------------------------

#[test]
fn card_ref_parses_well_formed_paths() {
    let r = CardRef::parse("series/abc123/cards/def456").unwrap();
    assert_eq!(r.series_id(), "abc123");
    assert_eq!(r.card_id(), "def456");
    assert_eq!(r.path(), "series/abc123/cards/def456");
}

#[test]
fn card_ref_rejects_malformed_paths() {
    for path in [
        "",
        "series/abc123",
        "series/abc123/cards",
        "series//cards/def456",
        "collections/user/cards/def456",
        "series/abc123/decks/def456",
        "series/abc123/cards/def456/extra",
    ] {
        assert!(CardRef::parse(path).is_err(), "path = {path:?}");
    }
}

#[test]
fn card_ref_serde_validates_on_deserialize() {
    let ok: CardRef = serde_json::from_str("\"series/a/cards/b\"").unwrap();
    assert_eq!(ok, CardRef::new("a", "b"));

    let bad: Result<CardRef, _> = serde_json::from_str("\"series/a/b\"");
    assert!(bad.is_err());
}

// ---------------------------------------------------------------------------
// CollectionEntry
// ---------------------------------------------------------------------------

#[test]
fn collection_entry_serializes_with_document_field_names() {
    let entry = CollectionEntry::new(
        "e1".to_string(),
        CardRef::new("s1", "c1"),
        2,
        License::Pokemon,
    )
    .unwrap();
    let value = serde_json::to_value(&entry).unwrap();
    assert_eq!(value["_id"], "e1");
    assert_eq!(value["card_ref"], "series/s1/cards/c1");
    assert_eq!(value["count"], 2);
    assert_eq!(value["licence"], "pokemon");
}

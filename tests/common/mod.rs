//! Shared test fixtures for the binder integration tests.
//!
//! Provides `sample_store()` which seeds an in-memory store with a small
//! two-licence catalog (including a print-variant pair and a promo card),
//! plus a scripted recognizer and a call-counting store wrapper.

use std::sync::atomic::{AtomicUsize, Ordering};

use tcg_binder::error::Result;
use tcg_binder::models::{
    CardRef, CatalogCard, CollectionEntry, License, RawCandidate, Series,
};
use tcg_binder::recognize::Recognizer;
use tcg_binder::store::{CardStore, EntryChange, MemoryStore};

// ---------------------------------------------------------------------------
// Sample catalog
// ---------------------------------------------------------------------------

pub struct SampleCatalog {
    pub store: MemoryStore,
    pub sv6_id: String,
    pub op08_id: String,
    /// SV6 52, first illustration.
    pub ogerpon: CardRef,
    /// SV6 52, alternate illustration (same card number).
    pub ogerpon_alt: CardRef,
    /// SV6 78.
    pub pikachu: CardRef,
    /// SV6 promo with a non-numeric card number.
    pub promo: CardRef,
    /// OP08-001.
    pub chopper: CardRef,
}

pub fn sample_store() -> SampleCatalog {
    let store = MemoryStore::new();

    let sv6_id = store.add_series("SV6", "Mask of Change", License::Pokemon, "2024-04-26");
    let op08_id = store.add_series("OP08", "Two Legends", License::OnePiece, "2024-09-13");

    let ogerpon = store
        .add_card(&sv6_id, "52", "Ogerpon Cornerstone Mask ex", "sv6-52.png")
        .unwrap();
    let ogerpon_alt = store
        .add_card(&sv6_id, "52", "Ogerpon Cornerstone Mask ex", "sv6-52-alt.png")
        .unwrap();
    let pikachu = store.add_card(&sv6_id, "78", "Pikachu", "sv6-78.png").unwrap();
    let promo = store
        .add_card(&sv6_id, "SWSH262", "Charizard V", "swsh262.png")
        .unwrap();
    let chopper = store
        .add_card(&op08_id, "OP08-001", "Tony Tony.Chopper", "op08-001.webp")
        .unwrap();

    SampleCatalog {
        store,
        sv6_id,
        op08_id,
        ogerpon,
        ogerpon_alt,
        pikachu,
        promo,
        chopper,
    }
}

/// Build a raw candidate the way the recognition model emits them.
pub fn candidate(
    licence: License,
    set_id: Option<&str>,
    card_number: Option<&str>,
    card_name: Option<&str>,
) -> RawCandidate {
    RawCandidate {
        licence,
        set_id: set_id.map(str::to_string),
        card_number: card_number.map(str::to_string),
        card_name: card_name.map(str::to_string),
    }
}

// ---------------------------------------------------------------------------
// FakeRecognizer
// ---------------------------------------------------------------------------

/// Recognizer returning a scripted candidate list, no network involved.
pub struct FakeRecognizer {
    pub candidates: Vec<RawCandidate>,
}

impl Recognizer for FakeRecognizer {
    fn identify(&self, _image: &[u8]) -> Result<Vec<RawCandidate>> {
        Ok(self.candidates.clone())
    }
}

// ---------------------------------------------------------------------------
// CountingStore
// ---------------------------------------------------------------------------

/// Store wrapper that counts backend calls, for asserting lookup and
/// chunking behavior.
pub struct CountingStore<S> {
    pub inner: S,
    pub series_lookups: AtomicUsize,
    pub number_lookups: AtomicUsize,
    pub ref_lookups: AtomicUsize,
}

impl<S> CountingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            series_lookups: AtomicUsize::new(0),
            number_lookups: AtomicUsize::new(0),
            ref_lookups: AtomicUsize::new(0),
        }
    }
}

impl<S: CardStore> CardStore for CountingStore<S> {
    fn all_series(&self, licence: Option<License>) -> Result<Vec<Series>> {
        self.inner.all_series(licence)
    }

    fn series_by_set_id(&self, set_id: &str) -> Result<Option<Series>> {
        self.series_lookups.fetch_add(1, Ordering::Relaxed);
        self.inner.series_by_set_id(set_id)
    }

    fn cards_in_series(&self, series_id: &str) -> Result<Vec<CatalogCard>> {
        self.inner.cards_in_series(series_id)
    }

    fn cards_by_number(&self, series_id: &str, card_number: &str) -> Result<Vec<CatalogCard>> {
        self.number_lookups.fetch_add(1, Ordering::Relaxed);
        self.inner.cards_by_number(series_id, card_number)
    }

    fn card_by_ref(&self, card_ref: &CardRef) -> Result<Option<CatalogCard>> {
        self.inner.card_by_ref(card_ref)
    }

    fn collection_entries(&self, user: &str) -> Result<Vec<CollectionEntry>> {
        self.inner.collection_entries(user)
    }

    fn entries_for_refs(&self, user: &str, refs: &[CardRef]) -> Result<Vec<CollectionEntry>> {
        self.ref_lookups.fetch_add(1, Ordering::Relaxed);
        self.inner.entries_for_refs(user, refs)
    }

    fn transact_entry(
        &self,
        user: &str,
        card_ref: &CardRef,
        apply: &mut dyn FnMut(Option<&CollectionEntry>) -> Result<EntryChange>,
    ) -> Result<()> {
        self.inner.transact_entry(user, card_ref, apply)
    }
}

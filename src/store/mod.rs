//! Document-store contract.
//!
//! The catalog (series + cards) and the per-user collections live in a
//! two-level document store owned by external tooling. This module defines
//! the store as an explicit handle ([`CardStore`]) injected into every
//! component, so the production backend can be swapped for the in-memory
//! implementation in tests.

pub mod memory;

pub use memory::MemoryStore;

use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::config::DOC_ID_LEN;
use crate::error::Result;
use crate::models::{CardRef, CatalogCard, CollectionEntry, License, Series};

// ---------------------------------------------------------------------------
// EntryChange
// ---------------------------------------------------------------------------

/// Outcome of an atomic ownership transaction: what the store should do with
/// the `(user, card_ref)` entry after the decision closure ran.
#[derive(Debug, Clone)]
pub enum EntryChange {
    /// Write this entry (creating it if absent).
    Put(CollectionEntry),
    /// Remove the entry.
    Delete,
    /// Leave the entry untouched.
    Keep,
}

// ---------------------------------------------------------------------------
// CardStore
// ---------------------------------------------------------------------------

/// The backend contract: catalog reads plus collection reads/writes.
///
/// Absence follows document-store semantics throughout: querying the cards
/// of an unknown series yields an empty list, never an error. Errors are
/// reserved for connectivity/backend failures and contract violations (such
/// as exceeding the membership-filter limit).
pub trait CardStore: Send + Sync {
    /// All series, newest first, optionally filtered by licence.
    fn all_series(&self, licence: Option<License>) -> Result<Vec<Series>>;

    /// The series whose `set_id` field equals the given (canonical,
    /// uppercase) identifier, if any.
    fn series_by_set_id(&self, set_id: &str) -> Result<Option<Series>>;

    /// Full card list of a series, in catalog iteration order.
    fn cards_in_series(&self, series_id: &str) -> Result<Vec<CatalogCard>>;

    /// All cards of a series with the given canonical card number. Print
    /// variants make multiple matches legitimate.
    fn cards_by_number(&self, series_id: &str, card_number: &str) -> Result<Vec<CatalogCard>>;

    /// Look a card up by its stable reference path.
    fn card_by_ref(&self, card_ref: &CardRef) -> Result<Option<CatalogCard>>;

    /// Snapshot of a user's whole collection.
    fn collection_entries(&self, user: &str) -> Result<Vec<CollectionEntry>>;

    /// The user's entries whose `card_ref` is among `refs`.
    ///
    /// `refs` must not exceed [`crate::config::IN_FILTER_MAX`] values -- the
    /// backend's hard limit on a single membership filter. Larger lookups
    /// are the batch fetcher's job to chunk.
    fn entries_for_refs(&self, user: &str, refs: &[CardRef]) -> Result<Vec<CollectionEntry>>;

    /// Atomically read-decide-write the single `(user, card_ref)` entry.
    ///
    /// `apply` receives the current entry (if any) and returns the change to
    /// commit. The store guarantees no other write to the same entry
    /// interleaves between the read and the commit, which is what keeps
    /// concurrent acquire/release calls from losing updates.
    fn transact_entry(
        &self,
        user: &str,
        card_ref: &CardRef,
        apply: &mut dyn FnMut(Option<&CollectionEntry>) -> Result<EntryChange>,
    ) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate a fresh random document id. Ids are assigned client-side, the
/// way document-store SDKs do for auto-id creation.
pub fn doc_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(DOC_ID_LEN)
        .map(char::from)
        .collect()
}

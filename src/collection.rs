//! Ownership merging and mutation.
//!
//! Read side: [`owned_count`] merges a catalog card with a snapshot of the
//! user's collection. Write side: [`CollectionOps`] applies acquire/release
//! events, each wrapped in the store's atomic entry transaction so that
//! concurrent events for the same `(user, card)` never lose updates.

use crate::error::{BinderError, Result};
use crate::models::{CardRef, CollectionEntry, License};
use crate::store::{doc_id, CardStore, EntryChange};

/// Owned quantity of one card within a collection snapshot; 0 when absent.
/// Never mutates anything.
pub fn owned_count(card_ref: &CardRef, snapshot: &[CollectionEntry]) -> u32 {
    snapshot
        .iter()
        .find(|entry| &entry.card_ref == card_ref)
        .map(|entry| entry.count)
        .unwrap_or(0)
}

/// Ownership operations for one user identity.
pub struct CollectionOps<'a> {
    store: &'a dyn CardStore,
    user: String,
}

impl<'a> CollectionOps<'a> {
    pub fn new(store: &'a dyn CardStore, user: &str) -> Self {
        Self {
            store,
            user: user.to_string(),
        }
    }

    /// Current snapshot of the user's collection.
    pub fn snapshot(&self) -> Result<Vec<CollectionEntry>> {
        self.store.collection_entries(&self.user)
    }

    /// Record the acquisition of one copy of a card.
    ///
    /// Increments the existing entry, or creates one with count 1. The
    /// licence is stamped from the acquiring context (the resolved
    /// candidate), not re-derived from the catalog.
    pub fn acquire(&self, card_ref: &CardRef, licence: License) -> Result<()> {
        self.store
            .transact_entry(&self.user, card_ref, &mut |current| {
                Ok(match current {
                    Some(entry) => {
                        let mut updated = entry.clone();
                        updated.count += 1;
                        EntryChange::Put(updated)
                    }
                    None => EntryChange::Put(CollectionEntry::new(
                        doc_id(),
                        card_ref.clone(),
                        1,
                        licence,
                    )?),
                })
            })
    }

    /// Record the removal of one copy of a card.
    ///
    /// Fails with [`BinderError::NotOwned`] when the user has no entry for
    /// the card, and with [`BinderError::Underflow`] when the count would go
    /// negative -- both checked before any mutation. A count reaching zero
    /// deletes the entry; a zero is never stored.
    pub fn release(&self, card_ref: &CardRef) -> Result<()> {
        self.store
            .transact_entry(&self.user, card_ref, &mut |current| {
                let entry = current.ok_or_else(|| {
                    BinderError::NotOwned(format!("no collection entry for {card_ref}"))
                })?;
                match entry.count {
                    // A stored zero is already outside the invariant;
                    // decrementing it would go negative.
                    0 => Err(BinderError::Underflow(format!(
                        "cannot remove more copies of {card_ref} than owned"
                    ))),
                    1 => Ok(EntryChange::Delete),
                    n => {
                        let mut updated = entry.clone();
                        updated.count = n - 1;
                        Ok(EntryChange::Put(updated))
                    }
                }
            })
    }

    /// Apply [`acquire`](Self::acquire) to a batch of resolved cards,
    /// sequentially per card identity. Fails fast on the first store error;
    /// no partial-batch rollback is attempted.
    pub fn acquire_all(&self, cards: &[(CardRef, License)]) -> Result<()> {
        for (card_ref, licence) in cards {
            self.acquire(card_ref, *licence)?;
        }
        Ok(())
    }
}

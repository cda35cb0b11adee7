//! Batch ownership fetching.
//!
//! "List all cards of a set with my owned counts" touches every card of a
//! series but only small slices of the user's collection, and the backend
//! caps membership filters at [`IN_FILTER_MAX`] values. The fetcher chunks
//! the card references accordingly and fans the chunk lookups out over a
//! bounded set of worker threads. All chunks complete before merging -- the
//! fan-out is a join over independent read-only lookups, not a race.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use serde::Serialize;

use crate::config::{IN_FILTER_MAX, MAX_FETCH_WORKERS};
use crate::error::{BinderError, Result};
use crate::models::{CardRef, CatalogCard, CollectionEntry};
use crate::store::CardStore;

// ---------------------------------------------------------------------------
// OwnedCard
// ---------------------------------------------------------------------------

/// One catalog card of a series merged with the caller's owned count.
#[derive(Debug, Clone, Serialize)]
pub struct OwnedCard {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "ref")]
    pub reference: CardRef,
    pub card_number: String,
    pub card_name: String,
    pub card_img: String,
    /// Numeric sort key parsed from `card_number`; `None` for alphanumeric
    /// numbers (promo codes), which sort after all numeric cards.
    pub int_number: Option<i64>,
    pub count: u32,
}

// ---------------------------------------------------------------------------
// fetch_set_with_ownership
// ---------------------------------------------------------------------------

/// Load a series' full card list merged with the user's ownership counts.
///
/// Output contains every catalog card exactly once (count 0 when unowned),
/// sorted ascending by the integer value of `card_number`. The sort is
/// stable: ties keep catalog order, and cards without a numeric number come
/// last, also in catalog order.
pub fn fetch_set_with_ownership(
    store: &dyn CardStore,
    series_id: &str,
    user: &str,
) -> Result<Vec<OwnedCard>> {
    let cards = store.cards_in_series(series_id)?;
    let refs: Vec<CardRef> = cards.iter().map(|c| c.reference.clone()).collect();

    let owned = fetch_owned_map(store, user, &refs)?;

    let mut result: Vec<OwnedCard> = cards.into_iter().map(|card| to_owned(card, &owned)).collect();
    result.sort_by_key(|card| match card.int_number {
        Some(n) => (0, n),
        None => (1, 0),
    });
    Ok(result)
}

fn to_owned(card: CatalogCard, owned: &HashMap<CardRef, u32>) -> OwnedCard {
    OwnedCard {
        int_number: card.card_number.parse::<i64>().ok(),
        count: owned.get(&card.reference).copied().unwrap_or(0),
        id: card.id,
        reference: card.reference,
        card_number: card.card_number,
        card_name: card.card_name,
        card_img: card.card_img,
    }
}

/// Look up the user's ownership entries overlapping `refs`, in chunks of at
/// most [`IN_FILTER_MAX`], with `min(MAX_FETCH_WORKERS, chunks)` parallel
/// workers, and merge everything into one reference -> count map.
fn fetch_owned_map(
    store: &dyn CardStore,
    user: &str,
    refs: &[CardRef],
) -> Result<HashMap<CardRef, u32>> {
    let chunks: Vec<&[CardRef]> = refs.chunks(IN_FILTER_MAX).collect();
    if chunks.is_empty() {
        return Ok(HashMap::new());
    }

    let workers = MAX_FETCH_WORKERS.min(chunks.len());
    let next = AtomicUsize::new(0);
    let slots: Vec<Mutex<Option<Result<Vec<CollectionEntry>>>>> =
        chunks.iter().map(|_| Mutex::new(None)).collect();

    std::thread::scope(|scope| {
        for _ in 0..workers {
            scope.spawn(|| loop {
                let index = next.fetch_add(1, Ordering::Relaxed);
                if index >= chunks.len() {
                    break;
                }
                let outcome = store.entries_for_refs(user, chunks[index]);
                if let Ok(mut slot) = slots[index].lock() {
                    *slot = Some(outcome);
                }
            });
        }
    });

    let mut owned = HashMap::new();
    for slot in slots {
        let entries = slot
            .into_inner()
            .map_err(|_| BinderError::Store("ownership lookup worker panicked".into()))?
            .ok_or_else(|| BinderError::Store("ownership lookup chunk was not completed".into()))??;
        for entry in entries {
            owned.insert(entry.card_ref, entry.count);
        }
    }
    Ok(owned)
}

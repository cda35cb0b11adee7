//! Catalog resolution.
//!
//! Maps a normalized `(set_id, card_number)` key onto the canonical catalog.
//! Absence at either level (unknown set, unknown number) is a normal result,
//! not an error: a card can be correctly recognized and still not be
//! catalogued yet, and the caller should be able to display that state.

use std::collections::HashMap;

use crate::error::{BinderError, Result};
use crate::models::{CatalogCard, License, NormalizedKey, RawCandidate};
use crate::normalize;
use crate::store::CardStore;

/// Request-scoped cache mapping a set id to its series document id.
///
/// Threaded through the lookups of one recognition batch so the same series
/// is queried at most once per batch. Never persisted beyond a batch.
pub type SeriesCache = HashMap<String, String>;

/// Resolver bound to a store handle.
pub struct Resolver<'a> {
    store: &'a dyn CardStore,
}

impl<'a> Resolver<'a> {
    pub fn new(store: &'a dyn CardStore) -> Self {
        Self { store }
    }

    /// Resolve one key against the catalog.
    ///
    /// Returns every catalog card matching the key -- print variants included,
    /// never silently one of them -- or an empty vector when either the set
    /// or the number is unknown. The cache is only written on a successful
    /// series lookup, so a missing set leaves it untouched.
    pub fn resolve(
        &self,
        key: &NormalizedKey,
        cache: &mut SeriesCache,
    ) -> Result<Vec<CatalogCard>> {
        let series_id = match cache.get(&key.set_id) {
            Some(id) => id.clone(),
            None => match self.store.series_by_set_id(&key.set_id)? {
                Some(series) => {
                    cache.insert(key.set_id.clone(), series.id.clone());
                    series.id
                }
                // Set not found: non-fatal, displayable absence.
                None => return Ok(Vec::new()),
            },
        };
        self.store.cards_by_number(&series_id, &key.card_number)
    }

    /// Single-card lookup by raw `set_id` / `card_number` strings.
    ///
    /// Normalizes first (so `"sv6"` / `"052"` finds `SV6` `52`) and resolves
    /// with a fresh cache.
    pub fn find_card(
        &self,
        set_id: Option<&str>,
        card_number: &str,
        licence: License,
    ) -> Result<Vec<CatalogCard>> {
        let raw = RawCandidate {
            licence,
            set_id: set_id.map(str::to_string),
            card_number: Some(card_number.to_string()),
            card_name: None,
        };
        let key = normalize::normalize(&raw)
            .map_err(|e| BinderError::InvalidArgument(e.to_string()))?;
        let mut cache = SeriesCache::new();
        self.resolve(&key, &mut cache)
    }
}

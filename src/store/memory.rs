//! In-memory [`CardStore`] implementation.
//!
//! Holds the catalog and per-user collections behind a single mutex, which
//! makes [`CardStore::transact_entry`] trivially atomic: the read and the
//! commit happen under one lock acquisition. Used as the test backend and by
//! the server binary when running from a catalog snapshot file.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use serde::Deserialize;

use super::{doc_id, CardStore, EntryChange};
use crate::config::IN_FILTER_MAX;
use crate::error::{BinderError, Result};
use crate::models::{CardRef, CatalogCard, CollectionEntry, License, Series};

// ---------------------------------------------------------------------------
// Snapshot format
// ---------------------------------------------------------------------------

/// One series of a catalog snapshot file, with its card list embedded.
/// This is the JSON shape the import tooling exports.
#[derive(Debug, Clone, Deserialize)]
pub struct SeriesSnapshot {
    pub set_id: String,
    pub serie_name: String,
    pub licence: License,
    pub date: String,
    #[serde(default)]
    pub serie_logo: String,
    #[serde(default)]
    pub symbol_img: String,
    #[serde(default)]
    pub cards: Vec<CardSnapshot>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CardSnapshot {
    pub card_number: String,
    pub card_name: String,
    #[serde(default)]
    pub card_img: String,
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

struct SeriesDoc {
    series: Series,
    /// Cards in catalog iteration (insertion) order.
    cards: Vec<CatalogCard>,
}

#[derive(Default)]
struct Inner {
    /// Series documents in insertion order.
    series: Vec<SeriesDoc>,
    /// Per-user collections, keyed by the stable user identifier.
    collections: HashMap<String, Vec<CollectionEntry>>,
}

/// In-memory document store.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a series document and return its generated id.
    pub fn add_series(
        &self,
        set_id: &str,
        serie_name: &str,
        licence: License,
        date: &str,
    ) -> String {
        let id = doc_id();
        let series = Series {
            id: id.clone(),
            set_id: set_id.to_string(),
            serie_name: serie_name.to_string(),
            licence,
            date: date.to_string(),
            serie_logo: String::new(),
            symbol_img: String::new(),
        };
        self.lock().series.push(SeriesDoc {
            series,
            cards: Vec::new(),
        });
        id
    }

    /// Append a card to a series' sub-collection and return its reference.
    pub fn add_card(
        &self,
        series_id: &str,
        card_number: &str,
        card_name: &str,
        card_img: &str,
    ) -> Result<CardRef> {
        let mut inner = self.lock();
        let doc = inner
            .series
            .iter_mut()
            .find(|d| d.series.id == series_id)
            .ok_or_else(|| BinderError::NotFound(format!("series {series_id} does not exist")))?;
        let id = doc_id();
        let reference = CardRef::new(series_id, &id);
        doc.cards.push(CatalogCard {
            id,
            reference: reference.clone(),
            card_number: card_number.to_string(),
            card_name: card_name.to_string(),
            card_img: card_img.to_string(),
        });
        Ok(reference)
    }

    /// Load a catalog snapshot (JSON array of [`SeriesSnapshot`]) and return
    /// the number of series created.
    pub fn load_snapshot(&self, json: &str) -> Result<usize> {
        let snapshots: Vec<SeriesSnapshot> = serde_json::from_str(json)?;
        let count = snapshots.len();
        for snap in snapshots {
            let series_id =
                self.add_series(&snap.set_id, &snap.serie_name, snap.licence, &snap.date);
            {
                let mut inner = self.lock();
                if let Some(doc) = inner.series.iter_mut().find(|d| d.series.id == series_id) {
                    doc.series.serie_logo = snap.serie_logo.clone();
                    doc.series.symbol_img = snap.symbol_img.clone();
                }
            }
            for card in &snap.cards {
                self.add_card(&series_id, &card.card_number, &card.card_name, &card.card_img)?;
            }
        }
        Ok(count)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock means a panic mid-mutation; propagating the panic
        // is the only sound option for an in-memory store.
        self.inner.lock().expect("memory store lock poisoned")
    }
}

impl CardStore for MemoryStore {
    fn all_series(&self, licence: Option<License>) -> Result<Vec<Series>> {
        let inner = self.lock();
        let mut series: Vec<Series> = inner
            .series
            .iter()
            .map(|d| d.series.clone())
            .filter(|s| licence.map_or(true, |l| s.licence == l))
            .collect();
        series.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(series)
    }

    fn series_by_set_id(&self, set_id: &str) -> Result<Option<Series>> {
        let inner = self.lock();
        Ok(inner
            .series
            .iter()
            .find(|d| d.series.set_id == set_id)
            .map(|d| d.series.clone()))
    }

    fn cards_in_series(&self, series_id: &str) -> Result<Vec<CatalogCard>> {
        let inner = self.lock();
        Ok(inner
            .series
            .iter()
            .find(|d| d.series.id == series_id)
            .map(|d| d.cards.clone())
            .unwrap_or_default())
    }

    fn cards_by_number(&self, series_id: &str, card_number: &str) -> Result<Vec<CatalogCard>> {
        let inner = self.lock();
        Ok(inner
            .series
            .iter()
            .find(|d| d.series.id == series_id)
            .map(|d| {
                d.cards
                    .iter()
                    .filter(|c| c.card_number == card_number)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn card_by_ref(&self, card_ref: &CardRef) -> Result<Option<CatalogCard>> {
        let inner = self.lock();
        Ok(inner
            .series
            .iter()
            .find(|d| d.series.id == card_ref.series_id())
            .and_then(|d| d.cards.iter().find(|c| &c.reference == card_ref))
            .cloned())
    }

    fn collection_entries(&self, user: &str) -> Result<Vec<CollectionEntry>> {
        let inner = self.lock();
        Ok(inner.collections.get(user).cloned().unwrap_or_default())
    }

    fn entries_for_refs(&self, user: &str, refs: &[CardRef]) -> Result<Vec<CollectionEntry>> {
        if refs.len() > IN_FILTER_MAX {
            return Err(BinderError::InvalidArgument(format!(
                "membership filter limited to {IN_FILTER_MAX} values, got {}",
                refs.len()
            )));
        }
        let wanted: HashSet<&CardRef> = refs.iter().collect();
        let inner = self.lock();
        Ok(inner
            .collections
            .get(user)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|e| wanted.contains(&e.card_ref))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn transact_entry(
        &self,
        user: &str,
        card_ref: &CardRef,
        apply: &mut dyn FnMut(Option<&CollectionEntry>) -> Result<EntryChange>,
    ) -> Result<()> {
        // The whole read-decide-write runs under the store lock, so two
        // transactions on the same entry are serialized.
        let mut inner = self.lock();
        let entries = inner.collections.entry(user.to_string()).or_default();
        let position = entries.iter().position(|e| &e.card_ref == card_ref);
        let change = apply(position.map(|i| &entries[i]))?;
        match change {
            EntryChange::Put(entry) => match position {
                Some(i) => entries[i] = entry,
                None => entries.push(entry),
            },
            EntryChange::Delete => {
                if let Some(i) = position {
                    entries.remove(i);
                }
            }
            EntryChange::Keep => {}
        }
        Ok(())
    }
}

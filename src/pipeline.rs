//! Photo read pipeline.
//!
//! Ties the recognition adapter, normalizer, resolver and ownership merger
//! together: photo -> raw candidates -> deduplicated keys -> cached catalog
//! resolution -> per-candidate matches stamped with owned counts. One bad
//! candidate in a multi-card photo never aborts the batch; it just surfaces
//! with no matches.

use std::collections::HashMap;

use serde::Serialize;

use crate::collection::owned_count;
use crate::error::Result;
use crate::models::{CardRef, CatalogCard, License, NormalizedKey, RawCandidate};
use crate::normalize;
use crate::recognize::Recognizer;
use crate::resolve::{Resolver, SeriesCache};
use crate::store::CardStore;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One catalog match for a candidate, merged with the caller's owned count.
#[derive(Debug, Clone, Serialize)]
pub struct CardMatch {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "ref")]
    pub reference: CardRef,
    pub card_number: String,
    pub card_name: String,
    pub card_img: String,
    /// Stamped from the candidate that produced the match, so an acquire of
    /// this match carries the licence the recognition step decided on.
    pub licence: License,
    pub count: u32,
}

/// One photographed card: the (normalized) candidate echo plus all catalog
/// versions matching it. An empty `versions` means "recognized but not
/// catalogued" -- a normal, displayable state.
#[derive(Debug, Clone, Serialize)]
pub struct IdentifiedCard {
    pub licence: License,
    pub set_id: Option<String>,
    pub card_number: Option<String>,
    pub card_name: Option<String>,
    pub versions: Vec<CardMatch>,
}

// ---------------------------------------------------------------------------
// read_photo
// ---------------------------------------------------------------------------

/// Run the full read path for one photo.
///
/// The user's collection is snapshotted once and the series cache is shared
/// across the whole batch, so the number of catalog lookups is bounded by
/// the number of *distinct* normalized keys in the photo.
pub fn read_photo(
    store: &dyn CardStore,
    recognizer: &dyn Recognizer,
    user: &str,
    image: &[u8],
) -> Result<Vec<IdentifiedCard>> {
    let candidates = recognizer.identify(image)?;
    reconcile(store, user, &candidates)
}

/// Reconcile already-identified candidates against catalog and collection.
/// Split out of [`read_photo`] so the matching logic is testable without a
/// recognition round trip.
pub fn reconcile(
    store: &dyn CardStore,
    user: &str,
    candidates: &[RawCandidate],
) -> Result<Vec<IdentifiedCard>> {
    let snapshot = store.collection_entries(user)?;
    let resolver = Resolver::new(store);

    let mut cache = SeriesCache::new();
    let mut matches: HashMap<NormalizedKey, Vec<CatalogCard>> = HashMap::new();
    for key in normalize::distinct_keys(candidates) {
        let found = resolver.resolve(&key, &mut cache)?;
        matches.insert(key, found);
    }

    let mut out = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        match normalize::normalize(candidate) {
            Ok(key) => {
                let versions = matches
                    .get(&key)
                    .map(|cards| {
                        cards
                            .iter()
                            .map(|card| CardMatch {
                                id: card.id.clone(),
                                reference: card.reference.clone(),
                                card_number: card.card_number.clone(),
                                card_name: card.card_name.clone(),
                                card_img: card.card_img.clone(),
                                licence: candidate.licence,
                                count: owned_count(&card.reference, &snapshot),
                            })
                            .collect()
                    })
                    .unwrap_or_default();
                out.push(IdentifiedCard {
                    licence: key.licence,
                    set_id: Some(key.set_id),
                    card_number: Some(key.card_number),
                    card_name: candidate.card_name.clone(),
                    versions,
                });
            }
            // Unusable candidate: keep it visible in the response, with the
            // raw fields and no matches, instead of failing the batch.
            Err(_) => out.push(IdentifiedCard {
                licence: candidate.licence,
                set_id: candidate.set_id.as_deref().map(str::to_uppercase),
                card_number: candidate.card_number.clone(),
                card_name: candidate.card_name.clone(),
                versions: Vec::new(),
            }),
        }
    }
    Ok(out)
}

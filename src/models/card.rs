use std::fmt;

use serde::{Deserialize, Serialize};

use super::license::License;
use crate::error::{BinderError, Result};

// ---------------------------------------------------------------------------
// CardRef — stable document path of a catalog card
// ---------------------------------------------------------------------------

/// Stable reference to a catalog card, in document-path form
/// `series/{series_id}/cards/{card_id}`.
///
/// Ownership records point at catalog cards through this path, so it must
/// survive round trips through the API unchanged. Construction always
/// validates the shape; a `CardRef` in hand is known to be well formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CardRef(String);

impl CardRef {
    /// Build a reference from its two document ids.
    pub fn new(series_id: &str, card_id: &str) -> Self {
        CardRef(format!("series/{series_id}/cards/{card_id}"))
    }

    /// Parse a reference path, rejecting anything that is not exactly
    /// `series/{id}/cards/{id}` with non-empty ids.
    pub fn parse(path: &str) -> Result<Self> {
        let segments: Vec<&str> = path.split('/').collect();
        let valid = segments.len() == 4
            && segments[0] == "series"
            && segments[2] == "cards"
            && !segments[1].is_empty()
            && !segments[3].is_empty();
        if !valid {
            return Err(BinderError::InvalidArgument(format!(
                "invalid card reference path: {path}"
            )));
        }
        Ok(CardRef(path.to_string()))
    }

    pub fn path(&self) -> &str {
        &self.0
    }

    pub fn series_id(&self) -> &str {
        self.0.split('/').nth(1).unwrap_or_default()
    }

    pub fn card_id(&self) -> &str {
        self.0.split('/').nth(3).unwrap_or_default()
    }
}

impl fmt::Display for CardRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CardRef {
    type Error = BinderError;

    fn try_from(value: String) -> Result<Self> {
        CardRef::parse(&value)
    }
}

impl From<CardRef> for String {
    fn from(value: CardRef) -> Self {
        value.0
    }
}

// ---------------------------------------------------------------------------
// RawCandidate — one detected card, straight from the recognition model
// ---------------------------------------------------------------------------

/// A single card candidate as returned by the recognition service.
///
/// Any payload field may be null when the model could not extract it, and
/// the strings carry whatever formatting noise the model produced (leading
/// zeros, mixed case). Normalization happens in [`crate::normalize`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCandidate {
    #[serde(alias = "license")]
    pub licence: License,
    pub set_id: Option<String>,
    pub card_number: Option<String>,
    pub card_name: Option<String>,
}

// ---------------------------------------------------------------------------
// NormalizedKey — canonical lookup key for a candidate
// ---------------------------------------------------------------------------

/// Canonical `(licence, set_id, card_number)` lookup key produced by
/// normalization. Two candidates that identify the same card compare equal,
/// so a batch can be deduplicated before any catalog lookup is issued.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NormalizedKey {
    pub licence: License,
    /// Uppercased set identifier. For one-piece keys this always equals the
    /// prefix of `card_number` before the hyphen.
    pub set_id: String,
    /// Canonical card number: leading zeros stripped for numeric pokemon
    /// numbers, the full hyphenated code for one-piece.
    pub card_number: String,
    /// True when the candidate could not be fully reconciled (a one-piece
    /// number missing its hyphen) and the key is a best-effort passthrough
    /// of the raw strings. Lookup still proceeds; it may simply find nothing.
    pub best_effort: bool,
}

// ---------------------------------------------------------------------------
// CatalogCard — canonical card entry within a series
// ---------------------------------------------------------------------------

/// One card of the canonical catalog, owned by a [`super::Series`] document.
///
/// Several entries may legitimately share a `card_number` within a series
/// when the source catalog records print variants (alternate illustrations);
/// lookups by number return all of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogCard {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "ref")]
    pub reference: CardRef,
    pub card_number: String,
    pub card_name: String,
    #[serde(default)]
    pub card_img: String,
}

//! Candidate normalization.
//!
//! Pure functions that turn noisy recognition output into canonical lookup
//! keys: uppercased set ids, leading zeros stripped from numeric pokemon
//! card numbers, one-piece set ids derived from the card-number prefix.
//! A batch of candidates is deduplicated here so the resolver is called once
//! per distinct `(set, number)` pair, not once per detected card.

use std::collections::HashSet;

use crate::models::{License, NormalizedKey, RawCandidate};

/// Why a candidate could not be turned into a lookup key.
///
/// Deliberately narrow: almost every malformed candidate still yields a
/// best-effort key (see [`NormalizedKey::best_effort`]); only a candidate
/// with no card number at all is unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    #[error("candidate has no card number")]
    MissingCardNumber,
}

/// Canonicalize one raw candidate into a [`NormalizedKey`].
///
/// - The set id is uppercased.
/// - Pokemon: the card number is round-tripped through an integer to strip
///   leading zeros (`"078"` -> `"78"`). Non-numeric numbers (promo codes)
///   take the explicit fallback branch and pass through unchanged.
/// - One-piece: the full hyphenated code, uppercased, is the card number and
///   the prefix before the hyphen is the set id -- regardless of what the
///   model put in `set_id`, so the two always agree. A code with no hyphen
///   produces a best-effort key from the raw strings instead of failing.
pub fn normalize(raw: &RawCandidate) -> Result<NormalizedKey, NormalizeError> {
    let number = raw
        .card_number
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or(NormalizeError::MissingCardNumber)?;
    let set_id = raw
        .set_id
        .as_deref()
        .unwrap_or("")
        .trim()
        .to_uppercase();

    match raw.licence {
        License::Pokemon => {
            let card_number = match number.parse::<i64>() {
                Ok(n) => n.to_string(),
                // Promo codes and other alphanumerics are valid card
                // numbers; keep them verbatim.
                Err(_) => number.to_string(),
            };
            Ok(NormalizedKey {
                licence: raw.licence,
                set_id,
                card_number,
                best_effort: false,
            })
        }
        License::OnePiece => {
            let code = number.to_uppercase();
            match code.split_once('-') {
                Some((prefix, _)) if !prefix.is_empty() => Ok(NormalizedKey {
                    licence: raw.licence,
                    set_id: prefix.to_string(),
                    card_number: code,
                    best_effort: false,
                }),
                _ => Ok(NormalizedKey {
                    licence: raw.licence,
                    set_id,
                    card_number: code,
                    best_effort: true,
                }),
            }
        }
    }
}

/// Normalize a batch of candidates into distinct keys, preserving first-seen
/// order. Candidates that cannot be normalized are skipped here; the caller
/// surfaces them with empty matches instead.
pub fn distinct_keys(candidates: &[RawCandidate]) -> Vec<NormalizedKey> {
    let mut seen = HashSet::new();
    let mut keys = Vec::new();
    for candidate in candidates {
        if let Ok(key) = normalize(candidate) {
            if seen.insert(key.clone()) {
                keys.push(key);
            }
        }
    }
    keys
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BinderError;

/// The trading-card game a card belongs to. Determines the extraction and
/// normalization rules applied to recognition candidates.
///
/// The canonical wire form is `"pokemon"` / `"one piece"`; common variants
/// (`"one_piece"`, capitalized forms) are accepted on input since the
/// recognition model is not perfectly consistent about casing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum License {
    #[serde(rename = "pokemon", alias = "Pokemon", alias = "POKEMON")]
    Pokemon,
    #[serde(
        rename = "one piece",
        alias = "one_piece",
        alias = "one-piece",
        alias = "One Piece",
        alias = "ONE PIECE"
    )]
    OnePiece,
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            License::Pokemon => write!(f, "pokemon"),
            License::OnePiece => write!(f, "one piece"),
        }
    }
}

impl FromStr for License {
    type Err = BinderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', '-'], " ").as_str() {
            "pokemon" => Ok(License::Pokemon),
            "one piece" => Ok(License::OnePiece),
            other => Err(BinderError::InvalidArgument(format!(
                "unknown licence: {other}"
            ))),
        }
    }
}

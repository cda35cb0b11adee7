use serde::{Deserialize, Serialize};

use super::card::CardRef;
use super::license::License;
use crate::error::{BinderError, Result};

/// Per-user ownership record: how many copies of one catalog card the user
/// owns.
///
/// At most one entry exists per `(user, card_ref)` pair, and a count of zero
/// is represented by the record being absent, never stored. The constructor
/// enforces `count >= 1` for entries created by this crate; the field stays
/// public so the ownership logic can still detect and reject records that
/// reached the backend in violation of the invariant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionEntry {
    #[serde(rename = "_id")]
    pub id: String,
    pub card_ref: CardRef,
    pub count: u32,
    pub licence: License,
}

impl CollectionEntry {
    pub fn new(id: String, card_ref: CardRef, count: u32, licence: License) -> Result<Self> {
        if count == 0 {
            return Err(BinderError::InvalidArgument(
                "a collection entry with count 0 must not exist".into(),
            ));
        }
        Ok(CollectionEntry {
            id,
            card_ref,
            count,
            licence,
        })
    }
}

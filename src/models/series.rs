use serde::{Deserialize, Serialize};

use super::license::License;

/// A catalog set: one physical expansion of a licence, identified by its
/// short alphanumeric `set_id` (e.g. `SV6`, `OP08`).
///
/// Series documents are created by the catalog import tooling and are
/// read-only from this crate's perspective; they own a sub-collection of
/// [`super::CatalogCard`]s.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Series {
    #[serde(rename = "_id")]
    pub id: String,
    pub set_id: String,
    pub serie_name: String,
    pub licence: License,
    /// Release date in `YYYY-MM-DD` form; series listings sort on it
    /// descending.
    pub date: String,
    #[serde(default)]
    pub serie_logo: String,
    #[serde(default)]
    pub symbol_img: String,
}

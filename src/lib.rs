//! Trading-card binder backend.
//!
//! Identifies trading cards (pokemon, one piece) on a photo through an
//! external vision model, reconciles the candidates against a canonical
//! card catalog, and tracks per-user owned-card collections with counts.
//! The catalog and collections live in a pluggable document store behind
//! the [`store::CardStore`] trait.
//!
//! # Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//! use tcg_binder::recognize::GeminiRecognizer;
//! use tcg_binder::store::MemoryStore;
//! use tcg_binder::Binder;
//!
//! let store = Arc::new(MemoryStore::new());
//! let binder = Binder::builder()
//!     .store(store)
//!     .recognizer(Arc::new(GeminiRecognizer::new("api-key")))
//!     .build()
//!     .unwrap();
//!
//! // Identify the cards on a photo, merged with the user's collection
//! let photo = std::fs::read("cards.jpg").unwrap();
//! let cards = binder.read_photo("user@example.com", &photo).unwrap();
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod collection;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod recognize;
pub mod resolve;
pub mod store;

#[cfg(feature = "async")]
pub use async_client::AsyncBinder;
pub use error::{BinderError, Result};

use std::sync::Arc;

use collection::CollectionOps;
use fetch::OwnedCard;
use models::{CatalogCard, License, Series};
use pipeline::IdentifiedCard;
use recognize::Recognizer;
use resolve::Resolver;
use store::CardStore;

// ---------------------------------------------------------------------------
// BinderBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`Binder`] instance.
///
/// A store handle is required; a recognizer is only needed for the photo
/// read path and can be left out for catalog/collection-only usage.
#[derive(Default)]
pub struct BinderBuilder {
    store: Option<Arc<dyn CardStore>>,
    recognizer: Option<Arc<dyn Recognizer>>,
}

impl BinderBuilder {
    /// Set the document-store handle (required).
    pub fn store(mut self, store: Arc<dyn CardStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the recognition adapter used by [`Binder::read_photo`].
    pub fn recognizer(mut self, recognizer: Arc<dyn Recognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    pub fn build(self) -> Result<Binder> {
        let store = self.store.ok_or_else(|| {
            BinderError::InvalidArgument("a card store is required to build a Binder".into())
        })?;
        Ok(Binder {
            store,
            recognizer: self.recognizer,
        })
    }
}

// ---------------------------------------------------------------------------
// Binder
// ---------------------------------------------------------------------------

/// The main entry point: owns the store handle (and optional recognizer)
/// and exposes the identification, resolution and collection interfaces as
/// lightweight borrowing wrappers.
///
/// Created via [`Binder::builder()`].
pub struct Binder {
    store: Arc<dyn CardStore>,
    recognizer: Option<Arc<dyn Recognizer>>,
}

impl Binder {
    /// Create a new builder for configuring the binder.
    pub fn builder() -> BinderBuilder {
        BinderBuilder::default()
    }

    // -- Component accessors -----------------------------------------------

    /// Borrow the underlying store handle.
    pub fn store(&self) -> &dyn CardStore {
        self.store.as_ref()
    }

    /// Access the catalog resolver.
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(self.store.as_ref())
    }

    /// Access the ownership operations for one user identity.
    pub fn collection(&self, user: &str) -> CollectionOps<'_> {
        CollectionOps::new(self.store.as_ref(), user)
    }

    // -- Pipeline conveniences ---------------------------------------------

    /// Identify the cards on a photo and reconcile them against catalog and
    /// the user's collection. Requires a recognizer to be configured.
    pub fn read_photo(&self, user: &str, image: &[u8]) -> Result<Vec<IdentifiedCard>> {
        let recognizer = self.recognizer.as_deref().ok_or_else(|| {
            BinderError::InvalidArgument("no recognizer configured for the photo read path".into())
        })?;
        pipeline::read_photo(self.store.as_ref(), recognizer, user, image)
    }

    /// List a series' cards merged with the user's owned counts.
    pub fn fetch_set_with_ownership(&self, series_id: &str, user: &str) -> Result<Vec<OwnedCard>> {
        fetch::fetch_set_with_ownership(self.store.as_ref(), series_id, user)
    }

    /// List all catalog series, newest first, optionally by licence.
    pub fn all_series(&self, licence: Option<License>) -> Result<Vec<Series>> {
        self.store.all_series(licence)
    }

    /// Single-card lookup by raw set id / card number strings.
    pub fn find_card(
        &self,
        set_id: Option<&str>,
        card_number: &str,
        licence: License,
    ) -> Result<Vec<CatalogCard>> {
        self.resolver().find_card(set_id, card_number, licence)
    }
}

//! Async wrapper around [`Binder`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all binder operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free while
//! the store and the recognition HTTP call do blocking I/O. [`Binder`] is
//! `Sync` (its store handle is shared behind an `Arc`), so no lock is
//! needed around it.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tcg_binder::store::MemoryStore;
//! use tcg_binder::{AsyncBinder, Binder};
//!
//! let binder = Binder::builder()
//!     .store(Arc::new(MemoryStore::new()))
//!     .build()
//!     .unwrap();
//! let binder = AsyncBinder::new(binder);
//!
//! let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! // Run any sync binder method via closure
//! let series = rt.block_on(binder.run(|b| b.all_series(None))).unwrap();
//! ```

use std::sync::Arc;

use crate::error::{BinderError, Result};
use crate::fetch::OwnedCard;
use crate::models::{License, Series};
use crate::pipeline::IdentifiedCard;
use crate::Binder;

/// Async wrapper around [`Binder`].
///
/// All operations are dispatched to the blocking thread pool via
/// [`tokio::task::spawn_blocking`].
pub struct AsyncBinder {
    inner: Arc<Binder>,
}

impl AsyncBinder {
    pub fn new(binder: Binder) -> Self {
        Self {
            inner: Arc::new(binder),
        }
    }

    /// Run a sync binder operation on the blocking thread pool.
    ///
    /// The closure receives a `&Binder` reference and should return a
    /// `Result<T>`.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Binder) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let binder = self.inner.clone();
        tokio::task::spawn_blocking(move || f(&binder))
            .await
            .map_err(|e| BinderError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Identify the cards on a photo asynchronously.
    pub async fn read_photo(&self, user: &str, image: Vec<u8>) -> Result<Vec<IdentifiedCard>> {
        let user = user.to_string();
        self.run(move |b| b.read_photo(&user, &image)).await
    }

    /// List a series' cards merged with the user's owned counts.
    pub async fn fetch_set_with_ownership(
        &self,
        series_id: &str,
        user: &str,
    ) -> Result<Vec<OwnedCard>> {
        let series_id = series_id.to_string();
        let user = user.to_string();
        self.run(move |b| b.fetch_set_with_ownership(&series_id, &user))
            .await
    }

    /// List all catalog series, newest first, optionally by licence.
    pub async fn all_series(&self, licence: Option<License>) -> Result<Vec<Series>> {
        self.run(move |b| b.all_series(licence)).await
    }
}

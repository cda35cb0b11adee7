use tcg_binder::AsyncBinder;

/// Shared application state available to all route handlers via Axum's
/// `State` extractor.
pub struct AppState {
    /// The async binder instance. Dispatches blocking store and recognition
    /// operations to a thread pool internally.
    pub binder: AsyncBinder,

    /// Async HTTP client for verifying bearer tokens against the external
    /// identity endpoint. Separate from the recognizer's own blocking
    /// `reqwest` client.
    pub http: reqwest::Client,
}

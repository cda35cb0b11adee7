mod auth;
mod error;
mod routes;
mod state;

use std::sync::Arc;

use axum::routing::{delete, get, patch, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use tcg_binder::recognize::GeminiRecognizer;
use tcg_binder::store::MemoryStore;
use tcg_binder::{AsyncBinder, Binder};

use state::AppState;

#[tokio::main]
async fn main() {
    let catalog_path = std::env::var("CATALOG_PATH")
        .expect("CATALOG_PATH must point to a catalog snapshot file");
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    eprintln!("Loading catalog snapshot from {catalog_path}...");
    let store = Arc::new(MemoryStore::new());
    let snapshot =
        std::fs::read_to_string(&catalog_path).expect("failed to read catalog snapshot");
    let series = store
        .load_snapshot(&snapshot)
        .expect("failed to load catalog snapshot");
    eprintln!("Catalog ready: {series} series.");

    let mut builder = Binder::builder().store(store);
    match std::env::var("GEMINI_API_KEY") {
        Ok(key) => builder = builder.recognizer(Arc::new(GeminiRecognizer::new(key))),
        Err(_) => eprintln!("GEMINI_API_KEY not set; photo reads will be rejected"),
    }
    let binder = AsyncBinder::new(builder.build().expect("failed to build binder"));

    let state = Arc::new(AppState {
        binder,
        http: reqwest::Client::new(),
    });

    let app = Router::new()
        .route("/api/cards/read", post(routes::cards::read_cards))
        .route("/api/cards", get(routes::cards::get_card))
        .route("/api/sets", get(routes::sets::list_sets))
        .route("/api/sets/{series_id}/cards", get(routes::sets::set_cards))
        .route("/api/collection", patch(routes::collection::update_collection))
        .route(
            "/api/collection/{*card_path}",
            delete(routes::collection::remove_card),
        )
        .layer(CorsLayer::permissive())
        .with_state(state);

    eprintln!("Listening on http://{bind_addr}");
    let listener = tokio::net::TcpListener::bind(&bind_addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

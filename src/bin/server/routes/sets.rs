use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use tcg_binder::models::License;

use crate::auth;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ListSetsParams {
    pub licence: Option<License>,
}

/// GET /api/sets?licence=pokemon
///
/// List all catalog series, newest first, optionally filtered by licence.
pub async fn list_sets(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<ListSetsParams>,
) -> Result<Json<Value>, AppError> {
    auth::require_user(&state, &headers).await?;

    let series = state.binder.all_series(params.licence).await?;
    Ok(Json(json!({ "series": series })))
}

/// GET /api/sets/:series_id/cards
///
/// List a series' cards merged with the caller's owned counts, sorted by
/// numeric card number.
pub async fn set_cards(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(series_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let email = auth::require_user(&state, &headers).await?;

    let cards = state
        .binder
        .fetch_set_with_ownership(&series_id, &email)
        .await?;
    Ok(Json(json!({ "cards": cards })))
}

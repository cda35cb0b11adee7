use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use tcg_binder::models::{CardRef, License};

use crate::auth;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UpdateCollectionBody {
    pub cards: Vec<CardAcquisition>,
}

#[derive(Deserialize)]
pub struct CardAcquisition {
    #[serde(rename = "ref")]
    pub reference: String,
    pub licence: License,
}

/// PATCH /api/collection
///
/// Record the acquisition of a batch of resolved cards. Applied
/// sequentially per card; fails fast on the first store error.
pub async fn update_collection(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<UpdateCollectionBody>,
) -> Result<Json<Value>, AppError> {
    let email = auth::require_user(&state, &headers).await?;

    let mut cards = Vec::with_capacity(body.cards.len());
    for card in body.cards {
        let reference = CardRef::parse(&card.reference)?;
        cards.push((reference, card.licence));
    }

    state
        .binder
        .run(move |b| b.collection(&email).acquire_all(&cards))
        .await?;
    Ok(Json(json!({ "response": true })))
}

/// DELETE /api/collection/*card_path
///
/// Remove one copy of a card from the caller's collection, identified by
/// its stable reference path. 404 when the path names no catalog card or
/// the caller owns none of it.
pub async fn remove_card(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(card_path): Path<String>,
) -> Result<Json<Value>, AppError> {
    let email = auth::require_user(&state, &headers).await?;

    let reference = CardRef::parse(&card_path)
        .map_err(|_| AppError::not_found(format!("Card with path {card_path} not found")))?;

    let known = {
        let reference = reference.clone();
        state
            .binder
            .run(move |b| b.store().card_by_ref(&reference))
            .await?
    };
    if known.is_none() {
        return Err(AppError::not_found(format!(
            "Card with path {card_path} not found"
        )));
    }

    state
        .binder
        .run(move |b| b.collection(&email).release(&reference))
        .await?;
    Ok(Json(json!({ "response": true })))
}

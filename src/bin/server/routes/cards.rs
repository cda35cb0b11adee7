use std::sync::Arc;

use axum::extract::{Multipart, Query, State};
use axum::http::HeaderMap;
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use tcg_binder::models::License;

use crate::auth;
use crate::error::AppError;
use crate::state::AppState;

/// POST /api/cards/read
///
/// Receive a photo (multipart field `image`) and return the identified
/// cards, each with its catalog versions and the caller's owned counts.
pub async fn read_cards(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let email = auth::require_user(&state, &headers).await?;

    let mut image: Option<Vec<u8>> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(format!("invalid multipart body: {e}")))?
    {
        if field.name() == Some("image") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::bad_request(format!("failed to read image field: {e}")))?;
            image = Some(bytes.to_vec());
        }
    }
    let image = image.ok_or_else(|| AppError::bad_request("missing multipart field: image"))?;

    let cards = state.binder.read_photo(&email, image).await?;
    Ok(Json(json!({ "cards": cards })))
}

#[derive(Deserialize)]
pub struct GetCardParams {
    pub set_id: Option<String>,
    pub card_number: String,
    pub licence: Option<License>,
}

/// GET /api/cards?set_id=SV6&card_number=52&licence=pokemon
///
/// Look a card up by its set id and card number. Returns all print variants.
pub async fn get_card(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<GetCardParams>,
) -> Result<Json<Value>, AppError> {
    auth::require_user(&state, &headers).await?;

    let licence = params.licence.unwrap_or(License::Pokemon);
    let cards = state
        .binder
        .run(move |b| b.find_card(params.set_id.as_deref(), &params.card_number, licence))
        .await?;

    Ok(Json(json!({ "card": cards })))
}

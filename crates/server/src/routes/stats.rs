use axum::{body::Bytes, extract::State, http::HeaderMap, response::Response, Json};
use common::types::{Empty, Envelope};

use crate::errors::ApiError;
use crate::state::AppState;

use super::{authorization, bot_payload, cached};

#[utoipa::path(get, path = "/api/stats", tag = "stats", responses((status = 200, description = "Player stats sorted by username")))]
pub async fn list(State(state): State<AppState>) -> Response {
    cached(Json(Envelope::ok(state.services.stats.list().await)))
}

#[utoipa::path(
    post,
    path = "/api/stats",
    tag = "stats",
    responses(
        (status = 200, description = "Stats upserted by uuid"),
        (status = 400, description = "Body is not an array"),
        (status = 401, description = "Bad bot secret"),
        (status = 500, description = "Bot secret not configured or storage failure")
    )
)]
pub async fn upsert(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Envelope<Empty>>, ApiError> {
    let auth = authorization(&headers);
    state.services.stats.upsert(auth, bot_payload(&body)).await?;
    Ok(Json(Envelope::message("Stats updated successfully")))
}

use axum::{body::Bytes, extract::State, http::HeaderMap, response::Response, Json};
use common::types::{Empty, Envelope};

use crate::errors::ApiError;
use crate::state::AppState;

use super::{authorization, bot_payload, cached};

#[utoipa::path(get, path = "/api/player-mappings", tag = "mappings", responses((status = 200, description = "Discord to Minecraft account links")))]
pub async fn list(State(state): State<AppState>) -> Response {
    cached(Json(Envelope::ok(state.services.mappings.list().await)))
}

#[utoipa::path(
    post,
    path = "/api/player-mappings",
    tag = "mappings",
    responses(
        (status = 200, description = "Mappings replaced"),
        (status = 400, description = "Body is not an object"),
        (status = 401, description = "Bad bot secret"),
        (status = 500, description = "Bot secret not configured or storage failure")
    )
)]
pub async fn replace(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Envelope<Empty>>, ApiError> {
    let auth = authorization(&headers);
    state.services.mappings.replace(auth, bot_payload(&body)).await?;
    Ok(Json(Envelope::message("Player mappings updated successfully")))
}

use axum::{body::Bytes, extract::State, http::HeaderMap, response::Response, Json};
use common::types::{Empty, Envelope};

use crate::errors::ApiError;
use crate::state::AppState;

use super::{authorization, bot_payload, cached};

#[utoipa::path(get, path = "/api/events", tag = "events", responses((status = 200, description = "Scheduled and active events, earliest first")))]
pub async fn list(State(state): State<AppState>) -> Response {
    cached(Json(Envelope::ok(state.services.events.list().await)))
}

#[utoipa::path(
    post,
    path = "/api/events",
    tag = "events",
    responses(
        (status = 200, description = "Events replaced"),
        (status = 400, description = "Body is not an array"),
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
    state.services.events.replace(auth, bot_payload(&body)).await?;
    Ok(Json(Envelope::message("Events updated successfully")))
}

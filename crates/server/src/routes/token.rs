use axum::{body::Bytes, extract::State, Json};
use common::types::Envelope;
use serde::{Deserialize, Serialize};

use crate::errors::ApiError;
use crate::state::AppState;

use super::json_body;

#[derive(Debug, Default, Deserialize)]
pub struct TokenRequest {
    pub password: Option<String>,
}

#[derive(Serialize)]
pub struct TokenBody {
    pub token: String,
}

/// Exchange the admin password for the admin token.
#[utoipa::path(
    post,
    path = "/api/get-token",
    tag = "auth",
    responses(
        (status = 200, description = "Token issued"),
        (status = 400, description = "Password missing"),
        (status = 403, description = "Wrong password"),
        (status = 500, description = "Admin token not configured")
    )
)]
pub async fn issue(State(state): State<AppState>, body: Bytes) -> Result<Json<Envelope<TokenBody>>, ApiError> {
    let req: TokenRequest = json_body(&body)?.unwrap_or_default();
    let token = state.services.token.issue(req.password.as_deref()).await?;
    Ok(Json(Envelope::ok(TokenBody { token })))
}

pub mod blog;
pub mod events;
pub mod mappings;
pub mod stats;
pub mod teams;
pub mod token;

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::de::DeserializeOwned;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::errors::ApiError;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Listings may be served from a shared cache for a minute.
pub const LISTING_CACHE_CONTROL: &str = "s-maxage=60, stale-while-revalidate";

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub(crate) async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}

async fn not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "Not found")
}

/// Answer every OPTIONS request with an empty 200; CORS headers are added by
/// the outer layer.
async fn options_short_circuit(req: Request, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        return (StatusCode::OK, Body::empty()).into_response();
    }
    next.run(req).await
}

/// Wrap a listing so shared caches may hold it briefly.
pub(crate) fn cached<T: IntoResponse>(body: T) -> Response {
    let mut res = body.into_response();
    res.headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static(LISTING_CACHE_CONTROL));
    res
}

/// Raw `Authorization` header, if it is valid visible ASCII.
pub(crate) fn authorization(headers: &HeaderMap) -> Option<&str> {
    headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok())
}

/// Parse a JSON request body; an empty body yields `None`.
pub(crate) fn json_body<T: DeserializeOwned>(body: &Bytes) -> Result<Option<T>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body)
        .map(Some)
        .map_err(|e| ApiError::bad_request(format!("Invalid JSON body: {e}")))
}

/// Bot payloads: anything that is not valid JSON is treated as absent so the
/// secret is still checked before the shape is reported.
pub(crate) fn bot_payload(body: &Bytes) -> Option<serde_json::Value> {
    match serde_json::from_slice(body) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(error = %e, "unparseable bot payload");
            None
        }
    }
}

pub fn default_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Build the full application router.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/api/blog", get(blog::handle).post(blog::handle).fallback(method_not_allowed))
        .route("/api/events", get(events::list).post(events::replace).fallback(method_not_allowed))
        .route("/api/teams", get(teams::list).post(teams::replace).fallback(method_not_allowed))
        .route(
            "/api/player-mappings",
            get(mappings::list).post(mappings::replace).fallback(method_not_allowed),
        )
        .route("/api/stats", get(stats::list).post(stats::upsert).fallback(method_not_allowed))
        .route("/api/get-token", post(token::issue).fallback(method_not_allowed));

    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(api)
        .fallback(not_found)
        .with_state(state)
        .layer(middleware::from_fn(options_short_circuit))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

use axum::{
    body::Bytes,
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use common::types::{Empty, Envelope};
use models::blog::BlogPost;
use models::Snowflake;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use service::services::NewBlogPost;
use tracing::debug;

use crate::errors::ApiError;
use crate::state::AppState;

use super::json_body;

#[derive(Debug, Deserialize)]
pub struct BlogQuery {
    pub action: Option<String>,
}

/// Union of the fields any blog action reads from the body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogRequest {
    pub password: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub files: Option<Value>,
    pub auth_token: Option<String>,
    pub blog_id: Option<Snowflake>,
    pub old_password: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Serialize)]
struct BlogsBody {
    blogs: Vec<BlogPost>,
}

#[derive(Serialize)]
struct BlogBody {
    blog: BlogPost,
}

/// Blog endpoint; the operation is chosen by `?action=`.
#[utoipa::path(
    post,
    path = "/api/blog",
    tag = "blog",
    params(("action" = String, Query, description = "get_blogs | login | create_blog | delete_blog | change_password")),
    responses(
        (status = 200, description = "Action succeeded"),
        (status = 400, description = "Missing input or unknown action"),
        (status = 401, description = "Unauthorized or wrong password"),
        (status = 404, description = "Blog not found"),
        (status = 500, description = "Admin token not configured or storage failure")
    )
)]
pub async fn handle(
    State(state): State<AppState>,
    Query(query): Query<BlogQuery>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let action = query.action.unwrap_or_default();
    debug!(%action, "blog action");
    let svc = &state.services.blog;

    if action == "get_blogs" {
        let blogs = svc.list().await;
        return Ok(Json(Envelope::ok(BlogsBody { blogs })).into_response());
    }

    let req: BlogRequest = match action.as_str() {
        "login" | "create_blog" | "delete_blog" | "change_password" => json_body(&body)?.unwrap_or_default(),
        _ => return Err(ApiError::bad_request(format!("Invalid action: {action}"))),
    };
    let token = req.auth_token.as_deref();

    let res = match action.as_str() {
        "login" => {
            svc.login(req.password.as_deref()).await?;
            Json(Envelope::ok(Empty {})).into_response()
        }
        "create_blog" => {
            let input = NewBlogPost { title: req.title, content: req.content, excerpt: req.excerpt, files: req.files };
            let blog = svc.create(token, input).await?;
            Json(Envelope::ok(BlogBody { blog })).into_response()
        }
        "delete_blog" => {
            svc.delete(token, req.blog_id.as_ref().map(Snowflake::as_str)).await?;
            Json(Envelope::ok(Empty {})).into_response()
        }
        _ => {
            svc.change_password(token, req.old_password.as_deref(), req.new_password.as_deref()).await?;
            Json(Envelope::message("Password updated successfully")).into_response()
        }
    };
    Ok(res)
}

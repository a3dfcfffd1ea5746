use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::blog::handle,
        crate::routes::events::list,
        crate::routes::events::replace,
        crate::routes::teams::list,
        crate::routes::teams::replace,
        crate::routes::mappings::list,
        crate::routes::mappings::replace,
        crate::routes::stats::list,
        crate::routes::stats::upsert,
        crate::routes::token::issue,
    ),
    tags(
        (name = "health"),
        (name = "blog"),
        (name = "events"),
        (name = "teams"),
        (name = "mappings"),
        (name = "stats"),
        (name = "auth")
    )
)]
pub struct ApiDoc;

use axum::Router;
use axum::routing::get;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

/// Server-rendered pages and the upload form.
pub fn page_routes(config: &AppConfig) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::index::index).post(handlers::upload::upload),
        )
        .route("/view/{key}", get(handlers::viewer::view))
        .layer(handlers::upload::upload_body_limit(
            config.storage.max_upload_size,
        ))
}

/// JSON endpoints, collected into the OpenAPI document.
pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::pdf::serve_pdf))
        .routes(routes!(handlers::chat::chat))
}

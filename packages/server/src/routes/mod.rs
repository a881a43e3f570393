mod v1;

use axum::{Router, routing::get};
use utoipa_axum::router::OpenApiRouter;

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

pub fn api_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new().nest("/v1", v1::routes(config))
}

/// Public, unauthenticated routes that serve hosted websites.
pub fn site_routes() -> Router<AppState> {
    Router::new()
        .route("/sites/{id}", get(handlers::site::render_site))
        .route("/sites/{id}/{*path}", get(handlers::site::serve_resource))
}

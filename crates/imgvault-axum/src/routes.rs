//! Route definitions and router construction.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::bootstrap::{AxumContext, CorsConfig};
use crate::handlers;
use crate::state::AppState;

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            use axum::http::HeaderValue;
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// Build all API routes without the `/api` prefix (for nesting under /api).
///
/// Static segments (`all`, `tags`) win over `{image_id}`, so assets with those
/// exact names are only reachable through the listings.
pub(crate) fn api_routes() -> Router<AppState> {
    Router::new()
        // Media API
        .route("/media/images/{folder}", get(handlers::media::list))
        .route("/media/images/{folder}/all", get(handlers::media::all))
        .route("/media/images/{folder}/tags", get(handlers::media::by_tags))
        .route(
            "/media/images/{folder}/tags/{tag}",
            get(handlers::media::by_tag),
        )
        .route(
            "/media/images/{folder}/{image_id}",
            get(handlers::media::get),
        )
        // Download API
        .route(
            "/download/download-images",
            post(handlers::download::download_images),
        )
}

pub fn create_router(ctx: AxumContext, cors_config: &CorsConfig) -> Router {
    let state: AppState = Arc::new(ctx);
    let cors = build_cors_layer(cors_config);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes().with_state(state).layer(cors))
        .layer(TraceLayer::new_for_http())
}

pub(crate) async fn health_check() -> &'static str {
    "OK"
}

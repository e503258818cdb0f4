//! API router.
//!
//! Returns a composable `Router` with all endpoints nested under `/api/`.

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Build the API router.
///
/// CORS is wide open: the dashboard front end is served from a different
/// origin during development.
pub fn api_router(ctx: ApiContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/drugs", get(endpoints::drugs::list))
        .route("/drugs/analyze", post(endpoints::drugs::analyze))
        .route("/drugs/identify", post(endpoints::identify::identify))
        .route("/sessions", post(endpoints::sessions::create))
        .route(
            "/sessions/:id/selection",
            put(endpoints::sessions::set_selection),
        )
        .route("/sessions/:id/panel", get(endpoints::sessions::panel))
        .route("/sessions/:id/report", get(endpoints::sessions::pdf_report))
        .with_state(ctx);

    Router::new().nest("/api", api).layer(cors)
}

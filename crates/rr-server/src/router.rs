//! Axum router construction.
//!
//! Every path-carrying route goes through the sandbox before touching the
//! filesystem; the prefixed routes are matched before the browse catch-all.

use axum::middleware;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::context::AppContext;
use crate::middleware::request_id::request_id_middleware;
use crate::routes;

/// Build the complete Axum router.
pub fn build_router(ctx: AppContext) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/api/tree", get(routes::tree::tree_root))
        .route("/api/tree/{*path}", get(routes::tree::tree))
        .route("/play/{*path}", get(routes::play::play))
        .route("/stream/{*path}", get(routes::stream::stream_file))
        .route("/", get(routes::browse::browse_root))
        .route("/{*path}", get(routes::browse::browse))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

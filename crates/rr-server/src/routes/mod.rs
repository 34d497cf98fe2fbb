//! Route handlers.

pub mod browse;
pub mod play;
pub mod stream;
pub mod tree;

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}

//! JSON view of the directory tree.

use axum::extract::{Path, State};
use axum::Json;

use rr_library::{Directory, Entry};

use crate::context::AppContext;
use crate::error::AppError;

/// GET /api/tree
pub async fn tree_root(State(ctx): State<AppContext>) -> Result<Json<Directory>, AppError> {
    tree_path(&ctx, "").await
}

/// GET /api/tree/{*path}
pub async fn tree(
    State(ctx): State<AppContext>,
    Path(path): Path<String>,
) -> Result<Json<Directory>, AppError> {
    tree_path(&ctx, &path).await
}

async fn tree_path(ctx: &AppContext, requested: &str) -> Result<Json<Directory>, AppError> {
    match ctx.entry(requested).await? {
        Entry::Directory(dir) => Ok(Json(ctx.build_tree(dir).await?)),
        Entry::File { .. } => Err(rr_core::Error::not_found("directory", requested).into()),
    }
}

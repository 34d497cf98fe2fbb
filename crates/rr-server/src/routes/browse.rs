//! Directory browsing.
//!
//! A directory renders as an HTML listing; a media file redirects to its
//! player page.

use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};

use rr_library::Entry;

use crate::context::AppContext;
use crate::error::AppError;
use crate::render;

/// GET /
pub async fn browse_root(State(ctx): State<AppContext>) -> Result<Response, AppError> {
    browse_path(&ctx, "").await
}

/// GET /{*path}
pub async fn browse(
    State(ctx): State<AppContext>,
    Path(path): Path<String>,
) -> Result<Response, AppError> {
    browse_path(&ctx, &path).await
}

async fn browse_path(ctx: &AppContext, requested: &str) -> Result<Response, AppError> {
    match ctx.entry(requested).await? {
        Entry::Directory(dir) => {
            let tree = ctx.build_tree(dir).await?;
            Ok(Html(render::listing(&tree).into_string()).into_response())
        }
        Entry::File { path, .. } => {
            if !ctx.extensions.allows(path.as_path()) {
                return Err(rr_core::Error::not_found("file", requested).into());
            }
            Ok(Redirect::to(&render::play_href(path.relative())).into_response())
        }
    }
}

//! Player page.

use axum::extract::{Path, State};
use axum::response::Html;

use crate::context::AppContext;
use crate::error::AppError;
use crate::render;

/// GET /play/{*path}
///
/// 404 unless the path names an allowed media file.
pub async fn play(
    State(ctx): State<AppContext>,
    Path(path): Path<String>,
) -> Result<Html<String>, AppError> {
    let file = ctx.media_file(&path).await?;
    Ok(Html(render::player(&file.path).into_string()))
}

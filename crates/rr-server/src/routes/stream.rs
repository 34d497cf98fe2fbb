//! Media stream endpoint.
//!
//! Serves an allowed media file with single-range `Range` support. The file
//! is reopened for every request, so concurrent requests for the same file
//! each get their own handle and cursor.

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap};
use axum::response::Response;

use crate::context::AppContext;
use crate::error::AppError;
use crate::streaming::{self, StreamPlan};

/// GET /stream/{*path}
pub async fn stream_file(
    State(ctx): State<AppContext>,
    Path(path): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let file = ctx.media_file(&path).await?;

    let range_header = match headers.get(header::RANGE) {
        Some(value) => Some(value.to_str().map_err(|_| {
            rr_core::Error::range_not_satisfiable(
                String::from_utf8_lossy(value.as_bytes()),
                file.size,
            )
        })?),
        None => None,
    };

    let range = streaming::parse_range(range_header, file.size)?;
    let plan = StreamPlan::new(file.size, range);

    Ok(streaming::serve_file(&file.path, plan, ctx.stream.effective_chunk_size()).await?)
}

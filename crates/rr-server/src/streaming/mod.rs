//! Media streaming: range parsing, content-type guessing, and chunked file
//! responses.
//!
//! A stream request moves through these steps: the `Range` header is parsed
//! into an optional [`ByteRange`], a [`StreamPlan`] picks a whole-file (200)
//! or partial (206) response, and a [`ChunkReader`] produces the body lazily.
//! An invalid range ends the request with 416 before any file is opened.

pub mod chunked;
pub mod range;

pub use chunked::ChunkReader;
pub use range::{parse_range, ByteRange};

use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::Response;

use rr_core::{Error, Result};
use rr_library::ResolvedPath;

/// What a stream response will send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamPlan {
    WholeFile { size: u64 },
    Partial(ByteRange),
}

impl StreamPlan {
    pub fn new(size: u64, range: Option<ByteRange>) -> Self {
        match range {
            Some(range) => StreamPlan::Partial(range),
            None => StreamPlan::WholeFile { size },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            StreamPlan::WholeFile { .. } => StatusCode::OK,
            StreamPlan::Partial(_) => StatusCode::PARTIAL_CONTENT,
        }
    }

    /// File offset of the first byte sent.
    pub fn offset(&self) -> u64 {
        match self {
            StreamPlan::WholeFile { .. } => 0,
            StreamPlan::Partial(range) => range.start(),
        }
    }

    /// Number of bytes sent, i.e. the `Content-Length`.
    pub fn length(&self) -> u64 {
        match self {
            StreamPlan::WholeFile { size } => *size,
            StreamPlan::Partial(range) => range.length(),
        }
    }
}

/// Guess the MIME type from a file extension.
pub fn guess_content_type(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "mp4" | "m4v" => "video/mp4",
        "mkv" => "video/x-matroska",
        "avi" => "video/x-msvideo",
        "webm" => "video/webm",
        "ts" | "m2ts" => "video/mp2t",
        "mov" => "video/quicktime",
        "wmv" => "video/x-ms-wmv",
        "flv" => "video/x-flv",
        "m4a" => "audio/mp4",
        "mp3" => "audio/mpeg",
        "flac" => "audio/flac",
        _ => "application/octet-stream",
    }
}

/// Content type for a resolved file, from its extension.
pub fn content_type_for(path: &ResolvedPath) -> &'static str {
    let extension = path
        .as_path()
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");
    guess_content_type(extension)
}

/// Serve `path` according to `plan`, reading at most `chunk_size` bytes at
/// a time so memory stays bounded regardless of file size.
pub async fn serve_file(
    path: &ResolvedPath,
    plan: StreamPlan,
    chunk_size: usize,
) -> Result<Response> {
    let reader = ChunkReader::open(path.as_path(), plan.offset(), plan.length(), chunk_size)
        .await
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::not_found("file", path.relative()),
            _ => Error::from(e),
        })?;

    tracing::debug!(
        path = %path.relative(),
        status = plan.status().as_u16(),
        offset = plan.offset(),
        length = plan.length(),
        "Streaming file"
    );

    let mut builder = Response::builder()
        .status(plan.status())
        .header(header::CONTENT_TYPE, content_type_for(path))
        .header(header::CONTENT_LENGTH, plan.length().to_string())
        .header(header::ACCEPT_RANGES, "bytes");
    if let StreamPlan::Partial(range) = plan {
        builder = builder.header(header::CONTENT_RANGE, range.content_range());
    }

    builder
        .body(Body::from_stream(reader.into_stream()))
        .map_err(|e| Error::Internal(format!("failed to build response: {e}")))
}

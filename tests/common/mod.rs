//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which lays out a temporary library (with a
//! `secret.mp4` placed just outside the root) and a full [`AppContext`] over
//! it. [`TestHarness::with_server`] starts Axum on a random port for
//! HTTP-level testing; [`TestHarness::send`] drives the router in-process
//! so raw, un-normalised URIs reach the handlers untouched.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use tower::ServiceExt;

use rr_core::config::Config;
use rr_server::context::AppContext;
use rr_server::router::build_router;

/// Test harness wrapping a temporary library and the [`AppContext`] that
/// serves it.
pub struct TestHarness {
    pub ctx: AppContext,
    dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create an empty library with default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create an empty library; `config.library.root` is replaced with the
    /// temporary root.
    pub fn with_config(mut config: Config) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = dir.path().join("library");
        std::fs::create_dir_all(&root).expect("failed to create library root");
        std::fs::write(dir.path().join("secret.mp4"), b"outside the library")
            .expect("failed to write secret");

        config.library.root = root;
        let ctx = AppContext::from_config(&config).expect("failed to build context");
        Self { ctx, dir }
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        Self::with_server_config(Config::default()).await
    }

    /// Start an Axum server with custom config on a random port.
    pub async fn with_server_config(config: Config) -> (Self, SocketAddr) {
        let harness = Self::with_config(config);
        let app = harness.app();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }

    /// Library root on disk.
    pub fn root(&self) -> PathBuf {
        self.dir.path().join("library")
    }

    /// The directory containing the library root.
    pub fn outside(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file below the library root, creating parent directories.
    pub fn write(&self, relative: &str, contents: &[u8]) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create parent");
        }
        std::fs::write(&path, contents).expect("failed to write file");
        path
    }

    /// Create a directory below the library root.
    pub fn mkdir(&self, relative: &str) -> PathBuf {
        let path = self.root().join(relative);
        std::fs::create_dir_all(&path).expect("failed to create dir");
        path
    }

    /// Build a fresh router over this harness's context.
    pub fn app(&self) -> Router {
        build_router(self.ctx.clone())
    }

    /// Send a GET for `uri` through the router without a network hop.
    pub async fn send(&self, uri: &str) -> Response {
        self.send_request(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    /// Send an arbitrary request through the router.
    pub async fn send_request(&self, request: Request<Body>) -> Response {
        self.app()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }
}

/// Deterministic payload of `len` bytes.
pub fn payload(len: usize) -> Vec<u8> {
    (0..=255u8).cycle().take(len).collect()
}

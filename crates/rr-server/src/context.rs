//! Application context shared across route handlers.
//!
//! [`AppContext`] is built once at startup from the loaded [`Config`] and
//! handed to every handler through Axum state. It is read-only: the root,
//! the extension allow-set, and the streaming settings never change while
//! the server runs.

use std::sync::Arc;

use rr_core::config::{Config, StreamConfig};
use rr_core::{Error, ExtensionSet, Result};
use rr_library::{Directory, Entry, ResolvedPath, Sandbox, TreeBuilder};

#[derive(Clone)]
pub struct AppContext {
    pub sandbox: Arc<Sandbox>,
    pub extensions: Arc<ExtensionSet>,
    pub stream: StreamConfig,
    pub max_depth: Option<usize>,
}

/// A regular file with an allowed extension.
#[derive(Debug, Clone)]
pub struct MediaFile {
    pub path: ResolvedPath,
    pub size: u64,
}

impl AppContext {
    /// Canonicalize the configured root and freeze the settings.
    pub fn from_config(config: &Config) -> Result<Self> {
        let sandbox = Sandbox::new(&config.library.root)?;
        Ok(Self {
            sandbox: Arc::new(sandbox),
            extensions: Arc::new(config.library.extension_set()),
            stream: config.stream,
            max_depth: config.library.max_depth,
        })
    }

    /// Resolve and classify a request path on a blocking thread.
    pub async fn entry(&self, requested: &str) -> Result<Entry> {
        let sandbox = Arc::clone(&self.sandbox);
        let requested = requested.to_string();
        tokio::task::spawn_blocking(move || sandbox.entry(&requested))
            .await
            .map_err(|e| Error::Internal(format!("spawn_blocking join error: {e}")))?
    }

    /// Resolve a request path that must name an allowed media file.
    pub async fn media_file(&self, requested: &str) -> Result<MediaFile> {
        match self.entry(requested).await? {
            Entry::File { path, size } if self.extensions.allows(path.as_path()) => {
                Ok(MediaFile { path, size })
            }
            Entry::File { .. } | Entry::Directory(_) => Err(Error::not_found("file", requested)),
        }
    }

    /// Walk a resolved directory on a blocking thread.
    pub async fn build_tree(&self, dir: ResolvedPath) -> Result<Directory> {
        let sandbox = Arc::clone(&self.sandbox);
        let extensions = Arc::clone(&self.extensions);
        let max_depth = self.max_depth;
        tokio::task::spawn_blocking(move || {
            TreeBuilder::new(&sandbox, &extensions)
                .with_max_depth(max_depth)
                .build(&dir)
        })
        .await
        .map_err(|e| Error::Internal(format!("spawn_blocking join error: {e}")))
    }
}

//! Application configuration types.
//!
//! The top-level [`Config`] struct is deserialized from JSON. Every section
//! defaults sensibly so a completely empty `{}` file is valid. The loaded
//! value is read-only for the lifetime of the process.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::extensions::{ExtensionSet, DEFAULT_EXTENSIONS};
use crate::Error;

/// Chunk size used by the streamer when none is configured.
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub library: LibraryConfig,
    pub stream: StreamConfig,
}

impl Config {
    /// Deserialize a `Config` from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str)
            .map_err(|e| Error::Validation(format!("config parse error: {e}")))
    }

    /// Load configuration from a file, failing on any read or parse error.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Load configuration from a file path, falling back to defaults if the
    /// path is `None` or the file does not exist.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file {}: {e}", path.display());
                Self::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config file at {}; using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Failed to read config file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.server.port == 0 {
            warnings.push("server.port is 0; a random port will be assigned".into());
        }

        if self.library.extension_set().is_empty() {
            warnings.push("library.extensions is empty; no files will be listed".into());
        }

        if self.stream.chunk_size == 0 {
            warnings.push("stream.chunk_size is 0; using 1 byte chunks".into());
        }

        if self.library.max_depth == Some(0) {
            warnings.push(
                "library.max_depth is 0; sub-directories are listed but not expanded".into(),
            );
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 5000,
        }
    }
}

/// Media library settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Directory served as the library root.
    pub root: PathBuf,
    /// Allowed file extensions, case-insensitive.
    pub extensions: Vec<String>,
    /// Maximum directory depth included in a listing, relative to the
    /// directory being listed. `None` walks the whole subtree.
    pub max_depth: Option<usize>,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            max_depth: None,
        }
    }
}

impl LibraryConfig {
    pub fn extension_set(&self) -> ExtensionSet {
        ExtensionSet::new(&self.extensions)
    }
}

/// Body streaming settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Upper bound on the size of each body chunk, in bytes.
    pub chunk_size: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl StreamConfig {
    /// Chunk size clamped to at least one byte.
    pub fn effective_chunk_size(&self) -> usize {
        self.chunk_size.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_is_default() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.library.root, PathBuf::from("."));
        assert_eq!(config.library.max_depth, None);
        assert_eq!(config.stream.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(config.library.extension_set(), ExtensionSet::default());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let config = Config::from_json(
            r#"{"library": {"root": "/srv/movies", "extensions": ["MKV"]}, "server": {"port": 8080}}"#,
        )
        .unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.library.root, PathBuf::from("/srv/movies"));
        let set = config.library.extension_set();
        assert!(set.contains("mkv"));
        assert!(!set.contains("mp4"));
    }

    #[test]
    fn invalid_json_is_validation_error() {
        let err = Config::from_json("{ not json").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(Some(&dir.path().join("absent.json")));
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn load_or_default_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "[1, 2").unwrap();
        let config = Config::load_or_default(Some(&path));
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reelroom.json");
        std::fs::write(&path, r#"{"stream": {"chunk_size": 65536}}"#).unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.stream.chunk_size, 65536);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn validate_reports_warnings() {
        let mut config = Config::default();
        config.server.port = 0;
        config.library.extensions.clear();
        config.stream.chunk_size = 0;
        config.library.max_depth = Some(0);
        let warnings = config.validate();
        assert_eq!(warnings.len(), 4);
        assert!(warnings.iter().any(|w| w.contains("server.port")));
        assert!(warnings.iter().any(|w| w.contains("library.extensions")));
        assert!(warnings.iter().any(|w| w.contains("stream.chunk_size")));
        assert!(warnings
            .iter()
            .any(|w| w.contains("library.max_depth") && w.contains("not expanded")));
    }

    #[test]
    fn chunk_size_is_clamped() {
        let config = StreamConfig { chunk_size: 0 };
        assert_eq!(config.effective_chunk_size(), 1);
    }
}

//! Sandboxed resolution of client-supplied paths.
//!
//! A request path is first checked lexically (no absolute paths, no `..`
//! climbing above the request's own first segment), then joined onto the
//! canonical root and canonicalized by the OS. The canonical result must
//! have the canonical root as a component-wise prefix. Any canonicalization
//! failure other than "does not exist" is reported as an escape.

use std::fs::Metadata;
use std::path::{Component, Path, PathBuf};

use rr_core::{Error, Result};

/// The library root, canonicalized once at startup.
#[derive(Debug, Clone)]
pub struct Sandbox {
    root: PathBuf,
}

/// An absolute, canonical path known to lie at or under the sandbox root.
///
/// Only [`Sandbox::resolve`] constructs these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    canonical: PathBuf,
    relative: String,
}

/// A resolved path together with its filesystem type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Directory(ResolvedPath),
    File { path: ResolvedPath, size: u64 },
}

impl Sandbox {
    /// Canonicalize `root` and confirm it is a directory.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let canonical = std::fs::canonicalize(root).map_err(|e| {
            Error::Validation(format!("library root {}: {e}", root.display()))
        })?;
        if !canonical.is_dir() {
            return Err(Error::Validation(format!(
                "library root {} is not a directory",
                canonical.display()
            )));
        }
        Ok(Self { root: canonical })
    }

    /// The canonical root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether an already-canonical path is the root or a descendant of it.
    ///
    /// `Path::starts_with` compares whole components, so `/media/movies2`
    /// is not inside `/media/movies`.
    pub fn contains(&self, canonical: &Path) -> bool {
        canonical.starts_with(&self.root)
    }

    /// Resolve a client-supplied relative path against the root.
    ///
    /// The empty string resolves to the root itself.
    pub fn resolve(&self, requested: &str) -> Result<ResolvedPath> {
        let relative = check_lexically(requested)?;
        let joined = self.root.join(&relative);

        let canonical = match std::fs::canonicalize(&joined) {
            Ok(path) => path,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(self.missing_or_escape(&joined, requested));
            }
            Err(e) => {
                tracing::warn!(requested, error = %e, "Rejecting path that failed to canonicalize");
                return Err(Error::out_of_bounds(requested));
            }
        };

        if !self.contains(&canonical) {
            tracing::warn!(
                requested,
                resolved = %canonical.display(),
                "Rejecting path outside library root"
            );
            return Err(Error::out_of_bounds(requested));
        }

        let relative = relative_to(&self.root, &canonical);
        tracing::debug!(requested, relative = %relative, "Resolved path");
        Ok(ResolvedPath {
            canonical,
            relative,
        })
    }

    /// Classify a path whose canonicalization reported "not found".
    ///
    /// Only a missing tail below an existing ancestor inside the root is
    /// reported as missing. Dangling links and ancestors that resolve
    /// outside the root are escapes, whether or not the target exists.
    fn missing_or_escape(&self, joined: &Path, requested: &str) -> Error {
        for candidate in joined.ancestors() {
            if std::fs::symlink_metadata(candidate).is_err() {
                continue;
            }
            return match std::fs::canonicalize(candidate) {
                Ok(existing) if self.contains(&existing) => Error::not_found("path", requested),
                Ok(existing) => {
                    tracing::warn!(
                        requested,
                        resolved = %existing.display(),
                        "Rejecting missing path below an ancestor outside library root"
                    );
                    Error::out_of_bounds(requested)
                }
                Err(e) => {
                    tracing::warn!(
                        requested,
                        link = %candidate.display(),
                        error = %e,
                        "Rejecting path through a dangling link"
                    );
                    Error::out_of_bounds(requested)
                }
            };
        }
        Error::out_of_bounds(requested)
    }

    /// Resolve a path and classify it as a directory or a regular file.
    ///
    /// Anything else (sockets, FIFOs, devices) is reported as not found.
    pub fn entry(&self, requested: &str) -> Result<Entry> {
        let resolved = self.resolve(requested)?;
        let metadata = std::fs::metadata(resolved.as_path()).map_err(|e| {
            tracing::debug!(requested, error = %e, "Metadata lookup failed after resolve");
            Error::not_found("path", requested)
        })?;
        classify(resolved, &metadata).ok_or_else(|| Error::not_found("path", requested))
    }
}

impl ResolvedPath {
    /// The canonical absolute path.
    pub fn as_path(&self) -> &Path {
        &self.canonical
    }

    /// Path relative to the root, `/`-separated; empty for the root.
    pub fn relative(&self) -> &str {
        &self.relative
    }

    pub fn is_root(&self) -> bool {
        self.relative.is_empty()
    }

    /// Final path segment, or the empty string for the root.
    pub fn file_name(&self) -> &str {
        self.relative.rsplit('/').next().unwrap_or("")
    }
}

impl Entry {
    pub fn path(&self) -> &ResolvedPath {
        match self {
            Entry::Directory(path) => path,
            Entry::File { path, .. } => path,
        }
    }
}

fn classify(path: ResolvedPath, metadata: &Metadata) -> Option<Entry> {
    if metadata.is_dir() {
        Some(Entry::Directory(path))
    } else if metadata.is_file() {
        Some(Entry::File {
            path,
            size: metadata.len(),
        })
    } else {
        None
    }
}

/// Reject absolute paths and `..` segments that climb above the request's
/// starting point, returning the path to join onto the root.
fn check_lexically(requested: &str) -> Result<PathBuf> {
    let mut depth: usize = 0;
    let mut relative = PathBuf::new();

    for component in Path::new(requested).components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                return Err(Error::out_of_bounds(requested));
            }
            Component::CurDir => {}
            Component::ParentDir => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| Error::out_of_bounds(requested))?;
                relative.push("..");
            }
            Component::Normal(part) => {
                depth += 1;
                relative.push(part);
            }
        }
    }

    Ok(relative)
}

fn relative_to(root: &Path, canonical: &Path) -> String {
    canonical
        .strip_prefix(root)
        .map(|rel| {
            rel.components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/")
        })
        .unwrap_or_default()
}

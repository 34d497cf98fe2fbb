//! Directory-tree listing.
//!
//! [`TreeBuilder::build`] walks a resolved directory with an explicit
//! work-list instead of recursion. Each directory frame records its parent,
//! so a symlink cycle is detected by checking the candidate's canonical path
//! against the frames on its own descent path.
//!
//! Unreadable directories are dropped from their parent's children and the
//! walk continues with their siblings. Entries whose canonical path leaves
//! the sandbox, non-UTF-8 names, and files with disallowed extensions are
//! skipped silently.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use rr_core::ExtensionSet;
use serde::Serialize;

use crate::sandbox::{ResolvedPath, Sandbox};

/// A listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Directory(Directory),
    File(Leaf),
}

/// A directory and its children: sub-directories first, then files, each
/// group ordered by case-insensitive name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Directory {
    pub name: String,
    /// Path relative to the library root, `/`-separated.
    pub path: String,
    pub children: Vec<Node>,
    /// Set when the depth limit stopped the walk before this directory was
    /// enumerated.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub truncated: bool,
}

/// An allowed media file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Leaf {
    pub name: String,
    pub path: String,
    /// Lowercased extension without the dot.
    pub extension: String,
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Directory(dir) => &dir.name,
            Node::File(leaf) => &leaf.name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Node::Directory(dir) => &dir.path,
            Node::File(leaf) => &leaf.path,
        }
    }
}

impl Directory {
    pub fn directories(&self) -> impl Iterator<Item = &Directory> {
        self.children.iter().filter_map(|node| match node {
            Node::Directory(dir) => Some(dir),
            Node::File(_) => None,
        })
    }

    pub fn files(&self) -> impl Iterator<Item = &Leaf> {
        self.children.iter().filter_map(|node| match node {
            Node::File(leaf) => Some(leaf),
            Node::Directory(_) => None,
        })
    }
}

/// Builds [`Directory`] trees under a sandbox root.
#[derive(Debug, Clone, Copy)]
pub struct TreeBuilder<'a> {
    sandbox: &'a Sandbox,
    extensions: &'a ExtensionSet,
    max_depth: Option<usize>,
}

struct Frame {
    name: String,
    relative: String,
    canonical: PathBuf,
    parent: Option<usize>,
    depth: usize,
    directories: Vec<usize>,
    files: Vec<Leaf>,
    readable: bool,
    truncated: bool,
}

impl Frame {
    fn new(
        name: String,
        relative: String,
        canonical: PathBuf,
        parent: Option<usize>,
        depth: usize,
    ) -> Self {
        Self {
            name,
            relative,
            canonical,
            parent,
            depth,
            directories: Vec::new(),
            files: Vec::new(),
            readable: true,
            truncated: false,
        }
    }
}

impl<'a> TreeBuilder<'a> {
    pub fn new(sandbox: &'a Sandbox, extensions: &'a ExtensionSet) -> Self {
        Self {
            sandbox,
            extensions,
            max_depth: None,
        }
    }

    /// Stop enumerating directories nested deeper than `max_depth` below
    /// the listed directory. Such directories are still listed, flagged as
    /// truncated.
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Walk `dir` and return its listing.
    ///
    /// If `dir` itself cannot be read the result is an empty directory.
    pub fn build(&self, dir: &ResolvedPath) -> Directory {
        let mut frames = vec![Frame::new(
            dir.file_name().to_string(),
            dir.relative().to_string(),
            dir.as_path().to_path_buf(),
            None,
            0,
        )];
        let mut pending = vec![0usize];

        while let Some(index) = pending.pop() {
            if self.max_depth.is_some_and(|max| frames[index].depth > max) {
                frames[index].truncated = true;
                continue;
            }
            let entries = match std::fs::read_dir(&frames[index].canonical) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(
                        path = %frames[index].relative,
                        error = %e,
                        "Skipping unreadable directory"
                    );
                    frames[index].readable = false;
                    continue;
                }
            };

            for entry in entries {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        tracing::debug!(path = %frames[index].relative, error = %e, "Skipping directory entry");
                        continue;
                    }
                };
                let name = match entry.file_name().into_string() {
                    Ok(name) => name,
                    Err(raw) => {
                        tracing::debug!(name = ?raw, "Skipping non-UTF-8 file name");
                        continue;
                    }
                };
                let canonical = match std::fs::canonicalize(entry.path()) {
                    Ok(path) => path,
                    Err(e) => {
                        tracing::debug!(name = %name, error = %e, "Skipping unresolvable entry");
                        continue;
                    }
                };
                if !self.sandbox.contains(&canonical) {
                    tracing::debug!(name = %name, "Skipping entry that resolves outside the library");
                    continue;
                }
                let metadata = match std::fs::metadata(&canonical) {
                    Ok(metadata) => metadata,
                    Err(e) => {
                        tracing::debug!(name = %name, error = %e, "Skipping entry without metadata");
                        continue;
                    }
                };

                let relative = join_relative(&frames[index].relative, &name);
                if metadata.is_dir() {
                    if on_descent_path(&frames, index, &canonical) {
                        tracing::warn!(path = %relative, "Skipping directory symlink cycle");
                        continue;
                    }
                    let child = frames.len();
                    let depth = frames[index].depth + 1;
                    frames.push(Frame::new(name, relative, canonical, Some(index), depth));
                    frames[index].directories.push(child);
                    pending.push(child);
                } else if metadata.is_file() {
                    if let Some(extension) = self.allowed_extension(&canonical) {
                        frames[index].files.push(Leaf {
                            name,
                            path: relative,
                            extension,
                        });
                    }
                }
            }
        }

        assemble(frames)
    }

    /// Extensions are checked on the link target, which is what a stream
    /// request for this entry would serve.
    fn allowed_extension(&self, canonical: &Path) -> Option<String> {
        if !self.extensions.allows(canonical) {
            return None;
        }
        canonical
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
    }
}

/// Whether `canonical` is the frame at `index` or one of its ancestors.
fn on_descent_path(frames: &[Frame], index: usize, canonical: &Path) -> bool {
    let mut cursor = Some(index);
    while let Some(i) = cursor {
        if frames[i].canonical == canonical {
            return true;
        }
        cursor = frames[i].parent;
    }
    false
}

/// Turn the flat frame list into a tree. Children are always pushed after
/// their parent, so walking the frames backwards sees every child first.
fn assemble(frames: Vec<Frame>) -> Directory {
    let mut built: Vec<Option<Directory>> = Vec::with_capacity(frames.len());
    built.resize_with(frames.len(), || None);

    for (index, frame) in frames.into_iter().enumerate().rev() {
        if !frame.readable && index != 0 {
            continue;
        }

        let mut directories: Vec<Directory> = frame
            .directories
            .iter()
            .filter_map(|&child| built[child].take())
            .collect();
        directories.sort_by(|a, b| by_name(&a.name, &b.name));

        let mut files = frame.files;
        files.sort_by(|a, b| by_name(&a.name, &b.name));

        let children = directories
            .into_iter()
            .map(Node::Directory)
            .chain(files.into_iter().map(Node::File))
            .collect();

        built[index] = Some(Directory {
            name: frame.name,
            path: frame.relative,
            children,
            truncated: frame.truncated,
        });
    }

    built
        .into_iter()
        .next()
        .flatten()
        .unwrap_or_else(|| Directory {
            name: String::new(),
            path: String::new(),
            children: Vec::new(),
            truncated: false,
        })
}

/// Case-insensitive order with a byte-wise tie-break.
fn by_name(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn join_relative(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

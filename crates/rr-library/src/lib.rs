//! rr-library: the filesystem side of reelroom.
//!
//! - [`Sandbox`] turns a client-supplied relative path into a
//!   [`ResolvedPath`] that is guaranteed to lie under the library root.
//! - [`TreeBuilder`] walks a resolved directory into a [`Directory`] tree of
//!   sub-directories and allowed media files.
//!
//! Everything here is synchronous; async callers should run it on a
//! blocking thread.

pub mod sandbox;
pub mod tree;

pub use sandbox::{Entry, ResolvedPath, Sandbox};
pub use tree::{Directory, Leaf, Node, TreeBuilder};

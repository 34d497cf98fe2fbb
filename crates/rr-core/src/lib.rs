//! rr-core: shared error type, configuration, and the extension allow-set.
//!
//! This crate is the foundational dependency for the other rr-* crates. It
//! has no filesystem or HTTP behavior of its own beyond reading the config
//! file.

pub mod config;
pub mod error;
pub mod extensions;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result};
pub use extensions::ExtensionSet;

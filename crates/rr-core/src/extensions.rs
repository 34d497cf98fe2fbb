//! Allow-set of media file extensions.
//!
//! Only files whose extension is in the set appear in listings or can be
//! streamed. Matching is case-insensitive and a leading dot in the
//! configured value is ignored.

use std::collections::BTreeSet;
use std::path::Path;

/// Extensions served when the configuration does not name any.
pub const DEFAULT_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi", "webm", "mov"];

/// Immutable, normalized set of allowed file extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionSet {
    extensions: BTreeSet<String>,
}

impl ExtensionSet {
    /// Build a set from configured values such as `"mkv"` or `".MP4"`.
    ///
    /// Empty entries are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use rr_core::ExtensionSet;
    ///
    /// let set = ExtensionSet::new([".MKV", "mp4"]);
    /// assert!(set.contains("mkv"));
    /// assert!(set.contains("MP4"));
    /// assert!(!set.contains("srt"));
    /// ```
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|ext| normalize(ext.as_ref()))
            .filter(|ext| !ext.is_empty())
            .collect();
        Self { extensions }
    }

    /// Check a bare extension (with or without a leading dot).
    pub fn contains(&self, extension: &str) -> bool {
        self.extensions.contains(&normalize(extension))
    }

    /// Check whether a path's extension is allowed.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use rr_core::ExtensionSet;
    ///
    /// let set = ExtensionSet::default();
    /// assert!(set.allows(Path::new("/media/Movie (2010).MKV")));
    /// assert!(!set.allows(Path::new("/media/Movie (2010).srt")));
    /// assert!(!set.allows(Path::new("/media/README")));
    /// ```
    pub fn allows(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.contains(ext))
            .unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Normalized extensions in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }
}

impl Default for ExtensionSet {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS)
    }
}

fn normalize(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}

//! Display names for library entries.
//!
//! Release names such as `Heat.1995.1080p.BluRay.x264-YTS` are shown as
//! `Heat 1995 1080p`. Only the displayed text changes; links always use the
//! raw path.

use std::sync::OnceLock;

use regex::Regex;

fn release_noise() -> &'static Regex {
    static NOISE: OnceLock<Regex> = OnceLock::new();
    NOISE.get_or_init(|| {
        Regex::new(
            r"(?i)\[[^\]]*\]|\([^)]*\)|\{[^}]*\}|\b(?:YTS|YIFY|BluRay|WEBRip|x264|x265|10bit|5\.1|REPACK|EXTENDED|REMUX|REMASTERED)\b",
        )
        .expect("release noise pattern is valid")
    })
}

fn whitespace() -> &'static Regex {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

/// Strip bracketed groups and release tags from a name. Falls back to the
/// input when nothing would be left.
pub fn clean_title(name: &str) -> String {
    let stripped = release_noise().replace_all(name, "");
    let trimmed = stripped.trim_matches(|c: char| " .-_[]()".contains(c));
    let spaced = trimmed.replace('.', " ");
    let collapsed = whitespace().replace_all(spaced.trim(), " ").into_owned();

    if collapsed.is_empty() {
        name.to_string()
    } else {
        collapsed
    }
}

/// Display name for a directory.
pub fn directory_title(name: &str) -> String {
    clean_title(name)
}

/// Display name for a file: the cleaned stem plus the original extension.
pub fn file_title(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{}.{ext}", clean_title(stem)),
        _ => name.to_string(),
    }
}

//! HTML pages for directory listings and the video player.
//!
//! Markup is built with `maud`, which escapes interpolated text. Paths in
//! links are percent-encoded one segment at a time so `/` separators
//! survive.

pub mod title;

use maud::{html, Markup, PreEscaped, DOCTYPE};
use rr_library::{Directory, Node, ResolvedPath};

use crate::streaming::content_type_for;
use title::{directory_title, file_title};

const STYLE: &str = r#"
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 0 auto; max-width: 960px; padding: 1rem; background: #111; color: #eee; }
a { color: inherit; text-decoration: none; }
nav.breadcrumb a { margin-right: .25rem; }
ul.listing { list-style: none; padding: 0; }
ul.listing li a { display: block; padding: .6rem .8rem; margin: .3rem 0; border-radius: 6px; background: #222; }
ul.listing li a:hover { background: #333; }
.player video { width: 100%; max-height: 85vh; background: #000; }
"#;

/// Percent-encode each `/`-separated segment of a relative path.
pub fn encode_path(relative: &str) -> String {
    relative
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Link to browse a directory.
pub fn browse_href(relative: &str) -> String {
    format!("/{}", encode_path(relative))
}

/// Link to the player page for a file.
pub fn play_href(relative: &str) -> String {
    format!("/play/{}", encode_path(relative))
}

/// Link to the raw stream for a file.
pub fn stream_href(relative: &str) -> String {
    format!("/stream/{}", encode_path(relative))
}

/// Parent of a relative path; `None` for the root.
fn parent_of(relative: &str) -> Option<&str> {
    if relative.is_empty() {
        return None;
    }
    Some(relative.rsplit_once('/').map(|(parent, _)| parent).unwrap_or(""))
}

fn page(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                style { (PreEscaped(STYLE)) }
            }
            body { (body) }
        }
    }
}

fn breadcrumb(relative: &str) -> Markup {
    let segments: Vec<&str> = relative.split('/').filter(|s| !s.is_empty()).collect();
    html! {
        nav.breadcrumb {
            a href="/" { "Home" }
            @for (i, segment) in segments.iter().enumerate() {
                " / "
                a href=(browse_href(&segments[..=i].join("/"))) { (directory_title(segment)) }
            }
        }
    }
}

/// Listing of a directory's immediate children.
pub fn listing(dir: &Directory) -> Markup {
    let heading = if dir.path.is_empty() {
        "Library".to_string()
    } else {
        directory_title(&dir.name)
    };

    page(
        &format!("Library - {heading}"),
        html! {
            h1 { (heading) }
            (breadcrumb(&dir.path))
            ul.listing {
                @if let Some(parent) = parent_of(&dir.path) {
                    li.up { a href=(browse_href(parent)) { "↑ Up one level" } }
                }
                @for node in &dir.children {
                    @match node {
                        Node::Directory(child) => {
                            li.folder {
                                a href=(browse_href(&child.path)) { "📁 " (directory_title(&child.name)) }
                            }
                        }
                        Node::File(leaf) => {
                            li.file {
                                a href=(play_href(&leaf.path)) { "🎥 " (file_title(&leaf.name)) }
                            }
                        }
                    }
                }
                @if dir.children.is_empty() {
                    li.empty { "Nothing to play here." }
                }
            }
        },
    )
}

/// Player page whose video source is the stream endpoint for `file`.
pub fn player(file: &ResolvedPath) -> Markup {
    let name = file_title(file.file_name());
    let back = parent_of(file.relative()).unwrap_or("");

    page(
        &format!("Playing: {name}"),
        html! {
            div.player {
                h1 { (name) }
                p { a href=(browse_href(back)) { "← Back" } }
                video controls autoplay preload="metadata" {
                    source src=(stream_href(file.relative())) type=(content_type_for(file));
                    "Your browser does not support video playback."
                }
            }
        },
    )
}

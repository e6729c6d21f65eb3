//! Drag-and-drop path sanitising.
//!
//! Terminals paste dropped files in different shapes:
//!
//! ```text
//! '/home/me/My Photos/cat.jpg'        (quoted, GNOME / macOS)
//! /home/me/My\ Photos/cat\ \(1\).jpg  (shell-escaped, iTerm / kitty)
//! file:///home/me/My%20Photos/cat.jpg (URI, some file managers)
//! ~/Pictures/cat.jpg                  (typed by hand)
//! ```
//!
//! [`sanitize_path`] turns all of them into a plain filesystem path.

use std::borrow::Cow;
use std::path::PathBuf;

/// Normalize a pasted or typed path into a filesystem path.
pub fn sanitize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let unquoted = strip_quotes(trimmed);

    if let Some(path) = file_uri_to_path(unquoted) {
        return path;
    }

    // Backslashes inside quotes are literal
    let unescaped = if unquoted.len() == trimmed.len() {
        unescape(unquoted)
    } else {
        Cow::Borrowed(unquoted)
    };
    PathBuf::from(expand_tilde(&unescaped).into_owned())
}

/// Strip one pair of matching surrounding quotes.
fn strip_quotes(s: &str) -> &str {
    for quote in ['\'', '"'] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return &s[1..s.len() - 1];
        }
    }
    s
}

/// Decode `file://` URIs, including percent-encoded characters.
fn file_uri_to_path(s: &str) -> Option<PathBuf> {
    if !s.starts_with("file://") {
        return None;
    }
    url::Url::parse(s).ok()?.to_file_path().ok()
}

/// Remove backslash escapes (`\ ` → ` `).
///
/// Backslash is the path separator on Windows, so paths are left untouched there.
#[cfg(not(windows))]
fn unescape(s: &str) -> Cow<'_, str> {
    if !s.contains('\\') {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

#[cfg(windows)]
fn unescape(s: &str) -> Cow<'_, str> {
    Cow::Borrowed(s)
}

/// Expand a leading `~` to the home directory.
fn expand_tilde(s: &str) -> Cow<'_, str> {
    shellexpand::tilde(s)
}

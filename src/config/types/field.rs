//! Type-safe config field path.

use owo_colors::{OwoColorize, Stream};
use std::fmt;

/// Dotted path of a config field, used to point diagnostics at the
/// offending TOML key.
///
/// # Example
///
/// ```ignore
/// impl EnvConfig {
///     pub const FIELDS: EnvConfigFields = EnvConfigFields {
///         entry: FieldPath::new("env.entry"),
///         ..
///     };
/// }
///
/// diag.error(EnvConfig::FIELDS.entry, "must not be empty");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(pub &'static str);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quoted = format!("`{}`", self.0);
        write!(
            f,
            "{}",
            quoted.if_supports_color(Stream::Stdout, |s| s.bright_blue())
        )
    }
}

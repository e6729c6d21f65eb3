//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` for output gated behind `--verbose`
//! - status lines (`✓`, `⚠`) for conversion outcomes
//!
//! # Example
//!
//! ```ignore
//! log!("env"; "creating virtual environment in {}", dir.display());
//! debug!("launch"; "argv: {:?}", argv);
//! logger::status_success("conversion completed");
//! ```

use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use owo_colors::{OwoColorize, Stream, Style};
use std::{
    io::{Write, stdout},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut stdout = stdout().lock();
    execute!(stdout, Clear(ClearType::UntilNewLine)).ok();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    let style = match module_lower {
        "env" | "pip" => Style::new().bright_blue().bold(),
        "convert" => Style::new().bright_green().bold(),
        "error" => Style::new().bright_red().bold(),
        "hint" => Style::new().bright_cyan().bold(),
        _ => Style::new().bright_yellow().bold(),
    };
    prefix
        .if_supports_color(Stream::Stdout, |p| p.style(style))
        .to_string()
}

// ============================================================================
// Status lines
// ============================================================================

/// Status line kinds, each rendered with its own symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Warning,
}

impl StatusKind {
    fn symbol(self) -> String {
        let (symbol, style) = match self {
            Self::Success => ("✓", Style::new().green()),
            Self::Warning => ("⚠", Style::new().yellow()),
        };
        symbol
            .if_supports_color(Stream::Stdout, |s| s.style(style))
            .to_string()
    }
}

/// Format a status message, indenting continuation lines under the symbol.
fn format_status(kind: StatusKind, message: &str) -> String {
    let mut lines = message.lines();
    let first = lines.next().unwrap_or_default();
    let mut out = format!("{} {first}", kind.symbol());
    for line in lines {
        out.push_str("\n  ");
        out.push_str(line);
    }
    out
}

fn status(kind: StatusKind, message: &str) {
    let mut stdout = stdout().lock();
    writeln!(stdout, "{}", format_status(kind, message)).ok();
    stdout.flush().ok();
}

/// Display success message (✓ prefix, green).
pub fn status_success(message: &str) {
    status(StatusKind::Success, message);
}

/// Display warning message (⚠ prefix, yellow).
pub fn status_warning(message: &str) {
    status(StatusKind::Warning, message);
}

// ============================================================================
// Tests
// ============================================================================

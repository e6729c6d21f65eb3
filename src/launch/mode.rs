//! How the launcher gathers conversion parameters.

use crate::cli::Cli;

/// Parameter source for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Guided prompts.
    Interactive,
    /// `--preset`, with optional per-field overrides.
    Preset,
    /// `--input` and/or `-k/-p/-e` without a preset.
    Custom,
}

impl Mode {
    /// Pick the mode from the command line.
    ///
    /// `--interactive` wins, then `--preset`, then any input or parameter
    /// flag. With none of them the launcher is interactive; `--output` and
    /// `-k/-p/-e` then prefill the session.
    pub fn select(cli: &Cli) -> Self {
        if cli.interactive {
            Self::Interactive
        } else if cli.preset.is_some() {
            Self::Preset
        } else if cli.input.is_some() || !cli.overrides().is_empty() {
            Self::Custom
        } else {
            Self::Interactive
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Interactive => "interactive",
            Self::Preset => "preset",
            Self::Custom => "custom",
        }
    }
}

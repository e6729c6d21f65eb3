//! Parameter range validation.

use super::Params;
use owo_colors::{OwoColorize, Stream};
use std::fmt;
use std::ops::RangeInclusive;

/// A converter parameter, with its accepted range and CLI flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamField {
    KernelSize,
    PixelSize,
    EdgeThresh,
}

impl ParamField {
    pub const fn range(self) -> RangeInclusive<u32> {
        match self {
            Self::KernelSize => 1..=50,
            Self::PixelSize => 1..=64,
            Self::EdgeThresh => 0..=255,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::KernelSize => "Kernel size",
            Self::PixelSize => "Pixel size",
            Self::EdgeThresh => "Edge threshold",
        }
    }

    pub const fn flag(self) -> &'static str {
        match self {
            Self::KernelSize => "-k/--kernel_size",
            Self::PixelSize => "-p/--pixel_size",
            Self::EdgeThresh => "-e/--edge_thresh",
        }
    }

    /// What the parameter controls, shown as a prompt hint.
    pub const fn hint(self) -> &'static str {
        match self {
            Self::KernelSize => "Controls color smoothness (1-50, higher = smoother)",
            Self::PixelSize => "Controls pixel block size (1-64, higher = larger pixels)",
            Self::EdgeThresh => "Controls black line intensity (0-255, lower = more lines)",
        }
    }

    const fn value(self, params: &Params) -> u32 {
        match self {
            Self::KernelSize => params.kernel_size,
            Self::PixelSize => params.pixel_size,
            Self::EdgeThresh => params.edge_thresh,
        }
    }
}

/// A single out-of-range parameter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "{} must be between {}-{}, got {value}",
    .field.label(),
    .field.range().start(),
    .field.range().end()
)]
pub struct ParamError {
    pub field: ParamField,
    pub value: u32,
}

/// Every out-of-range parameter of one [`Params`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParamDiagnostics {
    errors: Vec<ParamError>,
}

impl ParamDiagnostics {
    /// Check all three fields, collecting every violation.
    pub fn check(params: &Params) -> Self {
        let errors = [
            ParamField::KernelSize,
            ParamField::PixelSize,
            ParamField::EdgeThresh,
        ]
        .into_iter()
        .filter_map(|field| {
            let value = field.value(params);
            (!field.range().contains(&value)).then_some(ParamError { field, value })
        })
        .collect();
        Self { errors }
    }

    #[cfg(test)]
    pub fn errors(&self) -> &[ParamError] {
        &self.errors
    }

    /// Convert to Result (returns Err if there are errors).
    pub fn into_result(self) -> Result<(), Self> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ParamDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            "parameter validation failed:".if_supports_color(Stream::Stdout, |s| s.red())
        )?;
        for err in &self.errors {
            write!(
                f,
                "\n  {} {err} ({})",
                "→".if_supports_color(Stream::Stdout, |s| s.red()),
                err.field.flag()
            )?;
        }
        Ok(())
    }
}

impl std::error::Error for ParamDiagnostics {}

impl Params {
    /// Validate ranges; see [`ParamField::range`].
    pub fn validate(&self) -> Result<(), ParamDiagnostics> {
        ParamDiagnostics::check(self).into_result()
    }
}

//! `[convert]` section configuration.
//!
//! Defaults for the conversion front-end.
//!
//! # Example
//!
//! ```toml
//! [convert]
//! preset = "retro"                                  # default preset
//! default_input = "./images/example_input_mountain.jpg"
//! output_suffix = "_pixel"                          # photo.jpg -> photo_pixel.png
//! device = "auto"                                   # auto | cpu | cuda | mps
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::preset::Preset;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// Device the converter runs on, forwarded as `--device`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    #[default]
    Auto,
    Cpu,
    Cuda,
    Mps,
}

impl Device {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Cpu => "cpu",
            Self::Cuda => "cuda",
            Self::Mps => "mps",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conversion defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Preset used when `--preset` is not given.
    pub preset: Option<Preset>,

    /// Image offered when the interactive input prompt is left empty.
    pub default_input: PathBuf,

    /// Suffix appended to the input stem for the default output path.
    pub output_suffix: String,

    /// Converter device.
    pub device: Device,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            preset: None,
            default_input: "./images/example_input_mountain.jpg".into(),
            output_suffix: "_pixel".into(),
            device: Device::Auto,
        }
    }
}

/// Field paths of `[convert]`, for diagnostics.
pub struct ConvertConfigFields {
    pub output_suffix: FieldPath,
}

impl ConvertConfig {
    pub const FIELDS: ConvertConfigFields = ConvertConfigFields {
        output_suffix: FieldPath::new("convert.output_suffix"),
    };

    /// Validate convert configuration.
    ///
    /// `output_suffix` becomes part of a file name, so it must not contain
    /// path separators.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.output_suffix.contains(['/', '\\']) {
            diag.error_with_hint(
                Self::FIELDS.output_suffix,
                format!(
                    "{} must not contain path separators: `{}`",
                    Self::FIELDS.output_suffix,
                    self.output_suffix
                ),
                "use --output to write into another directory",
            );
        }
    }
}

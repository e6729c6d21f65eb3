//! Conversion presets and parameter resolution.
//!
//! A preset is a named, fixed combination of the three converter
//! parameters. Resolution starts from a base (preset or defaults) and
//! applies explicit overrides field by field.
//!
//! | Preset    | Kernel | Pixel | Edge |
//! |-----------|--------|-------|------|
//! | `retro`   | 8      | 12    | 80   |
//! | `smooth`  | 16     | 20    | 120  |
//! | `sharp`   | 6      | 8     | 60   |
//! | `classic` | 10     | 16    | 100  |

mod validate;

pub use validate::ParamField;

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Params
// ============================================================================

/// Converter parameters forwarded as `-k`, `-p` and `-e`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    /// Smoothing window before pixelation (color smoothness).
    pub kernel_size: u32,
    /// Side length, in source pixels, of each output block.
    pub pixel_size: u32,
    /// Cutoff deciding whether an edge is drawn as a dark line.
    pub edge_thresh: u32,
}

impl Params {
    /// Parameters used when neither a preset nor flags are given.
    pub const DEFAULT: Self = Self::new(10, 16, 100);

    pub const fn new(kernel_size: u32, pixel_size: u32, edge_thresh: u32) -> Self {
        Self {
            kernel_size,
            pixel_size,
            edge_thresh,
        }
    }

    /// Apply explicit overrides, replacing only the fields that are set.
    pub fn with_overrides(mut self, overrides: &ParamOverrides) -> Self {
        if let Some(k) = overrides.kernel_size {
            self.kernel_size = k;
        }
        if let Some(p) = overrides.pixel_size {
            self.pixel_size = p;
        }
        if let Some(e) = overrides.edge_thresh {
            self.edge_thresh = e;
        }
        self
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "kernel_size: {}, pixel_size: {}, edge_thresh: {}",
            self.kernel_size, self.pixel_size, self.edge_thresh
        )
    }
}

/// Per-field overrides from `-k/-p/-e`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParamOverrides {
    pub kernel_size: Option<u32>,
    pub pixel_size: Option<u32>,
    pub edge_thresh: Option<u32>,
}

impl ParamOverrides {
    pub fn is_empty(&self) -> bool {
        self.kernel_size.is_none() && self.pixel_size.is_none() && self.edge_thresh.is_none()
    }
}

// ============================================================================
// Preset
// ============================================================================

/// Named parameter presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Retro,
    Smooth,
    Sharp,
    Classic,
}

impl Preset {
    /// All presets in display order.
    pub const ALL: [Self; 4] = [Self::Retro, Self::Smooth, Self::Sharp, Self::Classic];

    /// The fixed parameter tuple for this preset.
    pub const fn params(self) -> Params {
        match self {
            Self::Retro => Params::new(8, 12, 80),
            Self::Smooth => Params::new(16, 20, 120),
            Self::Sharp => Params::new(6, 8, 60),
            Self::Classic => Params::new(10, 16, 100),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Retro => "retro",
            Self::Smooth => "smooth",
            Self::Sharp => "sharp",
            Self::Classic => "classic",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Retro => "Retro pixel art style",
            Self::Smooth => "Smooth color transitions",
            Self::Sharp => "Sharp pixel art with strong edges",
            Self::Classic => "Classic 8-bit style",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for preset names outside the table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown preset `{0}` (expected retro, smooth, sharp or classic)")]
pub struct UnknownPreset(pub String);

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| UnknownPreset(s.trim().to_string()))
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final parameters.
///
/// Base is the preset's tuple when one is given, else [`Params::DEFAULT`];
/// explicit overrides then win per field.
pub fn resolve(preset: Option<Preset>, overrides: &ParamOverrides) -> Params {
    preset
        .map_or(Params::DEFAULT, Preset::params)
        .with_overrides(overrides)
}

/// Render the preset table shown by `--presets` and the interactive prompt.
pub fn presets_table() -> String {
    let mut out = String::from("Available presets:\n");
    for preset in Preset::ALL {
        out.push_str(&format!(
            "  {:8} - {}\n           {}\n",
            preset.name(),
            preset.description(),
            preset.params()
        ));
    }
    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_table_values() {
        assert_eq!(Preset::Retro.params(), Params::new(8, 12, 80));
        assert_eq!(Preset::Smooth.params(), Params::new(16, 20, 120));
        assert_eq!(Preset::Sharp.params(), Params::new(6, 8, 60));
        assert_eq!(Preset::Classic.params(), Params::new(10, 16, 100));
    }

    #[test]
    fn test_resolve_each_preset_without_overrides() {
        for preset in Preset::ALL {
            assert_eq!(
                resolve(Some(preset), &ParamOverrides::default()),
                preset.params()
            );
        }
    }

    #[test]
    fn test_resolve_without_preset_uses_defaults() {
        assert_eq!(resolve(None, &ParamOverrides::default()), Params::DEFAULT);
    }

    #[test]
    fn test_override_replaces_only_that_field() {
        let overrides = ParamOverrides {
            kernel_size: Some(30),
            ..Default::default()
        };
        let params = resolve(Some(Preset::Smooth), &overrides);
        assert_eq!(params, Params::new(30, 20, 120));
    }

    #[test]
    fn test_all_overrides_replace_preset() {
        let overrides = ParamOverrides {
            kernel_size: Some(1),
            pixel_size: Some(2),
            edge_thresh: Some(3),
        };
        assert_eq!(resolve(Some(Preset::Retro), &overrides), Params::new(1, 2, 3));
    }

    #[test]
    fn test_zero_edge_override_is_applied() {
        // 0 is a legitimate threshold, not "unset"
        let overrides = ParamOverrides {
            edge_thresh: Some(0),
            ..Default::default()
        };
        assert_eq!(resolve(Some(Preset::Classic), &overrides).edge_thresh, 0);
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!("retro".parse::<Preset>(), Ok(Preset::Retro));
        assert_eq!("  SHARP ".parse::<Preset>(), Ok(Preset::Sharp));
        assert!("neon".parse::<Preset>().is_err());
        assert!("".parse::<Preset>().is_err());
    }

    #[test]
    fn test_overrides_is_empty() {
        assert!(ParamOverrides::default().is_empty());
        let o = ParamOverrides {
            pixel_size: Some(4),
            ..Default::default()
        };
        assert!(!o.is_empty());
    }

    #[test]
    fn test_presets_table_lists_every_preset() {
        let table = presets_table();
        for preset in Preset::ALL {
            assert!(table.contains(preset.name()));
            assert!(table.contains(preset.description()));
        }
        assert!(table.contains("kernel_size: 16, pixel_size: 20, edge_thresh: 120"));
    }

    #[test]
    fn test_preset_deserialize_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            preset: Preset,
        }
        let w: Wrapper = toml::from_str("preset = \"classic\"").unwrap();
        assert_eq!(w.preset, Preset::Classic);
    }
}

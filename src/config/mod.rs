//! Launcher configuration from an optional `photo2pixel.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── env        # [env]
//! │   └── convert    # [convert]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # LauncherConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section     | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | `[env]`     | Virtualenv dir, requirements, entry, interpreter |
//! | `[convert]` | Default preset, default input, suffix, device    |
//!
//! The file is optional. Without one, the project root is the current
//! directory and every field takes its default.

pub mod section;
pub mod types;
mod util;

use util::{find_config_file, resolve_against};

pub use section::{ConvertConfig, Device, EnvConfig, InstallPolicy};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{cli::Cli, debug, log};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Config file name searched upward from the current directory.
pub const DEFAULT_CONFIG_NAME: &str = "photo2pixel.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing photo2pixel.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LauncherConfig {
    /// Absolute path to the config file, if one was found (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Project root directory - parent of config file, else cwd (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Python environment settings
    #[serde(default)]
    pub env: EnvConfig,

    /// Conversion defaults
    #[serde(default)]
    pub convert: ConvertConfig,
}

impl LauncherConfig {
    /// Load configuration from CLI arguments.
    ///
    /// An explicit `-C` path must exist; otherwise the default name is
    /// searched upward from cwd and its absence is not an error.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        Self::load_from(cli, &cwd)
    }

    /// [`load`](Self::load) with an explicit starting directory.
    fn load_from(cli: &Cli, cwd: &Path) -> Result<Self> {
        let config_path = Self::resolve_config_path(cli, cwd)?;

        let mut config = match &config_path {
            Some(path) => Self::from_path(path)?,
            None => Self::default(),
        };

        let root = config_path
            .as_deref()
            .and_then(Path::parent)
            .map_or_else(|| cwd.to_path_buf(), Path::to_path_buf);

        config.config_path = config_path;
        if let Some(path) = &config.config_path {
            debug!("config"; "using {}", path.display());
        }
        config.finalize(cli, &root);
        config.validate()?;

        Ok(config)
    }

    /// Resolve the config file location.
    fn resolve_config_path(cli: &Cli, cwd: &Path) -> Result<Option<PathBuf>> {
        match &cli.config {
            Some(explicit) => {
                let path = resolve_against(cwd, explicit);
                if path.is_file() {
                    Ok(Some(path))
                } else {
                    Err(ConfigError::NotFound(path).into())
                }
            }
            None => Ok(find_config_file(cwd, Path::new(DEFAULT_CONFIG_NAME))),
        }
    }

    /// Finalize configuration after loading.
    fn finalize(&mut self, cli: &Cli, root: &Path) {
        self.root = root.to_path_buf();
        self.normalize_paths();
        self.apply_cli_options(cli);
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    // ========================================================================
    // paths
    // ========================================================================

    /// Get the root directory path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Virtual environment directory.
    pub fn venv_dir(&self) -> &Path {
        &self.env.dir
    }

    /// Conversion entry point.
    pub fn entry_path(&self) -> &Path {
        &self.env.entry
    }

    /// Dependency manifest.
    pub fn requirements_path(&self) -> &Path {
        &self.env.requirements
    }

    /// Normalize all paths relative to root directory.
    fn normalize_paths(&mut self) {
        let root = self.root.clone();
        for path in [
            &mut self.env.dir,
            &mut self.env.requirements,
            &mut self.env.entry,
            &mut self.convert.default_input,
        ] {
            if !path.as_os_str().is_empty() {
                *path = resolve_against(&root, path);
            }
        }
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// CLI flags override config values.
    fn apply_cli_options(&mut self, cli: &Cli) {
        crate::logger::set_verbose(cli.verbose);

        Self::update_option(&mut self.convert.device, cli.device.as_ref());
        if cli.preset.is_some() {
            self.convert.preset = cli.preset;
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate every section, collecting all diagnostics.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();
        self.env.validate(&mut diag);
        self.convert.validate(&mut diag);
        diag.print_warnings();
        diag.into_result().map_err(ConfigError::Diagnostics)?;
        Ok(())
    }
}

/// Parse a config snippet for section tests.
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> LauncherConfig {
    LauncherConfig::parse_with_ignored(extra)
        .expect("test config should parse")
        .0
}

// ============================================================================
// tests
// ============================================================================

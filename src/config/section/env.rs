//! `[env]` section configuration.
//!
//! Where the converter's Python environment lives and how it is kept
//! up to date.
//!
//! # Example
//!
//! ```toml
//! [env]
//! dir = ".venv"                     # virtualenv directory
//! requirements = "requirements.txt" # pip requirements manifest
//! entry = "convert.py"              # conversion entry point
//! python = "python3.11"             # interpreter used to create the venv
//! install = "auto"                  # auto | always | never
//! ```
//!
//! Relative paths are resolved against the project root.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::Deserialize;
use std::path::PathBuf;

/// When to run `pip install -r <requirements>`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallPolicy {
    /// After creating the venv, or when the requirements file changed.
    #[default]
    Auto,
    /// On every run.
    Always,
    /// Never; the environment is managed by hand.
    Never,
}

/// Python environment settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    /// Virtual environment directory.
    pub dir: PathBuf,

    /// Dependency manifest installed into the venv.
    pub requirements: PathBuf,

    /// Conversion entry point run with the venv interpreter.
    pub entry: PathBuf,

    /// System interpreter used to create the venv.
    /// Defaults to the first of `python3`, `python` on PATH.
    pub python: Option<String>,

    /// Dependency installation policy.
    pub install: InstallPolicy,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            dir: ".venv".into(),
            requirements: "requirements.txt".into(),
            entry: "convert.py".into(),
            python: None,
            install: InstallPolicy::Auto,
        }
    }
}

/// Field paths of `[env]`, for diagnostics.
pub struct EnvConfigFields {
    pub dir: FieldPath,
    pub entry: FieldPath,
    pub python: FieldPath,
}

impl EnvConfig {
    pub const FIELDS: EnvConfigFields = EnvConfigFields {
        dir: FieldPath::new("env.dir"),
        entry: FieldPath::new("env.entry"),
        python: FieldPath::new("env.python"),
    };

    /// Validate env configuration.
    ///
    /// # Checks
    /// - `dir` and `entry` must not be empty
    /// - a configured `python` must be an installed executable, unless the
    ///   venv already exists (then it is only needed to recreate it)
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.dir.as_os_str().is_empty() {
            diag.error(Self::FIELDS.dir, format!("{} must not be empty", Self::FIELDS.dir));
        }

        if self.entry.as_os_str().is_empty() {
            diag.error(
                Self::FIELDS.entry,
                format!("{} must not be empty", Self::FIELDS.entry),
            );
        }

        if let Some(python) = &self.python
            && which::which(python).is_err()
        {
            if self.dir.is_dir() {
                diag.warn(
                    Self::FIELDS.python,
                    format!("`{python}` not found, using the existing venv"),
                );
                return;
            }
            diag.error_with_hint(
                Self::FIELDS.python,
                format!("`{python}` not found"),
                format!("install the interpreter or remove {}", Self::FIELDS.python),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use tempfile::TempDir;

    #[test]
    fn test_env_config_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.env.dir, PathBuf::from(".venv"));
        assert_eq!(config.env.requirements, PathBuf::from("requirements.txt"));
        assert_eq!(config.env.entry, PathBuf::from("convert.py"));
        assert_eq!(config.env.python, None);
        assert_eq!(config.env.install, InstallPolicy::Auto);
    }

    #[test]
    fn test_env_config_custom() {
        let config = test_parse_config(
            "[env]\ndir = \"venv\"\nentry = \"tools/convert.py\"\ninstall = \"never\"",
        );
        assert_eq!(config.env.dir, PathBuf::from("venv"));
        assert_eq!(config.env.entry, PathBuf::from("tools/convert.py"));
        assert_eq!(config.env.install, InstallPolicy::Never);
    }

    #[test]
    fn test_install_policy_rejects_unknown() {
        let result = toml::from_str::<crate::config::LauncherConfig>("[env]\ninstall = \"sometimes\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_empty_entry() {
        let env = EnvConfig {
            entry: PathBuf::new(),
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        env.validate(&mut diag);
        assert_eq!(diag.errors().len(), 1);
        assert_eq!(diag.errors()[0].field, EnvConfig::FIELDS.entry);
    }

    #[test]
    fn test_validate_missing_python() {
        let dir = TempDir::new().unwrap();
        let env = EnvConfig {
            dir: dir.path().join(".venv"),
            python: Some("python-that-does-not-exist-42".into()),
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        env.validate(&mut diag);
        assert_eq!(diag.errors()[0].field, EnvConfig::FIELDS.python);
        assert!(diag.errors()[0].hint.is_some());
    }

    #[test]
    fn test_validate_missing_python_with_existing_venv() {
        let dir = TempDir::new().unwrap();
        let venv = dir.path().join(".venv");
        std::fs::create_dir(&venv).unwrap();
        let env = EnvConfig {
            dir: venv,
            python: Some("python-that-does-not-exist-42".into()),
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        env.validate(&mut diag);
        assert!(diag.errors().is_empty());
        assert_eq!(diag.warnings().len(), 1);
        assert_eq!(diag.warnings()[0].0, EnvConfig::FIELDS.python);
    }
}

//! Python environment bootstrap.
//!
//! # Flow
//!
//! ```text
//! venv exists? ── no ──► find system python ──► python -m venv <dir>
//!      │                                              │
//!      └──────────────► install policy ◄──────────────┘
//!                            │
//!          never ─ skip │ always ─ install │ auto ─ install if just
//!                                            created or stamp differs
//! ```
//!
//! A missing requirements file is a warning, not an error. Activation is
//! not a shell step: [`Venv::activation_env`] yields the variables the
//! converter process is started with.

mod stamp;
#[cfg(test)]
pub mod testing;
mod toolchain;
mod venv;

pub use toolchain::{SystemToolchain, Toolchain};
pub use venv::Venv;

use crate::config::{InstallPolicy, LauncherConfig};
use crate::{debug, log};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Bootstrap failures.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(
        "no Python interpreter found (tried {})\n  hint: install Python 3 or set `env.python` in photo2pixel.toml",
        .0.join(", ")
    )]
    InterpreterNotFound(Vec<String>),

    #[error("failed to create virtual environment in {}", .0.display())]
    VenvCreation(PathBuf),

    #[error("failed to install dependencies from {}", .0.display())]
    DependencyInstall(PathBuf),
}

/// Make sure the venv exists and its dependencies are installed.
///
/// Returns the ready environment.
pub fn bootstrap(config: &LauncherConfig, toolchain: &impl Toolchain) -> Result<Venv> {
    let venv = Venv::new(config.venv_dir());
    let root = config.root();

    let created = if venv.exists() {
        debug!("env"; "using virtual environment {}", display_path(root, venv.dir()));
        false
    } else {
        let python = system_python(config, toolchain)?;
        log!("env"; "creating virtual environment in {}", display_path(root, venv.dir()));
        debug!("env"; "interpreter: {}", python.display());
        toolchain
            .create_venv(&python, venv.dir(), root)
            .with_context(|| BootstrapError::VenvCreation(venv.dir().to_path_buf()))?;
        true
    };

    install_requirements(config, &venv, created, toolchain)?;
    Ok(venv)
}

/// Interpreter to use when bootstrap is skipped.
///
/// The venv interpreter if it is there, else the system one.
pub fn existing_interpreter(config: &LauncherConfig, toolchain: &impl Toolchain) -> Result<PathBuf> {
    let venv = Venv::new(config.venv_dir());
    let python = venv.python();
    if python.is_file() {
        return Ok(python);
    }
    debug!("env"; "no venv interpreter at {}, using system python", python.display());
    system_python(config, toolchain)
}

fn system_python(config: &LauncherConfig, toolchain: &impl Toolchain) -> Result<PathBuf> {
    let configured = config.env.python.as_deref();
    toolchain.find_python(configured).ok_or_else(|| {
        let tried = match configured {
            Some(name) => vec![name.to_owned()],
            None => toolchain::PYTHON_CANDIDATES
                .iter()
                .map(|s| (*s).to_owned())
                .collect(),
        };
        BootstrapError::InterpreterNotFound(tried).into()
    })
}

fn install_requirements(
    config: &LauncherConfig,
    venv: &Venv,
    created: bool,
    toolchain: &impl Toolchain,
) -> Result<()> {
    let policy = config.env.install;
    if policy == InstallPolicy::Never {
        debug!("env"; "dependency installation disabled");
        return Ok(());
    }

    let root = config.root();
    let requirements = config.requirements_path();
    if !requirements.is_file() {
        log!("warning"; "{} not found, skipping dependency installation",
            display_path(root, requirements));
        return Ok(());
    }

    let hash = stamp::hash_file(requirements)
        .with_context(|| format!("Failed to read {}", requirements.display()))?;

    let needed = policy == InstallPolicy::Always
        || created
        || stamp::requirements_changed(venv.dir(), hash);
    if !needed {
        debug!("env"; "requirements unchanged ({hash}), skipping install");
        return Ok(());
    }

    log!("pip"; "installing dependencies from {}", display_path(root, requirements));
    toolchain
        .install(venv, requirements, root)
        .with_context(|| BootstrapError::DependencyInstall(requirements.to_path_buf()))?;

    if let Err(e) = stamp::write_stamp(venv.dir(), hash) {
        debug!("env"; "failed to record requirements stamp: {}", e);
    }
    Ok(())
}

/// Path relative to root when possible, for log lines.
fn display_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

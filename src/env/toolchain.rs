//! External tools used to build the environment.
//!
//! [`Toolchain`] is the seam between bootstrap policy and process execution,
//! so the policy can be tested without a Python installation.

use super::Venv;
use crate::utils::exec::{Cmd, PIP_FILTER, SILENT_FILTER};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Interpreter names looked up on `PATH`, in order.
pub const PYTHON_CANDIDATES: &[&str] = &["python3", "python"];

/// Operations bootstrap needs from the Python toolchain.
pub trait Toolchain {
    /// Locate the system interpreter used to create the venv.
    fn find_python(&self, configured: Option<&str>) -> Option<PathBuf> {
        find_python(configured)
    }

    /// Create a venv at `dir` with the system interpreter.
    fn create_venv(&self, python: &Path, dir: &Path, cwd: &Path) -> Result<()>;

    /// Install `requirements` into `venv` with its own pip.
    fn install(&self, venv: &Venv, requirements: &Path, cwd: &Path) -> Result<()>;
}

/// Runs the real `python -m venv` and `pip install`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemToolchain;

impl Toolchain for SystemToolchain {
    fn create_venv(&self, python: &Path, dir: &Path, cwd: &Path) -> Result<()> {
        Cmd::new(python)
            .args(["-m", "venv"])
            .arg(dir)
            .cwd(cwd)
            .filter(&SILENT_FILTER)
            .run()?;
        Ok(())
    }

    fn install(&self, venv: &Venv, requirements: &Path, cwd: &Path) -> Result<()> {
        Cmd::new(venv.pip())
            .args(["install", "-r"])
            .arg(requirements)
            .cwd(cwd)
            .pty(true)
            .filter(&PIP_FILTER)
            .run()?;
        Ok(())
    }
}

/// Locate the system interpreter.
///
/// A configured name or path wins; otherwise the first of
/// [`PYTHON_CANDIDATES`] found on `PATH`.
pub fn find_python(configured: Option<&str>) -> Option<PathBuf> {
    match configured {
        Some(name) => which::which(name).ok(),
        None => PYTHON_CANDIDATES
            .iter()
            .find_map(|name| which::which(name).ok()),
    }
}

//! Recording toolchain for bootstrap and launcher tests.

use super::{Toolchain, Venv};
use anyhow::Result;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Appends each call to a journal file instead of running Python.
///
/// A created venv gets a `python` that is `/bin/sh`, so an entry point
/// written as a shell script runs as the converter and can append to the
/// same journal.
#[derive(Debug, Default)]
pub struct FakeToolchain {
    journal: PathBuf,
    no_python: bool,
    fail_install: bool,
}

impl FakeToolchain {
    pub fn new(journal: impl Into<PathBuf>) -> Self {
        Self {
            journal: journal.into(),
            ..Default::default()
        }
    }

    /// No system interpreter is found.
    pub fn without_python(mut self) -> Self {
        self.no_python = true;
        self
    }

    /// `install` records the call, then fails.
    pub fn failing_install(mut self) -> Self {
        self.fail_install = true;
        self
    }

    /// Journal lines so far, oldest first.
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(&self.journal)
            .map(|text| text.lines().map(str::to_owned).collect())
            .unwrap_or_default()
    }

    /// Shell converter that journals `convert` and writes its `--output`.
    pub fn converter_script(&self) -> String {
        format!(
            "echo convert >> '{}'\n\
             while [ $# -gt 0 ]; do\n\
             \x20 if [ \"$1\" = --output ]; then printf png > \"$2\"; fi\n\
             \x20 shift\n\
             done\n",
            self.journal.display()
        )
    }

    fn record(&self, line: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.journal)?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}

impl Toolchain for FakeToolchain {
    fn find_python(&self, _configured: Option<&str>) -> Option<PathBuf> {
        (!self.no_python).then(|| PathBuf::from("/usr/bin/python3"))
    }

    fn create_venv(&self, python: &Path, dir: &Path, _cwd: &Path) -> Result<()> {
        self.record(&format!("venv {}", python.display()))?;
        let venv = Venv::new(dir);
        fs::create_dir_all(venv.bin_dir())?;
        #[cfg(unix)]
        std::os::unix::fs::symlink("/bin/sh", venv.python())?;
        Ok(())
    }

    fn install(&self, _venv: &Venv, requirements: &Path, _cwd: &Path) -> Result<()> {
        let name = requirements
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.record(&format!("install {name}"))?;
        if self.fail_install {
            anyhow::bail!("pip exited with status 1");
        }
        Ok(())
    }
}

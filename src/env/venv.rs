//! Virtual environment layout and activation.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Directory holding executables inside a venv.
#[cfg(windows)]
const BIN_DIR: &str = "Scripts";
#[cfg(not(windows))]
const BIN_DIR: &str = "bin";

/// Executable suffix on this platform.
#[cfg(windows)]
const EXE_SUFFIX: &str = ".exe";
#[cfg(not(windows))]
const EXE_SUFFIX: &str = "";

/// A Python virtual environment rooted at `dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Venv {
    dir: PathBuf,
}

impl Venv {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether the venv directory exists.
    pub fn exists(&self) -> bool {
        self.dir.is_dir()
    }

    /// `<venv>/bin` (or `Scripts` on Windows).
    pub fn bin_dir(&self) -> PathBuf {
        self.dir.join(BIN_DIR)
    }

    /// The venv interpreter.
    pub fn python(&self) -> PathBuf {
        self.executable("python")
    }

    /// The venv pip.
    pub fn pip(&self) -> PathBuf {
        self.executable("pip")
    }

    fn executable(&self, name: &str) -> PathBuf {
        self.bin_dir().join(format!("{name}{EXE_SUFFIX}"))
    }

    /// Environment variables that activate this venv for a child process.
    ///
    /// Mirrors `source <venv>/bin/activate`: sets `VIRTUAL_ENV` and puts
    /// the venv bin dir first on `PATH`. Applying it to a `PATH` that already
    /// starts with the bin dir leaves it unchanged.
    pub fn activation_env(&self, current_path: Option<&std::ffi::OsStr>) -> Vec<(String, String)> {
        let bin = self.bin_dir();
        let mut entries: Vec<PathBuf> = current_path
            .map(|p| std::env::split_paths(p).collect())
            .unwrap_or_default();

        if entries.first() != Some(&bin) {
            entries.insert(0, bin);
        }

        let path = std::env::join_paths(&entries)
            .unwrap_or_else(|_| OsString::from(self.bin_dir().as_os_str()));

        vec![
            (
                "VIRTUAL_ENV".to_string(),
                self.dir.to_string_lossy().to_string(),
            ),
            ("PATH".to_string(), path.to_string_lossy().to_string()),
        ]
    }
}

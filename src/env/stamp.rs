//! Requirements freshness stamp.
//!
//! After a successful install the blake3 hash of the requirements file is
//! written to `<venv>/.photo2pixel-requirements`. A later run compares the
//! current hash with the stamp to decide whether `pip install` is needed.

use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

/// Stamp file name inside the venv directory.
pub const STAMP_FILE: &str = ".photo2pixel-requirements";

/// A 256-bit content hash (blake3 output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// Convert to hex string.
    pub fn to_hex(self) -> String {
        hex::encode(self.0)
    }

    /// Create from hex string.
    pub fn from_hex(s: &str) -> Option<Self> {
        let bytes = hex::decode(s.trim()).ok()?;
        let arr: [u8; 32] = bytes.try_into().ok()?;
        Some(Self(arr))
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // First 16 hex chars are enough for log lines
        write!(f, "{}", &self.to_hex()[..16])
    }
}

/// Compute the blake3 hash of a file's contents.
pub fn hash_file(path: &Path) -> io::Result<ContentHash> {
    let mut reader = BufReader::with_capacity(64 * 1024, File::open(path)?);
    let mut hasher = blake3::Hasher::new();
    let mut buffer = [0u8; 64 * 1024];

    loop {
        match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => {
                hasher.update(&buffer[..n]);
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(ContentHash(*hasher.finalize().as_bytes()))
}

/// Path of the stamp file for a venv directory.
pub fn stamp_path(venv_dir: &Path) -> PathBuf {
    venv_dir.join(STAMP_FILE)
}

/// Read the recorded hash; `None` when missing or unreadable.
pub fn read_stamp(venv_dir: &Path) -> Option<ContentHash> {
    let content = fs::read_to_string(stamp_path(venv_dir)).ok()?;
    ContentHash::from_hex(&content)
}

/// Record `hash` as the installed requirements.
pub fn write_stamp(venv_dir: &Path, hash: ContentHash) -> io::Result<()> {
    fs::write(stamp_path(venv_dir), format!("{}\n", hash.to_hex()))
}

/// Whether the requirements changed since the last recorded install.
pub fn requirements_changed(venv_dir: &Path, current: ContentHash) -> bool {
    read_stamp(venv_dir) != Some(current)
}

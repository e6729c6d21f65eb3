//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from `start`
///
/// Walks up parent directories until finding `config_name`.
/// An absolute `config_name` is returned as-is when it exists.
///
/// # Example
/// ```text
/// /home/user/pixel/images/      ← start
/// /home/user/pixel/photo2pixel.toml  ← found!
/// ```
pub fn find_config_file(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.is_file() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return None, // Reached filesystem root
        }
    }
}

/// Join `path` onto `root` unless it is already absolute.
pub fn resolve_against(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_start_dir() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("photo2pixel.toml");
        std::fs::write(&config, "").unwrap();

        assert_eq!(
            find_config_file(temp.path(), Path::new("photo2pixel.toml")),
            Some(config)
        );
    }

    #[test]
    fn test_find_config_in_parent() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("photo2pixel.toml");
        std::fs::write(&config, "").unwrap();
        let nested = temp.path().join("images/holiday");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(
            find_config_file(&nested, Path::new("photo2pixel.toml")),
            Some(config)
        );
    }

    #[test]
    fn test_directory_with_config_name_is_skipped() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("odd-name-p2p.toml")).unwrap();
        assert_eq!(
            find_config_file(temp.path(), Path::new("odd-name-p2p.toml")),
            None
        );
    }

    #[test]
    fn test_absolute_config_path() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("custom.toml");
        assert_eq!(find_config_file(Path::new("/"), &config), None);

        std::fs::write(&config, "").unwrap();
        assert_eq!(find_config_file(Path::new("/"), &config), Some(config));
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_against() {
        let root = Path::new("/project");
        assert_eq!(
            resolve_against(root, Path::new(".venv")),
            PathBuf::from("/project/.venv")
        );
        assert_eq!(
            resolve_against(root, Path::new("/opt/venv")),
            PathBuf::from("/opt/venv")
        );
    }
}

//! Running the external converter.
//!
//! The converter is an opaque program: it receives every resolved value as
//! an explicit flag and inherits the terminal.
//!
//! ```text
//! <python> <entry> --input <in> --output <out> -k <k> -p <p> -e <e> --device <d>
//! ```

mod mode;
pub mod shutdown;

pub use mode::Mode;

use crate::config::Device;
use crate::env::Venv;
use crate::logger;
use crate::preset::{Params, Preset};
use crate::utils::exec::Cmd;
use crate::utils::size::file_size_kb;
use crate::{debug, log};
use anyhow::Result;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Launch failures.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error(
        "conversion entry point not found: {}\n  hint: run from the project root or set `env.entry` in photo2pixel.toml",
        .0.display()
    )]
    MissingEntryPoint(PathBuf),

    #[error(
        "conversion failed ({})",
        .0.map_or_else(|| "terminated by signal".to_string(), |code| format!("exit status {code}"))
    )]
    ConversionFailed(Option<i32>),

    #[error("conversion interrupted")]
    Interrupted,
}

/// Everything the converter needs for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub params: Params,
    /// Preset the params came from, for reporting only.
    pub preset: Option<Preset>,
    pub device: Device,
}

impl ConvertRequest {
    /// One-line summary for the log.
    pub fn describe(&self) -> String {
        match self.preset {
            Some(preset) => format!("preset {preset} ({})", self.params),
            None => format!("custom ({})", self.params),
        }
    }
}

/// Fail unless the entry point is an existing file.
pub fn check_entry_point(entry: &Path) -> Result<(), LaunchError> {
    if entry.is_file() {
        Ok(())
    } else {
        Err(LaunchError::MissingEntryPoint(entry.to_path_buf()))
    }
}

/// Build the converter command line.
pub fn converter_command(python: &Path, entry: &Path, request: &ConvertRequest) -> Cmd {
    let Params {
        kernel_size,
        pixel_size,
        edge_thresh,
    } = request.params;

    Cmd::new(python)
        .arg(entry)
        .arg("--input")
        .arg(&request.input)
        .arg("--output")
        .arg(&request.output)
        .arg("-k")
        .arg(kernel_size.to_string())
        .arg("-p")
        .arg(pixel_size.to_string())
        .arg("-e")
        .arg(edge_thresh.to_string())
        .args(["--device", request.device.as_str()])
}

/// Run the converter in `root` with the venv activated, then report the result.
pub fn run_conversion(
    cmd: Cmd,
    root: &Path,
    venv: Option<&Venv>,
    request: &ConvertRequest,
) -> Result<()> {
    let mut cmd = cmd.cwd(root);
    if let Some(venv) = venv {
        let path = std::env::var_os("PATH");
        cmd = cmd.envs(venv.activation_env(path.as_deref()));
    }
    debug!("convert"; "{}", cmd.display());

    log!("convert"; "{} → {}", request.input.display(), request.output.display());
    log!("convert"; "{}", request.describe());

    let status = {
        let _guard = shutdown::ChildGuard::enter();
        cmd.status()?
    };

    if shutdown::is_shutdown() {
        return Err(LaunchError::Interrupted.into());
    }
    if !status.success() {
        return Err(LaunchError::ConversionFailed(status.code()).into());
    }

    match file_size_kb(&request.output) {
        Some(size) => logger::status_success(&format!(
            "conversion completed\noutput: {} ({size})",
            request.output.display()
        )),
        None => logger::status_warning(&format!(
            "converter exited successfully but {} was not written",
            request.output.display()
        )),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn request() -> ConvertRequest {
        ConvertRequest {
            input: "photos/cat.jpg".into(),
            output: "photos/cat_pixel.png".into(),
            params: Params::new(8, 12, 80),
            preset: Some(Preset::Retro),
            device: Device::Cpu,
        }
    }

    #[test]
    fn test_converter_argv() {
        let cmd = converter_command(Path::new("python"), Path::new("convert.py"), &request());
        assert_eq!(
            cmd.display(),
            "python convert.py --input photos/cat.jpg --output photos/cat_pixel.png \
             -k 8 -p 12 -e 80 --device cpu"
        );
    }

    #[test]
    fn test_zero_edge_threshold_is_forwarded() {
        let mut req = request();
        req.params.edge_thresh = 0;
        let cmd = converter_command(Path::new("python"), Path::new("convert.py"), &req);
        assert!(cmd.display().contains("-e 0 "));
    }

    #[test]
    fn test_paths_with_spaces_stay_one_argument() {
        let mut req = request();
        req.input = "my photos/cat 1.jpg".into();
        let cmd = converter_command(Path::new("python"), Path::new("convert.py"), &req);
        assert!(cmd.display().contains("--input 'my photos/cat 1.jpg'"));
    }

    #[test]
    fn test_missing_entry_point() {
        let temp = TempDir::new().unwrap();
        let entry = temp.path().join("convert.py");
        let err = check_entry_point(&entry).unwrap_err();
        assert!(err.to_string().contains("entry point not found"));

        fs::write(&entry, "print('hi')").unwrap();
        assert!(check_entry_point(&entry).is_ok());
    }

    #[test]
    fn test_entry_point_directory_is_rejected() {
        let temp = TempDir::new().unwrap();
        assert!(check_entry_point(temp.path()).is_err());
    }

    #[test]
    fn test_conversion_failed_message() {
        assert_eq!(
            LaunchError::ConversionFailed(Some(2)).to_string(),
            "conversion failed (exit status 2)"
        );
        assert_eq!(
            LaunchError::ConversionFailed(None).to_string(),
            "conversion failed (terminated by signal)"
        );
    }

    #[test]
    fn test_describe() {
        let mut req = request();
        assert_eq!(
            req.describe(),
            "preset retro (kernel_size: 8, pixel_size: 12, edge_thresh: 80)"
        );
        req.preset = None;
        assert!(req.describe().starts_with("custom ("));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_conversion_reports_failure() {
        let temp = TempDir::new().unwrap();
        let cmd = Cmd::new("sh").args(["-c", "exit 3"]);
        let err = run_conversion(cmd, temp.path(), None, &request()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LaunchError>(),
            Some(LaunchError::ConversionFailed(Some(3)))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_conversion_success() {
        let temp = TempDir::new().unwrap();
        let mut req = request();
        req.output = temp.path().join("out.png");
        let script = format!("printf 'png' > '{}'", req.output.display());
        let cmd = Cmd::new("sh").args(["-c", script.as_str()]);
        run_conversion(cmd, temp.path(), None, &req).unwrap();
        assert!(req.output.is_file());
    }

    #[cfg(unix)]
    #[test]
    fn test_run_conversion_activates_venv() {
        let temp = TempDir::new().unwrap();
        let venv = Venv::new(temp.path().join(".venv"));
        let mut req = request();
        req.output = temp.path().join("env.txt");
        let script = format!("printf \"$VIRTUAL_ENV\" > '{}'", req.output.display());
        let cmd = Cmd::new("sh").args(["-c", script.as_str()]);
        run_conversion(cmd, temp.path(), Some(&venv), &req).unwrap();
        assert_eq!(
            fs::read_to_string(&req.output).unwrap(),
            venv.dir().to_string_lossy()
        );
    }
}

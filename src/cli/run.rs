//! Orchestration: mode → request → validation → bootstrap → converter.

use super::Cli;
use crate::config::LauncherConfig;
use crate::env::{self, SystemToolchain, Toolchain, Venv};
use crate::input::{default_output, read_dimensions, validate_input};
use crate::interactive::{self, Prefilled};
use crate::launch::{self, ConvertRequest, Mode, converter_command};
use crate::preset;
use crate::{debug, log};
use anyhow::{Context, Result, bail};
use owo_colors::{OwoColorize, Stream};
use std::path::{Path, PathBuf};

/// Run the launcher for already-loaded configuration.
pub fn run(cli: &Cli, config: &LauncherConfig) -> Result<()> {
    run_with(cli, config, &SystemToolchain)
}

/// Run the launcher with the given toolchain building the environment.
fn run_with(cli: &Cli, config: &LauncherConfig, toolchain: &impl Toolchain) -> Result<()> {
    let mode = Mode::select(cli);
    debug!("cli"; "mode: {}", mode.name());

    // Nothing is prompted, created or installed for a checkout without an entry point
    launch::check_entry_point(config.entry_path())?;

    let request = match mode {
        Mode::Interactive => {
            print_banner();
            interactive::run(config, &prefilled(cli))?
        }
        Mode::Preset | Mode::Custom => request_from_flags(cli, config)?,
    };
    let request = absolutize(request)?;
    validate_request(&request)?;

    if cli.dry_run {
        let python = Venv::new(config.venv_dir()).python();
        println!(
            "{}",
            converter_command(&python, config.entry_path(), &request).display()
        );
        return Ok(());
    }

    let (python, venv) = if cli.skip_bootstrap {
        let venv = Venv::new(config.venv_dir());
        let python = env::existing_interpreter(config, toolchain)?;
        (python, venv.exists().then_some(venv))
    } else {
        let venv = env::bootstrap(config, toolchain)?;
        (venv.python(), Some(venv))
    };

    let cmd = converter_command(&python, config.entry_path(), &request);
    launch::run_conversion(cmd, config.root(), venv.as_ref(), &request)
}

/// Build the request for preset and custom modes.
///
/// The base tuple is the effective preset (`--preset`, else `convert.preset`),
/// or the defaults; `-k/-p/-e` then override single fields.
fn request_from_flags(cli: &Cli, config: &LauncherConfig) -> Result<ConvertRequest> {
    let Some(input) = cli.input.clone() else {
        bail!(
            "an input image is required\n  hint: pass --input <path>, or use --interactive for guided setup"
        );
    };

    let preset = cli.preset.or(config.convert.preset);
    let params = preset::resolve(preset, &cli.overrides());
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output(&input, &config.convert.output_suffix));

    Ok(ConvertRequest {
        input,
        output,
        params,
        preset,
        device: config.convert.device,
    })
}

/// Flags that answer interactive questions up front.
fn prefilled(cli: &Cli) -> Prefilled {
    Prefilled {
        output: cli.output.clone(),
        overrides: cli.overrides(),
    }
}

/// Make paths absolute against cwd; the converter runs in the project root.
fn absolutize(mut request: ConvertRequest) -> Result<ConvertRequest> {
    request.input = absolute(&request.input)?;
    request.output = absolute(&request.output)?;
    Ok(request)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).with_context(|| format!("Failed to resolve {}", path.display()))
}

/// Check the input image and the parameter ranges.
fn validate_request(request: &ConvertRequest) -> Result<()> {
    validate_input(&request.input)?;

    match read_dimensions(&request.input) {
        Ok((width, height)) => {
            log!("input"; "{} ({width}x{height})", request.input.display());
        }
        Err(e) => {
            log!("warning"; "could not read image header of {}: {}", request.input.display(), e);
        }
    }

    request.params.validate()?;
    Ok(())
}

fn print_banner() {
    println!(
        "{}",
        "photo2pixel".if_supports_color(Stream::Stdout, |s| s.bold())
    );
    println!("Convert your photos into pixel art");
    println!();
}

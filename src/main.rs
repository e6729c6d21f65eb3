//! photo2pixel - launcher for the photo to pixel art converter.

mod cli;
mod config;
mod env;
mod input;
mod interactive;
mod launch;
mod logger;
mod preset;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::Cli;
use config::LauncherConfig;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any prompt or child process)
    launch::shutdown::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    if cli.presets {
        print!("{}", preset::presets_table());
        return Ok(());
    }

    let config = LauncherConfig::load(&cli)?;
    cli::run(&cli, &config)
}

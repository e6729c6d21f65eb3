//! Command-line interface definitions.

use crate::config::Device;
use crate::preset::{ParamOverrides, Preset};
use clap::{ColorChoice, Parser};
use std::path::PathBuf;

/// Photo to pixel art converter launcher
#[derive(Parser, Debug, Clone, Default)]
#[command(
    version,
    about,
    long_about = None,
    after_help = "\
Examples:
  photo2pixel                                   # interactive mode
  photo2pixel --preset retro --input photo.jpg
  photo2pixel --input photo.jpg -k 12 -p 16 -e 80 --output result.png
  photo2pixel --presets"
)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: photo2pixel.toml, searched upward)
    #[arg(short = 'C', long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Input image path (jpg, png, bmp, tiff, webp)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// Output image path (default: <input>_pixel.png)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Use a predefined parameter preset
    #[arg(long, value_enum)]
    pub preset: Option<Preset>,

    /// Kernel size: color smoothness (1-50)
    #[arg(short = 'k', long = "kernel_size", alias = "kernel-size", value_name = "N")]
    pub kernel_size: Option<u32>,

    /// Pixel size: pixel block size (1-64)
    #[arg(short = 'p', long = "pixel_size", alias = "pixel-size", value_name = "N")]
    pub pixel_size: Option<u32>,

    /// Edge threshold: black line intensity (0-255)
    #[arg(short = 'e', long = "edge_thresh", alias = "edge-thresh", value_name = "N")]
    pub edge_thresh: Option<u32>,

    /// Guided parameter input; --output and -k/-p/-e prefill its answers
    /// (default when no input or parameters are given)
    #[arg(long, conflicts_with_all = ["input", "preset"])]
    pub interactive: bool,

    /// Device the converter runs on
    #[arg(long, value_enum)]
    pub device: Option<Device>,

    /// Show available presets and exit
    #[arg(long)]
    pub presets: bool,

    /// Print the converter command instead of running it
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Skip virtual environment creation and dependency installation
    #[arg(long)]
    pub skip_bootstrap: bool,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Explicit `-k/-p/-e` values.
    pub const fn overrides(&self) -> ParamOverrides {
        ParamOverrides {
            kernel_size: self.kernel_size,
            pixel_size: self.pixel_size,
            edge_thresh: self.edge_thresh,
        }
    }
}

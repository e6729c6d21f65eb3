//! Guided interactive mode.
//!
//! Asks for the input image, the output path and either a preset or the
//! three parameters, and yields a [`ConvertRequest`]. Paths are sanitized
//! so a file dragged onto the terminal works as typed.
//!
//! Values already given on the command line (`--output`, `-k/-p/-e`) are
//! not asked again; see [`Prefilled`].

mod prompt;

pub use prompt::Prompter;

use crate::config::LauncherConfig;
use crate::input::{default_output, sanitize_path, validate_input};
use crate::launch::ConvertRequest;
use crate::preset::{ParamField, ParamOverrides, Params, Preset, presets_table};
use owo_colors::{OwoColorize, Stream};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InteractiveError {
    #[error("input closed before the session finished")]
    Eof,

    #[error("terminal I/O failed")]
    Io(#[from] io::Error),
}

/// Answers taken from the command line instead of a prompt.
#[derive(Debug, Clone, Default)]
pub struct Prefilled {
    pub output: Option<PathBuf>,
    /// Win over the chosen preset, and skip their custom-parameter prompts.
    pub overrides: ParamOverrides,
}

/// Run a session on the process terminal.
pub fn run(
    config: &LauncherConfig,
    prefilled: &Prefilled,
) -> Result<ConvertRequest, InteractiveError> {
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    run_session(&mut prompter, config, prefilled)
}

/// Run a session over the given prompter.
pub fn run_session<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    config: &LauncherConfig,
    prefilled: &Prefilled,
) -> Result<ConvertRequest, InteractiveError> {
    prompter.say(&heading("Interactive configuration"))?;

    let input = ask_input(prompter, config)?;
    let output = match &prefilled.output {
        Some(output) => {
            prompter.say(&format!("Output image: {}", output.display()))?;
            output.clone()
        }
        None => ask_output(prompter, config, &input)?,
    };
    let (preset, params) = ask_params(prompter, &prefilled.overrides)?;

    Ok(ConvertRequest {
        input,
        output,
        params,
        preset,
        device: config.convert.device,
    })
}

fn ask_input<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    config: &LauncherConfig,
) -> Result<PathBuf, InteractiveError> {
    let default = &config.convert.default_input;
    let question = format!(
        "Input image [{}]: ",
        relative_to(config.root(), default).display()
    );

    loop {
        let answer = prompter.ask(&question)?;
        let path = if answer.is_empty() {
            default.clone()
        } else {
            sanitize_path(&answer)
        };

        match validate_input(&path) {
            Ok(()) => return Ok(path),
            Err(e) => {
                prompter.complain(&e.to_string())?;
                prompter.say("  enter a path to a jpg, png, bmp, tiff or webp image")?;
            }
        }
    }
}

fn ask_output<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    config: &LauncherConfig,
    input: &Path,
) -> Result<PathBuf, InteractiveError> {
    let default = default_output(input, &config.convert.output_suffix);
    let answer = prompter.ask(&format!("Output image [{}]: ", default.display()))?;
    if answer.is_empty() {
        Ok(default)
    } else {
        Ok(sanitize_path(&answer))
    }
}

fn ask_params<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    overrides: &ParamOverrides,
) -> Result<(Option<Preset>, Params), InteractiveError> {
    prompter.say("")?;
    prompter.say(presets_table().trim_end())?;

    let answer = prompter.ask("Preset (retro/smooth/sharp/classic, Enter for custom): ")?;
    if !answer.is_empty() {
        match answer.parse::<Preset>() {
            Ok(preset) => {
                let params = preset.params().with_overrides(overrides);
                if overrides.is_empty() {
                    prompter.say(&format!("  using `{preset}` preset"))?;
                } else {
                    prompter.say(&format!("  using `{preset}` preset ({params})"))?;
                }
                return Ok((Some(preset), params));
            }
            Err(e) => prompter.complain(&format!("{e}, using custom parameters"))?,
        }
    }

    prompter.say("")?;
    prompter.say(&heading("Custom parameters"))?;
    let defaults = Params::DEFAULT;
    let mut ask = |field: ParamField,
                   given: Option<u32>,
                   default: u32|
     -> Result<u32, InteractiveError> {
        if let Some(value) = given {
            prompter.say(&format!("  {}: {value} ({})", field.label(), field.flag()))?;
            return Ok(value);
        }
        prompter.say(&format!("  {}", field.hint()))?;
        prompter.ask_u32(&format!("  {}", field.label()), default)
    };
    let params = Params::new(
        ask(ParamField::KernelSize, overrides.kernel_size, defaults.kernel_size)?,
        ask(ParamField::PixelSize, overrides.pixel_size, defaults.pixel_size)?,
        ask(ParamField::EdgeThresh, overrides.edge_thresh, defaults.edge_thresh)?,
    );
    Ok((None, params))
}

fn heading(text: &str) -> String {
    text.if_supports_color(Stream::Stdout, |s| s.bold())
        .to_string()
}

fn relative_to<'a>(root: &Path, path: &'a Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Device;
    use std::io::Cursor;
    use tempfile::TempDir;

    struct Fixture {
        temp: TempDir,
        config: LauncherConfig,
    }

    impl Fixture {
        fn new() -> Self {
            let temp = TempDir::new().unwrap();
            let mut config = LauncherConfig {
                root: temp.path().to_path_buf(),
                ..Default::default()
            };
            config.convert.default_input = temp.path().join("images/example.jpg");
            config.convert.device = Device::Cpu;
            Self { temp, config }
        }

        fn image(&self, name: &str) -> PathBuf {
            let path = self.temp.path().join(name);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            image::RgbImage::new(2, 2).save(&path).unwrap();
            path
        }

        fn run(&self, script: &str) -> (Result<ConvertRequest, InteractiveError>, String) {
            self.run_with(script, &Prefilled::default())
        }

        fn run_with(
            &self,
            script: &str,
            prefilled: &Prefilled,
        ) -> (Result<ConvertRequest, InteractiveError>, String) {
            owo_colors::set_override(false);
            let mut prompter = Prompter::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
            let result = run_session(&mut prompter, &self.config, prefilled);
            let out = String::from_utf8(prompter.into_output()).unwrap();
            (result, out)
        }
    }

    #[test]
    fn test_preset_session() {
        let fx = Fixture::new();
        let photo = fx.image("cat.png");

        let (result, out) = fx.run(&format!("{}\n\nretro\n", photo.display()));
        let req = result.unwrap();

        assert_eq!(req.input, photo);
        assert_eq!(req.output, fx.temp.path().join("cat_pixel.png"));
        assert_eq!(req.preset, Some(Preset::Retro));
        assert_eq!(req.params, Params::new(8, 12, 80));
        assert_eq!(req.device, Device::Cpu);
        assert!(out.contains("using `retro` preset"));
        assert!(out.contains("Classic 8-bit style"));
    }

    #[test]
    fn test_missing_file_reprompts() {
        let fx = Fixture::new();
        let photo = fx.image("cat.png");
        let missing = fx.temp.path().join("nope.jpg");

        let script = format!("{}\n{}\n\nsharp\n", missing.display(), photo.display());
        let (result, out) = fx.run(&script);

        assert_eq!(result.unwrap().input, photo);
        assert_eq!(out.matches("Input image [").count(), 2);
        assert!(out.contains("file not found"));
    }

    #[test]
    fn test_unsupported_file_reprompts() {
        let fx = Fixture::new();
        let photo = fx.image("cat.png");
        let notes = fx.temp.path().join("notes.txt");
        std::fs::write(&notes, "hi").unwrap();

        let script = format!("{}\n{}\n\n\n\n\n\n", notes.display(), photo.display());
        let (result, out) = fx.run(&script);
        assert!(result.is_ok());
        assert!(out.contains("unsupported image type `txt`"));
    }

    #[test]
    fn test_empty_input_uses_default() {
        let fx = Fixture::new();
        let default = fx.image("images/example.jpg");

        let (result, out) = fx.run("\n\nclassic\n");
        let req = result.unwrap();
        assert_eq!(req.input, default);
        assert_eq!(req.output, fx.temp.path().join("images/example_pixel.png"));
        assert!(out.contains(&format!(
            "Input image [{}]",
            Path::new("images/example.jpg").display()
        )));
    }

    #[test]
    fn test_dragged_path_is_sanitized() {
        let fx = Fixture::new();
        let photo = fx.image("my photo.png");

        let (result, _) = fx.run(&format!("'{}'\n\nsmooth\n", photo.display()));
        assert_eq!(result.unwrap().input, photo);
    }

    #[test]
    fn test_explicit_output() {
        let fx = Fixture::new();
        let photo = fx.image("cat.png");
        let out_path = fx.temp.path().join("art.png");

        let script = format!("{}\n\"{}\"\nsharp\n", photo.display(), out_path.display());
        let (result, _) = fx.run(&script);
        assert_eq!(result.unwrap().output, out_path);
    }

    #[test]
    fn test_custom_params_with_defaults_and_retry() {
        let fx = Fixture::new();
        let photo = fx.image("cat.png");

        let script = format!("{}\n\n\nabc\n12\n\n0\n", photo.display());
        let (result, out) = fx.run(&script);
        let req = result.unwrap();

        assert_eq!(req.preset, None);
        assert_eq!(req.params, Params::new(12, 16, 0));
        assert!(out.contains("`abc` is not a whole number"));
        assert!(out.contains("Controls pixel block size"));
    }

    #[test]
    fn test_unknown_preset_falls_back_to_custom() {
        let fx = Fixture::new();
        let photo = fx.image("cat.png");

        let script = format!("{}\n\nneon\n\n\n\n", photo.display());
        let (result, out) = fx.run(&script);
        let req = result.unwrap();

        assert_eq!(req.preset, None);
        assert_eq!(req.params, Params::DEFAULT);
        assert!(out.contains("using custom parameters"));
    }

    #[test]
    fn test_prefilled_output_is_not_asked() {
        let fx = Fixture::new();
        let photo = fx.image("cat.png");
        let out_path = fx.temp.path().join("art.png");
        let prefilled = Prefilled {
            output: Some(out_path.clone()),
            ..Default::default()
        };

        let (result, out) = fx.run_with(&format!("{}\nsharp\n", photo.display()), &prefilled);
        let req = result.unwrap();
        assert_eq!(req.output, out_path);
        assert_eq!(req.preset, Some(Preset::Sharp));
        assert!(!out.contains("Output image ["));
    }

    #[test]
    fn test_prefilled_params_override_preset() {
        let fx = Fixture::new();
        let photo = fx.image("cat.png");
        let prefilled = Prefilled {
            overrides: ParamOverrides {
                pixel_size: Some(4),
                ..Default::default()
            },
            ..Default::default()
        };

        let (result, out) = fx.run_with(&format!("{}\n\nretro\n", photo.display()), &prefilled);
        let req = result.unwrap();
        assert_eq!(req.preset, Some(Preset::Retro));
        assert_eq!(req.params, Params::new(8, 4, 80));
        assert!(out.contains("using `retro` preset (kernel_size: 8, pixel_size: 4"));
    }

    #[test]
    fn test_prefilled_params_skip_custom_prompts() {
        let fx = Fixture::new();
        let photo = fx.image("cat.png");
        let prefilled = Prefilled {
            overrides: ParamOverrides {
                kernel_size: Some(3),
                edge_thresh: Some(40),
                ..Default::default()
            },
            ..Default::default()
        };

        // input, output, preset, pixel size
        let script = format!("{}\n\n\n20\n", photo.display());
        let (result, out) = fx.run_with(&script, &prefilled);
        let req = result.unwrap();
        assert_eq!(req.preset, None);
        assert_eq!(req.params, Params::new(3, 20, 40));
        assert!(out.contains("Kernel size: 3 (-k/--kernel_size)"));
        assert!(!out.contains("Controls color smoothness"));
        assert!(out.contains("Controls pixel block size"));
    }

    #[test]
    fn test_eof_aborts() {
        let fx = Fixture::new();
        let (result, _) = fx.run("");
        assert!(matches!(result, Err(InteractiveError::Eof)));
    }
}

//! Configuration section definitions.
//!
//! Each module corresponds to a section in `photo2pixel.toml`:
//!
//! | Module    | TOML Section | Purpose                              |
//! |-----------|--------------|--------------------------------------|
//! | `env`     | `[env]`      | Virtualenv, requirements, entry point |
//! | `convert` | `[convert]`  | Preset, default paths, device        |

mod convert;
mod env;

pub use convert::{ConvertConfig, Device};
pub use env::{EnvConfig, InstallPolicy};

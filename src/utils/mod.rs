//! Utility modules for the launcher.

pub mod exec;
pub mod size;

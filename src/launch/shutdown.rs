//! Ctrl+C handling.
//!
//! - `SHUTDOWN`: Ctrl+C was received
//! - `CHILD_RUNNING`: the converter is running in the foreground
//!
//! While the converter runs, the terminal delivers the interrupt to it as
//! well, so the handler only records the request and the launcher reports
//! it after the child exits. Otherwise the process exits at once.

use std::sync::atomic::{AtomicBool, Ordering};

/// Exit status for an interrupted run (128 + SIGINT).
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

static CHILD_RUNNING: AtomicBool = AtomicBool::new(false);

/// Install the global Ctrl+C handler. Call once, before any prompt.
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        SHUTDOWN.store(true, Ordering::SeqCst);

        if !CHILD_RUNNING.load(Ordering::SeqCst) {
            // Nothing to wait for
            println!();
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}

/// Check if Ctrl+C was received.
pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::SeqCst)
}

/// Marks the converter as running for its lifetime.
pub struct ChildGuard(());

impl ChildGuard {
    pub fn enter() -> Self {
        CHILD_RUNNING.store(true, Ordering::SeqCst);
        Self(())
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        CHILD_RUNNING.store(false, Ordering::SeqCst);
    }
}

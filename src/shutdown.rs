//! Process-wide cooperative shutdown
//!
//! One boolean shared by every session's poll loop. The signal handler
//! is the single writer; sessions only read. The flag is created before
//! any session starts and is never reset for the life of the process.

use anyhow::{Context, Result};
use signal_hook::consts::{SIGINT, SIGPIPE};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cheap-to-clone handle on the process shutdown flag.
#[derive(Clone, Debug, Default)]
pub struct ShutdownFlag(Arc<AtomicBool>);

impl ShutdownFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request shutdown. Write-once in practice; extra calls are harmless.
    pub fn request(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Install the process signal handlers.
///
/// SIGINT sets the shutdown flag so every session leaves its channel at
/// the next tick check. SIGPIPE gets a no-op disposition: a write to a
/// closed pipe then fails with EPIPE at the write site instead of
/// terminating the process.
pub fn install_signal_handlers(shutdown: &ShutdownFlag) -> Result<()> {
    signal_hook::flag::register(SIGINT, Arc::clone(&shutdown.0))
        .context("Failed to install SIGINT handler")?;

    // The registered flag is never read; registering any handler
    // replaces the default terminate disposition for SIGPIPE.
    signal_hook::flag::register(SIGPIPE, Arc::new(AtomicBool::new(false)))
        .context("Failed to mask SIGPIPE")?;

    Ok(())
}

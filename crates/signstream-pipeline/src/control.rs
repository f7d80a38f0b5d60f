//! Run-control signals.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Quit signal checked once per tick at the end of the tick.
pub trait QuitSignal {
    fn should_quit(&self) -> bool;
}

/// Never quits; the run ends when the frame source is exhausted.
#[derive(Debug, Default)]
pub struct Never;

impl QuitSignal for Never {
    fn should_quit(&self) -> bool {
        false
    }
}

/// Quit signal backed by a shared flag, for embedders wiring a key press
/// or an OS signal handler.
#[derive(Debug, Clone, Default)]
pub struct FlagQuit {
    flag: Arc<AtomicBool>,
}

impl FlagQuit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the loop to stop after its current tick.
    pub fn request_quit(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }
}

impl QuitSignal for FlagQuit {
    fn should_quit(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

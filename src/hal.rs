//! Hardware abstraction boundary
//!
//! The core never touches GPIO registers; everything pin-level goes through
//! the [`PinDriver`] capability. The real sysfs/memory-mapped driver lives
//! outside this crate; [`LogDriver`] stands in for it so programs can run
//! end to end on a development machine.

use anyhow::Result;

/// Logic level asserted on an output pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

/// Capability interface to the pin-level GPIO layer.
///
/// Pins are addressed by their board names (e.g. `P1_29`). Both operations
/// may fail; failures are fatal to the run, nothing is retried.
pub trait PinDriver {
    /// Set a pin up for output.
    fn configure(&mut self, pin: &str) -> Result<()>;

    /// Assert a logic level on a configured pin.
    fn write(&mut self, pin: &str, level: Level) -> Result<()>;
}

/// Driver stand-in that records pin traffic in the log instead of driving
/// hardware.
#[derive(Debug, Default)]
pub struct LogDriver;

impl PinDriver for LogDriver {
    fn configure(&mut self, pin: &str) -> Result<()> {
        log::debug!("configure {pin} for output");
        Ok(())
    }

    fn write(&mut self, pin: &str, level: Level) -> Result<()> {
        log::trace!("write {level:?} to {pin}");
        Ok(())
    }
}

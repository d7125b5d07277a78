//! Bipolar stepper phase sequencer
//!
//! Each motor cycles through a fixed half-step drive sequence of eight coil
//! patterns. `step()` emits the pattern at the current phase and advances
//! by one, wrapping after the last entry; nothing else ever resets the
//! phase, so two motors stepped in lock-step stay in lock-step.

use anyhow::Result;

use crate::hal::{Level, PinDriver};

/// Number of coil pins per motor.
pub const COIL_PINS: usize = 4;

/// One discrete rotational step position: which coil pins are energized.
pub type PhasePattern = [bool; COIL_PINS];

/// Half-step drive cycle, in phase order. The first energized pin of a
/// pattern is the lead pin for that step.
pub const HALF_STEP_CYCLE: [PhasePattern; 8] = [
    [true, false, false, false],
    [true, true, false, false],
    [false, true, false, true],
    [false, true, true, false],
    [false, false, true, false],
    [false, false, true, true],
    [false, false, false, true],
    [true, false, false, true],
];

/// One stepper motor: its four output pins and the current phase index.
#[derive(Debug, Clone)]
pub struct Stepper {
    pins: [String; COIL_PINS],
    phase: usize,
}

impl Stepper {
    pub fn new(pins: [String; COIL_PINS]) -> Self {
        Self { pins, phase: 0 }
    }

    /// Current phase index, always in `[0, 8)`.
    pub fn phase(&self) -> usize {
        self.phase
    }

    /// Set the coil pins up for output, all de-energized.
    pub fn configure(&self, driver: &mut impl PinDriver) -> Result<()> {
        for pin in &self.pins {
            driver.configure(pin)?;
            driver.write(pin, Level::Low)?;
        }
        Ok(())
    }

    /// Advance one phase: write the current pattern to the coil pins, then
    /// move the phase index forward by one, wrapping modulo the cycle
    /// length. Returns the pattern that was asserted.
    pub fn step(&mut self, driver: &mut impl PinDriver) -> Result<PhasePattern> {
        let pattern = HALF_STEP_CYCLE[self.phase];
        for (pin, &energized) in self.pins.iter().zip(pattern.iter()) {
            let level = if energized { Level::High } else { Level::Low };
            driver.write(pin, level)?;
        }
        self.phase = (self.phase + 1) % HALF_STEP_CYCLE.len();
        Ok(pattern)
    }
}

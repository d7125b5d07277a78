//! plotbot
//!
//! Motion-control pipeline for a two-motor pen plotter.
//!
//! This library provides:
//! - Gcode tokenization and command parsing
//! - Polar move geometry
//! - Half-step stepper sequencing behind a pin-driver capability
//! - A program runner that executes commands against the robot

pub mod config;
pub mod geometry;
pub mod hal;
pub mod parser;
pub mod robot;
pub mod runner;

// Re-exports for clean public API
pub use config::{Config, MachineConfig};
pub use geometry::PolarMove;
pub use hal::{Level, LogDriver, PinDriver};
pub use parser::{parse_program, Command, ParseError};
pub use robot::{Robot, RobotState};
pub use runner::{ProgramRunner, RunState};

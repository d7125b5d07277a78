//! Configuration management for the plotter.
//!
//! Handles:
//! - Command-line argument parsing
//! - Machine calibration (pins, step length) from a TOML file

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::robot::stepper::COIL_PINS;

/// Command-line arguments for the plotter.
#[derive(Debug, Parser)]
#[command(name = "plotbot")]
#[command(about = "Run a gcode program on a two-stepper pen plotter")]
#[command(version)]
pub struct Args {
    /// Gcode program to execute
    #[arg(default_value = "default.nc")]
    pub program: PathBuf,

    /// Machine configuration TOML (pins and calibration)
    #[arg(long, help = "Path to a machine.toml overriding the built-in pinout")]
    pub machine: Option<PathBuf>,

    /// Log level for the run
    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Combined configuration from all sources.
#[derive(Debug, Clone)]
pub struct Config {
    /// Gcode program file to run
    pub program: PathBuf,
    /// Machine calibration
    pub machine: MachineConfig,
    /// Log level
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let machine = match &args.machine {
            Some(path) => MachineConfig::load(path)?,
            None => match default_machine_file() {
                Some(path) if path.exists() => MachineConfig::load(&path)?,
                _ => MachineConfig::default(),
            },
        };

        Ok(Config {
            program: args.program,
            machine,
            log_level: args.log_level,
        })
    }
}

/// Default location for the machine file in the user config directory.
fn default_machine_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("plotbot").join("machine.toml"))
}

/// Per-machine calibration: which board pins drive what, and how far one
/// half-step moves the pen carriage.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct MachineConfig {
    /// Coil pins of the left drive stepper, in phase order.
    pub left_stepper_pins: [String; COIL_PINS],
    /// Coil pins of the right drive stepper, in phase order.
    pub right_stepper_pins: [String; COIL_PINS],
    /// Pen-lift actuator pin.
    pub pen_pin: String,
    /// Buzzer pin.
    pub buzzer_pin: String,
    /// Distance one half-step moves the carriage, in gcode units.
    /// Empirical value, tuned per physical robot.
    pub step_length: f64,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            left_stepper_pins: ["P1_29", "P1_31", "P1_33", "P1_35"].map(String::from),
            right_stepper_pins: ["P1_30", "P1_32", "P1_34", "P1_36"].map(String::from),
            pen_pin: "P2_02".to_string(),
            buzzer_pin: "P2_04".to_string(),
            step_length: 1.0,
        }
    }
}

impl MachineConfig {
    /// Load calibration from a TOML file. Unspecified fields fall back to
    /// the built-in defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading machine config {}", path.display()))?;
        let config: MachineConfig = toml::from_str(&text)
            .with_context(|| format!("parsing machine config {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid machine config {}", path.display()))?;
        Ok(config)
    }

    /// Calibration sanity checks. A non-positive step length would make
    /// the step count for any travel meaningless.
    pub fn validate(&self) -> Result<()> {
        if !(self.step_length > 0.0) {
            anyhow::bail!("step_length must be positive, got {}", self.step_length);
        }
        Ok(())
    }
}

use std::fs;

use anyhow::{Context, Result};
use log::info;

use plotbot::config::Config;
use plotbot::hal::LogDriver;
use plotbot::parser::{self, Command};
use plotbot::robot::Robot;
use plotbot::runner::ProgramRunner;

fn main() -> Result<()> {
    let config = Config::from_args_and_env()?;

    env_logger::Builder::new()
        .parse_filters(&config.log_level)
        .init();

    info!("plotbot {}", env!("CARGO_PKG_VERSION"));

    // Parse completely before touching any hardware: a malformed program
    // never executes partially.
    let gcode = fs::read_to_string(&config.program)
        .with_context(|| format!("reading gcode program {}", config.program.display()))?;
    let parsed = parser::parse_program(&gcode)?;

    // Bookend the program: settle and announce the start, announce the end.
    let mut program = vec![
        Command::Dwell { seconds: 1.0 },
        Command::Bell { seconds: 1.0 },
    ];
    program.extend(parsed);
    program.push(Command::Bell { seconds: 1.0 });

    let robot = Robot::new(&config.machine, LogDriver)?;
    let mut runner = ProgramRunner::new(robot);
    runner.run(&program)?;

    Ok(())
}

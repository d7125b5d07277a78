//! Program runner
//!
//! Drives a parsed command sequence against the robot, in order, one
//! command at a time. Any failure is fatal to the whole run: the runner
//! flips to `Failed`, skips the remaining commands and propagates the
//! error. Nothing is retried.

use anyhow::{Context, Result};
use log::{debug, info};

use crate::geometry;
use crate::hal::PinDriver;
use crate::parser::{ArgMap, Command};
use crate::robot::Robot;

/// Lifecycle of one program run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Executing,
    Done,
    Failed,
}

/// Executes commands against the robot it exclusively owns.
pub struct ProgramRunner<D: PinDriver> {
    robot: Robot<D>,
    state: RunState,
}

impl<D: PinDriver> ProgramRunner<D> {
    pub fn new(robot: Robot<D>) -> Self {
        Self {
            robot,
            state: RunState::Idle,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn robot(&self) -> &Robot<D> {
        &self.robot
    }

    /// Execute the whole program in order. `Idle -> Executing`, then
    /// `Done` after the last command or `Failed` at the first error.
    pub fn run(&mut self, program: &[Command]) -> Result<()> {
        self.state = RunState::Executing;
        info!("beginning program execution, {} commands", program.len());

        for (index, command) in program.iter().enumerate() {
            if let Err(err) = self.execute(command) {
                self.state = RunState::Failed;
                return Err(err)
                    .with_context(|| format!("command {} of {}", index + 1, program.len()));
            }
            info!("command {command:?} executed");
        }

        self.state = RunState::Done;
        info!("program execution finished");
        Ok(())
    }

    fn execute(&mut self, command: &Command) -> Result<()> {
        match command {
            Command::Move(args) => self.execute_move(args),
            Command::Dwell { seconds } => self.robot.dwell(*seconds),
            Command::Bell { seconds } => self.robot.bell(*seconds),
            Command::Retract => self.robot.retract(),
            Command::Recover => self.robot.recover(),
            Command::Ignore { code } => {
                debug!("acknowledging {code}, no action");
                Ok(())
            }
        }
    }

    /// Reorient, travel, actuate the pen axis, then snap the state to the
    /// command target. The move is positionally instantaneous even though
    /// stepping takes time.
    fn execute_move(&mut self, args: &ArgMap) -> Result<()> {
        let here = self.robot.state;
        let polar = geometry::resolve(here.x, here.y, here.z, args)?;

        self.robot.reorient(polar.absolute_angle);
        self.robot.travel(polar.distance)?;
        self.robot.pen_move(polar.dz)?;

        if let (Some(x), Some(y)) = (args.get('X'), args.get('Y')) {
            self.robot.state.x = x;
            self.robot.state.y = y;
        } else if let Some(z) = args.get('Z') {
            self.robot.state.z = z;
        }
        Ok(())
    }
}

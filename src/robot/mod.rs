//! Robot façade
//!
//! Owns the positional state, the two drive steppers and the auxiliary
//! actuators (pen lift, buzzer), and exposes the atomic actions that
//! commands compose: reorient, travel, pen moves, dwell, bell.

pub mod stepper;

use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Result};
use log::debug;

use crate::config::MachineConfig;
use crate::hal::{Level, PinDriver};
use stepper::Stepper;

/// Current position and heading. Owned exclusively by the [`Robot`]; only
/// executing a move updates it, and a move snaps X/Y/Z straight to the
/// command target even though stepping is incremental in time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RobotState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Absolute heading in degrees, right-handed, 0 = +X axis.
    pub orientation_deg: f64,
}

/// The physical plotter: two lock-stepped drive motors, a pen-lift
/// actuator and a buzzer, all behind one [`PinDriver`].
pub struct Robot<D: PinDriver> {
    pub state: RobotState,
    left: Stepper,
    right: Stepper,
    pen_pin: String,
    buzzer_pin: String,
    step_length: f64,
    driver: D,
}

impl<D: PinDriver> Robot<D> {
    /// Build the robot from its machine configuration and set every output
    /// pin up de-energized.
    pub fn new(config: &MachineConfig, mut driver: D) -> Result<Self> {
        config.validate()?;

        let left = Stepper::new(config.left_stepper_pins.clone());
        let right = Stepper::new(config.right_stepper_pins.clone());

        left.configure(&mut driver)?;
        right.configure(&mut driver)?;
        driver.configure(&config.pen_pin)?;
        driver.write(&config.pen_pin, Level::Low)?;
        driver.configure(&config.buzzer_pin)?;
        driver.write(&config.buzzer_pin, Level::Low)?;

        Ok(Self {
            state: RobotState::default(),
            left,
            right,
            pen_pin: config.pen_pin.clone(),
            buzzer_pin: config.buzzer_pin.clone(),
            step_length: config.step_length,
            driver,
        })
    }

    /// Set the absolute heading for the next travel.
    ///
    /// Differential steering is not implemented on the drive motors yet, so
    /// this only records the heading.
    pub fn reorient(&mut self, absolute_angle: f64) {
        debug!("reorient to {absolute_angle} deg (tracked, not driven)");
        self.state.orientation_deg = absolute_angle;
    }

    /// Drive both motors forward in lock-step for the given distance.
    ///
    /// The step count is `floor(distance / step_length)`, and the first
    /// step of the count is skipped (a calibration quirk carried over from
    /// the machine this was tuned on). Each iteration steps the left motor
    /// then the right motor; the two must never be advanced independently.
    pub fn travel(&mut self, distance: f64) -> Result<()> {
        let step_count = (distance / self.step_length).floor() as i64;
        debug!("travel {distance} -> {step_count} steps at {}", self.step_length);
        for _ in 1..step_count {
            self.left.step(&mut self.driver)?;
            self.right.step(&mut self.driver)?;
        }
        Ok(())
    }

    /// Move the pen axis: positive lifts the pen, negative lowers it.
    pub fn pen_move(&mut self, dz: f64) -> Result<()> {
        if dz > 0.0 {
            self.retract()
        } else if dz < 0.0 {
            self.recover()
        } else {
            Ok(())
        }
    }

    /// Lift the pen off the paper.
    pub fn retract(&mut self) -> Result<()> {
        self.driver.write(&self.pen_pin, Level::High)
    }

    /// Lower the pen onto the paper.
    pub fn recover(&mut self) -> Result<()> {
        self.driver.write(&self.pen_pin, Level::Low)
    }

    /// Block for the given duration. Negative durations are treated as
    /// zero; durations too large to represent are an error, not a panic.
    pub fn dwell(&self, seconds: f64) -> Result<()> {
        let duration = Duration::try_from_secs_f64(seconds.max(0.0))
            .map_err(|_| anyhow!("dwell duration {seconds} seconds is out of range"))?;
        thread::sleep(duration);
        Ok(())
    }

    /// Sound the buzzer for the given duration.
    pub fn bell(&mut self, seconds: f64) -> Result<()> {
        self.driver.write(&self.buzzer_pin, Level::High)?;
        self.dwell(seconds)?;
        self.driver.write(&self.buzzer_pin, Level::Low)
    }

    /// Phase indices of the two drive motors, left then right.
    pub fn motor_phases(&self) -> (usize, usize) {
        (self.left.phase(), self.right.phase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::LogDriver;

    fn test_robot() -> Robot<LogDriver> {
        Robot::new(&MachineConfig::default(), LogDriver).expect("robot")
    }

    #[test]
    fn travel_exactly_one_step_length_issues_no_steps() {
        // floor(1.0 / 1.0) = 1, and the first step is skipped.
        let mut robot = test_robot();
        robot.travel(1.0).expect("travel");
        assert_eq!(robot.motor_phases(), (0, 0));
    }

    #[test]
    fn travel_just_under_two_step_lengths_issues_no_steps() {
        let mut robot = test_robot();
        robot.travel(2.0 - 1e-9).expect("travel");
        assert_eq!(robot.motor_phases(), (0, 0));
    }

    #[test]
    fn travel_two_step_lengths_issues_one_lockstep_pair() {
        let mut robot = test_robot();
        robot.travel(2.0).expect("travel");
        assert_eq!(robot.motor_phases(), (1, 1));
    }

    #[test]
    fn travel_shorter_than_step_length_issues_no_steps() {
        let mut robot = test_robot();
        robot.travel(0.25).expect("travel");
        assert_eq!(robot.motor_phases(), (0, 0));
    }

    #[test]
    fn motors_stay_in_lockstep_over_long_travel() {
        let mut robot = test_robot();
        robot.travel(20.0).expect("travel");
        let (left, right) = robot.motor_phases();
        assert_eq!(left, right);
        // 19 steps, one full wrap plus three.
        assert_eq!(left, 3);
    }

    #[test]
    fn dwell_clamps_negative_duration_to_zero() {
        let robot = test_robot();
        robot.dwell(-5.0).expect("dwell");
    }

    #[test]
    fn dwell_rejects_unrepresentable_duration() {
        let robot = test_robot();
        let err = robot.dwell(1e30).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn zero_step_length_is_rejected_at_construction() {
        let mut config = MachineConfig::default();
        config.step_length = 0.0;
        assert!(Robot::new(&config, LogDriver).is_err());
    }

    #[test]
    fn reorient_records_heading() {
        let mut robot = test_robot();
        robot.reorient(-45.0);
        assert_eq!(robot.state.orientation_deg, -45.0);
    }
}

//! Tests for machine calibration loading.

use std::io::Write;

use plotbot::config::MachineConfig;
use tempfile::NamedTempFile;

#[test]
fn load_full_machine_file() {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"
left_stepper_pins = ["P1_29", "P1_31", "P1_33", "P1_35"]
right_stepper_pins = ["P1_30", "P1_32", "P1_34", "P1_36"]
pen_pin = "P2_06"
buzzer_pin = "P2_08"
step_length = 0.125
"#
    )
    .expect("write");

    let machine = MachineConfig::load(file.path()).expect("machine config");
    assert_eq!(machine.pen_pin, "P2_06");
    assert_eq!(machine.buzzer_pin, "P2_08");
    assert_eq!(machine.step_length, 0.125);
}

#[test]
fn partial_machine_file_keeps_default_pinout() {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(file, "step_length = 0.5\n").expect("write");

    let machine = MachineConfig::load(file.path()).expect("machine config");
    assert_eq!(machine.step_length, 0.5);
    assert_eq!(
        machine.left_stepper_pins,
        MachineConfig::default().left_stepper_pins
    );
}

#[test]
fn missing_machine_file_names_the_path() {
    let err = MachineConfig::load(std::path::Path::new("/nonexistent/machine.toml")).unwrap_err();
    assert!(format!("{err:#}").contains("/nonexistent/machine.toml"));
}

#[test]
fn zero_step_length_is_rejected() {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(file, "step_length = 0.0\n").expect("write");

    let err = MachineConfig::load(file.path()).unwrap_err();
    assert!(format!("{err:#}").contains("step_length must be positive"));
}

#[test]
fn malformed_machine_file_is_an_error() {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(file, "step_length = \"fast\"\n").expect("write");

    assert!(MachineConfig::load(file.path()).is_err());
}

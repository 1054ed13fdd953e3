//! Integration Tests für den Roboter-Kontext
//!
//! Registrierung, ID-Auflösung, IR-Scan und Aktoren mit Mock-Hardware

mod support;

use knw_core::{
    DecoderConfig, DeviceCategory, DriveError, MISSING_BYTE, PwmError, RegisterError, Robot,
    ScanError,
};
use support::{IrSignal, MockAdc, MockPwm, ScriptedLine, SimClock};

const IR_ID: i32 = 3;
const IR_PIN: u8 = 22;

fn robot_with_signal(signal: IrSignal) -> Robot<ScriptedLine, SimClock> {
    let clock = SimClock::default();
    let line = ScriptedLine::new(clock.clone(), IR_PIN, signal);
    let config = DecoderConfig {
        poll_budget: line.reads_needed(),
    };
    Robot::with_decoder_config(line, clock, config)
}

fn idle_robot() -> Robot<ScriptedLine, SimClock> {
    robot_with_signal(IrSignal::new())
}

// ============================================================================
// Tests: Registrierung
// ============================================================================

#[test]
fn test_board_lines_are_reserved() {
    let mut robot = idle_robot();

    assert_eq!(robot.setup_bump(1, 0), Err(RegisterError::LineUnavailable));
    assert_eq!(robot.setup_ping(1, 41), Err(RegisterError::LineUnavailable));
    assert_eq!(robot.setup_incline(2), Err(RegisterError::LineUnavailable));
    assert_eq!(robot.setup_ping(1, 23), Ok(()));
    assert_eq!(robot.setup_incline(4), Ok(()));
}

#[test]
fn test_single_analog_sensors() {
    let mut robot = idle_robot();

    robot.setup_temp(5).unwrap();
    assert_eq!(robot.setup_temp(6), Err(RegisterError::CapacityExceeded));
    assert_eq!(robot.physical_line_for(0, DeviceCategory::Temperature), Some(5));
}

#[test]
fn test_physical_line_for() {
    let mut robot = idle_robot();
    robot.setup_ping(5, 8).unwrap();
    robot.setup_servo(5, 2).unwrap();

    assert_eq!(robot.physical_line_for(5, DeviceCategory::Ping), Some(8));
    assert_eq!(robot.physical_line_for(5, DeviceCategory::Servo), Some(2));
    assert_eq!(robot.physical_line_for(99, DeviceCategory::Ping), None);
}

#[test]
fn test_fifth_motor_rejected() {
    let mut robot = idle_robot();
    for id in 0..4 {
        robot.setup_motor(id, id as u8).unwrap();
    }
    assert_eq!(robot.setup_motor(4, 4), Err(RegisterError::CapacityExceeded));
}

// ============================================================================
// Tests: Sensoren
// ============================================================================

#[test]
fn test_check_bump_reads_resolved_line() {
    // IR_PIN liegt die ersten 5 ms auf LOW, alle anderen Pins auf HIGH
    let mut robot = robot_with_signal(IrSignal::new().carrier(5_000));
    robot.setup_bump(1, IR_PIN).unwrap();
    robot.setup_bump(2, 23).unwrap();

    assert_eq!(robot.check_bump(1), Some(false));
    assert_eq!(robot.check_bump(2), Some(true));
}

#[test]
fn test_check_bump_unknown_id() {
    let mut robot = idle_robot();
    robot.setup_ping(1, 23).unwrap();

    // Ping-ID ist kein Bump-Sensor
    assert_eq!(robot.check_bump(1), None);
    assert_eq!(robot.board().reads, 0);
}

#[test]
fn test_incline_and_temp_read_their_lines() {
    let mut robot = idle_robot();
    robot.setup_incline(4).unwrap();
    robot.setup_temp(5).unwrap();
    let mut adc = MockAdc::default().with_value(4, 612).with_value(5, 300);

    assert_eq!(robot.incline(&mut adc), Some(612));
    assert_eq!(robot.temp(&mut adc), Some(300));
    assert_eq!(adc.reads, vec![4, 5]);
}

#[test]
fn test_analog_sensors_without_setup() {
    let robot = idle_robot();
    let mut adc = MockAdc::default().with_value(4, 612);

    assert_eq!(robot.incline(&mut adc), None);
    assert_eq!(robot.temp(&mut adc), None);
    assert!(adc.reads.is_empty());
}

// ============================================================================
// Tests: IR-Scan
// ============================================================================

#[test]
fn test_scan_ir_decodes_registered_receiver() {
    let mut robot = robot_with_signal(IrSignal::new().frames(b"Hi"));
    robot.setup_ir(IR_ID, IR_PIN).unwrap();

    assert_eq!(robot.scan_ir(IR_ID), Ok(2));
    assert_eq!(robot.ir_decoded(), b"Hi");
    assert_eq!(robot.ir_byte_at(0), b'H');
    assert_eq!(robot.ir_byte_at(1), b'i');
    assert_eq!(robot.ir_byte_at(2), MISSING_BYTE);
}

#[test]
fn test_scan_ir_unknown_id_does_not_poll() {
    let mut robot = idle_robot();

    assert_eq!(robot.scan_ir(99), Err(ScanError::UnknownId(99)));
    assert_eq!(robot.board().reads, 0);
}

#[test]
fn test_scan_ir_unknown_id_keeps_last_result() {
    let mut robot = robot_with_signal(IrSignal::new().frame(b'K'));
    robot.setup_ir(IR_ID, IR_PIN).unwrap();
    assert_eq!(robot.scan_ir(IR_ID), Ok(1));

    assert!(robot.scan_ir(IR_ID + 1).is_err());
    assert_eq!(robot.ir_byte_at(0), b'K');
    assert_eq!(robot.ir_buffer()[0], b'K');
}

#[test]
fn test_scan_ir_reads_resolved_line() {
    // Signal liegt auf IR_PIN, Empfänger ist an einem anderen Pin registriert
    let mut robot = robot_with_signal(IrSignal::new().frame(b'K'));
    robot.setup_ir(IR_ID, IR_PIN + 2).unwrap();

    assert_eq!(robot.scan_ir(IR_ID), Ok(0));
    assert!(robot.ir_decoded().is_empty());
}

#[test]
fn test_buffer_empty_before_first_scan() {
    let robot = idle_robot();
    assert_eq!(robot.ir_buffer(), &[0; 8]);
    assert_eq!(robot.ir_byte_at(0), MISSING_BYTE);
}

// ============================================================================
// Tests: Aktoren
// ============================================================================

#[test]
fn test_dc_motor_writes_mapped_pulse() {
    let mut robot = idle_robot();
    robot.setup_motor(1, 4).unwrap();
    let mut pwm = MockPwm::new();

    robot.actuators(&mut pwm).dc_motor(1, 1023).unwrap();
    robot.actuators(&mut pwm).dc_motor(1, 0).unwrap();

    assert_eq!(pwm.writes, vec![(4, 0, 520), (4, 0, 337)]);
}

#[test]
fn test_servos() {
    let mut robot = idle_robot();
    robot.setup_servo(1, 0).unwrap();
    robot.setup_servo(2, 1).unwrap();
    let mut pwm = MockPwm::new();

    let mut actuators = robot.actuators(&mut pwm);
    actuators.servo_180(1, 120).unwrap();
    actuators.continuous_servo(2, 90).unwrap();
    actuators.stop(DeviceCategory::Servo, 2).unwrap();

    assert_eq!(pwm.writes, vec![(0, 0, 400), (1, 0, 299), (1, 0, 0)]);
}

#[test]
fn test_motor_id_is_not_a_servo_id() {
    let mut robot = idle_robot();
    robot.setup_motor(1, 4).unwrap();
    let mut pwm = MockPwm::new();

    let result = robot.actuators(&mut pwm).servo_180(1, 120);

    assert_eq!(result, Err(DriveError::UnknownId(1)));
    assert!(pwm.writes.is_empty());
}

#[test]
fn test_dc_motors_resolve_both_before_writing() {
    let mut robot = idle_robot();
    robot.setup_motor(1, 4).unwrap();
    let mut pwm = MockPwm::new();

    let result = robot.actuators(&mut pwm).dc_motors((1, 500), (2, 500));

    assert_eq!(result, Err(DriveError::UnknownId(2)));
    assert!(pwm.writes.is_empty());
}

#[test]
fn test_stop_all_clears_every_channel() {
    let robot = idle_robot();
    let mut pwm = MockPwm::new();

    robot.actuators(&mut pwm).stop_all().unwrap();

    assert_eq!(pwm.writes.len(), 16);
    assert!(pwm.writes.iter().all(|(_, on, off)| *on == 0 && *off == 0));
}

#[test]
fn test_pwm_failure_is_reported() {
    let mut robot = idle_robot();
    robot.setup_motor(1, 4).unwrap();
    let mut pwm = MockPwm::new();
    pwm.fail_next_write = true;

    let result = robot.actuators(&mut pwm).dc_motor(1, 100);

    assert_eq!(result, Err(DriveError::Pwm(PwmError::WriteFailed)));
    assert!(pwm.writes.is_empty());
}

#[test]
fn test_raw_rejects_sensor_category() {
    let mut robot = idle_robot();
    robot.setup_ping(1, 30).unwrap();
    let mut pwm = MockPwm::new();

    let result = robot.actuators(&mut pwm).raw(DeviceCategory::Ping, 1, 500);

    assert_eq!(result, Err(DriveError::NotPwmCategory(DeviceCategory::Ping)));
    assert!(pwm.writes.is_empty());
}

#[test]
fn test_stop_rejects_sensor_category() {
    let mut robot = idle_robot();
    robot.setup_temp(5).unwrap();
    let mut pwm = MockPwm::new();

    let result = robot.actuators(&mut pwm).stop(DeviceCategory::Temperature, 0);

    assert_eq!(
        result,
        Err(DriveError::NotPwmCategory(DeviceCategory::Temperature))
    );
    assert!(pwm.writes.is_empty());
}

#[test]
fn test_raw_rejects_pulse_beyond_12_bit() {
    let mut robot = idle_robot();
    robot.setup_servo(1, 3).unwrap();
    let mut pwm = MockPwm::new();

    let mut actuators = robot.actuators(&mut pwm);
    assert_eq!(
        actuators.raw(DeviceCategory::Servo, 1, 5000),
        Err(DriveError::PulseOutOfRange(5000))
    );
    assert_eq!(actuators.raw(DeviceCategory::Servo, 1, 4095), Ok(()));

    assert_eq!(pwm.writes, vec![(3, 0, 4095)]);
}

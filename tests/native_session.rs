#![cfg(feature = "impl-native")]

use embedded_hal::i2c::ErrorKind;
use embedded_hal_mock::eh1::{
    delay::NoopDelay,
    i2c::{Mock as I2cMock, Transaction as I2cTransaction},
};
use sht4x::common::crc::DataWord;
use sht4x::common::hal_traits::{NativeBus, NativeDelay};
use sht4x::common::{ChecksumMismatch, ConfigurationError};
use sht4x::{
    Aggregation, ReadingPlan, Readings, SessionConfig, SessionState, Sht4xAddr, Sht4xError,
    Sht4xSession, TemperatureUnit,
};
use std::time::Duration;

const ADDR: u8 = 0x44;

type Session = Sht4xSession<NativeBus<I2cMock>, NativeDelay<NoopDelay>>;

const CRC_ALGO: crc::Crc<u8> = crc::Crc::<u8>::new(&crc::CRC_8_NRSC_5);

// Helper macro to generate a data word followed by its CRC
macro_rules! bytes_with_crc {
    ($msb:expr, $lsb:expr) => {{
        let data = [$msb, $lsb];
        let crc = CRC_ALGO.checksum(&data);
        vec![$msb, $lsb, crc]
    }};
}

fn response(t: (u8, u8), rh: (u8, u8)) -> Vec<u8> {
    let mut bytes = bytes_with_crc!(t.0, t.1);
    bytes.extend(bytes_with_crc!(rh.0, rh.1));
    bytes
}

fn serial_transactions(addr: u8) -> Vec<I2cTransaction> {
    vec![
        I2cTransaction::write(addr, vec![0x89]),
        I2cTransaction::read(addr, vec![0x12, 0x34, 0x00, 0x56, 0x78, 0x00]),
    ]
}

fn measure_transactions(cmd: u8, data: Vec<u8>) -> Vec<I2cTransaction> {
    vec![I2cTransaction::write(ADDR, vec![cmd]), I2cTransaction::read(ADDR, data)]
}

fn session(expectations: &[I2cTransaction], config: SessionConfig) -> Session {
    let i2c = I2cMock::new(expectations);
    Sht4xSession::new(NativeBus(i2c), NativeDelay(NoopDelay::new()), config).unwrap()
}

fn finish(session: Session) {
    let (bus, _) = session.release();
    bus.into_inner().done();
}

#[test]
fn test_serial_number_on_construction() {
    let session = session(&serial_transactions(ADDR), SessionConfig::default());

    assert_eq!(session.state(), SessionState::Ready);
    // 0x12 + 0x34 = 0x46, 0x56 + 0x78 = 0xce
    assert_eq!(session.serial_number().unwrap().to_string(), "0x46ce");
    finish(session);
}

#[test]
fn test_construction_fails_on_nack() {
    let expectations = [I2cTransaction::write(ADDR, vec![0x89]).with_error(ErrorKind::Other)];
    let i2c = I2cMock::new(&expectations);
    let result = Sht4xSession::new(
        NativeBus(i2c.clone()),
        NativeDelay(NoopDelay::new()),
        SessionConfig::default(),
    );

    assert!(matches!(result, Err(Sht4xError::Transport(ErrorKind::Other))));
    let mut i2c = i2c;
    i2c.done();
}

#[test]
fn test_high_precision_measurement() {
    let mut expectations = serial_transactions(ADDR);
    expectations.extend(measure_transactions(0xFD, response((0x66, 0x66), (0x80, 0x00))));
    let mut session = session(&expectations, SessionConfig::default());

    let m = session.read_measurement().unwrap();
    assert!((m.temperature.value - 25.0).abs() < 0.01);
    assert!((m.humidity - 56.5).abs() < 0.01);
    finish(session);
}

#[test]
fn test_kelvin_heater_mode() {
    let mut expectations = serial_transactions(ADDR);
    expectations.extend(measure_transactions(0x2F, response((0x66, 0x66), (0x00, 0x00))));
    let config = SessionConfig {
        mode: 6,
        unit: TemperatureUnit::Kelvin,
        ..SessionConfig::default()
    };
    let mut session = session(&expectations, config);

    assert_eq!(session.mode().settling_delay(), Duration::from_millis(1050));
    let m = session.read_measurement().unwrap();
    assert!((m.temperature.value - 298.15).abs() < 0.01);
    assert_eq!(m.humidity, 0.0);
    finish(session);
}

#[test]
fn test_corrupted_temperature_word() {
    let mut data = response((0x66, 0x66), (0x80, 0x00));
    data[1] ^= 0x04;
    let mut expectations = serial_transactions(ADDR);
    expectations.extend(measure_transactions(0xFD, data.clone()));
    let mut session = session(&expectations, SessionConfig::default());

    match session.read_measurement() {
        Err(Sht4xError::ChecksumMismatch(ChecksumMismatch { word, expected, .. })) => {
            assert_eq!(word, DataWord::Temperature);
            assert_eq!(expected, data[2]);
        }
        other => panic!("expected checksum mismatch, got {:?}", other),
    }
    assert_eq!(session.last_raw().unwrap().as_bytes()[..], data[..]);
    finish(session);
}

#[test]
fn test_soft_reset_then_measure() {
    let mut expectations = serial_transactions(ADDR);
    expectations.push(I2cTransaction::write(ADDR, vec![0x94]));
    expectations.extend(measure_transactions(0xFD, response((0x66, 0x66), (0x80, 0x00))));
    let mut session = session(&expectations, SessionConfig::default());

    session.soft_reset().unwrap();
    assert!(session.read_measurement().is_ok());
    finish(session);
}

#[test]
fn test_select_mode_changes_command() {
    let mut expectations = serial_transactions(ADDR);
    expectations.extend(measure_transactions(0xE0, response((0x66, 0x66), (0x80, 0x00))));
    let mut session = session(&expectations, SessionConfig::default());

    session.select_mode(3).unwrap();
    session.read_measurement().unwrap();
    finish(session);
}

#[test]
fn test_alternate_address() {
    let config = SessionConfig {
        address: Sht4xAddr::ALTERNATE_ADDRESS,
        ..SessionConfig::default()
    };
    let session = session(&serial_transactions(0x45), config);
    assert_eq!(session.address().as_u8(), 0x45);
    finish(session);
}

#[test]
fn test_take_readings_average() {
    let mut expectations = serial_transactions(ADDR);
    expectations.extend(measure_transactions(0xFD, response((0x66, 0x66), (0x80, 0x00))));
    expectations.extend(measure_transactions(0xFD, response((0x68, 0x00), (0x82, 0x00))));
    expectations.extend(measure_transactions(0xFD, response((0x64, 0xCC), (0x7E, 0x00))));
    let mut session = session(&expectations, SessionConfig::default());

    let plan = ReadingPlan {
        count: 3,
        interval: Duration::from_millis(10),
        aggregation: Aggregation::Average,
    };
    let readings: Readings<8> = session.take_readings(&plan).unwrap();
    assert_eq!(readings.len(), 3);

    let avg = readings.average().unwrap();
    let expected_t: f32 = readings.iter().map(|m| m.temperature.value).sum::<f32>() / 3.0;
    assert!((avg.temperature.value - expected_t).abs() < 1e-4);
    assert_eq!(avg.temperature.unit, TemperatureUnit::Celsius);
    assert_eq!(avg.count, 3);
    finish(session);
}

#[test]
fn test_take_readings_stops_on_first_error() {
    let mut bad = response((0x66, 0x66), (0x80, 0x00));
    bad[5] = bad[5].wrapping_add(1);
    let mut expectations = serial_transactions(ADDR);
    expectations.extend(measure_transactions(0xFD, response((0x66, 0x66), (0x80, 0x00))));
    expectations.extend(measure_transactions(0xFD, bad));
    let mut session = session(&expectations, SessionConfig::default());

    let plan = ReadingPlan { count: 2, ..ReadingPlan::default() };
    let result = session.take_readings::<4>(&plan);
    assert!(matches!(result, Err(Sht4xError::ChecksumMismatch(_))));
    finish(session);
}

#[test]
fn test_take_readings_rejects_bad_count() {
    let mut session = session(&serial_transactions(ADDR), SessionConfig::default());

    let plan = ReadingPlan { count: 0, ..ReadingPlan::default() };
    assert!(matches!(
        session.take_readings::<4>(&plan),
        Err(Sht4xError::InvalidConfiguration(ConfigurationError::ReadingCount {
            requested: 0,
            capacity: 4
        }))
    ));

    let plan = ReadingPlan { count: 5, ..ReadingPlan::default() };
    assert!(matches!(
        session.take_readings::<4>(&plan),
        Err(Sht4xError::InvalidConfiguration(ConfigurationError::ReadingCount {
            requested: 5,
            capacity: 4
        }))
    ));
    finish(session);
}

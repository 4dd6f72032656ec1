// src/common/command.rs

use super::mode::OperatingMode;

/// Command byte requesting the 6-byte serial number response.
pub const READ_SERIAL_NUMBER: u8 = 0x89;
/// Command byte triggering a soft reset. The sensor does not answer.
pub const SOFT_RESET: u8 = 0x94;

/// Length of every SHT4x response that carries data: two words, each
/// followed by its CRC byte.
pub const RESPONSE_LEN: usize = 6;

/// A single-byte instruction sent to the sensor.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Command {
    /// Read the serial number.
    SerialNumber,
    /// Soft reset.
    SoftReset,
    /// Start a measurement (optionally preceded by a heater pulse).
    Measure(OperatingMode),
}

impl Command {
    /// The byte written to the bus.
    pub fn as_byte(&self) -> u8 {
        match self {
            Command::SerialNumber => READ_SERIAL_NUMBER,
            Command::SoftReset => SOFT_RESET,
            Command::Measure(mode) => mode.command(),
        }
    }

    /// Number of bytes the sensor answers with, or 0 for write-only commands.
    pub fn response_len(&self) -> usize {
        match self {
            Command::SerialNumber => RESPONSE_LEN,
            Command::SoftReset => 0,
            Command::Measure(mode) => mode.response_len(),
        }
    }
}

// src/common/response.rs

use super::command::RESPONSE_LEN;
use super::crc::{self, ChecksumMismatch, DataWord};
use super::error::Sht4xError;
use super::types::{ticks_to_humidity, ticks_to_temperature, TemperatureUnit};
use arrayvec::ArrayString;
use core::fmt::{self, Debug, Write};

/// The six bytes of one data response:
/// `[word0 msb, word0 lsb, crc0, word1 msb, word1 lsb, crc1]`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RawReading([u8; RESPONSE_LEN]);

impl RawReading {
    pub const fn new(bytes: [u8; RESPONSE_LEN]) -> Self {
        RawReading(bytes)
    }

    /// Wraps a received buffer, rejecting anything that is not exactly 6 bytes.
    pub fn from_slice<E: Debug>(bytes: &[u8]) -> Result<Self, Sht4xError<E>> {
        let array: [u8; RESPONSE_LEN] = bytes.try_into().map_err(|_| Sht4xError::ResponseLength {
            expected: RESPONSE_LEN,
            got: bytes.len(),
        })?;
        Ok(RawReading(array))
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; RESPONSE_LEN] {
        &self.0
    }

    /// First data word (temperature ticks for measurements).
    #[inline]
    pub fn first_word(&self) -> u16 {
        u16::from_be_bytes([self.0[0], self.0[1]])
    }

    /// Second data word (humidity ticks for measurements).
    #[inline]
    pub fn second_word(&self) -> u16 {
        u16::from_be_bytes([self.0[3], self.0[4]])
    }

    #[inline]
    pub fn t_ticks(&self) -> u16 {
        self.first_word()
    }

    #[inline]
    pub fn rh_ticks(&self) -> u16 {
        self.second_word()
    }

    /// Validates both words against their trailing checksum bytes.
    /// The temperature word is checked first.
    pub fn verify(&self) -> Result<(), ChecksumMismatch> {
        let b = &self.0;
        crc::validate(DataWord::Temperature, [b[0], b[1]], b[2])?;
        crc::validate(DataWord::Humidity, [b[3], b[4]], b[5])
    }

    /// Validates the checksums, then converts to physical units.
    pub fn to_measurement(&self, unit: TemperatureUnit) -> Result<Measurement, ChecksumMismatch> {
        self.verify()?;
        Ok(Measurement {
            temperature: Temperature {
                value: ticks_to_temperature(self.t_ticks(), unit),
                unit,
            },
            humidity: ticks_to_humidity(self.rh_ticks()),
        })
    }
}

/// A temperature tagged with its unit.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Temperature {
    pub value: f32,
    pub unit: TemperatureUnit,
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "{:.*}{}", p, self.value, self.unit.symbol()),
            None => write!(f, "{}{}", self.value, self.unit.symbol()),
        }
    }
}

/// One validated reading.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Measurement {
    pub temperature: Temperature,
    /// Relative humidity in percent, always within `0.0..=100.0`.
    pub humidity: f32,
}

/// Serial number as decoded from the `0x89` response.
///
/// Each half is the integer sum of the two bytes of a data word, not the
/// 16-bit word itself. Rendered as `0x` followed by both sums in lowercase hex
/// with no padding, so `[1, 2, _, 4, 5, _]` becomes `0x39`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SerialNumber {
    pub high: u16,
    pub low: u16,
}

/// Longest rendering: "0x" plus two sums of at most 0x1fe each.
const SERIAL_STR_LEN: usize = 8;

impl SerialNumber {
    pub fn from_raw(raw: &RawReading) -> Self {
        let b = raw.as_bytes();
        SerialNumber {
            high: u16::from(b[0]) + u16::from(b[1]),
            low: u16::from(b[3]) + u16::from(b[4]),
        }
    }

    /// The serial number as a fixed-capacity string.
    pub fn to_hex(&self) -> ArrayString<SERIAL_STR_LEN> {
        let mut s = ArrayString::new();
        // Cannot overflow: both sums are below 0x200.
        let _ = write!(s, "{}", self);
        s
    }
}

impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}{:x}", self.high, self.low)
    }
}

// src/config.rs

//! Caller-supplied settings for a session and for a series of readings.

use crate::common::{timing, ConfigurationError, Sht4xAddr, TemperatureUnit};
use core::fmt;
use core::str::FromStr;
use core::time::Duration;

/// Number of the I2C adapter the sensor hangs off (`/dev/i2c-<n>` on Linux).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct BusNumber(pub u32);

impl Default for BusNumber {
    fn default() -> Self {
        BusNumber(1)
    }
}

impl FromStr for BusNumber {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(BusNumber)
            .map_err(|_| ConfigurationError::InvalidBusNumber)
    }
}

impl fmt::Display for BusNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Converts a delay given in (fractional) seconds.
///
/// Rejects NaN, negative values and anything above [`timing::MAX_BUS_DELAY`].
pub fn delay_from_secs(secs: f32) -> Result<Duration, ConfigurationError> {
    if !(0.0..=timing::MAX_BUS_DELAY.as_secs_f32()).contains(&secs) {
        return Err(ConfigurationError::InvalidBusDelay);
    }
    Duration::try_from_secs_f32(secs).map_err(|_| ConfigurationError::InvalidBusDelay)
}

/// Converts the pause between readings given in (fractional) seconds.
///
/// Unlike [`delay_from_secs`] there is no upper bound; only NaN, infinite and
/// negative values are rejected.
pub fn interval_from_secs(secs: f32) -> Result<Duration, ConfigurationError> {
    if !secs.is_finite() || secs < 0.0 {
        return Err(ConfigurationError::InvalidReadingDelay);
    }
    Duration::try_from_secs_f32(secs).map_err(|_| ConfigurationError::InvalidReadingDelay)
}

/// Everything a session needs to talk to one sensor.
///
/// `mode` is kept as the raw id and resolved when the session is built, so an
/// out-of-range value surfaces as [`Sht4xError::InvalidMode`](crate::Sht4xError::InvalidMode).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SessionConfig {
    pub bus: BusNumber,
    pub address: Sht4xAddr,
    pub mode: u8,
    pub unit: TemperatureUnit,
    pub bus_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            bus: BusNumber::default(),
            address: Sht4xAddr::DEFAULT_ADDRESS,
            mode: 1,
            unit: TemperatureUnit::Celsius,
            bus_delay: timing::DEFAULT_BUS_DELAY,
        }
    }
}

/// How a series of readings is reported.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Aggregation {
    /// Mean temperature and humidity.
    #[default]
    Average,
    /// Every reading.
    List,
}

impl FromStr for Aggregation {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "average" => Ok(Aggregation::Average),
            "list" => Ok(Aggregation::List),
            _ => Err(ConfigurationError::InvalidAggregation),
        }
    }
}

/// A series of measurements taken back to back.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ReadingPlan {
    pub count: usize,
    /// Wait between two consecutive readings (not after the last one).
    pub interval: Duration,
    pub aggregation: Aggregation,
}

impl Default for ReadingPlan {
    fn default() -> Self {
        ReadingPlan {
            count: 1,
            interval: Duration::from_secs(1),
            aggregation: Aggregation::Average,
        }
    }
}

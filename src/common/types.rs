// src/common/types.rs

use super::error::{ConfigurationError, Sht4xError};
use core::fmt;
use core::str::FromStr;

/// Full scale of a 16-bit tick value, the divisor in every conversion formula.
const TICKS_FULL_SCALE: f32 = 65535.0;

/// Offset between Celsius and Kelvin.
const KELVIN_OFFSET: f32 = 273.15;

// --- Temperature unit ---

/// Unit a temperature is reported in.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureUnit {
    /// Single-letter code (`C`, `F` or `K`).
    pub const fn code(&self) -> char {
        match self {
            TemperatureUnit::Celsius => 'C',
            TemperatureUnit::Fahrenheit => 'F',
            TemperatureUnit::Kelvin => 'K',
        }
    }

    /// Suffix used when printing a value, e.g. `°C` or `K`.
    pub const fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
            TemperatureUnit::Kelvin => "K",
        }
    }
}

impl TryFrom<char> for TemperatureUnit {
    type Error = Sht4xError<()>;

    /// Case-insensitive, like the command line accepts it.
    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value.to_ascii_uppercase() {
            'C' => Ok(TemperatureUnit::Celsius),
            'F' => Ok(TemperatureUnit::Fahrenheit),
            'K' => Ok(TemperatureUnit::Kelvin),
            _ => Err(Sht4xError::InvalidUnit(value)),
        }
    }
}

/// Expects a single letter. Blank input has no character to report and fails
/// with [`ConfigurationError::MissingUnit`].
impl FromStr for TemperatureUnit {
    type Err = Sht4xError<()>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => TemperatureUnit::try_from(c),
            (Some(c), Some(_)) => Err(Sht4xError::InvalidUnit(c)),
            (None, _) => Err(ConfigurationError::MissingUnit.into()),
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// --- Conversions (datasheet section 4.6) ---

/// Converts raw temperature ticks into `unit`.
///
/// The result is not clamped; ticks near either end of the range map to
/// values outside the sensor's specified operating range.
pub fn ticks_to_temperature(t_ticks: u16, unit: TemperatureUnit) -> f32 {
    let ticks = f32::from(t_ticks);
    match unit {
        TemperatureUnit::Celsius => -45.0 + 175.0 * ticks / TICKS_FULL_SCALE,
        TemperatureUnit::Kelvin => -45.0 + 175.0 * ticks / TICKS_FULL_SCALE + KELVIN_OFFSET,
        TemperatureUnit::Fahrenheit => -49.0 + 315.0 * ticks / TICKS_FULL_SCALE,
    }
}

/// Converts raw humidity ticks into %RH, clamped to `0.0..=100.0`.
pub fn ticks_to_humidity(rh_ticks: u16) -> f32 {
    let rh = -6.0 + 125.0 * f32::from(rh_ticks) / TICKS_FULL_SCALE;
    rh.clamp(0.0, 100.0)
}

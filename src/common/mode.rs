// src/common/mode.rs

//! The nine SHT4x operating modes.
//!
//! The table is fixed at compile time. Resolving a mode is a pure lookup that
//! combines a table entry with the session's base bus delay; nothing here is
//! ever mutated.

use super::command::RESPONSE_LEN;
use super::error::{ConfigurationError, Sht4xError};
use super::timing;
use core::fmt::Debug;
use core::time::Duration;

/// Heater activation preceding the measurement.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Heater {
    /// No heater; plain measurement.
    Off,
    /// Heater on for 0.1 s at the given power (mW).
    Short { milliwatts: u16 },
    /// Heater on for 1 s at the given power (mW).
    Long { milliwatts: u16 },
}

impl Heater {
    /// Time the heater is active before the measurement completes.
    pub const fn duration(&self) -> Duration {
        match self {
            Heater::Off => Duration::ZERO,
            Heater::Short { .. } => timing::SHORT_HEATER_PULSE,
            Heater::Long { .. } => timing::LONG_HEATER_PULSE,
        }
    }
}

/// One row of the mode table.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ModeEntry {
    pub id: u8,
    pub command: u8,
    pub heater: Heater,
    pub description: &'static str,
}

pub const MIN_MODE: u8 = 1;
pub const MAX_MODE: u8 = 9;

/// Command bytes per the datasheet instruction set (Table 9).
pub static MODE_TABLE: [ModeEntry; 9] = [
    ModeEntry {
        id: 1,
        command: 0xFD,
        heater: Heater::Off,
        description: "Measure T and RH with high precision (high repeatability)",
    },
    ModeEntry {
        id: 2,
        command: 0xF6,
        heater: Heater::Off,
        description: "Measure T and RH with medium precision (medium repeatability)",
    },
    ModeEntry {
        id: 3,
        command: 0xE0,
        heater: Heater::Off,
        description: "Measure T and RH with lowest precision (low repeatability)",
    },
    ModeEntry {
        id: 4,
        command: 0x39,
        heater: Heater::Long { milliwatts: 200 },
        description: "Activate heater with 200mW for 1s, including a high precision measurement just before deactivation",
    },
    ModeEntry {
        id: 5,
        command: 0x32,
        heater: Heater::Short { milliwatts: 200 },
        description: "Activate heater with 200mW for 0.1s, including a high precision measurement just before deactivation",
    },
    ModeEntry {
        id: 6,
        command: 0x2F,
        heater: Heater::Long { milliwatts: 110 },
        description: "Activate heater with 110mW for 1s, including a high precision measurement just before deactivation",
    },
    ModeEntry {
        id: 7,
        command: 0x24,
        heater: Heater::Short { milliwatts: 110 },
        description: "Activate heater with 110mW for 0.1s, including a high precision measurement just before deactivation",
    },
    ModeEntry {
        id: 8,
        command: 0x1E,
        heater: Heater::Long { milliwatts: 20 },
        description: "Activate heater with 20mW for 1s, including a high precision measurement just before deactivation",
    },
    ModeEntry {
        id: 9,
        command: 0x15,
        heater: Heater::Short { milliwatts: 20 },
        description: "Activate heater with 20mW for 0.1s, including a high precision measurement just before deactivation",
    },
];

/// A mode resolved against a base bus delay.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OperatingMode {
    entry: &'static ModeEntry,
    settling_delay: Duration,
}

impl OperatingMode {
    #[inline]
    pub fn id(&self) -> u8 {
        self.entry.id
    }

    #[inline]
    pub fn command(&self) -> u8 {
        self.entry.command
    }

    #[inline]
    pub fn response_len(&self) -> usize {
        RESPONSE_LEN
    }

    /// Wait applied both before the command and between command and read.
    #[inline]
    pub fn settling_delay(&self) -> Duration {
        self.settling_delay
    }

    #[inline]
    pub fn heater(&self) -> Heater {
        self.entry.heater
    }

    #[inline]
    pub fn description(&self) -> &'static str {
        self.entry.description
    }
}

/// Resolves `mode_id` to an [`OperatingMode`].
///
/// The settling delay is `base_delay` for modes 1-3, `base_delay + 1 s` for
/// modes 4, 6 and 8 and `base_delay + 0.1 s` for modes 5, 7 and 9.
pub fn lookup<E: Debug>(mode_id: u8, base_delay: Duration) -> Result<OperatingMode, Sht4xError<E>> {
    if !(MIN_MODE..=MAX_MODE).contains(&mode_id) {
        return Err(Sht4xError::InvalidMode(mode_id));
    }
    let entry = &MODE_TABLE[usize::from(mode_id - MIN_MODE)];
    let settling_delay = base_delay
        .checked_add(entry.heater.duration())
        .ok_or(ConfigurationError::InvalidBusDelay)?;
    Ok(OperatingMode {
        entry,
        settling_delay,
    })
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    const BASE: Duration = Duration::from_millis(50);

    fn mode(id: u8) -> OperatingMode {
        lookup::<()>(id, BASE).unwrap()
    }

    #[test]
    fn test_command_bytes() {
        let expected = [0xFD, 0xF6, 0xE0, 0x39, 0x32, 0x2F, 0x24, 0x1E, 0x15];
        for (i, cmd) in expected.iter().enumerate() {
            let m = mode(i as u8 + 1);
            assert_eq!(m.id(), i as u8 + 1);
            assert_eq!(m.command(), *cmd, "mode {}", m.id());
            assert_eq!(m.response_len(), 6);
        }
    }

    #[test]
    fn test_settling_delays() {
        for id in 1..=3 {
            assert_eq!(mode(id).settling_delay(), BASE);
            assert_eq!(mode(id).heater(), Heater::Off);
        }
        for id in [4, 6, 8] {
            assert_eq!(mode(id).settling_delay(), BASE + Duration::from_secs(1));
        }
        for id in [5, 7, 9] {
            assert_eq!(mode(id).settling_delay(), BASE + Duration::from_millis(100));
        }
    }

    #[test]
    fn test_heater_power() {
        assert_eq!(mode(4).heater(), Heater::Long { milliwatts: 200 });
        assert_eq!(mode(7).heater(), Heater::Short { milliwatts: 110 });
        assert_eq!(mode(8).heater(), Heater::Long { milliwatts: 20 });
    }

    #[test]
    fn test_zero_base_delay() {
        let m = lookup::<()>(1, Duration::ZERO).unwrap();
        assert_eq!(m.settling_delay(), Duration::ZERO);
    }

    #[test]
    fn test_out_of_range() {
        assert!(matches!(lookup::<()>(0, BASE), Err(Sht4xError::InvalidMode(0))));
        assert!(matches!(lookup::<()>(10, BASE), Err(Sht4xError::InvalidMode(10))));
        assert!(matches!(lookup::<()>(255, BASE), Err(Sht4xError::InvalidMode(255))));
    }

    #[test]
    fn test_overflowing_delay_is_rejected() {
        assert!(matches!(
            lookup::<()>(4, Duration::MAX),
            Err(Sht4xError::InvalidConfiguration(ConfigurationError::InvalidBusDelay))
        ));
        // No heater pulse, nothing to add
        assert_eq!(lookup::<()>(1, Duration::MAX).unwrap().settling_delay(), Duration::MAX);
    }

    #[test]
    fn test_lookup_is_pure() {
        assert_eq!(mode(6), mode(6));
        assert!(mode(1).description().contains("high precision"));
    }
}

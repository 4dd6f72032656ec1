// src/common/timing.rs

use core::time::Duration;

/// Default quiet time around every bus transaction.
pub const DEFAULT_BUS_DELAY: Duration = Duration::from_millis(50);

// === Heater pulses (datasheet Table 9) ===

/// Heater-on time for modes 4, 6 and 8.
pub const LONG_HEATER_PULSE: Duration = Duration::from_secs(1);
/// Heater-on time for modes 5, 7 and 9.
pub const SHORT_HEATER_PULSE: Duration = Duration::from_millis(100);

/// Upper bound accepted for the base bus delay.
pub const MAX_BUS_DELAY: Duration = Duration::from_secs(60);

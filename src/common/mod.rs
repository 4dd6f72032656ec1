// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod address;
pub mod command;
pub mod crc;
pub mod error;
pub mod hal_traits;
pub mod mode;
pub mod response;
pub mod timing;
pub mod types;

#[cfg(feature = "linux")]
pub mod linux;

// --- Re-export key types/traits/functions for easier access ---

// From address.rs
pub use address::Sht4xAddr;

// From command.rs
pub use command::Command;

// From crc.rs
pub use self::crc::{calculate_crc8, validate, ChecksumMismatch, DataWord};

// From error.rs
pub use error::{ConfigurationError, Sht4xError};

// From hal_traits.rs
pub use hal_traits::{Sht4xBus, Sht4xTimer};

// From mode.rs
pub use mode::{lookup, Heater, OperatingMode};

// From response.rs
pub use response::{Measurement, RawReading, SerialNumber, Temperature};

// From types.rs
pub use types::{ticks_to_humidity, ticks_to_temperature, TemperatureUnit};

// Native HAL adapters (from hal_traits.rs)
#[cfg(feature = "impl-native")]
pub use hal_traits::{NativeBus, NativeDelay};

#[cfg(feature = "linux")]
pub use linux::{LinuxBus, LinuxBusError};

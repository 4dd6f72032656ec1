// src/lib.rs

//! Driver for the Sensirion SHT4x family of temperature and humidity sensors.
//!
//! A [`Sht4xSession`] runs the measurement protocol over any transport that
//! implements [`Sht4xBus`], with delays supplied by a [`Sht4xTimer`]:
//!
//! ```ignore
//! let mut session = Sht4xSession::new(bus, timer, SessionConfig::default())?;
//! let m = session.read_measurement()?;
//! ```
//!
//! Each measurement is only produced after the CRC-8 of both data words has
//! been verified.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod aggregate;
pub mod common;
pub mod config;
pub mod session;

// Re-export key types for convenience
pub use aggregate::{Average, Readings};
pub use common::{
    Measurement, OperatingMode, RawReading, SerialNumber, Sht4xAddr, Sht4xBus, Sht4xError,
    Sht4xTimer, Temperature, TemperatureUnit,
};
pub use config::{Aggregation, BusNumber, ReadingPlan, SessionConfig};
pub use session::{SessionState, Sht4xSession};

#[cfg(feature = "async")]
pub use session::AsyncSht4xSession;

// src/common/error.rs

use super::crc::ChecksumMismatch;

/// Errors raised while validating caller-supplied configuration.
///
/// These never involve the bus, so they carry no transport error type.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    /// Device address does not fit in 7 bits or could not be parsed.
    #[error("invalid device address")]
    InvalidAddress,

    /// Bus number could not be parsed.
    #[error("invalid bus number")]
    InvalidBusNumber,

    /// Base bus delay is negative, NaN or too large.
    #[error("invalid bus delay")]
    InvalidBusDelay,

    /// Pause between readings is negative, NaN or infinite.
    #[error("invalid reading delay")]
    InvalidReadingDelay,

    /// Reading count is zero or exceeds the buffer capacity.
    #[error("reading count {requested} outside 1..={capacity}")]
    ReadingCount { requested: usize, capacity: usize },

    /// Temperature unit left blank.
    #[error("missing temperature unit (expected C, F or K)")]
    MissingUnit,

    /// Aggregation name was neither `average` nor `list`.
    #[error("invalid aggregation mode")]
    InvalidAggregation,
}

#[derive(Debug, thiserror::Error)]
pub enum Sht4xError<E = ()>
where
    E: core::fmt::Debug,
{
    /// Underlying bus error from the transport implementation.
    #[error("transport error: {0:?}")]
    Transport(E),

    /// A data word failed its CRC-8 check.
    #[error(transparent)]
    ChecksumMismatch(ChecksumMismatch),

    /// Operating mode outside 1..=9.
    #[error("invalid operating mode {0} (expected 1..=9)")]
    InvalidMode(u8),

    /// Temperature unit other than C, F or K.
    #[error("invalid temperature unit '{0}' (expected C, F or K)")]
    InvalidUnit(char),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(ConfigurationError),

    /// The sensor answered with the wrong number of bytes.
    #[error("response length mismatch: expected {expected}, got {got}")]
    ResponseLength { expected: usize, got: usize },

    /// Session has not confirmed the device yet.
    #[error("session not initialised")]
    NotReady,
}

impl<E: core::fmt::Debug> From<ChecksumMismatch> for Sht4xError<E> {
    fn from(e: ChecksumMismatch) -> Self {
        Sht4xError::ChecksumMismatch(e)
    }
}

impl<E: core::fmt::Debug> From<ConfigurationError> for Sht4xError<E> {
    fn from(e: ConfigurationError) -> Self {
        Sht4xError::InvalidConfiguration(e)
    }
}

// src/common/address.rs

use super::error::ConfigurationError;
use core::fmt;
use core::str::FromStr;

/// 7-bit I2C address of an SHT4x device.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Sht4xAddr(u8);

impl Sht4xAddr {
    /// SHT40-AD1B, SHT41, SHT45 and most other variants.
    pub const DEFAULT_ADDRESS: Sht4xAddr = Sht4xAddr(0x44);
    /// SHT40-BD1B.
    pub const ALTERNATE_ADDRESS: Sht4xAddr = Sht4xAddr(0x45);

    /// Creates a new `Sht4xAddr` if `address` fits in 7 bits.
    pub fn new(address: u8) -> Result<Self, ConfigurationError> {
        if address <= 0x7F {
            Ok(Sht4xAddr(address))
        } else {
            Err(ConfigurationError::InvalidAddress)
        }
    }

    #[inline]
    pub const fn as_u8(&self) -> u8 {
        self.0
    }
}

impl Default for Sht4xAddr {
    fn default() -> Self {
        Self::DEFAULT_ADDRESS
    }
}

impl TryFrom<u8> for Sht4xAddr {
    type Error = ConfigurationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Accepts decimal (`68`) or `0x`-prefixed hex (`0x44`).
impl FromStr for Sht4xAddr {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => u8::from_str_radix(hex, 16),
            None => s.parse::<u8>(),
        };
        parsed
            .map_err(|_| ConfigurationError::InvalidAddress)
            .and_then(Self::new)
    }
}

impl From<Sht4xAddr> for u8 {
    fn from(value: Sht4xAddr) -> Self {
        value.0
    }
}

impl fmt::Display for Sht4xAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}

// src/common/crc.rs

use crc::{Algorithm, Crc};
use core::fmt;

/// CRC-8 used by Sensirion for every 2-byte data word (datasheet section 4.4).
/// Polynomial: 0x31 (x^8 + x^5 + x^4 + 1)
/// Initial Value: 0xFF
/// Input Reflected: false
/// Output Reflected: false
/// Final XOR: 0x00
/// Check Value: 0xF7 (for "123456789")
pub const SHT4X_CRC: Algorithm<u8> = Algorithm {
    width: 8,
    poly: 0x31,
    init: 0xFF,
    refin: false,
    refout: false,
    xorout: 0x00,
    check: 0xF7,
    residue: 0x00,
};

// Create a Crc instance for the SHT4x algorithm for reuse.
const CRC_COMPUTER: Crc<u8> = Crc::<u8>::new(&SHT4X_CRC);

/// Which half of a response a checksum belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DataWord {
    Temperature,
    Humidity,
}

impl fmt::Display for DataWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataWord::Temperature => f.write_str("temperature"),
            DataWord::Humidity => f.write_str("humidity"),
        }
    }
}

/// A data word whose transmitted checksum disagrees with the computed one.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
#[error("{word} checksum mismatch: expected {expected:#04x}, calculated {calculated:#04x}")]
pub struct ChecksumMismatch {
    pub word: DataWord,
    pub expected: u8,
    pub calculated: u8,
}

/// Calculates the CRC-8 of `data`.
#[inline]
pub fn calculate_crc8(data: &[u8]) -> u8 {
    CRC_COMPUTER.checksum(data)
}

/// Checks one data word against the checksum byte that followed it on the wire.
///
/// Only the two data bytes are fed to the CRC, never the checksum itself.
pub fn validate(word: DataWord, data: [u8; 2], expected: u8) -> Result<(), ChecksumMismatch> {
    let calculated = calculate_crc8(&data);
    if calculated == expected {
        Ok(())
    } else {
        Err(ChecksumMismatch { word, expected, calculated })
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_value() {
        assert_eq!(calculate_crc8(b"123456789"), 0xF7);
    }

    #[test]
    fn test_zero_word_reference_vector() {
        assert_eq!(calculate_crc8(&[0x00, 0x00]), 0x81);
        assert!(validate(DataWord::Temperature, [0x00, 0x00], 0x81).is_ok());
    }

    #[test]
    fn test_datasheet_example() {
        // Sensirion's worked example: 0xBEEF -> 0x92
        assert_eq!(calculate_crc8(&[0xBE, 0xEF]), 0x92);
    }

    #[test]
    fn test_single_bit_flips_are_detected() {
        let data = [0x66, 0x66];
        let checksum = calculate_crc8(&data);
        assert!(validate(DataWord::Humidity, data, checksum).is_ok());

        for bit in 0..16 {
            let mut flipped = data;
            flipped[bit / 8] ^= 1 << (bit % 8);
            let result = validate(DataWord::Humidity, flipped, checksum);
            assert!(result.is_err(), "flip of bit {} went unnoticed", bit);
        }
    }

    #[test]
    fn test_mismatch_reports_both_values() {
        let err = validate(DataWord::Temperature, [0x00, 0x00], 0x80).unwrap_err();
        assert_eq!(
            err,
            ChecksumMismatch { word: DataWord::Temperature, expected: 0x80, calculated: 0x81 }
        );
    }
}

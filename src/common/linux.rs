// src/common/linux.rs

//! `/dev/i2c-<n>` transport that opens the device node for each transaction
//! and closes it again afterwards.

use super::hal_traits::Sht4xBus;
use crate::config::BusNumber;
use core::fmt;
use embedded_hal::i2c::{ErrorType, I2c};
use linux_embedded_hal::i2cdev::linux::LinuxI2CError;
use linux_embedded_hal::I2cdev;
use log::trace;

type TransferError = <I2cdev as ErrorType>::Error;

#[derive(Debug, thiserror::Error)]
pub enum LinuxBusError {
    #[error("cannot open {path}: {source}")]
    Open { path: String, source: LinuxI2CError },

    #[error("I2C transfer failed: {0:?}")]
    Transfer(TransferError),

    /// A transfer was attempted outside `acquire`/`release`.
    #[error("bus not acquired")]
    NotAcquired,
}

/// Opens `/dev/i2c-<bus>` on [`acquire`](Sht4xBus::acquire) and drops the
/// handle on [`release`](Sht4xBus::release).
pub struct LinuxBus {
    path: String,
    device: Option<I2cdev>,
}

// I2cdev has no Debug impl.
impl fmt::Debug for LinuxBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinuxBus")
            .field("path", &self.path)
            .field("open", &self.device.is_some())
            .finish()
    }
}

impl LinuxBus {
    pub fn new(bus: BusNumber) -> Self {
        LinuxBus {
            path: format!("/dev/i2c-{}", bus.0),
            device: None,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn device(&mut self) -> Result<&mut I2cdev, LinuxBusError> {
        self.device.as_mut().ok_or(LinuxBusError::NotAcquired)
    }
}

impl Sht4xBus for LinuxBus {
    type Error = LinuxBusError;

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        self.device()?.write(address, bytes).map_err(LinuxBusError::Transfer)
    }

    fn read(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.device()?.read(address, buffer).map_err(LinuxBusError::Transfer)
    }

    fn acquire(&mut self) -> Result<(), Self::Error> {
        trace!("opening {}", self.path);
        let device = I2cdev::new(&self.path).map_err(|source| LinuxBusError::Open {
            path: self.path.clone(),
            source,
        })?;
        self.device = Some(device);
        Ok(())
    }

    fn release(&mut self) {
        if self.device.take().is_some() {
            trace!("closed {}", self.path);
        }
    }
}

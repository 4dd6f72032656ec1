// src/session/async_session.rs

//! The same protocol over `embedded-hal-async`, for executors such as Embassy.

use super::SessionState;
use crate::common::{
    command::{Command, RESPONSE_LEN},
    error::Sht4xError,
    hal_traits::micros_chunks,
    mode::{self, OperatingMode},
    response::{Measurement, RawReading, SerialNumber},
    types::TemperatureUnit,
    Sht4xAddr,
};
use crate::config::SessionConfig;
use core::time::Duration;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;
use log::{debug, info, warn};

/// Asynchronous SHT4x session.
///
/// Holds the I2C bus for its whole lifetime; share it with
/// `embedded-hal-bus` style wrappers if other devices sit on the same bus.
pub struct AsyncSht4xSession<I2C, D> {
    i2c: I2C,
    delay: D,
    address: Sht4xAddr,
    bus_delay: Duration,
    unit: TemperatureUnit,
    mode: OperatingMode,
    state: SessionState,
    serial_number: Option<SerialNumber>,
    last_raw: Option<RawReading>,
}

impl<I2C, D> AsyncSht4xSession<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Creates a session and confirms the device by reading its serial number.
    pub async fn new(
        i2c: I2C,
        delay: D,
        config: SessionConfig,
    ) -> Result<Self, Sht4xError<I2C::Error>> {
        let mode = mode::lookup(config.mode, config.bus_delay)?;
        let mut session = AsyncSht4xSession {
            i2c,
            delay,
            address: config.address,
            bus_delay: config.bus_delay,
            unit: config.unit,
            mode,
            state: SessionState::Uninitialized,
            serial_number: None,
            last_raw: None,
        };
        let serial = session.get_serial_number().await?;
        session.state = SessionState::Ready;
        info!("sht4x@{}: serial {}, mode {}", session.address, serial, session.mode.id());
        Ok(session)
    }

    /// Requests the serial number (`0x89`).
    pub async fn get_serial_number(&mut self) -> Result<SerialNumber, Sht4xError<I2C::Error>> {
        let mut buffer = [0u8; RESPONSE_LEN];
        self.write(Command::SerialNumber).await?;
        self.wait(self.bus_delay).await;
        self.i2c
            .read(self.address.as_u8(), &mut buffer)
            .await
            .map_err(Sht4xError::Transport)?;
        self.wait(self.bus_delay).await;

        let serial = SerialNumber::from_raw(&RawReading::new(buffer));
        self.serial_number = Some(serial);
        Ok(serial)
    }

    /// Sends a soft reset (`0x94`).
    pub async fn soft_reset(&mut self) -> Result<(), Sht4xError<I2C::Error>> {
        self.wait(self.bus_delay).await;
        self.write(Command::SoftReset).await
    }

    /// Runs the measurement command of the active mode without validating.
    pub async fn read_raw(&mut self) -> Result<RawReading, Sht4xError<I2C::Error>> {
        if self.state != SessionState::Ready {
            return Err(Sht4xError::NotReady);
        }
        let settle = self.mode.settling_delay();
        let mut buffer = [0u8; RESPONSE_LEN];

        self.wait(settle).await;
        self.write(Command::Measure(self.mode)).await?;
        self.wait(settle).await;
        self.i2c
            .read(self.address.as_u8(), &mut buffer)
            .await
            .map_err(Sht4xError::Transport)?;

        let raw = RawReading::new(buffer);
        self.last_raw = Some(raw);
        Ok(raw)
    }

    /// Takes one validated measurement.
    pub async fn read_measurement(&mut self) -> Result<Measurement, Sht4xError<I2C::Error>> {
        let raw = self.read_raw().await?;
        raw.to_measurement(self.unit).map_err(|e| {
            warn!("sht4x@{}: {}", self.address, e);
            Sht4xError::from(e)
        })
    }

    pub fn select_mode(&mut self, mode_id: u8) -> Result<OperatingMode, Sht4xError<I2C::Error>> {
        self.mode = mode::lookup(mode_id, self.bus_delay)?;
        Ok(self.mode)
    }

    pub fn set_unit(&mut self, unit: TemperatureUnit) {
        self.unit = unit;
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn serial_number(&self) -> Option<SerialNumber> {
        self.serial_number
    }

    pub fn last_raw(&self) -> Option<RawReading> {
        self.last_raw
    }

    pub fn mode(&self) -> OperatingMode {
        self.mode
    }

    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    async fn write(&mut self, command: Command) -> Result<(), Sht4xError<I2C::Error>> {
        debug!("sht4x@{}: write {:#04x}", self.address, command.as_byte());
        self.i2c
            .write(self.address.as_u8(), &[command.as_byte()])
            .await
            .map_err(Sht4xError::Transport)
    }

    async fn wait(&mut self, duration: Duration) {
        for us in micros_chunks(duration) {
            self.delay.delay_us(us).await;
        }
    }
}

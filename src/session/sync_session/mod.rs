// src/session/sync_session/mod.rs

mod transaction;

use self::transaction::TransactionTiming;
use super::SessionState;
use crate::common::{
    command::{Command, RESPONSE_LEN},
    error::Sht4xError,
    hal_traits::{Sht4xBus, Sht4xTimer},
    mode::{self, OperatingMode},
    response::{Measurement, RawReading, SerialNumber},
    types::TemperatureUnit,
    Sht4xAddr,
};
use crate::config::{BusNumber, SessionConfig};
use core::time::Duration;
use log::{debug, info, warn};

/// A blocking SHT4x session.
///
/// Every operation blocks for the bus transfer plus the delays the protocol
/// requires. The session assumes it is the only user of the bus for the
/// duration of each call.
#[derive(Debug)]
pub struct Sht4xSession<B, T>
where
    B: Sht4xBus,
    T: Sht4xTimer,
{
    bus: B,
    timer: T,
    bus_number: BusNumber,
    address: Sht4xAddr,
    bus_delay: Duration,
    unit: TemperatureUnit,
    mode: OperatingMode,
    state: SessionState,
    serial_number: Option<SerialNumber>,
    last_raw: Option<RawReading>,
}

impl<B, T> Sht4xSession<B, T>
where
    B: Sht4xBus,
    T: Sht4xTimer,
{
    /// Creates a session and confirms the device by reading its serial number.
    ///
    /// Fails if the configured mode is invalid or the device does not answer.
    pub fn new(bus: B, timer: T, config: SessionConfig) -> Result<Self, Sht4xError<B::Error>> {
        let mut session = Self::uninitialized(bus, timer, config)?;
        session.initialize()?;
        Ok(session)
    }

    /// Creates a session without touching the bus.
    ///
    /// Call [`initialize`](Self::initialize) before taking measurements.
    pub fn uninitialized(
        bus: B,
        timer: T,
        config: SessionConfig,
    ) -> Result<Self, Sht4xError<B::Error>> {
        let mode = mode::lookup(config.mode, config.bus_delay)?;
        Ok(Sht4xSession {
            bus,
            timer,
            bus_number: config.bus,
            address: config.address,
            bus_delay: config.bus_delay,
            unit: config.unit,
            mode,
            state: SessionState::Uninitialized,
            serial_number: None,
            last_raw: None,
        })
    }

    /// Reads the serial number and moves the session to `Ready`.
    pub fn initialize(&mut self) -> Result<SerialNumber, Sht4xError<B::Error>> {
        let serial = self.get_serial_number()?;
        self.state = SessionState::Ready;
        info!(
            "sht4x@{} on bus {}: serial {}, mode {}",
            self.address,
            self.bus_number,
            serial,
            self.mode.id()
        );
        Ok(serial)
    }

    // --- Public Blocking Methods ---

    /// Requests the serial number (`0x89`).
    ///
    /// Write, wait the base bus delay, read 6 bytes, wait the base bus delay.
    pub fn get_serial_number(&mut self) -> Result<SerialNumber, Sht4xError<B::Error>> {
        let timing = TransactionTiming {
            before_write: Duration::ZERO,
            before_read: self.bus_delay,
            after_read: self.bus_delay,
        };
        let mut buffer = [0u8; RESPONSE_LEN];
        let cmd = Command::SerialNumber;
        let len = cmd.response_len();
        self.execute_transaction(cmd, timing, &mut buffer[..len])?;

        let raw = RawReading::from_slice(&buffer[..len])?;
        let serial = SerialNumber::from_raw(&raw);
        self.serial_number = Some(serial);
        Ok(serial)
    }

    /// Sends a soft reset (`0x94`). The sensor does not answer.
    pub fn soft_reset(&mut self) -> Result<(), Sht4xError<B::Error>> {
        let timing = TransactionTiming {
            before_write: self.bus_delay,
            before_read: Duration::ZERO,
            after_read: Duration::ZERO,
        };
        self.execute_transaction(Command::SoftReset, timing, &mut [])?;
        debug!("sht4x@{}: soft reset", self.address);
        Ok(())
    }

    /// Runs the measurement command of the active mode and returns the six
    /// bytes unvalidated. The buffer is kept as [`last_raw`](Self::last_raw).
    pub fn read_raw(&mut self) -> Result<RawReading, Sht4xError<B::Error>> {
        if self.state != SessionState::Ready {
            return Err(Sht4xError::NotReady);
        }

        let settle = self.mode.settling_delay();
        let timing = TransactionTiming {
            before_write: settle,
            before_read: settle,
            after_read: Duration::ZERO,
        };
        let mut buffer = [0u8; RESPONSE_LEN];
        let cmd = Command::Measure(self.mode);
        let len = cmd.response_len();
        self.execute_transaction(cmd, timing, &mut buffer[..len])?;

        let raw = RawReading::from_slice(&buffer[..len])?;
        self.last_raw = Some(raw);
        Ok(raw)
    }

    /// Takes one measurement in the active mode and unit.
    ///
    /// Both checksums must match before anything is converted; on a mismatch
    /// no measurement is returned but the raw buffer is still recorded.
    pub fn read_measurement(&mut self) -> Result<Measurement, Sht4xError<B::Error>> {
        let raw = self.read_raw()?;
        raw.to_measurement(self.unit).map_err(|e| {
            warn!("sht4x@{}: {}", self.address, e);
            Sht4xError::from(e)
        })
    }

    /// Switches to another operating mode. The current mode is kept if `mode_id`
    /// is invalid.
    pub fn select_mode(&mut self, mode_id: u8) -> Result<OperatingMode, Sht4xError<B::Error>> {
        let mode = mode::lookup(mode_id, self.bus_delay)?;
        debug!("sht4x@{}: mode {} -> {}", self.address, self.mode.id(), mode.id());
        self.mode = mode;
        Ok(mode)
    }

    pub fn set_unit(&mut self, unit: TemperatureUnit) {
        self.unit = unit;
    }

    /// Blocks for `duration` using the session's timer.
    pub fn pause(&mut self, duration: Duration) {
        self.timer.delay(duration);
    }

    // --- Accessors ---

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn serial_number(&self) -> Option<SerialNumber> {
        self.serial_number
    }

    /// Bytes of the most recent measurement response, valid or not.
    pub fn last_raw(&self) -> Option<RawReading> {
        self.last_raw
    }

    pub fn mode(&self) -> OperatingMode {
        self.mode
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    pub fn address(&self) -> Sht4xAddr {
        self.address
    }

    pub fn bus(&self) -> BusNumber {
        self.bus_number
    }

    pub fn bus_delay(&self) -> Duration {
        self.bus_delay
    }

    /// Gives back the bus and timer.
    pub fn release(self) -> (B, T) {
        (self.bus, self.timer)
    }
}

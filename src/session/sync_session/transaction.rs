// src/session/sync_session/transaction.rs

use super::Sht4xSession;
use crate::common::{
    command::Command,
    error::Sht4xError,
    hal_traits::{Sht4xBus, Sht4xTimer},
};
use core::ops::{Deref, DerefMut};
use core::time::Duration;
use log::{debug, trace};

/// Holds the bus for one transaction and releases it when dropped, whichever
/// way the transaction ends.
pub(super) struct BusScope<'a, B: Sht4xBus> {
    bus: &'a mut B,
}

impl<'a, B: Sht4xBus> BusScope<'a, B> {
    pub(super) fn acquire(bus: &'a mut B) -> Result<Self, B::Error> {
        bus.acquire()?;
        Ok(BusScope { bus })
    }
}

impl<B: Sht4xBus> Deref for BusScope<'_, B> {
    type Target = B;

    fn deref(&self) -> &B {
        self.bus
    }
}

impl<B: Sht4xBus> DerefMut for BusScope<'_, B> {
    fn deref_mut(&mut self) -> &mut B {
        self.bus
    }
}

impl<B: Sht4xBus> Drop for BusScope<'_, B> {
    fn drop(&mut self) {
        self.bus.release();
    }
}

/// Waits around the steps of one transaction.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(super) struct TransactionTiming {
    /// Quiet time before the command is written.
    pub before_write: Duration,
    /// Time the sensor needs before its answer can be read.
    pub before_read: Duration,
    /// Quiet time after the answer has been read.
    pub after_read: Duration,
}

impl<B, T> Sht4xSession<B, T>
where
    B: Sht4xBus,
    T: Sht4xTimer,
{
    /// Writes `command`, then reads `response.len()` bytes unless `response`
    /// is empty.
    ///
    /// No retries: any bus error ends the transaction and is returned as is.
    pub(super) fn execute_transaction(
        &mut self,
        command: Command,
        timing: TransactionTiming,
        response: &mut [u8],
    ) -> Result<(), Sht4xError<B::Error>> {
        let address = self.address.as_u8();
        let Self { bus, timer, .. } = self;
        let mut scope = BusScope::acquire(bus).map_err(Sht4xError::Transport)?;

        wait(timer, timing.before_write);
        debug!("sht4x@{:#04x}: write {:#04x}", address, command.as_byte());
        scope
            .write(address, &[command.as_byte()])
            .map_err(Sht4xError::Transport)?;

        if response.is_empty() {
            return Ok(());
        }

        wait(timer, timing.before_read);
        scope.read(address, response).map_err(Sht4xError::Transport)?;
        trace!("sht4x@{:#04x}: read {:02x?}", address, response);
        wait(timer, timing.after_read);

        Ok(())
    }
}

fn wait<T: Sht4xTimer>(timer: &mut T, duration: Duration) {
    if !duration.is_zero() {
        trace!("sht4x: waiting {:?}", duration);
        timer.delay(duration);
    }
}

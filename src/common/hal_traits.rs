// src/common/hal_traits.rs

use core::fmt::Debug;
use core::time::Duration;

/// Abstraction for timer/delay operations required between transactions.
///
/// Implementations must block for at least the requested time. Tests plug in
/// a simulated clock so no real time passes.
pub trait Sht4xTimer {
    /// Delay for at least the specified number of microseconds.
    fn delay_us(&mut self, us: u32);

    /// Delay for at least the specified number of milliseconds.
    fn delay_ms(&mut self, ms: u32);

    /// Delay for at least `duration`.
    ///
    /// Waits longer than `u32::MAX` microseconds are issued as several
    /// consecutive `delay_us` calls.
    fn delay(&mut self, duration: Duration) {
        for us in micros_chunks(duration) {
            self.delay_us(us);
        }
    }
}

/// Splits `duration` into `delay_us` sized steps, rounding up to whole
/// microseconds.
pub(crate) fn micros_chunks(duration: Duration) -> impl Iterator<Item = u32> {
    let mut remaining = duration.as_nanos().div_ceil(1_000);
    core::iter::from_fn(move || {
        if remaining == 0 {
            return None;
        }
        let step = remaining.min(u128::from(u32::MAX));
        remaining -= step;
        // step <= u32::MAX
        Some(step as u32)
    })
}

/// Byte-level access to an I2C-style bus.
///
/// The session wraps every transaction in [`acquire`](Sht4xBus::acquire) /
/// [`release`](Sht4xBus::release). Transports that keep a permanently open
/// handle can ignore both.
pub trait Sht4xBus {
    /// Associated error type for communication errors (NACK, bus fault...).
    type Error: Debug;

    /// Writes `bytes` to the device at the 7-bit `address`.
    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Fills `buffer` with bytes read from the device at `address`.
    fn read(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), Self::Error>;

    /// Called before the first write of a transaction.
    fn acquire(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called once the transaction is over, on success and on failure.
    fn release(&mut self) {}
}

impl<B: Sht4xBus + ?Sized> Sht4xBus for &mut B {
    type Error = B::Error;

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        (**self).write(address, bytes)
    }

    fn read(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
        (**self).read(address, buffer)
    }

    fn acquire(&mut self) -> Result<(), Self::Error> {
        (**self).acquire()
    }

    fn release(&mut self) {
        (**self).release()
    }
}

/// Adapts any embedded-hal 1.0 blocking I2C bus to [`Sht4xBus`].
#[cfg(feature = "impl-native")]
#[derive(Debug)]
pub struct NativeBus<I2C>(pub I2C);

#[cfg(feature = "impl-native")]
impl<I2C> NativeBus<I2C> {
    pub fn new(i2c: I2C) -> Self {
        NativeBus(i2c)
    }

    pub fn into_inner(self) -> I2C {
        self.0
    }
}

#[cfg(feature = "impl-native")]
impl<I2C: embedded_hal::i2c::I2c> Sht4xBus for NativeBus<I2C> {
    type Error = I2C::Error;

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        self.0.write(address, bytes)
    }

    fn read(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.0.read(address, buffer)
    }
}

/// Adapts any embedded-hal 1.0 delay provider to [`Sht4xTimer`].
#[cfg(feature = "impl-native")]
#[derive(Debug)]
pub struct NativeDelay<D>(pub D);

#[cfg(feature = "impl-native")]
impl<D: embedded_hal::delay::DelayNs> Sht4xTimer for NativeDelay<D> {
    fn delay_us(&mut self, us: u32) {
        self.0.delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.delay_ms(ms);
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingTimer {
        calls: Vec<u32>,
    }

    impl RecordingTimer {
        fn elapsed(&self) -> Duration {
            Duration::from_micros(self.calls.iter().map(|us| u64::from(*us)).sum())
        }
    }

    impl Sht4xTimer for RecordingTimer {
        fn delay_us(&mut self, us: u32) {
            self.calls.push(us);
        }

        fn delay_ms(&mut self, ms: u32) {
            self.calls.push(ms * 1000);
        }
    }

    #[test]
    fn test_short_delay_is_one_call() {
        let mut timer = RecordingTimer::default();
        timer.delay(Duration::from_millis(50));
        assert_eq!(timer.calls, vec![50_000]);
    }

    #[test]
    fn test_long_delay_is_not_truncated() {
        let mut timer = RecordingTimer::default();
        timer.delay(Duration::from_secs(7200));

        assert_eq!(timer.calls.len(), 2);
        assert_eq!(timer.calls[0], u32::MAX);
        assert_eq!(timer.elapsed(), Duration::from_secs(7200));
    }

    #[test]
    fn test_sub_microsecond_rounds_up() {
        let mut timer = RecordingTimer::default();
        timer.delay(Duration::from_nanos(1_500));
        assert_eq!(timer.calls, vec![2]);

        let mut timer = RecordingTimer::default();
        timer.delay(Duration::ZERO);
        assert!(timer.calls.is_empty());
    }
}

// src/aggregate.rs

//! Collecting a series of measurements and reducing them.

use crate::common::{
    error::{ConfigurationError, Sht4xError},
    hal_traits::{Sht4xBus, Sht4xTimer},
    response::{Measurement, Temperature},
};
use crate::config::ReadingPlan;
use crate::session::Sht4xSession;
use heapless::Vec;

/// Up to `N` measurements, in the order they were taken.
///
/// All measurements are expected to share one temperature unit; the average
/// is reported in the unit of the first one.
#[derive(Debug, Clone, PartialEq)]
pub struct Readings<const N: usize> {
    items: Vec<Measurement, N>,
}

/// Mean of a series of readings.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Average {
    pub temperature: Temperature,
    pub humidity: f32,
    pub count: usize,
}

impl<const N: usize> Readings<N> {
    pub const fn new() -> Self {
        Readings { items: Vec::new() }
    }

    /// Appends a measurement, handing it back if the buffer is full.
    pub fn push(&mut self, measurement: Measurement) -> Result<(), Measurement> {
        self.items.push(measurement)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[Measurement] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &Measurement> {
        self.items.iter()
    }

    /// Arithmetic mean, or `None` when empty.
    pub fn average(&self) -> Option<Average> {
        let first = self.items.first()?;
        let count = self.items.len();
        let (t_sum, rh_sum) = self
            .items
            .iter()
            .fold((0.0f32, 0.0f32), |(t, rh), m| (t + m.temperature.value, rh + m.humidity));
        Some(Average {
            temperature: Temperature {
                value: t_sum / count as f32,
                unit: first.temperature.unit,
            },
            humidity: rh_sum / count as f32,
            count,
        })
    }
}

impl<const N: usize> Default for Readings<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B, T> Sht4xSession<B, T>
where
    B: Sht4xBus,
    T: Sht4xTimer,
{
    /// Takes `plan.count` measurements, pausing `plan.interval` between
    /// consecutive ones.
    ///
    /// The first error aborts the series; no retry is attempted.
    pub fn take_readings<const N: usize>(
        &mut self,
        plan: &ReadingPlan,
    ) -> Result<Readings<N>, Sht4xError<B::Error>> {
        if plan.count == 0 || plan.count > N {
            return Err(ConfigurationError::ReadingCount {
                requested: plan.count,
                capacity: N,
            }
            .into());
        }

        let mut readings = Readings::new();
        for i in 0..plan.count {
            if i > 0 {
                self.pause(plan.interval);
            }
            let measurement = self.read_measurement()?;
            // Capacity checked above.
            let _ = readings.push(measurement);
        }
        Ok(readings)
    }
}

use crate::calibrate::ClockCalibrator;
use crate::error::Result;
use crate::source::{CycleCounterSource, FrequencyRegistrySource, HighResClockSource};
use log::debug;

/// Where a clock frequency came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencySource {
    Registry,
    Measurement,
}

/// The processor clock frequency, read from the OS when it records one and
/// measured otherwise.
#[derive(Debug, Clone)]
pub struct ClockFrequencyResolver<R, K, C> {
    registry: R,
    calibrator: ClockCalibrator<K, C>,
}

impl<R, K, C> ClockFrequencyResolver<R, K, C>
where
    R: FrequencyRegistrySource,
    K: HighResClockSource,
    C: CycleCounterSource,
{
    pub fn new(registry: R, calibrator: ClockCalibrator<K, C>) -> Self {
        ClockFrequencyResolver {
            registry,
            calibrator,
        }
    }

    /// The clock frequency in MHz.
    ///
    /// Any value the registry holds is returned as-is, zero included. A
    /// missing or unreadable entry falls through to a calibration, which
    /// blocks for up to a second. The registry is not retried.
    pub fn clock_frequency(&self) -> Result<u32> {
        self.clock_frequency_with_source().map(|(mhz, _)| mhz)
    }

    pub fn clock_frequency_with_source(&self) -> Result<(u32, FrequencySource)> {
        match self.registry.nominal_mhz() {
            Ok(mhz) => {
                debug!("clock frequency from registry: {} MHz", mhz);
                return Ok((mhz, FrequencySource::Registry));
            }
            Err(e) => debug!("frequency registry unavailable ({}), measuring instead", e),
        }
        let mhz = self.calibrator.calibrate()?;
        Ok((mhz, FrequencySource::Measurement))
    }
}

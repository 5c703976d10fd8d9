//! Empirical clock-frequency measurement.
//!
//! The cycle counter is sampled on both sides of a window timed by the
//! high-resolution clock. The window is one second divided by the reduction
//! factor `R`, and the cycle delta is scaled back up by `R`, so latency and
//! precision both shrink linearly with `R`.

use crate::error::{Error, Result};
use crate::source::{CycleCounterSource, HighResClockSource};
use log::{debug, trace};
use std::num::NonZeroU32;

const HZ_PER_MHZ: u64 = 1_000_000;

#[derive(Debug, Clone)]
pub struct ClockCalibrator<K, C> {
    clock: K,
    counter: C,
    reduction: NonZeroU32,
}

impl<K, C> ClockCalibrator<K, C>
where
    K: HighResClockSource,
    C: CycleCounterSource,
{
    /// A calibrator with a full one-second window.
    pub fn new(clock: K, counter: C) -> Self {
        Self::with_reduction(clock, counter, NonZeroU32::MIN)
    }

    pub fn with_reduction(clock: K, counter: C, reduction: NonZeroU32) -> Self {
        ClockCalibrator {
            clock,
            counter,
            reduction,
        }
    }

    pub fn reduction(&self) -> NonZeroU32 {
        self.reduction
    }

    /// Measures the cycle counter's rate in MHz.
    ///
    /// This spins on the calling thread for `1 / R` seconds and cannot be
    /// interrupted. Callers needing bounded latency should run it on a thread
    /// they can abandon.
    ///
    /// Fails with [`Error::Undetermined`] without spinning if the clock cannot
    /// report its frequency, or if `R` exceeds the clock's ticks per second
    /// and leaves an empty window.
    pub fn calibrate(&self) -> Result<u32> {
        let ticks_per_second = match self.clock.ticks_per_second() {
            Ok(0) => {
                debug!("high-resolution clock reports a zero frequency");
                return Err(Error::Undetermined);
            }
            Ok(hz) => hz,
            Err(e) => {
                debug!("high-resolution clock unavailable: {}", e);
                return Err(Error::Undetermined);
            }
        };
        let r = u64::from(self.reduction.get());
        let window = ticks_per_second / r;
        if window == 0 {
            debug!(
                "reduction factor {} leaves no window at {} Hz",
                r, ticks_per_second
            );
            return Err(Error::Undetermined);
        }
        let stop = self.clock.now().saturating_add(window);

        let start_cycles = self.counter.cycles();
        // Tight poll, no yield or sleep.
        while self.clock.now() < stop {}
        let stop_cycles = self.counter.cycles();

        let cycles = stop_cycles.wrapping_sub(start_cycles);
        trace!(
            "calibration window of {} ticks at {} Hz: {} cycles",
            window,
            ticks_per_second,
            cycles
        );

        // Truncate to whole MHz before scaling back up by R.
        let mhz = (cycles / HZ_PER_MHZ)
            .checked_mul(r)
            .and_then(|mhz| u32::try_from(mhz).ok())
            .ok_or(Error::Undetermined)?;
        debug!("calibrated clock frequency: {} MHz (R = {})", mhz, r);
        Ok(mhz)
    }
}

//! High-resolution wall-clock timers.

use crate::source::HighResClockSource;
use std::io;

#[cfg(windows)]
pub use self::windows::{perf_counter, perf_counter_frequency, PerfCounter};

#[cfg(windows)]
mod windows {
    use super::*;
    use crate::cvt::cvt;
    use windows_sys::Win32::System::Performance::{
        QueryPerformanceCounter, QueryPerformanceFrequency,
    };

    pub fn perf_counter_frequency() -> io::Result<u64> {
        unsafe {
            let mut frequency = 0;
            cvt(QueryPerformanceFrequency(&mut frequency))?;
            Ok(frequency as u64)
        }
    }

    /// Reads the performance counter. On Windows XP and later this cannot
    /// fail, so a failure reads as zero.
    pub fn perf_counter() -> u64 {
        let mut count = 0;
        unsafe { QueryPerformanceCounter(&mut count) };
        count as u64
    }

    /// `QueryPerformanceCounter` as a [`HighResClockSource`].
    #[derive(Debug, Clone, Copy, Default)]
    pub struct PerfCounter;

    impl HighResClockSource for PerfCounter {
        fn ticks_per_second(&self) -> io::Result<u64> {
            perf_counter_frequency()
        }

        #[inline(always)]
        fn now(&self) -> u64 {
            perf_counter()
        }
    }
}

/// [`std::time::Instant`] as a [`HighResClockSource`] with one tick per
/// nanosecond, measured from when the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: std::time::Instant,
}

impl MonotonicClock {
    pub const TICKS_PER_SECOND: u64 = 1_000_000_000;

    pub fn new() -> Self {
        MonotonicClock {
            origin: std::time::Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl HighResClockSource for MonotonicClock {
    fn ticks_per_second(&self) -> io::Result<u64> {
        Ok(Self::TICKS_PER_SECOND)
    }

    #[inline(always)]
    fn now(&self) -> u64 {
        // Saturates after ~584 years of uptime.
        u64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}

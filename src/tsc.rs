//! The processor time-stamp counter.

use crate::source::CycleCounterSource;

/// Reads the time-stamp counter: cycles since processor reset.
///
/// Non-serializing, so the read may be reordered with nearby instructions.
/// Over a calibration window this error is a handful of cycles.
#[inline(always)]
pub fn rdtsc() -> u64 {
    #[cfg(target_arch = "x86_64")]
    unsafe {
        core::arch::x86_64::_rdtsc()
    }

    #[cfg(target_arch = "x86")]
    unsafe {
        core::arch::x86::_rdtsc()
    }
}

/// `RDTSC` as a [`CycleCounterSource`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Tsc;

impl CycleCounterSource for Tsc {
    #[inline(always)]
    fn cycles(&self) -> u64 {
        rdtsc()
    }
}

//! Capability traits for the OS collaborators behind each query.
//!
//! Every OS interaction goes through one of these traits so that the
//! calibration and fallback logic can be driven by deterministic sources.

use std::io;

/// Total physical memory, in bytes.
pub trait MemoryStatusSource {
    fn total_physical_bytes(&self) -> io::Result<u64>;
}

/// A previously recorded nominal clock speed, in MHz.
pub trait FrequencyRegistrySource {
    fn nominal_mhz(&self) -> io::Result<u32>;
}

/// A monotonic high-resolution timer.
pub trait HighResClockSource {
    /// Ticks per second. Fails if the timer is unsupported.
    fn ticks_per_second(&self) -> io::Result<u64>;

    /// The current tick count.
    fn now(&self) -> u64;
}

/// A free-running processor cycle counter.
///
/// Values are only meaningful as a difference between two reads on the same
/// processor.
pub trait CycleCounterSource {
    fn cycles(&self) -> u64;
}

impl<F> MemoryStatusSource for F
where
    F: Fn() -> io::Result<u64>,
{
    fn total_physical_bytes(&self) -> io::Result<u64> {
        self()
    }
}

impl<F> FrequencyRegistrySource for F
where
    F: Fn() -> io::Result<u32>,
{
    fn nominal_mhz(&self) -> io::Result<u32> {
        self()
    }
}

impl<T: HighResClockSource + ?Sized> HighResClockSource for &T {
    fn ticks_per_second(&self) -> io::Result<u64> {
        (**self).ticks_per_second()
    }

    fn now(&self) -> u64 {
        (**self).now()
    }
}

impl<T: CycleCounterSource + ?Sized> CycleCounterSource for &T {
    fn cycles(&self) -> u64 {
        (**self).cycles()
    }
}

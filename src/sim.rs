//! Deterministic simulated sources for unit tests.

use crate::source::{CycleCounterSource, HighResClockSource};
use std::cell::Cell;
use std::io;

const NANOS_PER_SECOND: u128 = 1_000_000_000;

/// A timer over simulated time. Every `now()` call advances time by a fixed
/// step, so a busy-wait against it terminates after a known number of polls.
pub(crate) struct SimClock {
    now_ns: Cell<u64>,
    step_ns: u64,
    tick_hz: Option<u64>,
    frequency_queries: Cell<u32>,
    polls: Cell<u64>,
}

impl SimClock {
    pub(crate) fn new(tick_hz: u64, step_ns: u64) -> Self {
        SimClock {
            now_ns: Cell::new(0),
            step_ns,
            tick_hz: Some(tick_hz),
            frequency_queries: Cell::new(0),
            polls: Cell::new(0),
        }
    }

    /// A timer whose frequency query fails.
    pub(crate) fn unsupported() -> Self {
        SimClock {
            tick_hz: None,
            ..Self::new(1, 1)
        }
    }

    pub(crate) fn elapsed_ns(&self) -> u64 {
        self.now_ns.get()
    }

    pub(crate) fn frequency_queries(&self) -> u32 {
        self.frequency_queries.get()
    }

    pub(crate) fn polls(&self) -> u64 {
        self.polls.get()
    }
}

impl HighResClockSource for SimClock {
    fn ticks_per_second(&self) -> io::Result<u64> {
        self.frequency_queries.set(self.frequency_queries.get() + 1);
        self.tick_hz
            .ok_or_else(|| io::Error::new(io::ErrorKind::Unsupported, "no high-resolution timer"))
    }

    fn now(&self) -> u64 {
        self.polls.set(self.polls.get() + 1);
        let ns = self.now_ns.get() + self.step_ns;
        self.now_ns.set(ns);
        let hz = self.tick_hz.unwrap_or(0);
        (u128::from(ns) * u128::from(hz) / NANOS_PER_SECOND) as u64
    }
}

/// A cycle counter running at a constant rate against a [`SimClock`].
pub(crate) struct SimCycles<'a> {
    clock: &'a SimClock,
    hz: u64,
    offset: u64,
}

impl<'a> SimCycles<'a> {
    pub(crate) fn new(clock: &'a SimClock, hz: u64) -> Self {
        SimCycles {
            clock,
            hz,
            offset: 0,
        }
    }

    /// Starts the counter at `offset` so that it wraps during a measurement.
    pub(crate) fn starting_at(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }
}

impl CycleCounterSource for SimCycles<'_> {
    fn cycles(&self) -> u64 {
        let cycles = u128::from(self.clock.elapsed_ns()) * u128::from(self.hz) / NANOS_PER_SECOND;
        self.offset.wrapping_add(cycles as u64)
    }
}

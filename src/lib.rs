//! Total physical memory and processor clock frequency of the host.
//!
//! The clock frequency comes from the OS when it records one (the `~MHz`
//! registry value on Windows, `/proc/cpuinfo` elsewhere) and is otherwise
//! measured by counting processor cycles across a timed window.
//!
//! [`get_memory_amount`] and [`get_clock_frequency`] return plain integers
//! with [`UNDETERMINED`] standing in for failure, for hosts that cannot carry
//! a `Result`. The typed building blocks ([`MemoryProbe`],
//! [`ClockFrequencyResolver`], [`ClockCalibrator`]) are generic over their OS
//! collaborators, the traits in [`source`].

#![deny(
    // missing_docs,
    trivial_numeric_casts,
    unused_extern_crates,
    unstable_features
)]
#![warn(unused_import_braces)]
#![warn(
    clippy::float_arithmetic,
    clippy::mut_mut,
    clippy::nonminimal_bool,
    clippy::map_unwrap_or,
    clippy::unicode_not_nfc,
    clippy::use_self
)]

pub mod calibrate;
pub mod config;
#[cfg(windows)]
mod cvt;
mod error;
mod host;
pub mod memory;
pub mod procfs;
pub mod registry;
pub mod resolver;
#[cfg(test)]
mod sim;
pub mod source;
pub mod time;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod tsc;

pub use crate::calibrate::ClockCalibrator;
pub use crate::config::Config;
pub use crate::error::{Error, Result, SourceKind};
pub use crate::host::{
    clock_frequency, get_clock_frequency, get_clock_frequency_with, get_memory_amount,
    get_memory_amount_with, memory_amount, UNDETERMINED,
};
pub use crate::memory::MemoryProbe;
pub use crate::resolver::{ClockFrequencyResolver, FrequencySource};

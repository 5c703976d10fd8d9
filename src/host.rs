//! Memory and clock queries wired to this machine's own sources, and the
//! integer-returning surface exposed to host runtimes.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::memory::MemoryProbe;
use log::{debug, warn};

/// Returned in place of a value that could not be determined. Never a valid
/// memory size or frequency.
pub const UNDETERMINED: i32 = -1;

#[cfg(windows)]
fn native_memory(_config: &Config) -> MemoryProbe<crate::memory::GlobalMemoryStatus> {
    MemoryProbe::new(crate::memory::GlobalMemoryStatus)
}

#[cfg(not(windows))]
fn native_memory(config: &Config) -> MemoryProbe<crate::procfs::ProcMemInfo> {
    MemoryProbe::new(crate::procfs::ProcMemInfo::new(&config.meminfo_path))
}

#[cfg(windows)]
fn frequency_registry(config: &Config) -> crate::registry::RegistryFrequency {
    crate::registry::RegistryFrequency::new(
        &config.registry_key,
        &config.registry_value,
        config.key_access,
    )
}

#[cfg(not(windows))]
fn frequency_registry(config: &Config) -> crate::procfs::ProcCpuInfo {
    crate::procfs::ProcCpuInfo::new(&config.cpuinfo_path)
}

#[cfg(all(windows, any(target_arch = "x86", target_arch = "x86_64")))]
fn high_res_clock() -> crate::time::PerfCounter {
    crate::time::PerfCounter
}

#[cfg(all(not(windows), any(target_arch = "x86", target_arch = "x86_64")))]
fn high_res_clock() -> crate::time::MonotonicClock {
    crate::time::MonotonicClock::new()
}

/// Total physical memory in MB.
pub fn memory_amount(config: &Config) -> Result<u64> {
    if let Some(mb) = config.memory_override {
        debug!("physical memory overridden: {} MB", mb);
        return Ok(u64::from(mb));
    }
    native_memory(config).memory_amount()
}

/// Processor clock frequency in MHz, from the OS registry when present and
/// measured otherwise. A measurement blocks for `1 / config.reduction_factor`
/// seconds.
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub fn clock_frequency(config: &Config) -> Result<u32> {
    use crate::calibrate::ClockCalibrator;
    use crate::resolver::ClockFrequencyResolver;
    use crate::tsc::Tsc;

    if let Some(mhz) = config.clock_override {
        debug!("clock frequency overridden: {} MHz", mhz);
        return Ok(mhz);
    }
    let calibrator = ClockCalibrator::with_reduction(high_res_clock(), Tsc, config.reduction_factor);
    ClockFrequencyResolver::new(frequency_registry(config), calibrator).clock_frequency()
}

/// Processor clock frequency in MHz, from the OS registry. There is no cycle
/// counter to calibrate against on this architecture.
#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
pub fn clock_frequency(config: &Config) -> Result<u32> {
    use crate::source::FrequencyRegistrySource;

    if let Some(mhz) = config.clock_override {
        debug!("clock frequency overridden: {} MHz", mhz);
        return Ok(mhz);
    }
    match frequency_registry(config).nominal_mhz() {
        Ok(mhz) => Ok(mhz),
        Err(e) => {
            debug!("frequency registry unavailable ({}), no cycle counter", e);
            Err(Error::Undetermined)
        }
    }
}

fn to_sentinel<T>(what: &str, result: Result<T>) -> i32
where
    i32: TryFrom<T>,
{
    match result {
        Ok(value) => i32::try_from(value).unwrap_or(i32::MAX),
        Err(e) => {
            warn!("{} unavailable: {}", what, e);
            UNDETERMINED
        }
    }
}

fn env_config() -> Config {
    let (config, errors) = Config::from_env_lossy();
    for e in errors {
        warn!("{}, using the default", e);
    }
    config
}

/// Total physical memory in MB, or [`UNDETERMINED`].
pub fn get_memory_amount() -> i32 {
    get_memory_amount_with(&env_config())
}

pub fn get_memory_amount_with(config: &Config) -> i32 {
    to_sentinel("physical memory", memory_amount(config))
}

/// Processor clock frequency in MHz, or [`UNDETERMINED`]. May block for about
/// a second.
pub fn get_clock_frequency() -> i32 {
    get_clock_frequency_with(&env_config())
}

pub fn get_clock_frequency_with(config: &Config) -> i32 {
    to_sentinel("clock frequency", clock_frequency(config))
}

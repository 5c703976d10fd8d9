//! Tunables for the host queries.

use crate::error::{Error, Result};
use crate::procfs;
use crate::registry::{KeyAccess, CENTRAL_PROCESSOR_KEY, MHZ_VALUE};
use std::env;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::str::FromStr;

/// Reported clock frequency in MHz, bypassing the OS entirely.
pub const CLOCK_MHZ_VAR: &str = "MACHINFO_CLOCK_MHZ";
/// Reported physical memory in MB, bypassing the OS entirely.
pub const MEMORY_MB_VAR: &str = "MACHINFO_MEMORY_MB";
/// Calibration window divisor.
pub const REDUCTION_FACTOR_VAR: &str = "MACHINFO_REDUCTION_FACTOR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Divides the one-second calibration window and multiplies the
    /// measured result. Doubling it halves both the wait and the precision.
    /// Values above the timer's ticks per second (10^7 for a typical
    /// `QueryPerformanceCounter`) leave no window and calibration fails.
    pub reduction_factor: NonZeroU32,
    /// Key below `HKEY_LOCAL_MACHINE` holding the nominal clock speed.
    pub registry_key: String,
    /// `REG_DWORD` value under `registry_key`, in MHz.
    pub registry_value: String,
    pub key_access: KeyAccess,
    pub cpuinfo_path: PathBuf,
    pub meminfo_path: PathBuf,
    pub clock_override: Option<u32>,
    pub memory_override: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            reduction_factor: NonZeroU32::MIN,
            registry_key: CENTRAL_PROCESSOR_KEY.to_owned(),
            registry_value: MHZ_VALUE.to_owned(),
            key_access: KeyAccess::READ,
            cpuinfo_path: PathBuf::from(procfs::CPUINFO),
            meminfo_path: PathBuf::from(procfs::MEMINFO),
            clock_override: None,
            memory_override: None,
        }
    }
}

impl Config {
    /// The defaults, overridden by any `MACHINFO_*` variables that are set.
    /// Fails on the first variable that does not parse.
    pub fn from_env() -> Result<Self> {
        let (config, errors) = Self::from_env_lossy();
        match errors.into_iter().next() {
            Some(e) => Err(e),
            None => Ok(config),
        }
    }

    /// Like [`Config::from_env`], but a variable that does not parse keeps
    /// its default and is reported alongside the config. The other variables
    /// still apply.
    pub fn from_env_lossy() -> (Self, Vec<Error>) {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> (Self, Vec<Error>) {
        let mut config = Config::default();
        let mut errors = Vec::new();
        match parse_var(&lookup, CLOCK_MHZ_VAR) {
            Ok(Some(mhz)) => config.clock_override = Some(mhz),
            Ok(None) => {}
            Err(e) => errors.push(e),
        }
        match parse_var(&lookup, MEMORY_MB_VAR) {
            Ok(Some(mb)) => config.memory_override = Some(mb),
            Ok(None) => {}
            Err(e) => errors.push(e),
        }
        match parse_var(&lookup, REDUCTION_FACTOR_VAR) {
            Ok(Some(r)) => config.reduction_factor = r,
            Ok(None) => {}
            Err(e) => errors.push(e),
        }
        (config, errors)
    }

    pub fn reduction_factor(mut self, r: NonZeroU32) -> Self {
        self.reduction_factor = r;
        self
    }

    pub fn registry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.registry_key = key.into();
        self.registry_value = value.into();
        self
    }

    pub fn key_access(mut self, access: KeyAccess) -> Self {
        self.key_access = access;
        self
    }

    pub fn cpuinfo_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cpuinfo_path = path.into();
        self
    }

    pub fn meminfo_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.meminfo_path = path.into();
        self
    }

    pub fn clock_override(mut self, mhz: Option<u32>) -> Self {
        self.clock_override = mhz;
        self
    }

    pub fn memory_override(mut self, mb: Option<u32>) -> Self {
        self.memory_override = mb;
        self
    }
}

fn parse_var<T: FromStr>(
    lookup: impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>> {
    match lookup(name) {
        None => Ok(None),
        Some(value) => match value.trim().parse() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(_) => Err(Error::Config { name, value }),
        },
    }
}

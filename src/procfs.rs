//! Memory and clock sources backed by Linux's `/proc/meminfo` and
//! `/proc/cpuinfo`.
//!
//! Both files are `key : value` text. Keys are matched case-insensitively
//! by substring, and the first matching line wins.

use crate::source::{FrequencyRegistrySource, MemoryStatusSource};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const MEMINFO: &str = "/proc/meminfo";
pub const CPUINFO: &str = "/proc/cpuinfo";

fn invalid_data(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

/// Returns the lower-cased, trimmed value of the first line whose key
/// contains `key`.
fn find_property(text: &str, key: &str) -> Option<String> {
    text.lines().find_map(|line| {
        let line = line.to_ascii_lowercase();
        let colon = line.find(':')?;
        match line.find(key) {
            Some(at) if at < colon => Some(line[colon + 1..].trim().to_owned()),
            _ => None,
        }
    })
}

/// Parses the `MemTotal` entry of `/proc/meminfo` into bytes.
pub fn parse_mem_total(meminfo: &str) -> io::Result<u64> {
    let value = find_property(meminfo, "memtotal")
        .ok_or_else(|| invalid_data("MemTotal not found".to_owned()))?;
    if value.len() < 2 || !value.is_char_boundary(value.len() - 2) {
        return Err(invalid_data(format!("unknown MemTotal value: {value}")));
    }
    let (amount, unit) = value.split_at(value.len() - 2);
    let shift = match unit {
        "kb" => 10,
        "mb" => 20,
        "gb" => 30,
        _ => return Err(invalid_data(format!("unknown MemTotal unit: {value}"))),
    };
    let amount: u64 = amount
        .trim()
        .parse()
        .map_err(|_| invalid_data(format!("unknown MemTotal value: {value}")))?;
    amount
        .checked_mul(1 << shift)
        .ok_or_else(|| invalid_data(format!("MemTotal out of range: {value}")))
}

/// Parses the first `cpu MHz` entry of `/proc/cpuinfo`, truncating the
/// fractional part.
pub fn parse_cpu_mhz(cpuinfo: &str) -> io::Result<u32> {
    let value = find_property(cpuinfo, "mhz")
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "cpu MHz not found"))?;
    let mhz: f64 = value
        .parse()
        .map_err(|_| invalid_data(format!("unknown cpu MHz value: {value}")))?;
    if !mhz.is_finite() || mhz < 0.0 || mhz > f64::from(u32::MAX) {
        return Err(invalid_data(format!("cpu MHz out of range: {value}")));
    }
    Ok(mhz as u32)
}

/// `MemTotal` from a meminfo-format file.
#[derive(Debug, Clone)]
pub struct ProcMemInfo {
    path: PathBuf,
}

impl ProcMemInfo {
    pub fn new(path: impl AsRef<Path>) -> Self {
        ProcMemInfo {
            path: path.as_ref().to_owned(),
        }
    }
}

impl Default for ProcMemInfo {
    fn default() -> Self {
        Self::new(MEMINFO)
    }
}

impl MemoryStatusSource for ProcMemInfo {
    fn total_physical_bytes(&self) -> io::Result<u64> {
        parse_mem_total(&fs::read_to_string(&self.path)?)
    }
}

/// `cpu MHz` from a cpuinfo-format file.
#[derive(Debug, Clone)]
pub struct ProcCpuInfo {
    path: PathBuf,
}

impl ProcCpuInfo {
    pub fn new(path: impl AsRef<Path>) -> Self {
        ProcCpuInfo {
            path: path.as_ref().to_owned(),
        }
    }
}

impl Default for ProcCpuInfo {
    fn default() -> Self {
        Self::new(CPUINFO)
    }
}

impl FrequencyRegistrySource for ProcCpuInfo {
    fn nominal_mhz(&self) -> io::Result<u32> {
        parse_cpu_mhz(&fs::read_to_string(&self.path)?)
    }
}

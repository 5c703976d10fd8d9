use crate::error::{Error, Result, SourceKind};
use crate::source::MemoryStatusSource;
use log::debug;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Total physical memory, in whole megabytes.
#[derive(Debug, Clone)]
pub struct MemoryProbe<M> {
    source: M,
}

impl<M: MemoryStatusSource> MemoryProbe<M> {
    pub fn new(source: M) -> Self {
        MemoryProbe { source }
    }

    pub fn memory_amount(&self) -> Result<u64> {
        let bytes = self
            .source
            .total_physical_bytes()
            .map_err(|e| Error::unavailable(SourceKind::MemoryStatus, e))?;
        let mb = bytes / BYTES_PER_MB;
        debug!("physical memory: {} bytes ({} MB)", bytes, mb);
        Ok(mb)
    }
}

#[cfg(windows)]
pub use self::windows::GlobalMemoryStatus;

#[cfg(windows)]
mod windows {
    use crate::cvt::cvt;
    use crate::source::MemoryStatusSource;
    use std::io;
    use std::mem;
    use windows_sys::Win32::System::SystemInformation::{GlobalMemoryStatusEx, MEMORYSTATUSEX};

    /// `GlobalMemoryStatusEx` as a [`MemoryStatusSource`].
    #[derive(Debug, Clone, Copy, Default)]
    pub struct GlobalMemoryStatus;

    impl MemoryStatusSource for GlobalMemoryStatus {
        fn total_physical_bytes(&self) -> io::Result<u64> {
            unsafe {
                let mut status: MEMORYSTATUSEX = mem::zeroed();
                status.dwLength = mem::size_of::<MEMORYSTATUSEX>() as u32;
                cvt(GlobalMemoryStatusEx(&mut status))?;
                Ok(status.ullTotalPhys)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn two_gigabytes() {
        let memory = MemoryProbe::new(|| -> io::Result<u64> { Ok(2_147_483_648) });
        assert_eq!(memory.memory_amount().unwrap(), 2048);
    }

    #[test]
    fn partial_megabytes_truncate() {
        let memory = MemoryProbe::new(|| -> io::Result<u64> { Ok(3 * BYTES_PER_MB - 1) });
        assert_eq!(memory.memory_amount().unwrap(), 2);
        let memory = MemoryProbe::new(|| -> io::Result<u64> { Ok(BYTES_PER_MB - 1) });
        assert_eq!(memory.memory_amount().unwrap(), 0);
    }

    #[test]
    fn source_failure_is_reported() {
        let memory = MemoryProbe::new(|| -> io::Result<u64> {
            Err(io::Error::new(io::ErrorKind::Unsupported, "no memory status"))
        });
        match memory.memory_amount() {
            Err(Error::Unavailable { kind, .. }) => assert_eq!(kind, SourceKind::MemoryStatus),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn repeated_calls_requery_the_source() {
        let calls = std::cell::Cell::new(0);
        let memory = MemoryProbe::new(|| -> io::Result<u64> {
            calls.set(calls.get() + 1);
            Ok(512 * BYTES_PER_MB)
        });
        assert_eq!(memory.memory_amount().unwrap(), 512);
        assert_eq!(memory.memory_amount().unwrap(), 512);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn concurrent_calls() {
        let memory = MemoryProbe::new(|| -> io::Result<u64> { Ok(8192 * BYTES_PER_MB) });
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| assert_eq!(memory.memory_amount().unwrap(), 8192));
            }
        });
    }

    #[cfg(windows)]
    #[test]
    fn global_memory_status_reports_some_memory() {
        assert!(GlobalMemoryStatus.total_physical_bytes().unwrap() > 0);
    }
}

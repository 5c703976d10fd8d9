use std::io;
use windows_sys::Win32::Foundation::{BOOL, ERROR_SUCCESS, WIN32_ERROR};

/// Converts a `BOOL` return value, where zero means failure and the cause is
/// in `GetLastError`.
pub(crate) fn cvt(b: BOOL) -> io::Result<()> {
    if b == 0 {
        Err(io::Error::last_os_error())
    } else {
        Ok(())
    }
}

/// Converts a status-returning call such as the `Reg*` family, which report
/// the error code directly instead of through `GetLastError`.
pub(crate) fn cvt_status(status: WIN32_ERROR) -> io::Result<()> {
    if status == ERROR_SUCCESS {
        Ok(())
    } else {
        Err(io::Error::from_raw_os_error(status as i32))
    }
}

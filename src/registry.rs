//! The registry entry where Windows records the processor's nominal speed.

use bitflags::bitflags;

/// Default key holding the first processor's description.
pub const CENTRAL_PROCESSOR_KEY: &str = r"HARDWARE\DESCRIPTION\System\CentralProcessor\0";

/// Default value name, a `REG_DWORD` in MHz written at boot. Absent on
/// Windows 9x.
pub const MHZ_VALUE: &str = "~MHz";

bitflags! {
    /// [Registry key access rights]: https://learn.microsoft.com/en-us/windows/win32/sysinfo/registry-key-security-and-access-rights
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct KeyAccess: u32 {
        /// Required to query the values of a registry key.
        const QUERY_VALUE = 0x0001;
        /// Required to enumerate the subkeys of a registry key.
        const ENUMERATE_SUB_KEYS = 0x0008;
        /// Required to request change notifications for a registry key or
        /// for subkeys of a registry key.
        const NOTIFY = 0x0010;
        /// The right to read the information in the object's security descriptor.
        const READ_CONTROL = 0x0002_0000;
        /// Combines READ_CONTROL, QUERY_VALUE, ENUMERATE_SUB_KEYS, and NOTIFY.
        const READ = 0x0002_0019;
        /// Access the 64-bit registry view from a 32-bit process.
        const WOW64_64KEY = 0x0100;
        /// Access the 32-bit registry view from a 64-bit process.
        const WOW64_32KEY = 0x0200;
    }
}

impl Default for KeyAccess {
    fn default() -> Self {
        KeyAccess::READ
    }
}

#[cfg(windows)]
pub use self::windows::RegistryFrequency;

#[cfg(windows)]
mod windows {
    use super::KeyAccess;
    use crate::cvt::cvt_status;
    use crate::source::FrequencyRegistrySource;
    use std::ffi::OsStr;
    use std::io;
    use std::mem;
    use std::os::windows::ffi::OsStrExt;
    use std::ptr;
    use windows_sys::Win32::Foundation::ERROR_INVALID_DATA;
    use windows_sys::Win32::System::Registry::{
        RegCloseKey, RegOpenKeyExW, RegQueryValueExW, HKEY, HKEY_LOCAL_MACHINE, REG_DWORD,
    };

    fn to_wide(s: &str) -> Vec<u16> {
        OsStr::new(s).encode_wide().chain(Some(0)).collect()
    }

    /// An open key, closed on drop.
    struct OwnedKey(HKEY);

    impl OwnedKey {
        fn open_local_machine(subkey: &[u16], access: KeyAccess) -> io::Result<Self> {
            let mut hkey: HKEY = 0;
            cvt_status(unsafe {
                RegOpenKeyExW(
                    HKEY_LOCAL_MACHINE,
                    subkey.as_ptr(),
                    0,
                    access.bits(),
                    &mut hkey,
                )
            })?;
            Ok(OwnedKey(hkey))
        }

        fn query_dword(&self, value: &[u16]) -> io::Result<u32> {
            let mut data: u32 = 0;
            let mut kind = 0;
            let mut len = mem::size_of::<u32>() as u32;
            cvt_status(unsafe {
                RegQueryValueExW(
                    self.0,
                    value.as_ptr(),
                    ptr::null(),
                    &mut kind,
                    &mut data as *mut u32 as *mut u8,
                    &mut len,
                )
            })?;
            if kind != REG_DWORD || len as usize != mem::size_of::<u32>() {
                return Err(io::Error::from_raw_os_error(ERROR_INVALID_DATA as i32));
            }
            Ok(data)
        }
    }

    impl Drop for OwnedKey {
        fn drop(&mut self) {
            unsafe {
                RegCloseKey(self.0);
            }
        }
    }

    /// Reads a `REG_DWORD` MHz value below `HKEY_LOCAL_MACHINE`.
    #[derive(Debug, Clone)]
    pub struct RegistryFrequency {
        key: Vec<u16>,
        value: Vec<u16>,
        access: KeyAccess,
    }

    impl RegistryFrequency {
        pub fn new(key: &str, value: &str, access: KeyAccess) -> Self {
            RegistryFrequency {
                key: to_wide(key),
                value: to_wide(value),
                access,
            }
        }
    }

    impl Default for RegistryFrequency {
        fn default() -> Self {
            Self::new(super::CENTRAL_PROCESSOR_KEY, super::MHZ_VALUE, KeyAccess::READ)
        }
    }

    impl FrequencyRegistrySource for RegistryFrequency {
        fn nominal_mhz(&self) -> io::Result<u32> {
            let key = OwnedKey::open_local_machine(&self.key, self.access)?;
            key.query_dword(&self.value)
        }
    }

}

//! Device Reader - physical mouse polling for Glidepoint
//!
//! Provides abstraction over platform-specific mouse state APIs:
//! - Windows: cursor position deltas and async key state
//! - Everywhere: a feedable virtual mouse for dry runs and tests

mod error;
mod traits;
mod virtual_device;

#[cfg(target_os = "windows")]
mod windows;

pub use error::*;
pub use traits::*;
pub use virtual_device::VirtualMouse;

#[cfg(target_os = "windows")]
pub use windows::WindowsMouseReader;

/// Create a platform-appropriate device reader
pub fn create_reader() -> DeviceResult<Box<dyn DeviceReader>> {
    #[cfg(target_os = "windows")]
    {
        Ok(Box::new(WindowsMouseReader::new()?))
    }

    #[cfg(not(target_os = "windows"))]
    {
        Err(DeviceError::UnsupportedPlatform)
    }
}

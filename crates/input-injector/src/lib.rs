//! Input Injector - OS-level mouse input synthesis for Glidepoint
//!
//! Provides motion, wheel and button injection for the virtual mouse.

mod error;
mod recording;
mod traits;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

pub use error::*;
pub use recording::RecordingInjector;
pub use traits::*;

#[cfg(target_os = "macos")]
pub use macos::MacOSInputInjector;

#[cfg(target_os = "windows")]
pub use windows::WindowsInputInjector;

/// Create a platform-appropriate input injector
pub fn create_injector() -> InjectorResult<Box<dyn InputInjector>> {
    #[cfg(target_os = "macos")]
    {
        Ok(Box::new(MacOSInputInjector::new()?))
    }

    #[cfg(target_os = "windows")]
    {
        Ok(Box::new(WindowsInputInjector::new()?))
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        Err(InjectorError::UnsupportedPlatform)
    }
}

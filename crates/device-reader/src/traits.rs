//! Device reader trait abstraction

use mouse_protocol::PhysicalMouseState;

use crate::DeviceResult;

/// Physical mouse device.
///
/// Implementations block inside `poll` until the device answers. Callers
/// poll at most once per frame and cache the result.
pub trait DeviceReader: Send {
    /// Human readable device name
    fn name(&self) -> &str;

    /// Acquire the device for background, non-exclusive reading
    fn acquire(&mut self) -> DeviceResult<()>;

    /// Release the device. Releasing an unacquired device is a no-op.
    fn release(&mut self);

    /// Check if the device is currently acquired
    fn is_acquired(&self) -> bool;

    /// Read relative motion, wheel and buttons since the previous poll
    fn poll(&mut self) -> DeviceResult<PhysicalMouseState>;

    /// Get polling statistics
    fn stats(&self) -> ReaderStats;
}

/// Reader statistics
#[derive(Debug, Clone, Default)]
pub struct ReaderStats {
    /// Total successful polls
    pub polls: u64,
    /// Polls that returned an error
    pub failed_polls: u64,
}

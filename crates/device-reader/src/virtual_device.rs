//! Software mouse that is fed by hand
//!
//! Used for dry runs and for driving the frame core in tests. Clones share
//! the same device, so a test can keep a handle after boxing one into the
//! core.

use std::sync::Arc;

use mouse_protocol::{ButtonMask, PhysicalMouseState};
use parking_lot::Mutex;
use tracing::debug;

use crate::{DeviceError, DeviceReader, DeviceResult, ReaderStats};

#[derive(Debug, Default)]
struct VirtualState {
    acquired: bool,
    pending_dx: i32,
    pending_dy: i32,
    pending_wheel: i32,
    buttons: ButtonMask,
    refuse_acquire: bool,
    fail_next_poll: bool,
    stats: ReaderStats,
}

/// A virtual mouse device
#[derive(Debug, Clone)]
pub struct VirtualMouse {
    name: String,
    state: Arc<Mutex<VirtualState>>,
}

impl VirtualMouse {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            state: Arc::new(Mutex::new(VirtualState::default())),
        }
    }

    /// Add motion that the next poll will report
    pub fn move_by(&self, dx: i32, dy: i32) {
        let mut state = self.state.lock();
        state.pending_dx += dx;
        state.pending_dy += dy;
    }

    /// Add wheel motion that the next poll will report
    pub fn scroll(&self, wheel: i32) {
        self.state.lock().pending_wheel += wheel;
    }

    /// Hold a button down until `release` is called
    pub fn press(&self, index: u32) {
        let mut state = self.state.lock();
        state.buttons = state.buttons.with(index, true);
    }

    pub fn release(&self, index: u32) {
        let mut state = self.state.lock();
        state.buttons = state.buttons.with(index, false);
    }

    /// Make every following `acquire` fail, as an unplugged device would
    pub fn refuse_acquire(&self, refuse: bool) {
        self.state.lock().refuse_acquire = refuse;
    }

    /// Make the next `poll` fail once
    pub fn fail_next_poll(&self) {
        self.state.lock().fail_next_poll = true;
    }

    /// Number of successful polls so far, across all clones
    pub fn poll_count(&self) -> u64 {
        self.state.lock().stats.polls
    }
}

impl Default for VirtualMouse {
    fn default() -> Self {
        Self::new("Virtual Mouse")
    }
}

impl DeviceReader for VirtualMouse {
    fn name(&self) -> &str {
        &self.name
    }

    fn acquire(&mut self) -> DeviceResult<()> {
        let mut state = self.state.lock();
        if state.refuse_acquire {
            return Err(DeviceError::AcquireFailed(format!("{} is unplugged", self.name)));
        }
        if state.acquired {
            return Err(DeviceError::AlreadyAcquired);
        }
        state.acquired = true;
        debug!(device = %self.name, "Virtual mouse acquired");
        Ok(())
    }

    fn release(&mut self) {
        let mut state = self.state.lock();
        if state.acquired {
            state.acquired = false;
            debug!(device = %self.name, "Virtual mouse released");
        }
    }

    fn is_acquired(&self) -> bool {
        self.state.lock().acquired
    }

    fn poll(&mut self) -> DeviceResult<PhysicalMouseState> {
        let mut state = self.state.lock();
        if !state.acquired {
            return Err(DeviceError::NotAcquired);
        }
        if state.fail_next_poll {
            state.fail_next_poll = false;
            state.stats.failed_polls += 1;
            return Err(DeviceError::PollFailed("injected poll failure".into()));
        }

        let polled = PhysicalMouseState {
            dx: state.pending_dx,
            dy: state.pending_dy,
            wheel: state.pending_wheel,
            buttons: state.buttons,
        };
        state.pending_dx = 0;
        state.pending_dy = 0;
        state.pending_wheel = 0;
        state.stats.polls += 1;
        Ok(polled)
    }

    fn stats(&self) -> ReaderStats {
        self.state.lock().stats.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_requires_acquire() {
        let mut mouse = VirtualMouse::default();
        assert!(matches!(mouse.poll(), Err(DeviceError::NotAcquired)));

        mouse.acquire().unwrap();
        assert!(mouse.is_acquired());
        assert!(matches!(mouse.acquire(), Err(DeviceError::AlreadyAcquired)));
    }

    #[test]
    fn test_motion_drains_per_poll() {
        let mut mouse = VirtualMouse::default();
        let handle = mouse.clone();
        mouse.acquire().unwrap();

        handle.move_by(3, -2);
        handle.move_by(1, 0);
        handle.scroll(120);
        handle.press(1);

        let first = mouse.poll().unwrap();
        assert_eq!((first.dx, first.dy, first.wheel), (4, -2, 120));
        assert!(first.is_held(1));

        let second = mouse.poll().unwrap();
        assert_eq!((second.dx, second.dy, second.wheel), (0, 0, 0));
        // Buttons stay held across polls
        assert!(second.is_held(1));
        assert_eq!(handle.poll_count(), 2);
    }

    #[test]
    fn test_injected_failures() {
        let mut mouse = VirtualMouse::default();
        mouse.refuse_acquire(true);
        assert!(matches!(mouse.acquire(), Err(DeviceError::AcquireFailed(_))));

        mouse.refuse_acquire(false);
        mouse.acquire().unwrap();
        mouse.fail_next_poll();
        assert!(matches!(mouse.poll(), Err(DeviceError::PollFailed(_))));
        assert!(mouse.poll().is_ok());
        assert_eq!(mouse.stats().failed_polls, 1);

        DeviceReader::release(&mut mouse);
        DeviceReader::release(&mut mouse);
        assert!(!mouse.is_acquired());
    }
}

//! Per-frame cache of the physical device and press detection

use device_reader::{DeviceReader, DeviceResult};
use mouse_protocol::{MAX_PHYSICAL_BUTTONS, PhysicalMouseState};
use tracing::trace;

/// Read-through cache of one device poll.
///
/// The first read after `invalidate` polls; later reads in the same frame
/// reuse the snapshot. A failed poll is not cached.
#[derive(Debug, Clone, Default)]
pub struct PhysicalCache {
    snapshot: Option<PhysicalMouseState>,
}

impl PhysicalCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, reader: &mut dyn DeviceReader) -> DeviceResult<PhysicalMouseState> {
        if let Some(state) = self.snapshot {
            return Ok(state);
        }
        let state = reader.poll()?;
        trace!(dx = state.dx, dy = state.dy, wheel = state.wheel, buttons = state.buttons.0, "Polled device");
        self.snapshot = Some(state);
        Ok(state)
    }

    /// Force the next read to poll
    pub fn invalidate(&mut self) {
        self.snapshot = None;
    }

    pub fn is_fresh(&self) -> bool {
        self.snapshot.is_some()
    }
}

/// Detects physical down-edges between successive queries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PressedDetector {
    last_seen: [bool; MAX_PHYSICAL_BUTTONS as usize],
}

impl PressedDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when `index` is held now and was not held at the previous query
    pub fn observe(&mut self, index: u32, state: &PhysicalMouseState) -> bool {
        let Some(last) = self.last_seen.get_mut(index as usize) else {
            return false;
        };
        let held = state.is_held(index);
        let pressed = held && !*last;
        *last = held;
        pressed
    }
}

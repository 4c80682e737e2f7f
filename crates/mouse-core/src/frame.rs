//! The mutable per-frame state bundle

use crate::{
    ButtonEdgeTracker, FrameAccumulator, MouseConfig, PhysicalCache, PointerMode, PressPulseQueue,
    PressedDetector,
};

/// Everything scripts and the dispatcher mutate.
///
/// On a multi-threaded host this whole bundle sits behind one lock so a
/// frame flush never interleaves with script writes.
#[derive(Debug, Clone, Default)]
pub struct FrameState {
    pub accumulator: FrameAccumulator,
    pub buttons: ButtonEdgeTracker,
    pub pulses: PressPulseQueue,
    pub physical: PhysicalCache,
    pub pressed: PressedDetector,
    pub mode: PointerMode,
}

impl FrameState {
    pub fn new(config: &MouseConfig) -> Self {
        Self {
            mode: config.initial_mode(),
            ..Default::default()
        }
    }
}

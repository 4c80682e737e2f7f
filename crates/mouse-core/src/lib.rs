//! Mouse Core - per-frame virtual mouse state for Glidepoint
//!
//! Scripts write motion, wheel and button intents at any rate during a
//! frame. At the frame boundary the dispatcher turns them into at most one
//! motion event plus the button edges that actually changed state, and the
//! physical device is re-polled lazily on the next read.

mod accumulator;
mod buttons;
mod config;
mod dispatcher;
mod error;
mod frame;
mod global;
mod physical;
mod plugin;
mod pulse;
mod scaling;
mod shared;

pub use accumulator::FrameAccumulator;
pub use buttons::ButtonEdgeTracker;
pub use config::*;
pub use dispatcher::{FrameDispatcher, FramePhase, FrameReport};
pub use error::*;
pub use frame::FrameState;
pub use global::MouseGlobal;
pub use physical::{PhysicalCache, PressedDetector};
pub use plugin::MousePlugin;
pub use pulse::{PressPulseQueue, PulseDrain};
pub use scaling::{Axis, PointerMode, to_device_scale};
pub use shared::SharedMouse;

pub use mouse_protocol::{SCALING_FACTOR, WHEEL_MAX};

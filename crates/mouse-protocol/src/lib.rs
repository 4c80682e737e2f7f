//! Shared Mouse Protocol Definitions for Glidepoint
//!
//! This crate contains the button, motion and trace types shared between
//! the device reader, the input injector and the frame core.

mod error;
mod input;
mod trace;

pub use error::*;
pub use input::*;
pub use trace::*;

/// Device-scale extent of an absolute coordinate (normalised 1.0 maps here)
pub const SCALING_FACTOR: u32 = 65535;

/// One wheel notch, as reported and injected by the OS
pub const WHEEL_MAX: i32 = 120;

/// Number of buttons a physical poll can report
pub const MAX_PHYSICAL_BUTTONS: u32 = 8;

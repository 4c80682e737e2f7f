//! Pointer mode and absolute coordinate scaling

use std::fmt;

use mouse_protocol::SCALING_FACTOR;
use serde::{Deserialize, Serialize};

use crate::{MouseError, MouseResult};

/// Pointer axis, used for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("X"),
            Axis::Y => f.write_str("Y"),
        }
    }
}

/// Which motion channel a flush sends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerMode {
    /// Normalised screen targets
    #[default]
    Absolute,
    /// Deltas from the current position
    Relative,
}

impl PointerMode {
    pub fn from_absolute_flag(absolute: bool) -> Self {
        if absolute {
            PointerMode::Absolute
        } else {
            PointerMode::Relative
        }
    }

    pub fn is_absolute(self) -> bool {
        matches!(self, PointerMode::Absolute)
    }
}

/// Convert a normalised `[0, 1]` coordinate to the device grid.
///
/// Rounds to nearest, so 0.5 lands on 32768.
pub fn to_device_scale(axis: Axis, value: f64) -> MouseResult<u32> {
    // NaN fails both comparisons and is rejected too
    if !(0.0..=1.0).contains(&value) {
        return Err(MouseError::OutOfRange { axis, value });
    }
    Ok((value * SCALING_FACTOR as f64).round() as u32)
}

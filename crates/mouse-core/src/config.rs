//! Mouse plugin configuration

use mouse_protocol::{MouseButton, WHEEL_MAX};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{MouseError, MouseResult, PointerMode};

/// What to do with a synthetic button index outside 0..=2
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonIndexPolicy {
    /// Anything other than 0 (left) or 1 (right) drives the middle button
    #[default]
    FallbackToMiddle,
    /// Indices above 2 are rejected with `InvalidButton`
    Reject,
}

impl ButtonIndexPolicy {
    /// Resolve a script index to a synthesizable button
    pub fn resolve(self, index: u32) -> MouseResult<MouseButton> {
        match self {
            ButtonIndexPolicy::FallbackToMiddle => {
                if index > 2 {
                    trace!(index, "Button index mapped to middle");
                }
                Ok(MouseButton::from_index_or_middle(index))
            }
            ButtonIndexPolicy::Reject => {
                MouseButton::from_index(index).ok_or(MouseError::InvalidButton(index))
            }
        }
    }
}

/// Mouse plugin configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MouseConfig {
    /// Start in absolute mode
    pub absolute_mode: bool,
    /// Handling of synthetic button indices outside 0..=2
    pub button_index_policy: ButtonIndexPolicy,
    /// Wheel value written by `wheelUp` / `wheelDown`
    pub wheel_step: i32,
}

impl Default for MouseConfig {
    fn default() -> Self {
        Self {
            absolute_mode: true,
            button_index_policy: ButtonIndexPolicy::FallbackToMiddle,
            wheel_step: WHEEL_MAX,
        }
    }
}

impl MouseConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> MouseResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| MouseError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> MouseResult<()> {
        if self.wheel_step <= 0 {
            return Err(MouseError::Config(format!(
                "wheel_step must be positive, got {}",
                self.wheel_step
            )));
        }
        Ok(())
    }

    pub fn initial_mode(&self) -> PointerMode {
        PointerMode::from_absolute_flag(self.absolute_mode)
    }
}

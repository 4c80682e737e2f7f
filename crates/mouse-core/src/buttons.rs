//! Synthetic button hold state and edge emission

use input_injector::InputInjector;
use mouse_protocol::{ButtonEvent, KeyState, MouseButton};
use tracing::{debug, warn};

use crate::MouseResult;

/// Last hold state injected for each synthetic button.
///
/// This is output state only; the physical device is never consulted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ButtonEdgeTracker {
    held: [bool; MouseButton::ALL.len()],
}

impl ButtonEdgeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the last injected state for `button` is down
    pub fn is_held(&self, button: MouseButton) -> bool {
        self.held[button.index() as usize]
    }

    /// Drive `button` to `desired`, injecting an edge only on change.
    ///
    /// Returns the edge that was emitted, or `None` when the state already
    /// matched. The stored state follows `desired` even if injection fails.
    pub fn set_held(
        &mut self,
        button: MouseButton,
        desired: bool,
        injector: &dyn InputInjector,
    ) -> MouseResult<Option<ButtonEvent>> {
        let slot = &mut self.held[button.index() as usize];
        if *slot == desired {
            return Ok(None);
        }
        *slot = desired;

        let event = ButtonEvent {
            button,
            state: KeyState::from_held(desired),
        };
        debug!(?button, state = ?event.state, "Button edge");
        if let Err(e) = injector.inject_button(&event) {
            warn!(?button, error = %e, "Button edge injection failed");
            return Err(e.into());
        }
        Ok(Some(event))
    }
}

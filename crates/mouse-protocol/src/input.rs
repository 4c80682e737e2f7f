//! Mouse input definitions shared by readers, injectors and the core

use serde::{Deserialize, Serialize};

use crate::MAX_PHYSICAL_BUTTONS;

/// Synthesizable mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// All synthesizable buttons in index order
    pub const ALL: [MouseButton; 3] = [MouseButton::Left, MouseButton::Right, MouseButton::Middle];

    /// Script-facing index of this button
    pub fn index(self) -> u32 {
        match self {
            MouseButton::Left => 0,
            MouseButton::Right => 1,
            MouseButton::Middle => 2,
        }
    }

    /// Strict lookup: only 0, 1 and 2 name a button
    pub fn from_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(MouseButton::Left),
            1 => Some(MouseButton::Right),
            2 => Some(MouseButton::Middle),
            _ => None,
        }
    }

    /// Lenient lookup: anything that isn't left or right lands on middle.
    ///
    /// Scripts written against the three-button model pass arbitrary
    /// indices for "the other button", so the middle bucket is intentional.
    pub fn from_index_or_middle(index: u32) -> Self {
        match index {
            0 => MouseButton::Left,
            1 => MouseButton::Right,
            _ => MouseButton::Middle,
        }
    }
}

/// Button press state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyState {
    Pressed,
    Released,
}

impl KeyState {
    pub fn from_held(held: bool) -> Self {
        if held { KeyState::Pressed } else { KeyState::Released }
    }
}

/// Bitmask of physically held buttons, bit `n` = button index `n`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonMask(pub u8);

impl ButtonMask {
    pub fn empty() -> Self {
        Self(0)
    }

    /// Whether button `index` is held. Indices past the poll width read as released.
    pub fn is_set(self, index: u32) -> bool {
        index < MAX_PHYSICAL_BUTTONS && self.0 & (1 << index) != 0
    }

    /// Return a copy with button `index` set or cleared
    pub fn with(mut self, index: u32, held: bool) -> Self {
        if index < MAX_PHYSICAL_BUTTONS {
            if held {
                self.0 |= 1 << index;
            } else {
                self.0 &= !(1 << index);
            }
        }
        self
    }
}

/// One poll of the physical device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicalMouseState {
    /// Relative X motion since the previous poll
    pub dx: i32,
    /// Relative Y motion since the previous poll
    pub dy: i32,
    /// Wheel motion since the previous poll
    pub wheel: i32,
    /// Held buttons
    pub buttons: ButtonMask,
}

impl PhysicalMouseState {
    pub fn is_held(&self, index: u32) -> bool {
        self.buttons.is_set(index)
    }
}

/// Pointer channel a motion event travels on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Motion {
    /// Delta from the current cursor position, in device units
    Relative { dx: i32, dy: i32 },
    /// Target position on the 0..=65535 device grid
    Absolute { x: u32, y: u32 },
}

/// A single synthesized motion + wheel event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotionEvent {
    pub motion: Motion,
    pub wheel: i32,
}

impl MotionEvent {
    pub fn relative(dx: i32, dy: i32, wheel: i32) -> Self {
        Self {
            motion: Motion::Relative { dx, dy },
            wheel,
        }
    }

    pub fn absolute(x: u32, y: u32, wheel: i32) -> Self {
        Self {
            motion: Motion::Absolute { x, y },
            wheel,
        }
    }
}

/// A single synthesized button edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonEvent {
    pub button: MouseButton,
    pub state: KeyState,
}

impl ButtonEvent {
    pub fn down(button: MouseButton) -> Self {
        Self {
            button,
            state: KeyState::Pressed,
        }
    }

    pub fn up(button: MouseButton) -> Self {
        Self {
            button,
            state: KeyState::Released,
        }
    }
}

/// Anything handed to an input injector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InjectedInput {
    Motion(MotionEvent),
    Button(ButtonEvent),
}

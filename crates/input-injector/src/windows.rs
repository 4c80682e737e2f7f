//! Windows input injection using SendInput

use mouse_protocol::{ButtonEvent, KeyState, Motion, MotionEvent, MouseButton};
use tracing::{debug, info};
use windows::Win32::Foundation::GetLastError;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    INPUT, INPUT_0, INPUT_MOUSE, MOUSE_EVENT_FLAGS, MOUSEEVENTF_ABSOLUTE, MOUSEEVENTF_LEFTDOWN,
    MOUSEEVENTF_LEFTUP, MOUSEEVENTF_MIDDLEDOWN, MOUSEEVENTF_MIDDLEUP, MOUSEEVENTF_MOVE,
    MOUSEEVENTF_RIGHTDOWN, MOUSEEVENTF_RIGHTUP, MOUSEEVENTF_WHEEL, MOUSEINPUT, SendInput,
};

use crate::{InjectorError, InjectorResult, InputInjector};

/// Windows input injector using SendInput
pub struct WindowsInputInjector;

impl WindowsInputInjector {
    /// Create a new Windows input injector
    pub fn new() -> InjectorResult<Self> {
        info!("Initializing Windows input injector");
        Ok(Self)
    }

    fn button_flag(event: &ButtonEvent) -> MOUSE_EVENT_FLAGS {
        match (event.button, event.state) {
            (MouseButton::Left, KeyState::Pressed) => MOUSEEVENTF_LEFTDOWN,
            (MouseButton::Left, KeyState::Released) => MOUSEEVENTF_LEFTUP,
            (MouseButton::Right, KeyState::Pressed) => MOUSEEVENTF_RIGHTDOWN,
            (MouseButton::Right, KeyState::Released) => MOUSEEVENTF_RIGHTUP,
            (MouseButton::Middle, KeyState::Pressed) => MOUSEEVENTF_MIDDLEDOWN,
            (MouseButton::Middle, KeyState::Released) => MOUSEEVENTF_MIDDLEUP,
        }
    }

    fn send(dx: i32, dy: i32, mouse_data: u32, flags: MOUSE_EVENT_FLAGS) -> InjectorResult<()> {
        let input = INPUT {
            r#type: INPUT_MOUSE,
            Anonymous: INPUT_0 {
                mi: MOUSEINPUT {
                    dx,
                    dy,
                    mouseData: mouse_data,
                    dwFlags: flags,
                    time: 0,
                    dwExtraInfo: 0,
                },
            },
        };

        // SAFETY: Win32 call; we pass a single INPUT struct slice.
        let sent = unsafe { SendInput(&[input], std::mem::size_of::<INPUT>() as i32) };
        if sent == 0 {
            let err = unsafe { GetLastError() };
            Err(InjectorError::InjectionFailed(format!(
                "SendInput failed: 0x{:08X}",
                err.0
            )))
        } else {
            Ok(())
        }
    }
}

impl InputInjector for WindowsInputInjector {
    fn has_permission(&self) -> bool {
        true
    }

    fn request_permission(&self) -> InjectorResult<bool> {
        Ok(true)
    }

    fn inject_motion(&self, event: &MotionEvent) -> InjectorResult<()> {
        // Wheel data is a signed count carried in an unsigned field
        let mouse_data = event.wheel as u32;
        let flags = MOUSEEVENTF_MOVE | MOUSEEVENTF_WHEEL;

        match event.motion {
            Motion::Absolute { x, y } => {
                debug!(x, y, wheel = event.wheel, "Injecting absolute motion");
                Self::send(x as i32, y as i32, mouse_data, flags | MOUSEEVENTF_ABSOLUTE)
            }
            Motion::Relative { dx, dy } => {
                debug!(dx, dy, wheel = event.wheel, "Injecting relative motion");
                Self::send(dx, dy, mouse_data, flags)
            }
        }
    }

    fn inject_button(&self, event: &ButtonEvent) -> InjectorResult<()> {
        debug!(button = ?event.button, state = ?event.state, "Injecting button edge");
        Self::send(0, 0, 0, Self::button_flag(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_flags() {
        assert_eq!(
            WindowsInputInjector::button_flag(&ButtonEvent::down(MouseButton::Middle)),
            MOUSEEVENTF_MIDDLEDOWN
        );
        assert_eq!(
            WindowsInputInjector::button_flag(&ButtonEvent::up(MouseButton::Right)),
            MOUSEEVENTF_RIGHTUP
        );
    }
}

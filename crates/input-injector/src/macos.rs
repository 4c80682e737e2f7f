//! macOS input injection using CGEvent

use core_foundation::base::TCFType;
use core_foundation::boolean::CFBoolean;
use core_foundation::dictionary::CFDictionary;
use core_foundation::string::CFString;
use core_graphics::display::{CGDisplay, CGPoint};
use core_graphics::geometry::CGRect;
use core_graphics::event::{CGEvent, CGEventTapLocation, CGEventType, CGMouseButton};
use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};
use mouse_protocol::{ButtonEvent, KeyState, Motion, MotionEvent, MouseButton, SCALING_FACTOR};
use tracing::{debug, info, warn};

use crate::{InjectorError, InjectorResult, InputInjector};

/// macOS input injector using Core Graphics events
pub struct MacOSInputInjector;

impl MacOSInputInjector {
    /// Create a new macOS input injector
    pub fn new() -> InjectorResult<Self> {
        info!("Initializing macOS input injector");
        Ok(Self)
    }

    fn source() -> InjectorResult<CGEventSource> {
        CGEventSource::new(CGEventSourceStateID::HIDSystemState)
            .map_err(|_| InjectorError::Platform("Failed to create event source".into()))
    }

    fn cursor_location() -> InjectorResult<CGPoint> {
        let event = CGEvent::new(Self::source()?)
            .map_err(|_| InjectorError::Platform("Failed to create event".into()))?;
        Ok(event.location())
    }

    /// Map a 0..=65535 grid position onto the main display, in points
    fn grid_to_points(x: u32, y: u32) -> CGPoint {
        let bounds = CGDisplay::main().bounds();
        Self::scale_into(x, y, bounds)
    }

    fn scale_into(x: u32, y: u32, bounds: CGRect) -> CGPoint {
        let scale = SCALING_FACTOR as f64;
        CGPoint::new(
            bounds.origin.x + x as f64 / scale * bounds.size.width,
            bounds.origin.y + y as f64 / scale * bounds.size.height,
        )
    }

    fn post_mouse(event_type: CGEventType, point: CGPoint, button: CGMouseButton) -> InjectorResult<()> {
        let event = CGEvent::new_mouse_event(Self::source()?, event_type, point, button)
            .map_err(|_| InjectorError::Platform("Failed to create event".into()))?;
        event.post(CGEventTapLocation::HID);
        Ok(())
    }
}

impl InputInjector for MacOSInputInjector {
    fn has_permission(&self) -> bool {
        unsafe { AXIsProcessTrusted() }
    }

    fn request_permission(&self) -> InjectorResult<bool> {
        info!("Requesting accessibility permission");
        let prompt_key = CFString::new("kAXTrustedCheckOptionPrompt");
        let prompt_value = CFBoolean::true_value();
        let options = CFDictionary::from_CFType_pairs(&[(prompt_key, prompt_value)]);

        let granted = unsafe { AXIsProcessTrustedWithOptions(options.as_concrete_TypeRef()) };
        Ok(granted)
    }

    fn inject_motion(&self, event: &MotionEvent) -> InjectorResult<()> {
        if !self.has_permission() {
            return Err(InjectorError::PermissionDenied);
        }

        let point = match event.motion {
            Motion::Absolute { x, y } => Self::grid_to_points(x, y),
            Motion::Relative { dx, dy } => {
                let current = Self::cursor_location()?;
                CGPoint::new(current.x + dx as f64, current.y + dy as f64)
            }
        };
        debug!(x = point.x, y = point.y, "Injecting mouse move");
        Self::post_mouse(CGEventType::MouseMoved, point, CGMouseButton::Left)?;

        if event.wheel != 0 {
            // CGEvent::new_scroll_event is not exposed by the core-graphics wrapper we build against
            warn!(wheel = event.wheel, "Wheel injection not supported on macOS");
        }
        Ok(())
    }

    fn inject_button(&self, event: &ButtonEvent) -> InjectorResult<()> {
        if !self.has_permission() {
            return Err(InjectorError::PermissionDenied);
        }

        let (event_type, cg_button) = match (event.button, event.state) {
            (MouseButton::Left, KeyState::Pressed) => (CGEventType::LeftMouseDown, CGMouseButton::Left),
            (MouseButton::Left, KeyState::Released) => (CGEventType::LeftMouseUp, CGMouseButton::Left),
            (MouseButton::Right, KeyState::Pressed) => (CGEventType::RightMouseDown, CGMouseButton::Right),
            (MouseButton::Right, KeyState::Released) => (CGEventType::RightMouseUp, CGMouseButton::Right),
            (MouseButton::Middle, KeyState::Pressed) => (CGEventType::OtherMouseDown, CGMouseButton::Center),
            (MouseButton::Middle, KeyState::Released) => (CGEventType::OtherMouseUp, CGMouseButton::Center),
        };

        debug!(button = ?event.button, state = ?event.state, "Injecting button edge");
        Self::post_mouse(event_type, Self::cursor_location()?, cg_button)
    }
}

#[link(name = "ApplicationServices", kind = "framework")]
unsafe extern "C" {
    fn AXIsProcessTrusted() -> bool;
    fn AXIsProcessTrustedWithOptions(
        options: core_foundation::dictionary::CFDictionaryRef,
    ) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_graphics::geometry::CGSize;

    #[test]
    fn test_macos_injector_creation() {
        let _injector = MacOSInputInjector::new().unwrap();
    }

    #[test]
    fn test_grid_scales_into_points() {
        // A 2880x1800 pixel Retina panel is 1440x900 points
        let bounds = CGRect::new(&CGPoint::new(0.0, 0.0), &CGSize::new(1440.0, 900.0));

        let end = MacOSInputInjector::scale_into(SCALING_FACTOR, SCALING_FACTOR, bounds);
        assert_eq!((end.x, end.y), (1440.0, 900.0));

        let mid = MacOSInputInjector::scale_into(32768, 0, bounds);
        assert!((mid.x - 720.0).abs() < 0.1);
        assert_eq!(mid.y, 0.0);
    }
}

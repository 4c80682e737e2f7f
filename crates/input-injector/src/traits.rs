//! Input injector trait abstraction

use mouse_protocol::{ButtonEvent, MotionEvent};

use crate::InjectorResult;

/// Input injector trait.
///
/// Injection is fire-and-forget: a failed call is reported but never
/// retried by the caller.
pub trait InputInjector: Send + Sync {
    /// Check if we have permission to inject input
    fn has_permission(&self) -> bool;

    /// Request permission (may show system dialog)
    fn request_permission(&self) -> InjectorResult<bool>;

    /// Inject one combined motion + wheel event
    fn inject_motion(&self, event: &MotionEvent) -> InjectorResult<()>;

    /// Inject one button edge
    fn inject_button(&self, event: &ButtonEvent) -> InjectorResult<()>;
}

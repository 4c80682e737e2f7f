//! In-memory injector that records instead of touching the OS

use std::sync::Arc;

use mouse_protocol::{ButtonEvent, InjectedInput, MotionEvent};
use parking_lot::Mutex;
use tracing::trace;

use crate::{InjectorError, InjectorResult, InputInjector};

#[derive(Debug, Default)]
struct Recorded {
    inputs: Vec<InjectedInput>,
    failing: bool,
}

/// Records every injected input. Clones share the same recording.
#[derive(Debug, Clone, Default)]
pub struct RecordingInjector {
    recorded: Arc<Mutex<Recorded>>,
}

impl RecordingInjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far
    pub fn inputs(&self) -> Vec<InjectedInput> {
        self.recorded.lock().inputs.clone()
    }

    /// Drain the recording
    pub fn take(&self) -> Vec<InjectedInput> {
        std::mem::take(&mut self.recorded.lock().inputs)
    }

    pub fn motions(&self) -> Vec<MotionEvent> {
        self.recorded
            .lock()
            .inputs
            .iter()
            .filter_map(|input| match input {
                InjectedInput::Motion(event) => Some(*event),
                InjectedInput::Button(_) => None,
            })
            .collect()
    }

    pub fn buttons(&self) -> Vec<ButtonEvent> {
        self.recorded
            .lock()
            .inputs
            .iter()
            .filter_map(|input| match input {
                InjectedInput::Button(event) => Some(*event),
                InjectedInput::Motion(_) => None,
            })
            .collect()
    }

    /// While set, every injection fails and nothing is recorded
    pub fn set_failing(&self, failing: bool) {
        self.recorded.lock().failing = failing;
    }

    fn record(&self, input: InjectedInput) -> InjectorResult<()> {
        let mut recorded = self.recorded.lock();
        if recorded.failing {
            return Err(InjectorError::InjectionFailed("recording injector set to fail".into()));
        }
        trace!(?input, "Recorded input");
        recorded.inputs.push(input);
        Ok(())
    }
}

impl InputInjector for RecordingInjector {
    fn has_permission(&self) -> bool {
        true
    }

    fn request_permission(&self) -> InjectorResult<bool> {
        Ok(true)
    }

    fn inject_motion(&self, event: &MotionEvent) -> InjectorResult<()> {
        self.record(InjectedInput::Motion(*event))
    }

    fn inject_button(&self, event: &ButtonEvent) -> InjectorResult<()> {
        self.record(InjectedInput::Button(*event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mouse_protocol::MouseButton;

    #[test]
    fn test_clones_share_recording() {
        let injector = RecordingInjector::new();
        let handle = injector.clone();

        injector.inject_motion(&MotionEvent::relative(2, 3, 0)).unwrap();
        injector.inject_button(&ButtonEvent::down(MouseButton::Right)).unwrap();

        assert_eq!(handle.motions(), vec![MotionEvent::relative(2, 3, 0)]);
        assert_eq!(handle.buttons(), vec![ButtonEvent::down(MouseButton::Right)]);
        assert_eq!(handle.take().len(), 2);
        assert!(injector.inputs().is_empty());
    }

    #[test]
    fn test_failing_injector_records_nothing() {
        let injector = RecordingInjector::new();
        injector.set_failing(true);

        assert!(matches!(
            injector.inject_button(&ButtonEvent::down(MouseButton::Left)),
            Err(InjectorError::InjectionFailed(_))
        ));
        assert!(injector.inputs().is_empty());

        injector.set_failing(false);
        injector.inject_button(&ButtonEvent::up(MouseButton::Left)).unwrap();
        assert_eq!(injector.buttons(), vec![ButtonEvent::up(MouseButton::Left)]);
    }
}

//! Frame boundary orchestration

use input_injector::InputInjector;
use mouse_protocol::{ButtonEvent, MotionEvent};
use tracing::{debug, trace, warn};

use crate::FrameState;

/// Where the dispatcher is within a frame boundary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FramePhase {
    /// Between frames, scripts may write
    #[default]
    Idle,
    /// Physical snapshot dropped, next read re-polls
    Polling,
    /// Motion flush and pulse drain in progress
    Flushing,
}

/// What one frame boundary injected
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Frame counter, starting at 1
    pub frame: u64,
    /// Motion event handed to the injector, if any
    pub motion: Option<MotionEvent>,
    /// Button edges that reached the injector, in order
    pub buttons: Vec<ButtonEvent>,
    /// Inputs the injector refused; they are not retried
    pub injection_failures: usize,
}

impl FrameReport {
    /// Whether the injector was left alone this frame
    pub fn is_empty(&self) -> bool {
        self.motion.is_none() && self.buttons.is_empty() && self.injection_failures == 0
    }
}

/// Runs the fixed frame boundary sequence: invalidate the physical
/// snapshot, send at most one motion event, drain queued pulses.
#[derive(Debug, Default)]
pub struct FrameDispatcher {
    phase: FramePhase,
    frames: u64,
}

impl FrameDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FramePhase {
        self.phase
    }

    /// Number of completed frame boundaries
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn dispatch(&mut self, state: &mut FrameState, injector: &dyn InputInjector) -> FrameReport {
        self.frames += 1;
        let mut report = FrameReport {
            frame: self.frames,
            ..Default::default()
        };

        self.enter(FramePhase::Polling);
        state.physical.invalidate();

        self.enter(FramePhase::Flushing);
        if let Some(event) = state.accumulator.flush(state.mode) {
            debug!(?event, "Injecting motion");
            match injector.inject_motion(&event) {
                Ok(()) => report.motion = Some(event),
                Err(e) => {
                    warn!(error = %e, frame = self.frames, "Motion injection failed");
                    report.injection_failures += 1;
                }
            }
        }

        let drained = state.pulses.drain(&mut state.buttons, injector);
        if drained.failures > 0 {
            warn!(failures = drained.failures, frame = self.frames, "Pulse injection failed");
        }
        report.buttons = drained.edges;
        report.injection_failures += drained.failures;

        self.enter(FramePhase::Idle);
        report
    }

    fn enter(&mut self, phase: FramePhase) {
        trace!(from = ?self.phase, to = ?phase, "Frame phase");
        self.phase = phase;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MouseConfig, PointerMode};
    use input_injector::RecordingInjector;
    use mouse_protocol::{InjectedInput, MouseButton};

    fn relative_state() -> FrameState {
        let mut state = FrameState::new(&MouseConfig::default());
        state.mode = PointerMode::Relative;
        state
    }

    #[test]
    fn test_idle_frame_never_injects() {
        let injector = RecordingInjector::new();
        let mut dispatcher = FrameDispatcher::new();
        let mut state = FrameState::new(&MouseConfig::default());

        for _ in 0..3 {
            assert!(dispatcher.dispatch(&mut state, &injector).is_empty());
        }
        assert!(injector.inputs().is_empty());
        assert_eq!(dispatcher.frames(), 3);
        assert_eq!(dispatcher.phase(), FramePhase::Idle);
    }

    #[test]
    fn test_motion_before_pulses() {
        let injector = RecordingInjector::new();
        let mut dispatcher = FrameDispatcher::new();
        let mut state = relative_state();

        state.accumulator.add_delta(3.0, -1.0).unwrap();
        state.pulses.request_pulse(MouseButton::Left);
        let report = dispatcher.dispatch(&mut state, &injector);

        assert_eq!(report.motion, Some(MotionEvent::relative(3, -1, 0)));
        assert_eq!(report.buttons.len(), 2);
        assert_eq!(
            injector.inputs(),
            vec![
                InjectedInput::Motion(MotionEvent::relative(3, -1, 0)),
                InjectedInput::Button(ButtonEvent::down(MouseButton::Left)),
                InjectedInput::Button(ButtonEvent::up(MouseButton::Left)),
            ]
        );
    }

    #[test]
    fn test_single_motion_event_per_frame() {
        let injector = RecordingInjector::new();
        let mut dispatcher = FrameDispatcher::new();
        let mut state = relative_state();

        for _ in 0..10 {
            state.accumulator.add_delta(0.5, 0.25).unwrap();
        }
        state.accumulator.set_wheel(120);
        dispatcher.dispatch(&mut state, &injector);

        assert_eq!(injector.motions(), vec![MotionEvent::relative(5, 2, 120)]);
    }

    #[test]
    fn test_physical_snapshot_invalidated() {
        let injector = RecordingInjector::new();
        let mut dispatcher = FrameDispatcher::new();
        let mut state = relative_state();
        let mut mouse = device_reader::VirtualMouse::default();
        device_reader::DeviceReader::acquire(&mut mouse).unwrap();

        state.physical.get(&mut mouse).unwrap();
        assert!(state.physical.is_fresh());
        dispatcher.dispatch(&mut state, &injector);
        assert!(!state.physical.is_fresh());
    }

    #[test]
    fn test_failed_motion_is_not_retried() {
        let injector = RecordingInjector::new();
        injector.set_failing(true);
        let mut dispatcher = FrameDispatcher::new();
        let mut state = relative_state();

        state.accumulator.add_delta(4.0, 0.0).unwrap();
        let report = dispatcher.dispatch(&mut state, &injector);
        assert_eq!(report.motion, None);
        assert_eq!(report.injection_failures, 1);

        injector.set_failing(false);
        assert!(dispatcher.dispatch(&mut state, &injector).is_empty());
        assert!(injector.inputs().is_empty());
    }
}

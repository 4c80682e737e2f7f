//! Queued press-and-release taps

use input_injector::InputInjector;
use mouse_protocol::{ButtonEvent, MouseButton};

use crate::ButtonEdgeTracker;

/// Outcome of draining the pulse queue
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PulseDrain {
    /// Edges that reached the injector, in order
    pub edges: Vec<ButtonEvent>,
    /// Edges the injector refused
    pub failures: usize,
}

/// Buttons waiting for a tap at the next frame boundary.
///
/// The same button may be queued more than once; each entry is its own tap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PressPulseQueue {
    queued: Vec<MouseButton>,
}

impl PressPulseQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_pulse(&mut self, button: MouseButton) {
        self.queued.push(button);
    }

    pub fn len(&self) -> usize {
        self.queued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queued.is_empty()
    }

    /// Press then release every queued button through `tracker`.
    ///
    /// The queue is always left empty. A button that was already held only
    /// produces the release edge: the tracker never repeats a down edge, so
    /// a tap on a held button is deliberately not a full press and release.
    /// It still ends with the button released.
    pub fn drain(&mut self, tracker: &mut ButtonEdgeTracker, injector: &dyn InputInjector) -> PulseDrain {
        let mut outcome = PulseDrain::default();

        for button in std::mem::take(&mut self.queued) {
            for desired in [true, false] {
                match tracker.set_held(button, desired, injector) {
                    Ok(Some(edge)) => outcome.edges.push(edge),
                    Ok(None) => {}
                    Err(_) => outcome.failures += 1,
                }
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use input_injector::RecordingInjector;

    #[test]
    fn test_pulse_emits_down_then_up() {
        let injector = RecordingInjector::new();
        let mut tracker = ButtonEdgeTracker::new();
        let mut queue = PressPulseQueue::new();

        queue.request_pulse(MouseButton::Right);
        let drained = queue.drain(&mut tracker, &injector);

        assert_eq!(
            drained.edges,
            vec![ButtonEvent::down(MouseButton::Right), ButtonEvent::up(MouseButton::Right)]
        );
        assert_eq!(drained.failures, 0);
        assert!(!tracker.is_held(MouseButton::Right));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_repeated_requests_pulse_independently() {
        let injector = RecordingInjector::new();
        let mut tracker = ButtonEdgeTracker::new();
        let mut queue = PressPulseQueue::new();

        queue.request_pulse(MouseButton::Left);
        queue.request_pulse(MouseButton::Left);
        assert_eq!(queue.len(), 2);

        let drained = queue.drain(&mut tracker, &injector);
        assert_eq!(drained.edges.len(), 4);
        assert_eq!(injector.buttons().len(), 4);
    }

    #[test]
    fn test_pulse_on_held_button_releases_it() {
        let injector = RecordingInjector::new();
        let mut tracker = ButtonEdgeTracker::new();
        let mut queue = PressPulseQueue::new();

        tracker.set_held(MouseButton::Left, true, &injector).unwrap();
        injector.take();

        queue.request_pulse(MouseButton::Left);
        let drained = queue.drain(&mut tracker, &injector);

        assert_eq!(drained.edges, vec![ButtonEvent::up(MouseButton::Left)]);
        assert!(!tracker.is_held(MouseButton::Left));
    }

    #[test]
    fn test_failed_pulse_still_drains() {
        let injector = RecordingInjector::new();
        injector.set_failing(true);
        let mut tracker = ButtonEdgeTracker::new();
        let mut queue = PressPulseQueue::new();

        queue.request_pulse(MouseButton::Middle);
        let drained = queue.drain(&mut tracker, &injector);

        assert!(drained.edges.is_empty());
        assert_eq!(drained.failures, 2);
        assert!(queue.is_empty());
        assert!(!tracker.is_held(MouseButton::Middle));
    }

    #[test]
    fn test_empty_drain_injects_nothing() {
        let injector = RecordingInjector::new();
        let mut tracker = ButtonEdgeTracker::new();
        let drained = PressPulseQueue::new().drain(&mut tracker, &injector);

        assert_eq!(drained, PulseDrain::default());
        assert!(injector.inputs().is_empty());
    }
}

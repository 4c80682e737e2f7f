//! Pending motion and wheel written by the script during one frame

use mouse_protocol::MotionEvent;
use tracing::trace;

use crate::{Axis, MouseError, MouseResult, PointerMode, to_device_scale};

/// Motion and wheel intents waiting for the next frame boundary.
///
/// Relative deltas add up, absolute targets and the wheel overwrite. The
/// two motion channels are independent: a flush only sends and resets the
/// channel of the active mode, the other stays pending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameAccumulator {
    delta_x: f64,
    delta_y: f64,
    absolute_x: Option<u32>,
    absolute_y: Option<u32>,
    wheel: i32,
}

impl FrameAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add to the pending relative motion. No bounds apply, but neither the
    /// delta nor the resulting sum may be infinite or NaN.
    pub fn add_delta(&mut self, dx: f64, dy: f64) -> MouseResult<()> {
        check_finite(Axis::X, dx)?;
        check_finite(Axis::Y, dy)?;
        let sum_x = self.delta_x + dx;
        let sum_y = self.delta_y + dy;
        check_finite(Axis::X, sum_x)?;
        check_finite(Axis::Y, sum_y)?;
        self.delta_x = sum_x;
        self.delta_y = sum_y;
        Ok(())
    }

    pub fn add_delta_x(&mut self, dx: f64) -> MouseResult<()> {
        self.add_delta(dx, 0.0)
    }

    pub fn add_delta_y(&mut self, dy: f64) -> MouseResult<()> {
        self.add_delta(0.0, dy)
    }

    /// Overwrite the pending absolute target with normalised coordinates.
    ///
    /// Both axes are validated before either is stored.
    pub fn set_absolute(&mut self, x: f64, y: f64) -> MouseResult<()> {
        let x = to_device_scale(Axis::X, x)?;
        let y = to_device_scale(Axis::Y, y)?;
        self.absolute_x = Some(x);
        self.absolute_y = Some(y);
        Ok(())
    }

    pub fn set_absolute_x(&mut self, x: f64) -> MouseResult<()> {
        self.absolute_x = Some(to_device_scale(Axis::X, x)?);
        Ok(())
    }

    pub fn set_absolute_y(&mut self, y: f64) -> MouseResult<()> {
        self.absolute_y = Some(to_device_scale(Axis::Y, y)?);
        Ok(())
    }

    /// Overwrite the pending wheel value
    pub fn set_wheel(&mut self, wheel: i32) {
        self.wheel = wheel;
    }

    pub fn pending_delta(&self) -> (f64, f64) {
        (self.delta_x, self.delta_y)
    }

    pub fn pending_absolute(&self) -> (Option<u32>, Option<u32>) {
        (self.absolute_x, self.absolute_y)
    }

    pub fn pending_wheel(&self) -> i32 {
        self.wheel
    }

    /// Take the payload for the active channel plus wheel.
    ///
    /// Returns `None` and leaves everything untouched when every value of
    /// the active channel and the wheel is zero in device units. A target
    /// of exactly (0, 0) therefore counts as nothing to send. Relative
    /// deltas keep their fractional remainder; absolute targets and the
    /// wheel are cleared once sent.
    pub fn flush(&mut self, mode: PointerMode) -> Option<MotionEvent> {
        let event = match mode {
            PointerMode::Relative => {
                let dx = self.delta_x.trunc() as i32;
                let dy = self.delta_y.trunc() as i32;
                if dx == 0 && dy == 0 && self.wheel == 0 {
                    return None;
                }
                self.delta_x -= dx as f64;
                self.delta_y -= dy as f64;
                MotionEvent::relative(dx, dy, self.wheel)
            }
            PointerMode::Absolute => {
                let x = self.absolute_x.unwrap_or(0);
                let y = self.absolute_y.unwrap_or(0);
                if x == 0 && y == 0 && self.wheel == 0 {
                    return None;
                }
                self.absolute_x = None;
                self.absolute_y = None;
                if x == 0 && y == 0 {
                    // Wheel alone must not drag the cursor to the origin
                    MotionEvent::relative(0, 0, self.wheel)
                } else {
                    MotionEvent::absolute(x, y, self.wheel)
                }
            }
        };

        self.wheel = 0;
        trace!(?event, remainder_x = self.delta_x, remainder_y = self.delta_y, "Flushed accumulator");
        Some(event)
    }
}

fn check_finite(axis: Axis, value: f64) -> MouseResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(MouseError::NonFiniteDelta { axis, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_deltas_sum_and_keep_remainder() {
        let mut acc = FrameAccumulator::new();
        for _ in 0..3 {
            acc.add_delta_x(0.4).unwrap();
        }

        assert_eq!(acc.flush(PointerMode::Relative), Some(MotionEvent::relative(1, 0, 0)));
        let (dx, dy) = acc.pending_delta();
        assert!(approx(dx, 0.2));
        assert_eq!(dy, 0.0);
    }

    #[test]
    fn test_sub_pixel_motion_carries_across_frames() {
        let mut acc = FrameAccumulator::new();

        acc.add_delta_x(0.3).unwrap();
        assert_eq!(acc.flush(PointerMode::Relative), None);
        assert!(approx(acc.pending_delta().0, 0.3));

        acc.add_delta_x(0.8).unwrap();
        assert_eq!(acc.flush(PointerMode::Relative), Some(MotionEvent::relative(1, 0, 0)));
        assert!(approx(acc.pending_delta().0, 0.1));
    }

    #[test]
    fn test_negative_deltas_truncate_toward_zero() {
        let mut acc = FrameAccumulator::new();
        acc.add_delta(-1.7, 2.9).unwrap();

        assert_eq!(acc.flush(PointerMode::Relative), Some(MotionEvent::relative(-1, 2, 0)));
        let (dx, dy) = acc.pending_delta();
        assert!(approx(dx, -0.7));
        assert!(approx(dy, 0.9));
    }

    #[test]
    fn test_empty_flush_sends_nothing() {
        let mut acc = FrameAccumulator::new();
        assert_eq!(acc.flush(PointerMode::Absolute), None);
        assert_eq!(acc.flush(PointerMode::Relative), None);
        assert_eq!(acc, FrameAccumulator::new());
    }

    #[test]
    fn test_absolute_last_write_wins() {
        let mut acc = FrameAccumulator::new();
        acc.set_absolute(0.1, 0.1).unwrap();
        acc.set_absolute(0.5, 0.5).unwrap();

        assert_eq!(acc.pending_absolute(), (Some(32768), Some(32768)));
        assert_eq!(
            acc.flush(PointerMode::Absolute),
            Some(MotionEvent::absolute(32768, 32768, 0))
        );
        assert_eq!(acc.pending_absolute(), (None, None));
        assert_eq!(acc.flush(PointerMode::Absolute), None);
    }

    #[test]
    fn test_out_of_range_leaves_state_untouched() {
        let mut acc = FrameAccumulator::new();
        acc.set_absolute(0.25, 0.75).unwrap();
        let before = acc.clone();

        assert!(matches!(
            acc.set_absolute(1.5, 0.0),
            Err(MouseError::OutOfRange { axis: Axis::X, .. })
        ));
        // Y is valid but must not be written when X fails
        assert!(acc.set_absolute(0.0, 2.0).is_err());
        assert_eq!(acc, before);
    }

    #[test]
    fn test_single_axis_absolute_sends_zero_for_other() {
        let mut acc = FrameAccumulator::new();
        acc.set_absolute_y(1.0).unwrap();
        assert_eq!(
            acc.flush(PointerMode::Absolute),
            Some(MotionEvent::absolute(0, 65535, 0))
        );
    }

    #[test]
    fn test_origin_target_is_nothing_to_send() {
        let mut acc = FrameAccumulator::new();
        acc.set_absolute(0.0, 0.0).unwrap();
        assert_eq!(acc.flush(PointerMode::Absolute), None);

        // With a wheel value the frame goes out, without moving the cursor
        acc.set_wheel(120);
        assert_eq!(acc.flush(PointerMode::Absolute), Some(MotionEvent::relative(0, 0, 120)));
        assert_eq!(acc.pending_absolute(), (None, None));
    }

    #[test]
    fn test_wheel_overwrites_and_clears() {
        let mut acc = FrameAccumulator::new();
        acc.set_wheel(120);
        acc.set_wheel(-120);

        assert_eq!(acc.flush(PointerMode::Relative), Some(MotionEvent::relative(0, 0, -120)));
        assert_eq!(acc.pending_wheel(), 0);
    }

    #[test]
    fn test_wheel_only_in_absolute_mode_does_not_move() {
        let mut acc = FrameAccumulator::new();
        acc.set_wheel(120);
        assert_eq!(acc.flush(PointerMode::Absolute), Some(MotionEvent::relative(0, 0, 120)));
    }

    #[test]
    fn test_inactive_channel_stays_pending() {
        let mut acc = FrameAccumulator::new();
        acc.add_delta(2.5, 0.0).unwrap();
        acc.set_absolute(0.5, 0.5).unwrap();

        assert_eq!(
            acc.flush(PointerMode::Absolute),
            Some(MotionEvent::absolute(32768, 32768, 0))
        );
        assert!(approx(acc.pending_delta().0, 2.5));

        assert_eq!(acc.flush(PointerMode::Relative), Some(MotionEvent::relative(2, 0, 0)));
        assert!(approx(acc.pending_delta().0, 0.5));
    }

    #[test]
    fn test_non_finite_delta_rejected() {
        let mut acc = FrameAccumulator::new();
        assert!(matches!(
            acc.add_delta(0.0, f64::INFINITY),
            Err(MouseError::NonFiniteDelta { axis: Axis::Y, .. })
        ));
        assert!(acc.add_delta_x(f64::NAN).is_err());
        assert_eq!(acc.pending_delta(), (0.0, 0.0));
    }

    #[test]
    fn test_overflowing_sum_rejected() {
        let mut acc = FrameAccumulator::new();
        acc.add_delta(f64::MAX, 1.0).unwrap();

        assert!(matches!(
            acc.add_delta(f64::MAX, 1.0),
            Err(MouseError::NonFiniteDelta { axis: Axis::X, .. })
        ));
        // Neither axis moved on the rejected write
        assert_eq!(acc.pending_delta(), (f64::MAX, 1.0));

        // The channel still drains normally afterwards
        acc.add_delta(-f64::MAX, 0.0).unwrap();
        assert_eq!(acc.flush(PointerMode::Relative), Some(MotionEvent::relative(0, 1, 0)));
        assert_eq!(acc.pending_delta(), (0.0, 0.0));
    }
}

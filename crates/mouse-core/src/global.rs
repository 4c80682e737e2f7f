//! The `mouse` object scripts see
//!
//! Writes and reads deliberately look at different things: writes queue
//! intent for the next frame boundary, reads project this frame's
//! physical device poll.

use mouse_protocol::WHEEL_MAX;

use crate::{MousePlugin, MouseResult, PointerMode};

/// Script-facing surface over a [`MousePlugin`]
pub struct MouseGlobal<'a> {
    plugin: &'a mut MousePlugin,
}

impl<'a> MouseGlobal<'a> {
    pub fn new(plugin: &'a mut MousePlugin) -> Self {
        Self { plugin }
    }

    pub fn wheel_max(&self) -> i32 {
        WHEEL_MAX
    }

    /// Physical X motion this frame
    pub fn delta_x(&mut self) -> MouseResult<f64> {
        Ok(self.plugin.physical()?.dx as f64)
    }

    /// Physical Y motion this frame
    pub fn delta_y(&mut self) -> MouseResult<f64> {
        Ok(self.plugin.physical()?.dy as f64)
    }

    /// Adds to the pending X motion; repeated writes in a frame sum
    pub fn add_delta_x(&mut self, dx: f64) -> MouseResult<()> {
        self.plugin.add_delta(dx, 0.0)
    }

    /// Adds to the pending Y motion; repeated writes in a frame sum
    pub fn add_delta_y(&mut self, dy: f64) -> MouseResult<()> {
        self.plugin.add_delta(0.0, dy)
    }

    /// Absolute X target in `[0, 1]`, last write wins
    pub fn set_x(&mut self, x: f64) -> MouseResult<()> {
        self.plugin.set_absolute_x(x)
    }

    /// Absolute Y target in `[0, 1]`, last write wins
    pub fn set_y(&mut self, y: f64) -> MouseResult<()> {
        self.plugin.set_absolute_y(y)
    }

    pub fn absolute_mode(&self) -> bool {
        self.plugin.mode().is_absolute()
    }

    pub fn set_absolute_mode(&mut self, absolute: bool) {
        self.plugin.set_mode(PointerMode::from_absolute_flag(absolute));
    }

    /// Physical wheel motion this frame
    pub fn wheel(&mut self) -> MouseResult<i32> {
        Ok(self.plugin.physical()?.wheel)
    }

    /// Overwrites the pending wheel value
    pub fn set_wheel(&mut self, wheel: i32) {
        self.plugin.set_wheel(wheel);
    }

    pub fn wheel_up(&mut self) -> MouseResult<bool> {
        let step = self.plugin.config().wheel_step;
        Ok(self.wheel()? == step)
    }

    pub fn set_wheel_up(&mut self, up: bool) {
        let step = self.plugin.config().wheel_step;
        self.plugin.set_wheel(if up { step } else { 0 });
    }

    pub fn wheel_down(&mut self) -> MouseResult<bool> {
        let step = self.plugin.config().wheel_step;
        Ok(self.wheel()? == -step)
    }

    pub fn set_wheel_down(&mut self, down: bool) {
        let step = self.plugin.config().wheel_step;
        self.plugin.set_wheel(if down { -step } else { 0 });
    }

    pub fn left_button(&mut self) -> MouseResult<bool> {
        self.get_button(0)
    }

    pub fn set_left_button(&mut self, pressed: bool) -> MouseResult<()> {
        self.set_button(0, pressed)
    }

    pub fn right_button(&mut self) -> MouseResult<bool> {
        self.get_button(1)
    }

    pub fn set_right_button(&mut self, pressed: bool) -> MouseResult<()> {
        self.set_button(1, pressed)
    }

    pub fn middle_button(&mut self) -> MouseResult<bool> {
        self.get_button(2)
    }

    pub fn set_middle_button(&mut self, pressed: bool) -> MouseResult<()> {
        self.set_button(2, pressed)
    }

    /// Physical hold state of button `index`
    pub fn get_button(&mut self, index: u32) -> MouseResult<bool> {
        self.plugin.is_button_down(index)
    }

    /// Hold or release synthetic button `index` now
    pub fn set_button(&mut self, index: u32, pressed: bool) -> MouseResult<()> {
        self.plugin.set_button_pressed(index, pressed).map(|_| ())
    }

    /// Whether physical button `index` went down since it was last asked about
    pub fn get_pressed(&mut self, index: u32) -> MouseResult<bool> {
        self.plugin.is_button_pressed(index)
    }

    /// Tap synthetic button `index` at the next frame boundary
    pub fn set_pressed(&mut self, index: u32) -> MouseResult<()> {
        self.plugin.press_and_release(index)
    }
}

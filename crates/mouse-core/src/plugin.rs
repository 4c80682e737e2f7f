//! Virtual mouse plugin lifecycle and operations

use device_reader::DeviceReader;
use input_injector::InputInjector;
use mouse_protocol::{ButtonEvent, MouseButton, PhysicalMouseState};
use tracing::{debug, info};

use crate::{
    FrameDispatcher, FrameReport, FrameState, MouseConfig, MouseError, MouseGlobal, MouseResult,
    PointerMode,
};

/// A virtual mouse bound to one physical device and one injector.
///
/// The device is acquired by `start` and released by `stop` or on drop.
/// Writes are buffered in the frame state until `end_frame`.
pub struct MousePlugin {
    reader: Box<dyn DeviceReader>,
    injector: Box<dyn InputInjector>,
    config: MouseConfig,
    state: FrameState,
    dispatcher: FrameDispatcher,
    started: bool,
}

impl MousePlugin {
    pub fn new(
        reader: Box<dyn DeviceReader>,
        injector: Box<dyn InputInjector>,
        config: MouseConfig,
    ) -> MouseResult<Self> {
        config.validate()?;
        Ok(Self {
            reader,
            injector,
            state: FrameState::new(&config),
            config,
            dispatcher: FrameDispatcher::new(),
            started: false,
        })
    }

    pub fn friendly_name(&self) -> &'static str {
        "Mouse"
    }

    pub fn config(&self) -> &MouseConfig {
        &self.config
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Acquire the physical device. Failure leaves the plugin stopped.
    pub fn start(&mut self) -> MouseResult<()> {
        if self.started {
            return Err(MouseError::AlreadyStarted);
        }
        self.reader.acquire().map_err(MouseError::Configuration)?;
        self.state.physical.invalidate();
        self.started = true;
        info!(device = self.reader.name(), "Mouse plugin started");
        Ok(())
    }

    /// Release the physical device. Safe to call more than once.
    pub fn stop(&mut self) {
        if self.started {
            let stats = self.reader.stats();
            self.reader.release();
            self.started = false;
            info!(
                device = self.reader.name(),
                frames = self.dispatcher.frames(),
                polls = stats.polls,
                failed_polls = stats.failed_polls,
                "Mouse plugin stopped"
            );
        }
    }

    /// Frame boundary: flush motion, drain pulses, drop the physical snapshot
    pub fn end_frame(&mut self) -> MouseResult<FrameReport> {
        if !self.started {
            return Err(MouseError::NotStarted);
        }
        Ok(self.dispatcher.dispatch(&mut self.state, self.injector.as_ref()))
    }

    /// Script-facing view of this plugin
    pub fn global(&mut self) -> MouseGlobal<'_> {
        MouseGlobal::new(self)
    }

    pub fn frame_state(&self) -> &FrameState {
        &self.state
    }

    // Motion and wheel

    pub fn add_delta(&mut self, dx: f64, dy: f64) -> MouseResult<()> {
        self.state.accumulator.add_delta(dx, dy)
    }

    pub fn set_absolute(&mut self, x: f64, y: f64) -> MouseResult<()> {
        self.state.accumulator.set_absolute(x, y)
    }

    pub fn set_absolute_x(&mut self, x: f64) -> MouseResult<()> {
        self.state.accumulator.set_absolute_x(x)
    }

    pub fn set_absolute_y(&mut self, y: f64) -> MouseResult<()> {
        self.state.accumulator.set_absolute_y(y)
    }

    pub fn set_wheel(&mut self, wheel: i32) {
        self.state.accumulator.set_wheel(wheel);
    }

    pub fn mode(&self) -> PointerMode {
        self.state.mode
    }

    /// Switch channels. Pending values of either channel are kept as is.
    pub fn set_mode(&mut self, mode: PointerMode) {
        if self.state.mode != mode {
            debug!(?mode, "Pointer mode changed");
            self.state.mode = mode;
        }
    }

    // Physical reads

    /// This frame's physical snapshot, polling on first use
    pub fn physical(&mut self) -> MouseResult<PhysicalMouseState> {
        if !self.started {
            return Err(MouseError::NotStarted);
        }
        Ok(self.state.physical.get(self.reader.as_mut())?)
    }

    /// Whether the real device reports button `index` down
    pub fn is_button_down(&mut self, index: u32) -> MouseResult<bool> {
        Ok(self.physical()?.is_held(index))
    }

    /// Whether button `index` went down since the previous query
    pub fn is_button_pressed(&mut self, index: u32) -> MouseResult<bool> {
        let physical = self.physical()?;
        Ok(self.state.pressed.observe(index, &physical))
    }

    // Synthetic buttons

    fn resolve(&self, index: u32) -> MouseResult<MouseButton> {
        self.config.button_index_policy.resolve(index)
    }

    /// Drive synthetic button `index` to `pressed`, injecting only on change
    pub fn set_button_pressed(&mut self, index: u32, pressed: bool) -> MouseResult<Option<ButtonEvent>> {
        let button = self.resolve(index)?;
        self.state
            .buttons
            .set_held(button, pressed, self.injector.as_ref())
    }

    /// Last injected hold state of synthetic button `index`
    pub fn is_button_held(&self, index: u32) -> MouseResult<bool> {
        Ok(self.state.buttons.is_held(self.resolve(index)?))
    }

    /// Queue a press-and-release of button `index` for the next frame boundary
    pub fn press_and_release(&mut self, index: u32) -> MouseResult<()> {
        let button = self.resolve(index)?;
        self.state.pulses.request_pulse(button);
        Ok(())
    }
}

impl Drop for MousePlugin {
    fn drop(&mut self) {
        self.stop();
    }
}

//! Built-in frame scripts

use std::f64::consts::TAU;

use anyhow::bail;
use mouse_core::{MouseGlobal, MouseResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptKind {
    /// Writes nothing
    #[default]
    Idle,
    /// Traces a circle with relative motion
    Circle,
    /// Taps a button at a fixed interval
    AutoClick,
    /// Adds scaled physical motion on top of the real motion
    Mirror,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptConfig {
    pub kind: ScriptKind,
    /// Circle radius in device units
    pub radius: f64,
    /// Frames per full circle
    pub period_frames: u32,
    /// Frames between taps
    pub click_every_frames: u64,
    /// Button index to tap
    pub click_button: u32,
    /// Extra motion per unit of physical motion
    pub mirror_scale: f64,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            kind: ScriptKind::Idle,
            radius: 50.0,
            period_frames: 120,
            click_every_frames: 60,
            click_button: 0,
            mirror_scale: 0.5,
        }
    }
}

impl ScriptConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        match self.kind {
            ScriptKind::Circle if self.period_frames == 0 => bail!("period_frames must be positive"),
            ScriptKind::AutoClick if self.click_every_frames == 0 => {
                bail!("click_every_frames must be positive")
            }
            // Injected motion is polled back next frame, so |scale| >= 1 runs away
            ScriptKind::Mirror if !(self.mirror_scale.abs() < 1.0) => {
                bail!("mirror_scale must be within (-1, 1), got {}", self.mirror_scale)
            }
            _ => Ok(()),
        }
    }

    pub fn build(&self) -> Box<dyn FrameScript> {
        match self.kind {
            ScriptKind::Idle => Box::new(Idle),
            ScriptKind::Circle => Box::new(Circle {
                radius: self.radius,
                period_frames: self.period_frames,
            }),
            ScriptKind::AutoClick => Box::new(AutoClick {
                every: self.click_every_frames,
                button: self.click_button,
            }),
            ScriptKind::Mirror => Box::new(Mirror {
                scale: self.mirror_scale,
            }),
        }
    }
}

/// One script step, run once per frame before the frame boundary
pub trait FrameScript: Send {
    fn name(&self) -> &'static str;

    fn step(&mut self, frame: u64, mouse: &mut MouseGlobal<'_>) -> MouseResult<()>;
}

struct Idle;

impl FrameScript for Idle {
    fn name(&self) -> &'static str {
        "idle"
    }

    fn step(&mut self, _frame: u64, _mouse: &mut MouseGlobal<'_>) -> MouseResult<()> {
        Ok(())
    }
}

struct Circle {
    radius: f64,
    period_frames: u32,
}

impl Circle {
    fn point(&self, frame: u64) -> (f64, f64) {
        let angle = TAU * (frame % self.period_frames as u64) as f64 / self.period_frames as f64;
        (self.radius * angle.cos(), self.radius * angle.sin())
    }
}

impl FrameScript for Circle {
    fn name(&self) -> &'static str {
        "circle"
    }

    fn step(&mut self, frame: u64, mouse: &mut MouseGlobal<'_>) -> MouseResult<()> {
        mouse.set_absolute_mode(false);
        let (x0, y0) = self.point(frame);
        let (x1, y1) = self.point(frame + 1);
        mouse.add_delta_x(x1 - x0)?;
        mouse.add_delta_y(y1 - y0)
    }
}

struct AutoClick {
    every: u64,
    button: u32,
}

impl FrameScript for AutoClick {
    fn name(&self) -> &'static str {
        "auto_click"
    }

    fn step(&mut self, frame: u64, mouse: &mut MouseGlobal<'_>) -> MouseResult<()> {
        if frame % self.every == 0 {
            mouse.set_pressed(self.button)?;
        }
        Ok(())
    }
}

struct Mirror {
    scale: f64,
}

impl FrameScript for Mirror {
    fn name(&self) -> &'static str {
        "mirror"
    }

    fn step(&mut self, _frame: u64, mouse: &mut MouseGlobal<'_>) -> MouseResult<()> {
        mouse.set_absolute_mode(false);
        let dx = mouse.delta_x()?;
        let dy = mouse.delta_y()?;
        mouse.add_delta_x(dx * self.scale)?;
        mouse.add_delta_y(dy * self.scale)
    }
}

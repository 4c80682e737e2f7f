//! Windows mouse polling using cursor position and async key state
//!
//! Polling cannot observe the wheel, so the wheel delta always reads 0.

use mouse_protocol::{ButtonMask, PhysicalMouseState};
use tracing::info;
use windows::Win32::Foundation::POINT;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    GetAsyncKeyState, VIRTUAL_KEY, VK_LBUTTON, VK_MBUTTON, VK_RBUTTON, VK_XBUTTON1, VK_XBUTTON2,
};
use windows::Win32::UI::WindowsAndMessaging::GetCursorPos;

use crate::{DeviceError, DeviceReader, DeviceResult, ReaderStats};

/// Virtual keys in button index order
const BUTTON_KEYS: [VIRTUAL_KEY; 5] = [VK_LBUTTON, VK_RBUTTON, VK_MBUTTON, VK_XBUTTON1, VK_XBUTTON2];

/// Windows mouse reader
pub struct WindowsMouseReader {
    acquired: bool,
    last_pos: Option<(i32, i32)>,
    stats: ReaderStats,
}

impl WindowsMouseReader {
    /// Create a new Windows mouse reader
    pub fn new() -> DeviceResult<Self> {
        info!("Initializing Windows mouse reader");

        Ok(Self {
            acquired: false,
            last_pos: None,
            stats: ReaderStats::default(),
        })
    }

    fn cursor_pos() -> DeviceResult<(i32, i32)> {
        let mut point = POINT::default();
        // SAFETY: Win32 call writing into a stack POINT.
        unsafe { GetCursorPos(&mut point) }
            .map_err(|e| DeviceError::PollFailed(format!("GetCursorPos failed: {e}")))?;
        Ok((point.x, point.y))
    }

    fn buttons() -> ButtonMask {
        BUTTON_KEYS
            .iter()
            .enumerate()
            .fold(ButtonMask::empty(), |mask, (index, key)| {
                // SAFETY: Win32 call with a valid virtual key code.
                let state = unsafe { GetAsyncKeyState(key.0 as i32) };
                mask.with(index as u32, (state as u16) & 0x8000 != 0)
            })
    }
}

impl DeviceReader for WindowsMouseReader {
    fn name(&self) -> &str {
        "Windows System Mouse"
    }

    fn acquire(&mut self) -> DeviceResult<()> {
        if self.acquired {
            return Err(DeviceError::AlreadyAcquired);
        }
        let pos = Self::cursor_pos().map_err(|e| DeviceError::AcquireFailed(e.to_string()))?;
        self.last_pos = Some(pos);
        self.acquired = true;
        info!("Windows mouse acquired");
        Ok(())
    }

    fn release(&mut self) {
        if self.acquired {
            self.acquired = false;
            self.last_pos = None;
            info!("Windows mouse released");
        }
    }

    fn is_acquired(&self) -> bool {
        self.acquired
    }

    fn poll(&mut self) -> DeviceResult<PhysicalMouseState> {
        if !self.acquired {
            return Err(DeviceError::NotAcquired);
        }

        let (x, y) = match Self::cursor_pos() {
            Ok(pos) => pos,
            Err(e) => {
                self.stats.failed_polls += 1;
                return Err(e);
            }
        };
        let (last_x, last_y) = self.last_pos.unwrap_or((x, y));
        self.last_pos = Some((x, y));
        self.stats.polls += 1;

        Ok(PhysicalMouseState {
            dx: x - last_x,
            dy: y - last_y,
            wheel: 0,
            buttons: Self::buttons(),
        })
    }

    fn stats(&self) -> ReaderStats {
        self.stats.clone()
    }
}

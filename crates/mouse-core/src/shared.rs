//! Thread-safe handle for hosts that run scripts off the frame thread

use std::sync::Arc;

use parking_lot::Mutex;

use crate::{FrameReport, MouseGlobal, MousePlugin, MouseResult};

/// A [`MousePlugin`] behind a single lock.
///
/// Script closures and frame boundaries take the same lock, so a pulse's
/// press and release never interleave with other writes.
#[derive(Clone)]
pub struct SharedMouse {
    inner: Arc<Mutex<MousePlugin>>,
}

impl SharedMouse {
    pub fn new(plugin: MousePlugin) -> Self {
        Self {
            inner: Arc::new(Mutex::new(plugin)),
        }
    }

    pub fn start(&self) -> MouseResult<()> {
        self.inner.lock().start()
    }

    pub fn stop(&self) {
        self.inner.lock().stop();
    }

    /// Run a script step against the `mouse` surface
    pub fn with<R>(&self, f: impl FnOnce(&mut MouseGlobal<'_>) -> R) -> R {
        let mut plugin = self.inner.lock();
        let mut global = plugin.global();
        f(&mut global)
    }

    pub fn end_frame(&self) -> MouseResult<FrameReport> {
        self.inner.lock().end_frame()
    }
}

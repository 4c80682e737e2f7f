//! Recorded injection traces

use serde::{Deserialize, Serialize};

use crate::{InjectedInput, ProtocolResult};

/// Everything injected during one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracedFrame {
    /// Frame counter at the time of injection
    pub frame: u64,
    /// Injected inputs in order
    pub inputs: Vec<InjectedInput>,
}

/// A sequence of traced frames, as produced by a dry run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjectionTrace {
    pub frames: Vec<TracedFrame>,
}

impl InjectionTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a frame; frames with nothing injected are skipped
    pub fn push(&mut self, frame: u64, inputs: Vec<InjectedInput>) {
        if !inputs.is_empty() {
            self.frames.push(TracedFrame { frame, inputs });
        }
    }

    /// Total number of injected inputs
    pub fn input_count(&self) -> usize {
        self.frames.iter().map(|f| f.inputs.len()).sum()
    }

    /// Serialize to bytes
    pub fn to_bytes(&self) -> ProtocolResult<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserialize from bytes
    pub fn from_bytes(data: &[u8]) -> ProtocolResult<Self> {
        Ok(bincode::deserialize(data)?)
    }
}

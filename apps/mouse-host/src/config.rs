//! Host configuration

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use mouse_core::MouseConfig;
use serde::{Deserialize, Serialize};

use crate::script::ScriptConfig;

/// Host configuration, read from an optional JSON file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Frame boundaries per second
    pub frame_rate_hz: u32,
    /// Stop after this many frames
    pub max_frames: Option<u64>,
    /// Use a virtual device and a recording injector instead of the OS
    pub dry_run: bool,
    /// Where a dry run writes its injection trace
    pub trace_path: Option<PathBuf>,
    /// Script to run every frame
    pub script: ScriptConfig,
    /// Virtual mouse settings
    pub mouse: MouseConfig,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            frame_rate_hz: 60,
            max_frames: None,
            dry_run: false,
            trace_path: None,
            script: ScriptConfig::default(),
            mouse: MouseConfig::default(),
        }
    }
}

impl HostConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.frame_rate_hz == 0 || self.frame_rate_hz > 1000 {
            bail!("frame_rate_hz must be within 1..=1000, got {}", self.frame_rate_hz);
        }
        self.mouse.validate()?;
        self.script.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::ScriptKind;

    #[test]
    fn test_empty_object_is_default() {
        let config = HostConfig::from_json("{}").unwrap();
        assert_eq!(config.frame_rate_hz, 60);
        assert!(!config.dry_run);
        assert_eq!(config.script.kind, ScriptKind::Idle);
        assert!(config.mouse.absolute_mode);
    }

    #[test]
    fn test_nested_sections() {
        let config = HostConfig::from_json(
            r#"{
                "frame_rate_hz": 120,
                "dry_run": true,
                "max_frames": 30,
                "script": { "kind": "auto_click", "click_every_frames": 5 },
                "mouse": { "absolute_mode": false }
            }"#,
        )
        .unwrap();
        assert_eq!(config.frame_rate_hz, 120);
        assert_eq!(config.max_frames, Some(30));
        assert_eq!(config.script.kind, ScriptKind::AutoClick);
        assert_eq!(config.script.click_every_frames, 5);
        assert!(!config.mouse.absolute_mode);
    }

    #[test]
    fn test_rejects_bad_rate() {
        assert!(HostConfig::from_json(r#"{ "frame_rate_hz": 0 }"#).is_err());
        assert!(HostConfig::from_json(r#"{ "mouse": { "wheel_step": -1 } }"#).is_err());
    }
}

//! Glidepoint Mouse Host
//!
//! Runs a frame script against the virtual mouse at a fixed frame rate.

mod config;
mod script;

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use device_reader::{DeviceReader, VirtualMouse};
use input_injector::{InputInjector, RecordingInjector};
use mouse_core::MousePlugin;
use mouse_protocol::InjectionTrace;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::config::HostConfig;

/// Device, injector and, for dry runs, a handle on the recording
struct Backends {
    reader: Box<dyn DeviceReader>,
    injector: Box<dyn InputInjector>,
    recorder: Option<RecordingInjector>,
}

impl Backends {
    fn dry_run() -> Self {
        let recorder = RecordingInjector::new();
        Self {
            reader: Box::new(VirtualMouse::new("Dry Run Mouse")),
            injector: Box::new(recorder.clone()),
            recorder: Some(recorder),
        }
    }

    fn select(config: &HostConfig) -> Self {
        if config.dry_run {
            return Self::dry_run();
        }

        let reader = device_reader::create_reader();
        let injector = input_injector::create_injector();
        match (reader, injector) {
            (Ok(reader), Ok(injector)) => {
                if !injector.has_permission() {
                    match injector.request_permission() {
                        Ok(true) => {}
                        Ok(false) => warn!("Input injection permission not granted yet"),
                        Err(e) => warn!("Permission request failed: {}", e),
                    }
                }
                Self {
                    reader,
                    injector,
                    recorder: None,
                }
            }
            (Err(e), _) => {
                warn!("No physical mouse backend ({}), falling back to dry run", e);
                Self::dry_run()
            }
            (_, Err(e)) => {
                warn!("No injection backend ({}), falling back to dry run", e);
                Self::dry_run()
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mouse_host=info".parse()?)
                .add_directive("mouse_core=info".parse()?),
        )
        .init();

    let config = match std::env::args_os().nth(1) {
        Some(path) => HostConfig::load(Path::new(&path))?,
        None => HostConfig::default(),
    };

    info!("Starting Glidepoint mouse host");

    let Backends {
        reader,
        injector,
        recorder,
    } = Backends::select(&config);

    let mut plugin = MousePlugin::new(reader, injector, config.mouse.clone())?;
    plugin.start().context("Failed to start mouse plugin")?;

    let mut script = config.script.build();
    info!(
        script = script.name(),
        frame_rate_hz = config.frame_rate_hz,
        dry_run = recorder.is_some(),
        "Running"
    );

    let mut interval =
        tokio::time::interval(Duration::from_secs_f64(1.0 / config.frame_rate_hz as f64));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut trace = InjectionTrace::new();
    let mut frame: u64 = 0;
    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = &mut shutdown => {
                info!("Shutdown requested");
                break;
            }
        }

        if let Err(e) = script.step(frame, &mut plugin.global()) {
            warn!(frame, "Script step failed: {}", e);
        }

        let report = plugin.end_frame()?;
        if !report.is_empty() {
            debug!(
                frame = report.frame,
                motion = ?report.motion,
                buttons = report.buttons.len(),
                failures = report.injection_failures,
                "Frame injected"
            );
        }
        if let Some(recorder) = &recorder {
            trace.push(report.frame, recorder.take());
        }

        frame += 1;
        if config.max_frames.is_some_and(|max| frame >= max) {
            info!(frame, "Frame limit reached");
            break;
        }
    }

    plugin.stop();

    if let Some(path) = config.trace_path.as_ref().filter(|_| recorder.is_some()) {
        let bytes = trace.to_bytes()?;
        std::fs::write(path, bytes)
            .with_context(|| format!("Failed to write trace {}", path.display()))?;
        info!(
            frames = trace.frames.len(),
            inputs = trace.input_count(),
            "Wrote injection trace to {}",
            path.display()
        );
    }

    Ok(())
}

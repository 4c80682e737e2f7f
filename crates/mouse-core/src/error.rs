//! Mouse core error types

use device_reader::DeviceError;
use input_injector::InjectorError;
use thiserror::Error;

use crate::Axis;

#[derive(Debug, Error)]
pub enum MouseError {
    /// The device could not be brought up at start; the plugin stays stopped
    #[error("Mouse device failed to initialize: {0}")]
    Configuration(#[source] DeviceError),

    #[error("{axis} must be a normalised coordinate between 0 and 1.0, got {value}")]
    OutOfRange { axis: Axis, value: f64 },

    #[error("{axis} delta must be finite, got {value}")]
    NonFiniteDelta { axis: Axis, value: f64 },

    #[error("Input injection failed: {0}")]
    Injection(#[from] InjectorError),

    #[error("Invalid button index: {0}")]
    InvalidButton(u32),

    #[error("Mouse device error: {0}")]
    Device(#[from] DeviceError),

    #[error("Mouse plugin not started")]
    NotStarted,

    #[error("Mouse plugin already started")]
    AlreadyStarted,

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type MouseResult<T> = Result<T, MouseError>;

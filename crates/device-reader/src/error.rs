//! Device reader error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("Failed to acquire mouse device: {0}")]
    AcquireFailed(String),

    #[error("Mouse device not acquired")]
    NotAcquired,

    #[error("Mouse device already acquired")]
    AlreadyAcquired,

    #[error("Failed to poll mouse device: {0}")]
    PollFailed(String),

    #[error("Platform not supported")]
    UnsupportedPlatform,
}

pub type DeviceResult<T> = Result<T, DeviceError>;

//! Input injection error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InjectorError {
    #[error("Permission denied - accessibility permission required")]
    PermissionDenied,

    #[error("Failed to inject input: {0}")]
    InjectionFailed(String),

    #[error("Platform not supported")]
    UnsupportedPlatform,

    #[error("Platform error: {0}")]
    Platform(String),
}

pub type InjectorResult<T> = Result<T, InjectorError>;

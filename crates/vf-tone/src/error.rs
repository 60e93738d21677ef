//! Tone output error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToneError {
    #[error("No audio device found")]
    NoDevice,

    #[error("Failed to get device config: {0}")]
    ConfigError(String),

    #[error("Failed to build stream: {0}")]
    StreamBuildError(String),

    #[error("Stream error: {0}")]
    StreamError(String),
}

pub type ToneResult<T> = Result<T, ToneError>;

use thiserror::Error;

/// Errors produced while reading, upmixing or writing audio.
#[derive(Debug, Error)]
pub enum UpmixError {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Report serialization error.
    #[error("report serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input is not a stereo recording.
    #[error("expected stereo input (2 channels), got {found}")]
    ChannelCount { found: u16 },

    /// Left and right channels differ in length.
    #[error("channel length mismatch: left has {left} samples, right has {right}")]
    LengthMismatch { left: usize, right: usize },

    /// Block size too small to estimate a correlation.
    #[error("block size must be at least 2 samples, got {0}")]
    InvalidBlockSize(usize),

    /// Smoothing factor outside (0, 1].
    #[error("smoothing factor must be in (0, 1], got {0}")]
    InvalidSmoothing(f32),

    /// Sample encoding the reader cannot normalize.
    #[error("unsupported sample format: {0}")]
    UnsupportedFormat(String),
}

/// Convenience result type for upmixing operations.
pub type Result<T> = std::result::Result<T, UpmixError>;

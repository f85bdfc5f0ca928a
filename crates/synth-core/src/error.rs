use thiserror::Error;

/// Errors raised while building the instrument from a configuration.
///
/// Nothing on the per-frame or per-block path returns an error; those paths
/// degrade to silence or static geometry instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SynthError {
    #[error("sample rate must be positive, got {0}")]
    InvalidSampleRate(f32),
    #[error("analyser fft size must be a power of two >= 32, got {0}")]
    InvalidFftSize(usize),
    #[error("analyser smoothing must be within [0, 1), got {0}")]
    InvalidSmoothing(f32),
    #[error("analyser decibel range is empty: min {min} >= max {max}")]
    InvalidDecibelRange { min: f32, max: f32 },
    #[error("delay time must be within (0, {max_ms}] ms, got {got_ms}")]
    InvalidDelayTime { got_ms: f32, max_ms: f32 },
    #[error("delay feedback must be within [0, 1), got {0}")]
    InvalidFeedback(f32),
    #[error("delay cutoff must be positive, got {0} Hz")]
    InvalidCutoff(f32),
    #[error("{name} level must be within [0, 1], got {value}")]
    InvalidLevel { name: &'static str, value: f32 },
}

pub type Result<T> = std::result::Result<T, SynthError>;

use crate::constants::*;
use crate::error::{Result, SynthError};
use crate::state::SynthParameters;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnalyserSettings {
    pub fft_size: usize,
    pub smoothing: f32,
    pub min_decibels: f32,
    pub max_decibels: f32,
}

impl Default for AnalyserSettings {
    fn default() -> Self {
        Self {
            fft_size: ANALYSER_FFT_SIZE,
            smoothing: ANALYSER_SMOOTHING,
            min_decibels: ANALYSER_MIN_DECIBELS,
            max_decibels: ANALYSER_MAX_DECIBELS,
        }
    }
}

impl AnalyserSettings {
    /// Number of magnitude bins the analyser reports.
    pub fn bin_count(&self) -> usize {
        self.fft_size / 2
    }

    pub fn validate(&self) -> Result<()> {
        if !self.fft_size.is_power_of_two() || self.fft_size < 32 {
            return Err(SynthError::InvalidFftSize(self.fft_size));
        }
        if !(0.0..1.0).contains(&self.smoothing) {
            return Err(SynthError::InvalidSmoothing(self.smoothing));
        }
        if self.min_decibels >= self.max_decibels {
            return Err(SynthError::InvalidDecibelRange {
                min: self.min_decibels,
                max: self.max_decibels,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DelaySettings {
    pub time_ms: f32,
    pub feedback: f32,
    pub wet_level: f32,
    pub dry_level: f32,
    /// Low-pass cutoff applied inside the feedback loop.
    pub cutoff_hz: f32,
}

impl Default for DelaySettings {
    fn default() -> Self {
        Self {
            time_ms: DELAY_TIME_MS,
            feedback: DELAY_FEEDBACK,
            wet_level: DELAY_WET_LEVEL,
            dry_level: DELAY_DRY_LEVEL,
            cutoff_hz: DELAY_CUTOFF_HZ,
        }
    }
}

impl DelaySettings {
    pub fn validate(&self) -> Result<()> {
        let max_ms = DELAY_MAX_TIME_SEC * 1000.0;
        if !(self.time_ms > 0.0 && self.time_ms <= max_ms) {
            return Err(SynthError::InvalidDelayTime {
                got_ms: self.time_ms,
                max_ms,
            });
        }
        if !(0.0..1.0).contains(&self.feedback) {
            return Err(SynthError::InvalidFeedback(self.feedback));
        }
        if !(self.cutoff_hz > 0.0) {
            return Err(SynthError::InvalidCutoff(self.cutoff_hz));
        }
        for (name, value) in [("wet", self.wet_level), ("dry", self.dry_level)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SynthError::InvalidLevel { name, value });
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SynthConfig {
    pub sample_rate_hz: f32,
    pub analyser: AnalyserSettings,
    pub delay: DelaySettings,
    pub initial: SynthParameters,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: DEFAULT_SAMPLE_RATE_HZ,
            analyser: AnalyserSettings::default(),
            delay: DelaySettings::default(),
            initial: SynthParameters::default(),
        }
    }
}

impl SynthConfig {
    pub fn with_sample_rate(self, sample_rate_hz: f32) -> Self {
        Self {
            sample_rate_hz,
            ..self
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.sample_rate_hz > 0.0) {
            return Err(SynthError::InvalidSampleRate(self.sample_rate_hz));
        }
        self.analyser.validate()?;
        self.delay.validate()
    }
}

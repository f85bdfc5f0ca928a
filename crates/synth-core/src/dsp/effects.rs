use crate::config::DelaySettings;
use crate::constants::DELAY_MAX_TIME_SEC;
use crate::error::{Result, SynthError};
use smallvec::SmallVec;
use std::f32::consts::TAU;

/// One processing stage with a mono input and output.
pub trait EffectStage: Send {
    fn name(&self) -> &'static str;
    fn process(&mut self, input: f32) -> f32;
    /// Drop any internal signal memory (delay lines, filter state).
    fn reset(&mut self);

    fn process_block(&mut self, block: &mut [f32]) {
        for s in block.iter_mut() {
            *s = self.process(*s);
        }
    }
}

/// Source → stage 1 → … → stage N. An empty chain passes the signal through.
#[derive(Default)]
pub struct EffectsChain {
    stages: SmallVec<[Box<dyn EffectStage>; 2]>,
}

impl EffectsChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stage(mut self, stage: impl EffectStage + 'static) -> Self {
        self.push(stage);
        self
    }

    pub fn push(&mut self, stage: impl EffectStage + 'static) {
        log::debug!("[fx] append stage #{} '{}'", self.stages.len(), stage.name());
        self.stages.push(Box::new(stage));
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn stage_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.stages.iter().map(|s| s.name())
    }

    /// Run a source block through every stage in order, in place.
    pub fn process_block(&mut self, block: &mut [f32]) {
        for stage in self.stages.iter_mut() {
            stage.process_block(block);
        }
    }

    pub fn reset(&mut self) {
        for stage in self.stages.iter_mut() {
            stage.reset();
        }
    }
}

/// Feedback delay: dry path plus a low-passed, fed-back echo.
#[derive(Clone, Debug)]
pub struct Delay {
    buffer: Vec<f32>,
    write_pos: usize,
    delay_samples: usize,
    feedback: f32,
    wet: f32,
    dry: f32,
    lp_coeff: f32,
    lp_state: f32,
}

impl Delay {
    pub fn new(sample_rate: f32, settings: &DelaySettings) -> Result<Self> {
        if !(sample_rate > 0.0) {
            return Err(SynthError::InvalidSampleRate(sample_rate));
        }
        settings.validate()?;
        let capacity = (sample_rate * DELAY_MAX_TIME_SEC) as usize + 1;
        let delay_samples = ((settings.time_ms / 1000.0) * sample_rate).round() as usize;
        let cutoff = settings.cutoff_hz.min(sample_rate * 0.49);
        Ok(Self {
            buffer: vec![0.0; capacity],
            write_pos: 0,
            delay_samples: delay_samples.clamp(1, capacity - 1),
            feedback: settings.feedback,
            wet: settings.wet_level,
            dry: settings.dry_level,
            lp_coeff: 1.0 - (-TAU * cutoff / sample_rate).exp(),
            lp_state: 0.0,
        })
    }

    pub fn delay_samples(&self) -> usize {
        self.delay_samples
    }
}

impl EffectStage for Delay {
    fn name(&self) -> &'static str {
        "delay"
    }

    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let len = self.buffer.len();
        let read_pos = (self.write_pos + len - self.delay_samples) % len;
        let delayed = self.buffer[read_pos];
        self.lp_state += self.lp_coeff * (delayed - self.lp_state);
        let echo = self.lp_state;

        self.buffer[self.write_pos] = input + echo * self.feedback;
        self.write_pos = (self.write_pos + 1) % len;

        input * self.dry + echo * self.wet
    }

    fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
        self.lp_state = 0.0;
    }
}

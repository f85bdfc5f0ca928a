use crate::config::SynthConfig;
use crate::dsp::{Analyser, Delay, EffectsChain, Oscillator, SpectrumFrame};
use crate::error::Result;
use crate::lifecycle::PlaybackSink;
use crate::state::SynthParameters;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

// The audio callback renders blocks, the frame loop configures and reads the
// spectrum. Each call holds the lock only for its own duration.
pub type SharedEngine = Arc<Mutex<SynthEngine>>;

/// Lock the engine, recovering the guard if an audio callback panicked while
/// holding it. The engine holds no invariants a half-finished block can break.
pub fn lock_engine(engine: &SharedEngine) -> MutexGuard<'_, SynthEngine> {
    engine.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct SynthEngine {
    sample_rate: f32,
    oscillator: Oscillator,
    effects: EffectsChain,
    analyser: Analyser,
    connected: bool,
    params: SynthParameters,
}

impl SynthEngine {
    /// Build the stock graph: one delay stage between source and analyser.
    pub fn new(config: &SynthConfig) -> Result<Self> {
        let delay = Delay::new(config.sample_rate_hz, &config.delay)?;
        Self::with_effects(config, EffectsChain::new().with_stage(delay))
    }

    pub fn with_effects(config: &SynthConfig, effects: EffectsChain) -> Result<Self> {
        config.validate()?;
        let mut engine = Self {
            sample_rate: config.sample_rate_hz,
            oscillator: Oscillator::new(config.sample_rate_hz),
            effects,
            analyser: Analyser::new(config.analyser)?,
            connected: false,
            params: config.initial,
        };
        engine.configure(&config.initial);
        Ok(engine)
    }

    pub fn shared(self) -> SharedEngine {
        Arc::new(Mutex::new(self))
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn params(&self) -> SynthParameters {
        self.params
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn effects(&self) -> &EffectsChain {
        &self.effects
    }

    pub fn effective_frequency(&self) -> f32 {
        self.oscillator.effective_frequency()
    }

    /// Apply waveform, frequency and detune; heard from the next rendered block.
    pub fn configure(&mut self, params: &SynthParameters) {
        self.oscillator.set_waveform(params.waveform);
        self.oscillator
            .set_pitch(params.frequency_hz, params.detune_cents);
        self.params = *params;
        log::trace!(
            "[engine] configure {:?} {:.1} Hz {:+.0} ct -> {:.1} Hz",
            params.waveform,
            params.frequency_hz,
            params.detune_cents,
            self.oscillator.effective_frequency()
        );
    }

    /// Connect or disconnect the graph from the output. Connecting starts
    /// from a clean echo tail and analyser history.
    pub fn set_playing(&mut self, playing: bool) {
        if playing == self.connected {
            return;
        }
        self.connected = playing;
        if playing {
            self.effects.reset();
            self.analyser.reset();
            log::info!(
                "[engine] connect osc -> [{}] -> analyser -> out",
                self.effects.stage_names().collect::<Vec<_>>().join(" -> ")
            );
        } else {
            log::info!("[engine] disconnect");
        }
    }

    pub fn render(&mut self, out: &mut [f32]) {
        if !self.connected {
            out.fill(0.0);
            return;
        }
        self.oscillator.fill(out);
        self.effects.process_block(out);
        self.analyser.push(out);
    }

    /// Current magnitude per bin, or `None` while disconnected.
    pub fn spectrum(&mut self) -> Option<SpectrumFrame> {
        self.connected
            .then(|| self.analyser.byte_frequency_data())
    }

    pub fn bin_count(&self) -> usize {
        self.analyser.bin_count()
    }
}

impl PlaybackSink for SynthEngine {
    fn set_playing(&mut self, playing: bool) {
        SynthEngine::set_playing(self, playing);
    }
}

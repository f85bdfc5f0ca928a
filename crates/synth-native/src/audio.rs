//! Native audio output (cpal).
//!
//! The device callback pulls mono blocks from the shared engine and fans them
//! out to every channel. Without a device the frame loop drives the engine
//! through a [`BlockPump`] so the analyser still sees signal.

use anyhow::anyhow;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SizedSample};
use std::time::Duration;
use synth_core::{lock_engine, SharedEngine};

/// Block length used when pumping the engine without a device.
const PUMP_BLOCK: usize = 128;
/// Longest stall the pump catches up on in one go.
const PUMP_MAX_CATCH_UP: Duration = Duration::from_millis(250);

pub struct OutputDevice {
    device: cpal::Device,
    config: cpal::SupportedStreamConfig,
}

impl OutputDevice {
    pub fn open_default() -> anyhow::Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| anyhow!("no default output device"))?;
        let config = device.default_output_config()?;
        log::info!(
            "[audio] device {} @ {} Hz, {} ch, {:?}",
            device.name().unwrap_or_else(|_| "<unnamed>".into()),
            config.sample_rate().0,
            config.channels(),
            config.sample_format()
        );
        Ok(Self { device, config })
    }

    pub fn sample_rate(&self) -> f32 {
        self.config.sample_rate().0 as f32
    }

    /// Build and start the output stream.
    pub fn start(self, engine: SharedEngine, gain: f32) -> anyhow::Result<cpal::Stream> {
        let channels = self.config.channels() as usize;
        let format = self.config.sample_format();
        let config: cpal::StreamConfig = self.config.into();
        let stream = match format {
            cpal::SampleFormat::F32 => {
                build_stream::<f32>(&self.device, &config, channels, engine, gain)?
            }
            cpal::SampleFormat::I16 => {
                build_stream::<i16>(&self.device, &config, channels, engine, gain)?
            }
            cpal::SampleFormat::U16 => {
                build_stream::<u16>(&self.device, &config, channels, engine, gain)?
            }
            other => return Err(anyhow!("unsupported sample format {other:?}")),
        };
        stream.play()?;
        Ok(stream)
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    engine: SharedEngine,
    gain: f32,
) -> Result<cpal::Stream, cpal::BuildStreamError>
where
    T: SizedSample + FromSample<f32>,
{
    let mut mono: Vec<f32> = Vec::new();
    device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            let frames = data.len() / channels.max(1);
            mono.resize(frames, 0.0);
            lock_engine(&engine).render(&mut mono);
            for (frame, &s) in data.chunks_mut(channels.max(1)).zip(mono.iter()) {
                let v = T::from_sample((s * gain).clamp(-1.0, 1.0));
                frame.fill(v);
            }
        },
        |err| log::error!("[audio] stream error: {err}"),
        None,
    )
}

/// Renders the engine from the frame loop when no device is available.
pub struct BlockPump {
    engine: SharedEngine,
    sample_rate: f64,
    owed: f64,
    scratch: Vec<f32>,
}

impl BlockPump {
    pub fn new(engine: SharedEngine) -> Self {
        let sample_rate = lock_engine(&engine).sample_rate() as f64;
        Self {
            engine,
            sample_rate,
            owed: 0.0,
            scratch: vec![0.0; PUMP_BLOCK],
        }
    }

    /// Render the samples that `dt` of wall time is worth. Returns how many.
    pub fn advance(&mut self, dt: Duration) -> usize {
        self.owed += dt.min(PUMP_MAX_CATCH_UP).as_secs_f64() * self.sample_rate;
        let total = self.owed.floor() as usize;
        self.owed -= total as f64;

        let mut engine = lock_engine(&self.engine);
        let mut left = total;
        while left > 0 {
            let n = left.min(PUMP_BLOCK);
            engine.render(&mut self.scratch[..n]);
            left -= n;
        }
        total
    }
}

pub enum AudioOutput {
    Device(cpal::Stream),
    Pump(BlockPump),
}

impl AudioOutput {
    /// Open the device if there is one, else fall back to the pump.
    pub fn start(device: Option<OutputDevice>, engine: SharedEngine, gain: f32) -> Self {
        let Some(device) = device else {
            log::warn!("[audio] no output device, rendering blocks from the frame loop");
            return AudioOutput::Pump(BlockPump::new(engine));
        };
        match device.start(SharedEngine::clone(&engine), gain) {
            Ok(stream) => AudioOutput::Device(stream),
            Err(e) => {
                log::warn!("[audio] stream failed ({e}), rendering blocks from the frame loop");
                AudioOutput::Pump(BlockPump::new(engine))
            }
        }
    }

    /// Called once per display frame.
    pub fn advance(&mut self, dt: Duration) {
        if let AudioOutput::Pump(pump) = self {
            pump.advance(dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use synth_core::{SynthConfig, SynthEngine};

    fn engine() -> SharedEngine {
        SynthEngine::new(&SynthConfig::default())
            .expect("default config")
            .shared()
    }

    #[test]
    fn pump_renders_wall_time_worth_of_samples() {
        let mut pump = BlockPump::new(engine());
        assert_eq!(pump.advance(Duration::from_millis(10)), 441);
        assert_eq!(pump.advance(Duration::from_millis(10)), 441);
        // fractions carry over
        let a = pump.advance(Duration::from_micros(100));
        let b = pump.advance(Duration::from_micros(100));
        assert_eq!(a + b, 8);
    }

    #[test]
    fn pump_caps_long_stalls() {
        let mut pump = BlockPump::new(engine());
        assert_eq!(pump.advance(Duration::from_secs(5)), 11_025);
    }

    #[test]
    fn pumped_engine_feeds_the_analyser() {
        let shared = engine();
        lock_engine(&shared).set_playing(true);
        let mut pump = BlockPump::new(SharedEngine::clone(&shared));
        pump.advance(Duration::from_millis(50));
        let frame = lock_engine(&shared).spectrum().expect("connected");
        assert!(frame.iter().any(|b| *b > 0));
    }
}

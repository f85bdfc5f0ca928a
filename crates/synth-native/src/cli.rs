use anyhow::anyhow;
use clap::Parser;
use synth_core::constants::{DELAY_FEEDBACK, DELAY_TIME_MS, DELAY_WET_LEVEL};
use synth_core::{InputCapability, SynthConfig, Waveform};

/// Output gain applied after the engine, in front of the device.
const OUTPUT_GAIN: f32 = 0.25;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "synth")]
#[command(about = "Pointer-driven oscillator with spectrum traces", long_about = None)]
pub struct Args {
    /// Initial window width in physical pixels
    #[arg(long, value_name = "PX", default_value_t = 1280)]
    pub width: u32,

    /// Initial window height in physical pixels
    #[arg(long, value_name = "PX", default_value_t = 800)]
    pub height: u32,

    /// Drive the pad from touch events instead of the mouse
    #[arg(long)]
    pub touch: bool,

    /// Delay time of the echo stage
    #[arg(long, value_name = "MS", default_value_t = DELAY_TIME_MS)]
    pub delay_ms: f32,

    /// Echo feedback, 0 up to (not including) 1
    #[arg(long, value_name = "GAIN", default_value_t = DELAY_FEEDBACK)]
    pub feedback: f32,

    /// Echo wet level, 0..1
    #[arg(long, value_name = "GAIN", default_value_t = DELAY_WET_LEVEL)]
    pub wet: f32,

    /// Starting waveform: sine, square, saw, triangle
    #[arg(long, value_name = "NAME", default_value = "square")]
    pub waveform: String,

    /// Keep analysing but send silence to the device
    #[arg(long)]
    pub mute: bool,

    /// Log level (off, error, warn, info, debug, trace); overrides RUST_LOG
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<log::LevelFilter>,
}

impl Args {
    /// Build and validate the engine configuration for the given device rate.
    pub fn synth_config(&self, sample_rate_hz: f32) -> anyhow::Result<SynthConfig> {
        let waveform = Waveform::from_name(&self.waveform)
            .ok_or_else(|| anyhow!("unknown waveform '{}'", self.waveform))?;
        let mut config = SynthConfig::default().with_sample_rate(sample_rate_hz);
        config.delay.time_ms = self.delay_ms;
        config.delay.feedback = self.feedback;
        config.delay.wet_level = self.wet;
        config.initial = config.initial.with_waveform(waveform);
        config.validate()?;
        Ok(config)
    }

    pub fn capability(&self) -> InputCapability {
        InputCapability::detect(self.touch)
    }

    pub fn output_gain(&self) -> f32 {
        if self.mute {
            0.0
        } else {
            OUTPUT_GAIN
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use synth_core::InputDevice;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("synth").chain(args.iter().copied()))
            .expect("valid args")
    }

    #[test]
    fn defaults_match_stock_instrument() {
        let args = parse(&[]);
        let config = args.synth_config(48_000.0).expect("valid");
        assert_eq!(config.sample_rate_hz, 48_000.0);
        assert_eq!(config.delay, SynthConfig::default().delay);
        assert_eq!(config.initial.waveform, Waveform::Square);
        assert_eq!(args.capability().device, InputDevice::Mouse);
        assert!(args.output_gain() > 0.0);
        assert!(args.log_level.is_none());
    }

    #[test]
    fn overrides_flow_into_config() {
        let args = parse(&[
            "--waveform",
            "Triangle",
            "--delay-ms",
            "250",
            "--feedback",
            "0.2",
            "--touch",
            "--mute",
            "--log-level",
            "debug",
        ]);
        let config = args.synth_config(44_100.0).expect("valid");
        assert_eq!(config.initial.waveform, Waveform::Triangle);
        assert_eq!(config.delay.time_ms, 250.0);
        assert_eq!(config.delay.feedback, 0.2);
        assert_eq!(args.capability().device, InputDevice::Touch);
        assert_eq!(args.output_gain(), 0.0);
        assert_eq!(args.log_level, Some(log::LevelFilter::Debug));
    }

    #[test]
    fn rejects_unknown_waveform_and_bad_feedback() {
        assert!(parse(&["--waveform", "noise"])
            .synth_config(44_100.0)
            .is_err());
        assert!(parse(&["--feedback", "1.5"]).synth_config(44_100.0).is_err());
    }
}

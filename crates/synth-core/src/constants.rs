// Shared tuning constants for the synth engine and the visualizers.

// Pointer mapping
pub const FREQUENCY_SPAN_HZ: f32 = 1000.0; // top of the pad; bottom edge maps to 0 Hz
pub const DETUNE_MIN_CENTS: f32 = -4800.0; // left edge, four octaves down
pub const DETUNE_SPAN_CENTS: f32 = 9600.0;
pub const HUE_SPAN: f32 = 60.0; // red..yellow

// Initial control state
pub const INITIAL_FREQUENCY_HZ: f32 = 80.0;
pub const INITIAL_DETUNE_CENTS: f32 = 650.0;
pub const INITIAL_HUE: f32 = 0.0;
pub const INITIAL_POINTER_PERCENT: f32 = 0.5;

// Analyser
pub const ANALYSER_FFT_SIZE: usize = 512; // 256 usable bins
pub const ANALYSER_SMOOTHING: f32 = 0.85;
pub const ANALYSER_MIN_DECIBELS: f32 = -100.0;
pub const ANALYSER_MAX_DECIBELS: f32 = -30.0;

// Delay stage defaults
pub const DELAY_TIME_MS: f32 = 100.0;
pub const DELAY_FEEDBACK: f32 = 0.45;
pub const DELAY_WET_LEVEL: f32 = 0.5;
pub const DELAY_DRY_LEVEL: f32 = 1.0;
pub const DELAY_CUTOFF_HZ: f32 = 20_000.0;
pub const DELAY_MAX_TIME_SEC: f32 = 2.0;

pub const DEFAULT_SAMPLE_RATE_HZ: f32 = 44_100.0;

// Spectrum traces
pub const TRACE_LAYERS: usize = 4;
pub const TRACE_SEGMENTS: usize = 128; // 129 points per trace
pub const TRACE_MAGNITUDE_SCALE: f32 = 0.75;
pub const TRACE_LAYER_OFFSET_PX: f32 = 5.0; // per-layer drop once signal is present
pub const TRACE_STROKE_WIDTH: f32 = 5.0;
pub const TRACE_STROKE_ALPHA: f32 = 0.2;

// Trace baseline placement
pub const TRACE_BASELINE_HEIGHT: f32 = 256.0;
pub const SHORT_VIEWPORT_HEIGHT: f32 = 500.0;

// Decorative waves
pub const WAVE_LAYERS: usize = 4;
pub const WAVE_MIN_SEGMENTS: usize = 6;
pub const WAVE_FREQ_FACTOR: f32 = 0.05; // segments per Hz
pub const WAVE_DETUNE_DIVISOR: f32 = 2400.0;
pub const WAVE_AMPLITUDE_PX: f32 = 100.0;
pub const WAVE_LAYER_STAGGER_PX: f32 = 100.0; // scaled by the last pointer percentages
pub const WAVE_STROKE_WIDTH: f32 = 2.0;
pub const WAVE_ECHO_ALPHA: f32 = 0.3; // layers after the first

// Control surface fill
pub const SURFACE_FILL_RGB: [f32; 3] = [
    0x37 as f32 / 255.0,
    0x77 as f32 / 255.0,
    0xe3 as f32 / 255.0,
]; // #3777e3
pub const SURFACE_FILL_ALPHA: f32 = 0.9;

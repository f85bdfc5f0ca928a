pub mod config;
pub mod constants;
pub mod controller;
pub mod dsp;
pub mod engine;
pub mod error;
pub mod input;
pub mod layout;
pub mod lifecycle;
pub mod mapping;
pub mod path;
pub mod spectrum;
pub mod state;
pub mod waves;

pub use config::{AnalyserSettings, DelaySettings, SynthConfig};
pub use controller::{Circle, SceneView, SynthController, WaveformIndicator};
pub use dsp::SpectrumFrame;
pub use engine::{lock_engine, SharedEngine, SynthEngine};
pub use error::SynthError;
pub use input::{InputCapability, InputDevice, PointerEvent, PointerPhase, Region};
pub use layout::{ControlSurfaceGeometry, Layout, LayoutInput, Rect, Viewport};
pub use lifecycle::{PlaybackLifecycle, PlaybackSink, PlaybackState};
pub use mapping::{map_pointer, MappedPointer};
pub use path::{Path, Segment, StrokeStyle};
pub use spectrum::{SpectrumVisualizer, TracePath};
pub use state::{ControlState, PointerSample, SynthParameters, Waveform};
pub use waves::{DecorativeWaveGenerator, WavePath, WaveShape};

pub mod analyser;
pub mod effects;
pub mod oscillator;

pub use analyser::{Analyser, SpectrumFrame};
pub use effects::{Delay, EffectStage, EffectsChain};
pub use oscillator::Oscillator;

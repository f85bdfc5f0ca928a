//! Control-side state shared by the engine and both visualizers.
//!
//! Everything here is plain data. Pointer handlers produce a fresh
//! [`ControlState`] and swap it in whole, so a frame never observes a
//! half-updated parameter set.

use crate::constants::{
    INITIAL_DETUNE_CENTS, INITIAL_FREQUENCY_HZ, INITIAL_HUE, INITIAL_POINTER_PERCENT,
};
use crate::mapping::MappedPointer;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Waveform {
    Sine,
    Square,
    Saw,
    Triangle,
}

impl Waveform {
    pub const CYCLE: [Waveform; 4] = [
        Waveform::Sine,
        Waveform::Square,
        Waveform::Saw,
        Waveform::Triangle,
    ];

    /// Next waveform in the sine → square → saw → triangle cycle.
    pub fn next(self) -> Self {
        match self {
            Waveform::Sine => Waveform::Square,
            Waveform::Square => Waveform::Saw,
            Waveform::Saw => Waveform::Triangle,
            Waveform::Triangle => Waveform::Sine,
        }
    }

    /// Class name the presentation layer uses for the "on" icon.
    pub fn class_name(self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Square => "square",
            Waveform::Saw => "saw",
            Waveform::Triangle => "triangle",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::CYCLE
            .into_iter()
            .find(|w| w.class_name().eq_ignore_ascii_case(name))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SynthParameters {
    pub frequency_hz: f32,
    pub detune_cents: f32,
    /// Stroke hue for the decorative waves, 0..60 while the pointer stays on the pad.
    pub hue: f32,
    pub waveform: Waveform,
}

impl Default for SynthParameters {
    fn default() -> Self {
        Self {
            frequency_hz: INITIAL_FREQUENCY_HZ,
            detune_cents: INITIAL_DETUNE_CENTS,
            hue: INITIAL_HUE,
            waveform: Waveform::Square,
        }
    }
}

impl SynthParameters {
    /// Copy with pitch, detune and hue taken from a mapped pointer sample.
    pub fn with_mapped(self, mapped: &MappedPointer) -> Self {
        Self {
            frequency_hz: mapped.frequency_hz,
            detune_cents: mapped.detune_cents,
            hue: mapped.hue,
            ..self
        }
    }

    pub fn with_waveform(self, waveform: Waveform) -> Self {
        Self { waveform, ..self }
    }
}

/// Pointer position normalised to the control surface's bounding box.
/// Values outside 0..1 mean the pointer left the surface while pressed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub x_percent: f32,
    pub y_percent: f32,
}

impl PointerSample {
    pub fn new(x_percent: f32, y_percent: f32) -> Self {
        Self {
            x_percent,
            y_percent,
        }
    }
}

impl Default for PointerSample {
    fn default() -> Self {
        Self::new(INITIAL_POINTER_PERCENT, INITIAL_POINTER_PERCENT)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControlState {
    pub params: SynthParameters,
    /// Last pointer position seen on the pad; the waves keep using it after release.
    pub last_pointer: PointerSample,
}

impl ControlState {
    pub fn with_mapped(self, mapped: &MappedPointer) -> Self {
        Self {
            params: self.params.with_mapped(mapped),
            last_pointer: PointerSample::new(mapped.x_percent, mapped.y_percent),
        }
    }

    pub fn with_next_waveform(self) -> Self {
        Self {
            params: self.params.with_waveform(self.params.waveform.next()),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waveform_names_round_trip() {
        for w in Waveform::CYCLE {
            assert_eq!(Waveform::from_name(w.class_name()), Some(w));
        }
        assert_eq!(Waveform::from_name("SAW"), Some(Waveform::Saw));
        assert_eq!(Waveform::from_name("noise"), None);
    }

    #[test]
    fn next_waveform_only_touches_waveform() {
        let state = ControlState::default();
        let next = state.with_next_waveform();
        assert_eq!(next.params.waveform, Waveform::Saw);
        assert_eq!(next.params.frequency_hz, state.params.frequency_hz);
        assert_eq!(next.last_pointer, state.last_pointer);
    }
}

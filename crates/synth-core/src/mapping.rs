use crate::constants::{DETUNE_MIN_CENTS, DETUNE_SPAN_CENTS, FREQUENCY_SPAN_HZ, HUE_SPAN};
use crate::state::PointerSample;

/// Synthesis parameters derived from one pointer sample, plus the sample itself
/// so the caller can store it as the last known pointer position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MappedPointer {
    pub frequency_hz: f32,
    pub detune_cents: f32,
    pub hue: f32,
    pub x_percent: f32,
    pub y_percent: f32,
}

/// Map a normalised pointer position onto pitch, detune and hue.
///
/// Top of the pad is 1000 Hz and yellow, bottom is 0 Hz and red; left is four
/// octaves flat, right four octaves sharp. Values are not clamped: dragging
/// past the edge keeps extrapolating.
#[inline]
pub fn map_pointer(pointer: PointerSample) -> MappedPointer {
    let PointerSample {
        x_percent,
        y_percent,
    } = pointer;
    MappedPointer {
        frequency_hz: FREQUENCY_SPAN_HZ - FREQUENCY_SPAN_HZ * y_percent,
        detune_cents: DETUNE_MIN_CENTS + DETUNE_SPAN_CENTS * x_percent,
        hue: HUE_SPAN - HUE_SPAN * y_percent,
        x_percent,
        y_percent,
    }
}

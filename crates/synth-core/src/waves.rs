use crate::constants::{
    WAVE_AMPLITUDE_PX, WAVE_DETUNE_DIVISOR, WAVE_ECHO_ALPHA, WAVE_FREQ_FACTOR, WAVE_LAYERS,
    WAVE_LAYER_STAGGER_PX, WAVE_MIN_SEGMENTS, WAVE_STROKE_WIDTH,
};
use crate::layout::Viewport;
use crate::path::{Path, StrokeStyle};
use crate::state::ControlState;
use glam::Vec2;
use std::f32::consts::PI;

/// Segment count and amplitude for the current parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveShape {
    pub segment_count: usize,
    pub amplitude: f32,
}

impl WaveShape {
    pub fn from_params(frequency_hz: f32, detune_cents: f32) -> Self {
        let detune_factor = ((detune_cents / WAVE_DETUNE_DIVISOR).abs() - 2.0).abs() + 0.5;
        let freq_factor = frequency_hz * WAVE_FREQ_FACTOR;
        // NaN falls through to the minimum as well
        let segments = if freq_factor > WAVE_MIN_SEGMENTS as f32 {
            freq_factor.floor() as usize
        } else {
            WAVE_MIN_SEGMENTS
        };
        Self {
            segment_count: segments,
            amplitude: WAVE_AMPLITUDE_PX * detune_factor,
        }
    }

    /// Temporal angular speed of the travelling wave.
    pub fn phase_rate(&self) -> f32 {
        self.segment_count as f32 * PI / 8.0
    }

    pub fn y(&self, elapsed_sec: f32, index: usize, baseline: f32) -> f32 {
        (elapsed_sec * self.phase_rate() + index as f32).sin() * self.amplitude + baseline
    }
}

#[derive(Clone, Debug)]
pub struct WavePath {
    pub path: Path,
    /// Segment count the points were laid out for; `None` forces a rebuild.
    built_for: Option<usize>,
}

impl WavePath {
    fn new(stroke: StrokeStyle) -> Self {
        Self {
            path: Path::new(stroke),
            built_for: None,
        }
    }

    pub fn built_for(&self) -> Option<usize> {
        self.built_for
    }

    fn rebuild(&mut self, segment_count: usize, spacing: f32, x_offset: f32, y: f32) {
        self.path.clear();
        for i in 0..=segment_count {
            self.path.push(Vec2::new(spacing * i as f32 + x_offset, y));
        }
        self.built_for = Some(segment_count);
    }
}

#[derive(Clone, Debug)]
pub struct DecorativeWaveGenerator {
    layers: Vec<WavePath>,
    rebuilds: usize,
}

impl Default for DecorativeWaveGenerator {
    fn default() -> Self {
        let layers = (0..WAVE_LAYERS)
            .map(|j| {
                let alpha = if j == 0 { 1.0 } else { WAVE_ECHO_ALPHA };
                WavePath::new(StrokeStyle::red(alpha, WAVE_STROKE_WIDTH))
            })
            .collect();
        Self {
            layers,
            rebuilds: 0,
        }
    }
}

impl DecorativeWaveGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layers(&self) -> &[WavePath] {
        &self.layers
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> + '_ {
        self.layers.iter().map(|l| &l.path)
    }

    /// Total layer rebuilds so far.
    pub fn rebuild_count(&self) -> usize {
        self.rebuilds
    }

    /// Force every layer to re-lay its x positions on the next update.
    pub fn invalidate(&mut self) {
        for layer in self.layers.iter_mut() {
            layer.built_for = None;
        }
    }

    /// Recompute all layers for the given state and elapsed time.
    pub fn update(&mut self, control: &ControlState, viewport: Viewport, elapsed_sec: f32) {
        let params = &control.params;
        let shape = WaveShape::from_params(params.frequency_hz, params.detune_cents);
        let n = shape.segment_count;
        let spacing = viewport.width / n as f32;
        let x_stagger = WAVE_LAYER_STAGGER_PX * control.last_pointer.x_percent;
        let y_stagger = WAVE_LAYER_STAGGER_PX * control.last_pointer.y_percent;
        let mid = viewport.height / 2.0;

        for (j, layer) in self.layers.iter_mut().enumerate() {
            let baseline = mid + j as f32 * y_stagger;
            if layer.built_for != Some(n) || layer.path.len() != n + 1 {
                layer.rebuild(n, spacing, j as f32 * x_stagger, baseline);
                self.rebuilds += 1;
                log::debug!("[waves] layer {j} rebuilt for {n} segments");
            }
            for (i, seg) in layer.path.segments.iter_mut().enumerate() {
                seg.point.y = shape.y(elapsed_sec, i, baseline);
            }
            layer.path.stroke.hue = params.hue;
            layer.path.smooth();
        }
    }
}

use crate::constants::{
    TRACE_LAYERS, TRACE_LAYER_OFFSET_PX, TRACE_MAGNITUDE_SCALE, TRACE_SEGMENTS,
    TRACE_STROKE_ALPHA, TRACE_STROKE_WIDTH,
};
use crate::layout::Layout;
use crate::path::{Path, StrokeStyle};
use glam::Vec2;

pub type TracePath = Path;

/// Height of a bin's point above the baseline, with the per-layer echo drop
/// applied only where the bin carries signal.
#[inline]
pub fn trace_y(center_y: f32, magnitude: u8, layer: usize) -> f32 {
    let y = center_y - magnitude as f32 * TRACE_MAGNITUDE_SCALE;
    if y == center_y {
        y
    } else {
        y + layer as f32 * TRACE_LAYER_OFFSET_PX
    }
}

#[derive(Clone, Debug, Default)]
pub struct SpectrumVisualizer {
    traces: Vec<TracePath>,
    center_y: f32,
}

impl SpectrumVisualizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_built(&self) -> bool {
        !self.traces.is_empty()
    }

    pub fn traces(&self) -> &[TracePath] {
        &self.traces
    }

    pub fn build(&mut self, layout: &Layout) {
        if self.is_built() {
            return;
        }
        let mut base = Path::new(StrokeStyle::white(TRACE_STROKE_ALPHA, TRACE_STROKE_WIDTH));
        for _ in 0..=TRACE_SEGMENTS {
            base.push(Vec2::ZERO);
        }
        self.traces = vec![base; TRACE_LAYERS];
        self.relayout(layout);
    }

    /// Spread the points across the surface diameter and drop them back onto
    /// the baseline.
    pub fn relayout(&mut self, layout: &Layout) {
        self.center_y = layout.center_y;
        let step = layout.surface.diameter / TRACE_SEGMENTS as f32;
        let left = layout.surface.left();
        for trace in self.traces.iter_mut() {
            for (i, seg) in trace.segments.iter_mut().enumerate() {
                seg.point = Vec2::new(left + step * i as f32, layout.center_y);
            }
            trace.smooth();
        }
    }

    /// Write one spectrum frame into every layer. Returns `false` and leaves
    /// the traces untouched when the frame is too short to fill them.
    pub fn update(&mut self, spectrum: &[u8]) -> bool {
        if !self.is_built() || spectrum.len() < TRACE_SEGMENTS * 2 {
            log::trace!("[spectrum] skip frame ({} bins)", spectrum.len());
            return false;
        }
        let bins = &spectrum[..spectrum.len() / 2];
        let center_y = self.center_y;
        for (layer, trace) in self.traces.iter_mut().enumerate() {
            for (seg, &m) in trace.segments.iter_mut().zip(bins) {
                seg.point.y = trace_y(center_y, m, layer);
            }
            trace.smooth();
        }
        true
    }
}

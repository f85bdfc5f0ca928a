use glam::Vec2;
use std::f32::consts::TAU;
use synth_core::{Circle, Path, Rect, SceneView, Waveform, WaveformIndicator};

/// Line pieces per Bézier curve.
const CURVE_STEPS: usize = 8;
const CIRCLE_SEGMENTS: usize = 96;
const GLYPH_STROKE_WIDTH: f32 = 2.0;
const GLYPH_ON_ALPHA: f32 = 1.0;
const GLYPH_OFF_ALPHA: f32 = 0.25;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub pos: [f32; 2],
    pub color: [f32; 4],
    /// 1.0 to clip against the surface circle.
    pub clip: f32,
}

impl Vertex {
    fn new(pos: Vec2, color: [f32; 4], clip: bool) -> Self {
        Self {
            pos: pos.to_array(),
            color,
            clip: if clip { 1.0 } else { 0.0 },
        }
    }
}

/// Sample every curve of the path; the last anchor closes the polyline.
pub fn flatten(path: &Path, steps: usize) -> Vec<Vec2> {
    let steps = steps.max(1);
    let mut out = Vec::with_capacity(path.len().saturating_sub(1) * steps + 1);
    for i in 0..path.len().saturating_sub(1) {
        for s in 0..steps {
            if let Some(p) = path.curve_point(i, s as f32 / steps as f32) {
                out.push(p);
            }
        }
    }
    out.extend(path.segments.last().map(|s| s.point));
    out
}

/// Stroke a polyline with butt-ended quads. Zero-length pieces are skipped.
pub fn stroke(points: &[Vec2], width: f32, color: [f32; 4], clip: bool, out: &mut Vec<Vertex>) {
    let half = width / 2.0;
    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let Some(dir) = (b - a).try_normalize() else {
            continue;
        };
        let n = dir.perp() * half;
        let quad = [a + n, a - n, b + n, b + n, a - n, b - n];
        out.extend(quad.iter().map(|&p| Vertex::new(p, color, clip)));
    }
}

pub fn fill_circle(circle: Circle, color: [f32; 4], out: &mut Vec<Vertex>) {
    if !(circle.radius > 0.0) {
        return;
    }
    let c = circle.center;
    let at = |k: usize| {
        let a = k as f32 / CIRCLE_SEGMENTS as f32 * TAU;
        c + Vec2::new(a.cos(), a.sin()) * circle.radius
    };
    for k in 0..CIRCLE_SEGMENTS {
        for p in [c, at(k), at(k + 1)] {
            out.push(Vertex::new(p, color, false));
        }
    }
}

/// One period of the waveform's shape inside `cell`.
pub fn glyph(waveform: Waveform, cell: Rect) -> Vec<Vec2> {
    let unit: &[[f32; 2]] = match waveform {
        Waveform::Sine => &[],
        Waveform::Square => &[
            [0.0, 0.5],
            [0.0, 0.0],
            [0.5, 0.0],
            [0.5, 1.0],
            [1.0, 1.0],
            [1.0, 0.5],
        ],
        Waveform::Saw => &[[0.0, 1.0], [0.5, 0.0], [0.5, 1.0], [1.0, 0.0]],
        Waveform::Triangle => &[[0.0, 0.5], [0.25, 0.0], [0.75, 1.0], [1.0, 0.5]],
    };
    let to_cell =
        |[u, v]: [f32; 2]| Vec2::new(cell.left + u * cell.width, cell.top + v * cell.height);
    if waveform == Waveform::Sine {
        return (0..=16)
            .map(|k| {
                let u = k as f32 / 16.0;
                to_cell([u, 0.5 - 0.5 * (u * TAU).sin()])
            })
            .collect();
    }
    unit.iter().copied().map(to_cell).collect()
}

/// Icon strip: one glyph per waveform, stacked in cycle order, active one lit.
pub fn indicator(indicator: &WaveformIndicator, out: &mut Vec<Vertex>) {
    let r = indicator.placement;
    if r.width <= 0.0 || r.height <= 0.0 {
        return;
    }
    let rows = Waveform::CYCLE.len() as f32;
    let row_h = r.height / rows;
    for (k, w) in Waveform::CYCLE.into_iter().enumerate() {
        // keep a margin around each icon
        let cell = Rect::new(
            r.left + r.width * 0.15,
            r.top + row_h * k as f32 + row_h * 0.3,
            r.width * 0.7,
            row_h * 0.4,
        );
        let alpha = if w == indicator.active {
            GLYPH_ON_ALPHA
        } else {
            GLYPH_OFF_ALPHA
        };
        stroke(
            &glyph(w, cell),
            GLYPH_STROKE_WIDTH,
            [1.0, 1.0, 1.0, alpha],
            false,
            out,
        );
    }
}

/// Draw order: surface disc, clipped traces, waves, indicator.
pub fn tessellate_scene(scene: &SceneView<'_>) -> Vec<Vertex> {
    let mut out = Vec::new();
    fill_circle(scene.surface, scene.surface_fill, &mut out);
    for trace in scene.traces {
        let points = flatten(trace, CURVE_STEPS);
        stroke(&points, trace.stroke.width, trace.stroke.rgba(), true, &mut out);
    }
    for wave in scene.waves {
        let path = &wave.path;
        let points = flatten(path, CURVE_STEPS);
        stroke(&points, path.stroke.width, path.stroke.rgba(), false, &mut out);
    }
    indicator(&scene.indicator, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use synth_core::StrokeStyle;

    fn line(points: &[[f32; 2]]) -> Path {
        let mut p = Path::new(StrokeStyle::white(1.0, 2.0));
        for &[x, y] in points {
            p.push(Vec2::new(x, y));
        }
        p.smooth();
        p
    }

    #[test]
    fn vertex_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 28);
    }

    #[test]
    fn flatten_hits_every_anchor() {
        let path = line(&[[0.0, 0.0], [10.0, 5.0], [20.0, 0.0], [30.0, 5.0]]);
        let pts = flatten(&path, 4);
        assert_eq!(pts.len(), 3 * 4 + 1);
        for (i, seg) in path.segments.iter().enumerate() {
            assert!((pts[i * 4] - seg.point).length() < 1e-4);
        }
    }

    #[test]
    fn flatten_handles_short_paths() {
        assert!(flatten(&line(&[]), 8).is_empty());
        assert_eq!(flatten(&line(&[[1.0, 2.0]]), 8), vec![Vec2::new(1.0, 2.0)]);
    }

    #[test]
    fn stroke_emits_a_quad_per_piece_and_skips_degenerate_ones() {
        let mut out = Vec::new();
        let pts = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
        ];
        stroke(&pts, 4.0, [1.0; 4], true, &mut out);
        assert_eq!(out.len(), 12);
        // horizontal piece is offset vertically by half the width
        assert_eq!(out[0].pos, [0.0, 2.0]);
        assert_eq!(out[1].pos, [0.0, -2.0]);
        assert!(out.iter().all(|v| v.clip == 1.0));
    }

    #[test]
    fn circle_fan_stays_on_radius() {
        let mut out = Vec::new();
        let circle = Circle {
            center: Vec2::new(50.0, 50.0),
            radius: 20.0,
        };
        fill_circle(circle, [0.0, 0.0, 1.0, 0.9], &mut out);
        assert_eq!(out.len(), CIRCLE_SEGMENTS * 3);
        for tri in out.chunks(3) {
            assert_eq!(tri[0].pos, [50.0, 50.0]);
            let d = Vec2::from(tri[1].pos).distance(circle.center);
            assert!((d - 20.0).abs() < 1e-3);
        }
        let mut none = Vec::new();
        fill_circle(
            Circle {
                center: Vec2::ZERO,
                radius: 0.0,
            },
            [1.0; 4],
            &mut none,
        );
        assert!(none.is_empty());
    }

    #[test]
    fn glyphs_stay_inside_their_cell() {
        let cell = Rect::new(10.0, 20.0, 30.0, 12.0);
        for w in Waveform::CYCLE {
            let pts = glyph(w, cell);
            assert!(pts.len() >= 4, "{w:?}");
            for p in pts {
                assert!(cell.contains(p), "{w:?} {p:?}");
            }
        }
    }

    #[test]
    fn only_the_active_glyph_is_lit() {
        let ind = WaveformIndicator {
            active: Waveform::Saw,
            placement: Rect::new(0.0, 0.0, 40.0, 160.0),
        };
        let mut out = Vec::new();
        indicator(&ind, &mut out);
        let lit: Vec<_> = out.iter().filter(|v| v.color[3] == GLYPH_ON_ALPHA).collect();
        assert!(!lit.is_empty());
        // third row holds the saw
        assert!(lit.iter().all(|v| v.pos[1] >= 80.0 && v.pos[1] <= 120.0));
    }
}

use glam::Vec2;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Segment {
    pub point: Vec2,
    pub handle_in: Vec2,
    pub handle_out: Vec2,
}

impl Segment {
    pub fn new(point: Vec2) -> Self {
        Self {
            point,
            ..Default::default()
        }
    }
}

/// Stroke colour in hue/saturation/brightness, as the waves animate hue only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    pub hue: f32, // degrees
    pub saturation: f32,
    pub brightness: f32,
    pub alpha: f32,
    pub width: f32,
}

impl StrokeStyle {
    pub fn white(alpha: f32, width: f32) -> Self {
        Self {
            hue: 0.0,
            saturation: 0.0,
            brightness: 1.0,
            alpha,
            width,
        }
    }

    pub fn red(alpha: f32, width: f32) -> Self {
        Self {
            hue: 0.0,
            saturation: 1.0,
            brightness: 1.0,
            alpha,
            width,
        }
    }

    pub fn rgba(&self) -> [f32; 4] {
        let [r, g, b] = hsb_to_rgb(self.hue, self.saturation, self.brightness);
        [r, g, b, self.alpha]
    }
}

pub fn hsb_to_rgb(hue: f32, saturation: f32, brightness: f32) -> [f32; 3] {
    let h = hue.rem_euclid(360.0) / 60.0;
    let sector = h.floor();
    let f = h - sector;
    let v = brightness;
    let p = v * (1.0 - saturation);
    let q = v * (1.0 - saturation * f);
    let t = v * (1.0 - saturation * (1.0 - f));
    match sector as i32 {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    pub segments: Vec<Segment>,
    pub stroke: StrokeStyle,
}

impl Path {
    pub fn new(stroke: StrokeStyle) -> Self {
        Self {
            segments: Vec::new(),
            stroke,
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }

    pub fn push(&mut self, point: Vec2) {
        self.segments.push(Segment::new(point));
    }

    pub fn points(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.segments.iter().map(|s| s.point)
    }

    /// Fit handles so the open path becomes a C2-continuous cubic spline
    /// through every anchor. Paths with fewer than three points get straight
    /// (zero-length) handles.
    pub fn smooth(&mut self) {
        let size = self.segments.len();
        if size < 3 {
            for s in self.segments.iter_mut() {
                s.handle_in = Vec2::ZERO;
                s.handle_out = Vec2::ZERO;
            }
            return;
        }
        let n = size - 1; // curve count
        let knots: Vec<Vec2> = self.points().collect();

        let mut rhs = vec![Vec2::ZERO; n];
        rhs[0] = knots[0] + 2.0 * knots[1];
        for i in 1..n - 1 {
            rhs[i] = 4.0 * knots[i] + 2.0 * knots[i + 1];
        }
        rhs[n - 1] = (8.0 * knots[n - 1] + knots[n]) / 2.0;
        let first = first_control_points(&rhs);

        for (i, seg) in self.segments.iter_mut().enumerate() {
            let pt = knots[i];
            seg.handle_out = if i < n { first[i] - pt } else { Vec2::ZERO };
            seg.handle_in = if i == 0 {
                Vec2::ZERO
            } else {
                let second = if i < n {
                    2.0 * pt - first[i]
                } else {
                    (knots[n] + first[n - 1]) / 2.0
                };
                second - pt
            };
        }
    }

    /// Evaluate curve `index` (between anchors `index` and `index + 1`) at `t`.
    pub fn curve_point(&self, index: usize, t: f32) -> Option<Vec2> {
        let a = self.segments.get(index)?;
        let b = self.segments.get(index + 1)?;
        let p0 = a.point;
        let p1 = a.point + a.handle_out;
        let p2 = b.point + b.handle_in;
        let p3 = b.point;
        let u = 1.0 - t;
        Some(u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3)
    }
}

/// Solve the tridiagonal system for the first control point of each curve.
fn first_control_points(rhs: &[Vec2]) -> Vec<Vec2> {
    let n = rhs.len();
    let mut x = vec![Vec2::ZERO; n];
    let mut tmp = vec![0.0_f32; n];
    let mut b = 2.0_f32;
    x[0] = rhs[0] / b;
    for i in 1..n {
        tmp[i] = 1.0 / b;
        b = (if i < n - 1 { 4.0 } else { 3.5 }) - tmp[i];
        x[i] = (rhs[i] - x[i - 1]) / b;
    }
    for i in 1..n {
        let next = x[n - i];
        x[n - i - 1] -= tmp[n - i] * next;
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_through(points: &[(f32, f32)]) -> Path {
        let mut p = Path::new(StrokeStyle::white(1.0, 1.0));
        for &(x, y) in points {
            p.push(Vec2::new(x, y));
        }
        p
    }

    #[test]
    fn smoothing_keeps_anchors_and_passes_through_them() {
        let mut p = path_through(&[(0.0, 0.0), (10.0, 5.0), (20.0, -5.0), (30.0, 0.0)]);
        let before: Vec<Vec2> = p.points().collect();
        p.smooth();
        assert_eq!(p.points().collect::<Vec<_>>(), before);
        for i in 0..3 {
            let start = p.curve_point(i, 0.0).expect("curve");
            let end = p.curve_point(i, 1.0).expect("curve");
            assert!((start - before[i]).length() < 1e-4);
            assert!((end - before[i + 1]).length() < 1e-4);
        }
        assert!(p.curve_point(3, 0.5).is_none());
    }

    #[test]
    fn collinear_points_get_handles_along_the_line() {
        let mut p = path_through(&[(0.0, 3.0), (10.0, 3.0), (20.0, 3.0), (30.0, 3.0)]);
        p.smooth();
        for s in &p.segments {
            assert!(s.handle_in.y.abs() < 1e-5);
            assert!(s.handle_out.y.abs() < 1e-5);
        }
        assert!(p.segments[0].handle_out.x > 0.0);
        assert!(p.segments[3].handle_in.x < 0.0);
    }

    #[test]
    fn evenly_spaced_line_gets_third_length_handles() {
        // needs the back-substitution pass to land on exact thirds
        let mut p = path_through(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0), (30.0, 0.0)]);
        p.smooth();
        let third = 10.0 / 3.0;
        for s in &p.segments[..3] {
            assert!((s.handle_out.x - third).abs() < 1e-4, "{s:?}");
        }
        for s in &p.segments[1..] {
            assert!((s.handle_in.x + third).abs() < 1e-4, "{s:?}");
        }
    }

    #[test]
    fn handles_are_continuous_at_interior_anchors() {
        let mut p = path_through(&[
            (0.0, 0.0),
            (10.0, 8.0),
            (20.0, -3.0),
            (30.0, 4.0),
            (40.0, 0.0),
        ]);
        p.smooth();
        for s in &p.segments[1..4] {
            // C1: incoming and outgoing handles mirror each other
            assert!((s.handle_in + s.handle_out).length() < 1e-3);
        }
    }

    #[test]
    fn short_paths_get_straight_handles() {
        let mut p = path_through(&[(0.0, 0.0), (10.0, 10.0)]);
        p.smooth();
        assert!(p.segments.iter().all(|s| s.handle_in == Vec2::ZERO && s.handle_out == Vec2::ZERO));
    }

    #[test]
    fn hsb_primaries() {
        assert_eq!(hsb_to_rgb(0.0, 1.0, 1.0), [1.0, 0.0, 0.0]);
        assert_eq!(hsb_to_rgb(120.0, 1.0, 1.0), [0.0, 1.0, 0.0]);
        assert_eq!(hsb_to_rgb(0.0, 0.0, 1.0), [1.0, 1.0, 1.0]);
        let yellow = hsb_to_rgb(60.0, 1.0, 1.0);
        assert!((yellow[0] - 1.0).abs() < 1e-6 && (yellow[1] - 1.0).abs() < 1e-6);
    }
}

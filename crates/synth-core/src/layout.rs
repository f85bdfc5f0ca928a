use crate::constants::{SHORT_VIEWPORT_HEIGHT, TRACE_BASELINE_HEIGHT};
use crate::state::PointerSample;
use glam::Vec2;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.left
            && p.x <= self.left + self.width
            && p.y >= self.top
            && p.y <= self.top + self.height
    }

    /// Snap to whole pixels, toward zero.
    pub fn floored(&self) -> Self {
        Self::new(
            self.left.trunc(),
            self.top.trunc(),
            self.width.trunc(),
            self.height.trunc(),
        )
    }
}

/// What the host reports on resize: viewport plus anchor bounding boxes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutInput {
    pub viewport: Viewport,
    pub surface_anchor: Rect,
    pub activation_anchor: Rect,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControlSurfaceGeometry {
    pub origin_x: f32,
    pub origin_y: f32,
    pub diameter: f32,
    // Pointer percentages are measured from the box's corner, not its centre.
    left: f32,
    top: f32,
}

impl ControlSurfaceGeometry {
    pub fn from_anchor(anchor: &Rect) -> Self {
        let radius = anchor.width / 2.0;
        Self {
            origin_x: anchor.left + radius,
            origin_y: anchor.top + radius,
            diameter: anchor.width,
            left: anchor.left,
            top: anchor.top,
        }
    }

    pub fn radius(&self) -> f32 {
        self.diameter / 2.0
    }

    pub fn left(&self) -> f32 {
        self.left
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.origin_x, self.origin_y)
    }

    /// Normalise a page position against the surface box.
    ///
    /// `None` when the surface has no size yet; positions outside the box are
    /// returned as-is (below 0 or above 1).
    pub fn pointer_sample(&self, page: Vec2) -> Option<PointerSample> {
        if !(self.diameter > 0.0) {
            return None;
        }
        Some(PointerSample::new(
            (page.x - self.left) / self.diameter,
            (page.y - self.top) / self.diameter,
        ))
    }
}

/// Baseline the spectrum traces rest on when silent.
pub fn trace_center_y(viewport_height: f32) -> f32 {
    let h = viewport_height;
    if h < SHORT_VIEWPORT_HEIGHT {
        h / 2.0 + (h - TRACE_BASELINE_HEIGHT) / 2.0
    } else {
        h / 2.0 + TRACE_BASELINE_HEIGHT / 2.0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Layout {
    pub viewport: Viewport,
    pub center_y: f32,
    pub surface: ControlSurfaceGeometry,
    pub indicator: Rect,
    pub activation: Rect,
    pub surface_anchor: Rect,
}

impl Layout {
    pub fn compute(input: &LayoutInput) -> Self {
        Self {
            viewport: input.viewport,
            center_y: trace_center_y(input.viewport.height),
            surface: ControlSurfaceGeometry::from_anchor(&input.surface_anchor),
            indicator: input.activation_anchor.floored(),
            activation: input.activation_anchor,
            surface_anchor: input.surface_anchor,
        }
    }

    /// A zero-sized viewport means the host has not reported a size yet.
    pub fn is_ready(&self) -> bool {
        self.viewport.width > 0.0 && self.viewport.height > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_y_rules() {
        assert_eq!(trace_center_y(400.0), 200.0 + 72.0);
        assert_eq!(trace_center_y(800.0), 400.0 + 128.0);
        // the tall branch starts at 500, so the baseline steps there
        assert_eq!(trace_center_y(499.0), 371.0);
        assert_eq!(trace_center_y(500.0), 378.0);
    }

    #[test]
    fn surface_from_anchor() {
        let s = ControlSurfaceGeometry::from_anchor(&Rect::new(100.0, 50.0, 200.0, 200.0));
        assert_eq!(s.center(), Vec2::new(200.0, 150.0));
        assert_eq!(s.radius(), 100.0);
        let p = s.pointer_sample(Vec2::new(200.0, 150.0)).expect("sized");
        assert_eq!(p, PointerSample::new(0.5, 0.5));
        let outside = s.pointer_sample(Vec2::new(0.0, 450.0)).expect("sized");
        assert_eq!(outside, PointerSample::new(-0.5, 2.0));
    }

    #[test]
    fn zero_sized_surface_maps_nothing() {
        let s = ControlSurfaceGeometry::from_anchor(&Rect::default());
        assert!(s.pointer_sample(Vec2::new(10.0, 10.0)).is_none());
    }

    #[test]
    fn layout_is_idempotent() {
        let input = LayoutInput {
            viewport: Viewport::new(1280.0, 720.0),
            surface_anchor: Rect::new(600.0, 200.0, 180.0, 180.0),
            activation_anchor: Rect::new(480.5, 200.7, 60.2, 180.9),
        };
        let a = Layout::compute(&input);
        let b = Layout::compute(&input);
        assert_eq!(a, b);
        assert_eq!(a.indicator, Rect::new(480.0, 200.0, 60.0, 180.0));
        assert!(a.is_ready());
        assert!(!Layout::default().is_ready());
    }
}

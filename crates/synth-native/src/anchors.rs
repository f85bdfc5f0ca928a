use glam::Vec2;
use synth_core::{LayoutInput, PointerPhase, Rect, Region, Viewport};

/// Pad diameter as a share of the shorter window side.
const SURFACE_SHARE: f32 = 0.6;
/// Button strip width and gap, relative to the pad diameter.
const BUTTON_WIDTH_SHARE: f32 = 0.2;
const BUTTON_GAP_SHARE: f32 = 0.1;

/// Anchor boxes for a window of the given physical size.
pub fn layout_for(width: f32, height: f32) -> LayoutInput {
    let diameter = (width.min(height) * SURFACE_SHARE).floor();
    let left = ((width - diameter) / 2.0).floor();
    let top = ((height - diameter) / 2.0).floor();
    let button_width = diameter * BUTTON_WIDTH_SHARE;
    let button_left = left - button_width - diameter * BUTTON_GAP_SHARE;
    LayoutInput {
        viewport: Viewport::new(width, height),
        surface_anchor: Rect::new(left, top, diameter, diameter),
        activation_anchor: Rect::new(button_left, top, button_width, diameter),
    }
}

/// Region under `p`. The button wins where the boxes would overlap.
pub fn region_at(input: &LayoutInput, p: Vec2) -> Option<Region> {
    if input.activation_anchor.contains(p) {
        Some(Region::Activation)
    } else if input.surface_anchor.contains(p) {
        Some(Region::FrequencyPad)
    } else {
        None
    }
}

/// Region a pointer event is delivered to. A pressed pad keeps every motion,
/// wherever it lands, and a release off both anchors still lets go of it.
pub fn route(
    input: &LayoutInput,
    phase: PointerPhase,
    p: Vec2,
    pad_active: bool,
) -> Option<Region> {
    match (phase, region_at(input, p)) {
        (PointerPhase::Move, _) if pad_active => Some(Region::FrequencyPad),
        (_, Some(region)) => Some(region),
        (PointerPhase::End, None) => Some(Region::FrequencyPad),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_is_centred_and_button_sits_left_of_it() {
        let input = layout_for(1000.0, 800.0);
        assert_eq!(input.surface_anchor, Rect::new(260.0, 160.0, 480.0, 480.0));
        let button = input.activation_anchor;
        assert_eq!(button.top, 160.0);
        assert_eq!(button.height, 480.0);
        assert!(button.left + button.width < input.surface_anchor.left);
    }

    #[test]
    fn hit_testing() {
        let input = layout_for(1000.0, 800.0);
        assert_eq!(
            region_at(&input, Vec2::new(500.0, 400.0)),
            Some(Region::FrequencyPad)
        );
        let b = input.activation_anchor;
        assert_eq!(
            region_at(&input, Vec2::new(b.left + 1.0, b.top + 1.0)),
            Some(Region::Activation)
        );
        assert_eq!(region_at(&input, Vec2::new(5.0, 5.0)), None);
    }

    #[test]
    fn pressed_pad_captures_motion_everywhere() {
        let input = layout_for(1000.0, 800.0);
        let far_below = Vec2::new(500.0, 160.0 + 1.5 * 480.0);
        let over_button = Vec2::new(150.0, 300.0);
        for p in [far_below, over_button] {
            assert_eq!(
                route(&input, PointerPhase::Move, p, true),
                Some(Region::FrequencyPad)
            );
        }
        assert_eq!(route(&input, PointerPhase::Move, far_below, false), None);
        assert_eq!(
            route(&input, PointerPhase::Move, over_button, false),
            Some(Region::Activation)
        );
    }

    #[test]
    fn releases_always_land_somewhere() {
        let input = layout_for(1000.0, 800.0);
        assert_eq!(
            route(&input, PointerPhase::End, Vec2::new(5.0, 5.0), false),
            Some(Region::FrequencyPad)
        );
        assert_eq!(
            route(&input, PointerPhase::Start, Vec2::new(5.0, 5.0), false),
            None
        );
        let b = input.activation_anchor;
        assert_eq!(
            route(&input, PointerPhase::End, Vec2::new(b.left + 1.0, b.top + 1.0), true),
            Some(Region::Activation)
        );
    }
}

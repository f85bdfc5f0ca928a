// Host-side tests for the pointer → parameter mapping.

use synth_core::{map_pointer, PointerSample};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn center_of_pad_is_500hz_no_detune() {
    let m = map_pointer(PointerSample::new(0.5, 0.5));
    assert!(approx(m.frequency_hz, 500.0));
    assert!(approx(m.detune_cents, 0.0));
    assert!(approx(m.hue, 30.0));
}

#[test]
fn bottom_left_corner() {
    let m = map_pointer(PointerSample::new(0.0, 1.0));
    assert!(approx(m.frequency_hz, 0.0));
    assert!(approx(m.detune_cents, -4800.0));
    assert!(approx(m.hue, 0.0));
}

#[test]
fn mapping_echoes_the_sample() {
    let m = map_pointer(PointerSample::new(0.25, 0.75));
    assert_eq!((m.x_percent, m.y_percent), (0.25, 0.75));
}

// Property-based style sweeps over the unit square
#[test]
fn frequency_in_range_and_decreasing_in_y() {
    let mut prev = f32::INFINITY;
    for step in 0..=100 {
        let y = step as f32 / 100.0;
        let f = map_pointer(PointerSample::new(0.3, y)).frequency_hz;
        assert!((-1e-3..=1000.0 + 1e-3).contains(&f), "y={y} f={f}");
        assert!(f < prev, "frequency not decreasing at y={y}");
        prev = f;
    }
}

#[test]
fn detune_in_range_and_increasing_in_x() {
    let mut prev = f32::NEG_INFINITY;
    for step in 0..=100 {
        let x = step as f32 / 100.0;
        let d = map_pointer(PointerSample::new(x, 0.6)).detune_cents;
        assert!((-4800.0 - 1e-2..=4800.0 + 1e-2).contains(&d), "x={x} d={d}");
        assert!(d > prev, "detune not increasing at x={x}");
        prev = d;
    }
}

#[test]
fn hue_depends_only_on_y() {
    for ys in 0..=10 {
        let y = ys as f32 / 10.0;
        let expected = 60.0 - 60.0 * y;
        for xs in 0..=10 {
            let x = xs as f32 / 10.0;
            let hue = map_pointer(PointerSample::new(x, y)).hue;
            assert!(approx(hue, expected), "x={x} y={y} hue={hue}");
        }
    }
}

#[test]
fn leaving_the_pad_keeps_extrapolating() {
    let above = map_pointer(PointerSample::new(1.5, -0.5));
    assert!(approx(above.frequency_hz, 1500.0));
    assert!(approx(above.detune_cents, 9600.0));
    assert!(approx(above.hue, 90.0));

    let below = map_pointer(PointerSample::new(-0.25, 1.2));
    assert!(below.frequency_hz < 0.0);
    assert!(below.detune_cents < -4800.0);
}

use floem_gradient::{hsb_to_rgb, rgb_to_hsb, Hsb, Rgb};
use proptest::prelude::*;

const EPSILON: f64 = 1e-9;

fn assert_rgb_close(a: Rgb, b: Rgb) {
    assert!(
        (a.red - b.red).abs() < EPSILON
            && (a.green - b.green).abs() < EPSILON
            && (a.blue - b.blue).abs() < EPSILON,
        "{a:?} != {b:?}"
    );
}

#[test]
fn sector_boundaries_are_exact() {
    assert_eq!(hsb_to_rgb(Hsb::new(0.0, 1.0, 1.0)), Rgb::new(1.0, 0.0, 0.0));
    assert_eq!(hsb_to_rgb(Hsb::new(120.0, 1.0, 1.0)), Rgb::new(0.0, 1.0, 0.0));
    assert_eq!(hsb_to_rgb(Hsb::new(240.0, 1.0, 1.0)), Rgb::new(0.0, 0.0, 1.0));
}

#[test]
fn black_preserves_hue_and_saturation_exactly() {
    for (hue, saturation) in [(0.0, 0.0), (37.5, 0.25), (359.9, 1.0), (200.0, 0.6)] {
        let hsb = rgb_to_hsb(Rgb::BLACK, true, hue, saturation);
        assert_eq!(hsb, Hsb::new(hue, saturation, 0.0));
    }
}

#[test]
fn black_without_preservation_is_zeroed() {
    assert_eq!(
        rgb_to_hsb(Rgb::BLACK, false, 200.0, 0.6),
        Hsb::new(0.0, 0.0, 0.0)
    );
}

#[test]
fn gray_preserves_hue_only() {
    let hsb = rgb_to_hsb(Rgb::new(0.4, 0.4, 0.4), true, 90.0, 0.8);
    assert_eq!(hsb, Hsb::new(90.0, 0.0, 0.4));
}

#[test]
fn red_boundary_does_not_oscillate() {
    let red = Rgb::new(1.0, 0.0, 0.0);
    let mut hue = 360.0;
    for _ in 0..4 {
        let hsb = rgb_to_hsb(red, true, hue, 1.0);
        assert_eq!(hsb.hue, 360.0);
        hue = hsb.hue;
        assert_eq!(hsb_to_rgb(hsb), red);
    }
}

#[test]
fn preservation_does_not_pin_a_real_hue_change() {
    let hsb = rgb_to_hsb(Rgb::new(0.0, 1.0, 0.0), true, 360.0, 1.0);
    assert!((hsb.hue - 120.0).abs() < EPSILON);
}

proptest! {
    #[test]
    fn rgb_round_trips_through_hsb(
        r in 0.0f64..=1.0,
        g in 0.0f64..=1.0,
        b in 0.0f64..=1.0,
    ) {
        let rgb = Rgb::new(r, g, b);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        prop_assume!(max > 0.0 && max - min > 1e-6);

        let hsb = rgb_to_hsb(rgb, false, 0.0, 0.0);
        prop_assert!((0.0..=360.0).contains(&hsb.hue));
        prop_assert!((0.0..=1.0).contains(&hsb.saturation));
        assert_rgb_close(hsb_to_rgb(hsb), rgb);
    }

    #[test]
    fn preserving_round_trip_matches_plain_for_chromatic_colors(
        r in 0.0f64..=1.0,
        g in 0.0f64..=1.0,
        b in 0.0f64..=1.0,
        previous_hue in 0.0f64..360.0,
    ) {
        let rgb = Rgb::new(r, g, b);
        let plain = rgb_to_hsb(rgb, false, 0.0, 0.0);
        prop_assume!(plain.saturation > 0.0);
        let kept = rgb_to_hsb(rgb, true, previous_hue, 0.5);
        prop_assert_eq!(kept, plain);
    }

    #[test]
    fn hsb_output_stays_in_range(
        hue in -720.0f64..720.0,
        saturation in -1.0f64..2.0,
        brightness in -1.0f64..2.0,
    ) {
        let rgb = hsb_to_rgb(Hsb::new(hue, saturation, brightness));
        for channel in [rgb.red, rgb.green, rgb.blue] {
            prop_assert!((-EPSILON..=1.0 + EPSILON).contains(&channel));
        }
    }
}

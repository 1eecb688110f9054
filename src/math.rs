//! Color math: direct RGB/HSB conversions without external dependencies.
//!
//! Channels are normalized f64 in 0.0–1.0, hue is in degrees.

/// Hue/saturation to fall back on when the input color leaves them undefined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Preserve {
    pub(crate) hue: f64,
    pub(crate) saturation: f64,
}

/// RGB → HSB. Returns `(hue_degrees, saturation, brightness)`.
///
/// With `preserve` set, black keeps the previous saturation, achromatic colors
/// keep the previous hue, and a recomputed hue of 0 does not replace a
/// previous hue of 360 (both are red).
pub(crate) fn rgb_to_hsb(r: f64, g: f64, b: f64, preserve: Option<Preserve>) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;

    let s = if max != 0.0 {
        delta / max
    } else {
        // Black: saturation is undefined.
        preserve.map_or(0.0, |p| p.saturation)
    };

    // A black input counts as achromatic even when a saturation was preserved.
    let chromatic = max != 0.0 && s != 0.0;
    if !chromatic {
        return (preserve.map_or(0.0, |p| p.hue), s, v);
    }

    let mut h = if max == r {
        (g - b) / delta
    } else if max == g {
        2.0 + (b - r) / delta
    } else {
        4.0 + (r - g) / delta
    };
    h /= 6.0;
    if h < 0.0 {
        h += 1.0;
    }

    match preserve {
        Some(p) if (h - p.hue / 360.0).abs() == 1.0 => (p.hue, s, v),
        _ => (h * 360.0, s, v),
    }
}

/// HSB → RGB. Hue in degrees, saturation and brightness in 0.0–1.0.
///
/// Hue outside 0–360 is wrapped; saturation and brightness are clamped.
pub(crate) fn hsb_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    let h = if (0.0..=360.0).contains(&h) {
        h
    } else {
        h.rem_euclid(360.0)
    };
    let s = s.clamp(0.0, 1.0);
    let v = v.clamp(0.0, 1.0);

    let (br, bg, bb) = hue_to_rgb(h);
    let c = v * s;
    let m = v - c;
    (br * c + m, bg * c + m, bb * c + m)
}

/// Fully saturated, full brightness RGB for a hue in degrees.
pub(crate) fn hue_to_rgb(h: f64) -> (f64, f64, f64) {
    let h_prime = h / 60.0;
    let x = 1.0 - ((h_prime % 2.0) - 1.0).abs();

    if h_prime < 1.0 {
        (1.0, x, 0.0)
    } else if h_prime < 2.0 {
        (x, 1.0, 0.0)
    } else if h_prime < 3.0 {
        (0.0, 1.0, x)
    } else if h_prime < 4.0 {
        (0.0, x, 1.0)
    } else if h_prime < 5.0 {
        (x, 0.0, 1.0)
    } else {
        (1.0, 0.0, x)
    }
}

/// Clamp a channel to 0.0–1.0. NaN becomes 0.0.
pub(crate) fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Linear interpolation between two values.
pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Normalize a hex string: uppercase, expand shorthand, default to white if invalid.
///
/// Always returns 8 chars (RRGGBBAA).
pub(crate) fn normalize_hex(hex: &str) -> String {
    let stripped = hex.trim().trim_start_matches('#');
    if !stripped.chars().all(|c| c.is_ascii_hexdigit()) {
        return "FFFFFFFF".to_string();
    }
    match stripped.len() {
        3 => {
            let mut out = String::with_capacity(8);
            for c in stripped.chars() {
                out.push(c);
                out.push(c);
            }
            out.push_str("FF");
            out.to_uppercase()
        }
        6 => format!("{}FF", stripped.to_uppercase()),
        8 => stripped.to_uppercase(),
        _ => "FFFFFFFF".to_string(),
    }
}

//! Color types: RGB, HSB, and RGBA values used by the track and the picker.
//!
//! All channels are f64 in the 0.0–1.0 range; hue is in degrees.

use serde::{Deserialize, Serialize};

use crate::math::{self, Preserve};

/// RGB color with channels in the 0.0–1.0 range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RgbChannels")]
pub struct Rgb {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

/// Deserialized as written, then clamped by [`Rgb::new`].
#[derive(Deserialize)]
struct RgbChannels {
    red: f64,
    green: f64,
    blue: f64,
}

impl From<RgbChannels> for Rgb {
    fn from(c: RgbChannels) -> Self {
        Self::new(c.red, c.green, c.blue)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Rgb {
    pub const WHITE: Self = Self {
        red: 1.0,
        green: 1.0,
        blue: 1.0,
    };
    pub const BLACK: Self = Self {
        red: 0.0,
        green: 0.0,
        blue: 0.0,
    };

    /// Create from channels, clamping each to 0.0–1.0.
    pub fn new(red: f64, green: f64, blue: f64) -> Self {
        Self {
            red: math::clamp_unit(red),
            green: math::clamp_unit(green),
            blue: math::clamp_unit(blue),
        }
    }

    /// Convert to HSB, discarding hue and saturation where they are undefined.
    pub fn to_hsb(&self) -> Hsb {
        let (hue, saturation, brightness) = math::rgb_to_hsb(self.red, self.green, self.blue, None);
        Hsb {
            hue,
            saturation,
            brightness,
        }
    }

    /// Convert to HSB, keeping `previous`'s hue and saturation when this color
    /// leaves them undefined (black or gray).
    ///
    /// This is what keeps a user's chosen hue alive while they drag the
    /// brightness down to 0 and back up again.
    pub fn to_hsb_preserving(&self, previous: Hsb) -> Hsb {
        let preserve = Preserve {
            hue: previous.hue,
            saturation: previous.saturation,
        };
        let (hue, saturation, brightness) =
            math::rgb_to_hsb(self.red, self.green, self.blue, Some(preserve));
        Hsb {
            hue,
            saturation,
            brightness,
        }
    }

    /// Add an alpha channel.
    pub fn with_alpha(self, alpha: f64) -> Rgba {
        Rgba::from_rgb(self, alpha)
    }
}

/// HSB/HSV color. Hue in degrees (0–360), saturation and brightness 0.0–1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsb {
    pub hue: f64,
    pub saturation: f64,
    pub brightness: f64,
}

impl Default for Hsb {
    fn default() -> Self {
        Self {
            hue: 0.0,
            saturation: 0.0,
            brightness: 1.0,
        }
    }
}

impl Hsb {
    pub fn new(hue: f64, saturation: f64, brightness: f64) -> Self {
        Self {
            hue,
            saturation,
            brightness,
        }
    }

    /// Hue in the 0.0–1.0 range.
    pub fn hue_normalized(&self) -> f64 {
        self.hue / 360.0
    }

    /// Position on a saturation (x) / brightness (y) plane.
    pub fn point(&self) -> (f64, f64) {
        (self.saturation, self.brightness)
    }

    pub fn to_rgb(&self) -> Rgb {
        let (red, green, blue) = math::hsb_to_rgb(self.hue, self.saturation, self.brightness);
        Rgb { red, green, blue }
    }
}

/// RGBA color with components in the 0.0–1.0 range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RgbaChannels")]
pub struct Rgba {
    r: f64,
    g: f64,
    b: f64,
    a: f64,
}

#[derive(Deserialize)]
struct RgbaChannels {
    r: f64,
    g: f64,
    b: f64,
    a: f64,
}

impl From<RgbaChannels> for Rgba {
    fn from(c: RgbaChannels) -> Self {
        Self::new(c.r, c.g, c.b, c.a)
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Rgba {
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    /// Red component (0.0–1.0).
    pub fn r(&self) -> f64 {
        self.r
    }
    /// Green component (0.0–1.0).
    pub fn g(&self) -> f64 {
        self.g
    }
    /// Blue component (0.0–1.0).
    pub fn b(&self) -> f64 {
        self.b
    }
    /// Alpha component (0.0–1.0).
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Create from f64 RGBA (all 0.0–1.0). Out of range values are clamped.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self {
            r: math::clamp_unit(r),
            g: math::clamp_unit(g),
            b: math::clamp_unit(b),
            a: math::clamp_unit(a),
        }
    }

    pub fn from_rgb(rgb: Rgb, alpha: f64) -> Self {
        Self::new(rgb.red, rgb.green, rgb.blue, alpha)
    }

    /// Create from 0–255 RGB values with full opacity.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, 255)
    }

    /// Create from 0–255 RGBA values.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: a as f64 / 255.0,
        }
    }

    /// Convert to a 0–255 RGBA tuple.
    pub fn to_rgba8(&self) -> (u8, u8, u8, u8) {
        (
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            (self.a * 255.0).round() as u8,
        )
    }

    /// The color without its alpha channel.
    pub fn rgb(&self) -> Rgb {
        Rgb {
            red: self.r,
            green: self.g,
            blue: self.b,
        }
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: math::clamp_unit(a),
            ..self
        }
    }

    /// Create from HSB (hue in degrees) and alpha.
    pub fn from_hsb(hsb: Hsb, a: f64) -> Self {
        Self::from_rgb(hsb.to_rgb(), a)
    }

    /// Parse a hex string (with or without `#`, 3, 6, or 8 chars).
    ///
    /// 8-char hex is interpreted as RRGGBBAA. 3 and 6-char hex default to full opacity.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let stripped = hex.trim().trim_start_matches('#');
        if !matches!(stripped.len(), 3 | 6 | 8)
            || !stripped.chars().all(|c| c.is_ascii_hexdigit())
        {
            return None;
        }
        let full = math::normalize_hex(stripped);
        let channel = |i: usize| u8::from_str_radix(&full[i..i + 2], 16).ok();
        Some(Self::from_rgba8(
            channel(0)?,
            channel(2)?,
            channel(4)?,
            channel(6)?,
        ))
    }

    /// Format as uppercase hex (no `#` prefix).
    ///
    /// Returns 6 chars (RRGGBB) when alpha is 1.0, 8 chars (RRGGBBAA) otherwise.
    pub fn to_hex(&self) -> String {
        let (r, g, b, a) = self.to_rgba8();
        if a == 255 {
            format!("{:02X}{:02X}{:02X}", r, g, b)
        } else {
            format!("{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
        }
    }
}

impl From<Rgb> for Rgba {
    fn from(rgb: Rgb) -> Self {
        Self::from_rgb(rgb, 1.0)
    }
}

#[cfg(feature = "floem")]
impl From<Rgba> for floem::peniko::Color {
    fn from(color: Rgba) -> Self {
        let (r, g, b, a) = color.to_rgba8();
        floem::peniko::Color::rgba8(r, g, b, a)
    }
}

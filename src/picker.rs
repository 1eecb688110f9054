//! Color picker model: the state behind a hue slider, a saturation/brightness
//! plane, an alpha slider and an RGB/HSB/hex form.
//!
//! HSB plus alpha is the ground truth. RGB input is folded back into it with
//! hue and saturation preserved, so dragging brightness to 0 (or typing in a
//! gray) does not lose the hue the user picked.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::{Hsb, Rgba};

/// Which numeric components the form shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ColorMode {
    #[default]
    Rgb,
    Hsb,
}

impl ColorMode {
    /// Labels of the three components, in form order.
    pub fn labels(self) -> [&'static str; 3] {
        match self {
            Self::Rgb => ["R", "G", "B"],
            Self::Hsb => ["H", "S", "B"],
        }
    }

    /// Upper bound of each component as displayed.
    pub fn maxima(self) -> [f64; 3] {
        match self {
            Self::Rgb => [255.0, 255.0, 255.0],
            Self::Hsb => [360.0, 100.0, 100.0],
        }
    }
}

/// Component values as the form displays them: RGB in 0–255, hue in degrees,
/// saturation/brightness and alpha in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Components {
    pub values: [f64; 3],
    pub alpha: f64,
}

type ColorListener = Box<dyn FnMut(Rgba)>;

pub struct ColorPicker {
    mode: ColorMode,
    hsb: Hsb,
    alpha: f64,
    listeners: Vec<ColorListener>,
}

impl fmt::Debug for ColorPicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorPicker")
            .field("mode", &self.mode)
            .field("hsb", &self.hsb)
            .field("alpha", &self.alpha)
            .finish_non_exhaustive()
    }
}

impl ColorPicker {
    pub fn new(color: Rgba) -> Self {
        Self {
            mode: ColorMode::default(),
            hsb: color.rgb().to_hsb(),
            alpha: color.a(),
            listeners: Vec::new(),
        }
    }

    pub fn with_mode(mut self, mode: ColorMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ColorMode) {
        self.mode = mode;
    }

    /// Called with the new color after every edit.
    pub fn on_change(&mut self, listener: impl FnMut(Rgba) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn rgba(&self) -> Rgba {
        Rgba::from_hsb(self.hsb, self.alpha)
    }

    pub fn hsb(&self) -> Hsb {
        self.hsb
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Hue slider position (0.0–1.0).
    pub fn hue_ratio(&self) -> f64 {
        self.hsb.hue_normalized()
    }

    /// Saturation (x) / brightness (y) plane position.
    pub fn saturation_brightness_point(&self) -> (f64, f64) {
        self.hsb.point()
    }

    /// Uppercase hex of the current color, without `#`.
    pub fn hex(&self) -> String {
        self.rgba().to_hex()
    }

    pub fn components(&self) -> Components {
        self.components_in(self.mode)
    }

    pub fn components_in(&self, mode: ColorMode) -> Components {
        let values = match mode {
            ColorMode::Rgb => {
                let rgb = self.rgba().rgb();
                [rgb.red * 255.0, rgb.green * 255.0, rgb.blue * 255.0]
            }
            ColorMode::Hsb => [
                self.hsb.hue,
                self.hsb.saturation * 100.0,
                self.hsb.brightness * 100.0,
            ],
        };
        Components {
            values,
            alpha: self.alpha * 100.0,
        }
    }

    /// Hue slider moved to `ratio` (0.0–1.0).
    pub fn set_hue_ratio(&mut self, ratio: f64) -> Rgba {
        self.hsb.hue = ratio.clamp(0.0, 1.0) * 360.0;
        self.commit()
    }

    pub fn set_saturation_brightness(&mut self, saturation: f64, brightness: f64) -> Rgba {
        self.hsb.saturation = saturation.clamp(0.0, 1.0);
        self.hsb.brightness = brightness.clamp(0.0, 1.0);
        self.commit()
    }

    pub fn set_alpha(&mut self, alpha: f64) -> Rgba {
        self.alpha = alpha.clamp(0.0, 1.0);
        self.commit()
    }

    /// Take an RGBA value, keeping the current hue and saturation where the
    /// new color leaves them undefined.
    pub fn set_rgba(&mut self, color: Rgba) -> Rgba {
        self.hsb = color.rgb().to_hsb_preserving(self.hsb);
        self.alpha = color.a();
        self.commit()
    }

    /// Take values typed into the form, in `mode`'s display ranges.
    pub fn set_components(&mut self, mode: ColorMode, components: Components) -> Rgba {
        let [a, b, c] = components.values;
        let alpha = (components.alpha / 100.0).clamp(0.0, 1.0);
        match mode {
            ColorMode::Rgb => self.set_rgba(Rgba::new(a / 255.0, b / 255.0, c / 255.0, alpha)),
            ColorMode::Hsb => {
                self.hsb = Hsb::new(
                    a.clamp(0.0, 360.0),
                    (b / 100.0).clamp(0.0, 1.0),
                    (c / 100.0).clamp(0.0, 1.0),
                );
                self.alpha = alpha;
                self.commit()
            }
        }
    }

    /// Nudge one form component by `delta` display units, as a scrubbed
    /// label does. `index` 0–2 picks one of `mode`'s values and 3 the alpha.
    /// The result is clamped to that component's display range; any other
    /// index changes nothing.
    pub fn step_component(&mut self, mode: ColorMode, index: usize, delta: f64) -> Rgba {
        let mut components = self.components_in(mode);
        match index {
            0..=2 => {
                let max = mode.maxima()[index];
                components.values[index] = (components.values[index] + delta).clamp(0.0, max);
            }
            3 => components.alpha = (components.alpha + delta).clamp(0.0, 100.0),
            _ => return self.rgba(),
        }
        self.set_components(mode, components)
    }

    /// Take a hex string. Invalid input leaves the color unchanged and
    /// returns `None`.
    pub fn set_hex(&mut self, hex: &str) -> Option<Rgba> {
        let color = Rgba::from_hex(hex)?;
        Some(self.set_rgba(color))
    }

    fn commit(&mut self) -> Rgba {
        let color = self.rgba();
        for listener in &mut self.listeners {
            listener(color);
        }
        color
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn starts_from_the_given_color() {
        let picker = ColorPicker::new(Rgba::from_rgba8(0, 0, 255, 128));
        let hsb = picker.hsb();
        assert!((hsb.hue - 240.0).abs() < 1e-9);
        assert_eq!((hsb.saturation, hsb.brightness), (1.0, 1.0));
        assert!((picker.alpha() - 128.0 / 255.0).abs() < 1e-12);
        assert!((picker.hue_ratio() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn hue_survives_brightness_round_trip() {
        let mut picker = ColorPicker::new(Rgba::WHITE);
        picker.set_components(
            ColorMode::Hsb,
            Components {
                values: [120.0, 100.0, 100.0],
                alpha: 100.0,
            },
        );
        picker.set_saturation_brightness(1.0, 0.0);
        assert_eq!(picker.rgba(), Rgba::BLACK);

        // The form echoes the black color back in as RGB.
        picker.set_rgba(Rgba::BLACK);
        assert_eq!(picker.hsb(), Hsb::new(120.0, 1.0, 0.0));

        let color = picker.set_saturation_brightness(1.0, 1.0);
        assert_eq!(color, Rgba::from_rgb8(0, 255, 0));
    }

    #[test]
    fn hex_input() {
        let mut picker = ColorPicker::new(Rgba::WHITE);
        assert_eq!(picker.set_hex("#nothex"), None);
        assert_eq!(picker.rgba(), Rgba::WHITE);
        assert_eq!(picker.set_hex("#FF0000"), Some(Rgba::from_rgb8(255, 0, 0)));
        assert_eq!(picker.hex(), "FF0000");
    }

    #[test]
    fn form_components_in_both_modes() {
        let mut picker = ColorPicker::new(Rgba::WHITE).with_mode(ColorMode::Hsb);
        picker.set_components(
            ColorMode::Hsb,
            Components {
                values: [120.0, 100.0, 50.0],
                alpha: 50.0,
            },
        );
        let rgb = picker.components_in(ColorMode::Rgb);
        assert_eq!(rgb.values, [0.0, 127.5, 0.0]);
        assert_eq!(rgb.alpha, 50.0);

        picker.set_components(
            ColorMode::Rgb,
            Components {
                values: [255.0, 0.0, 0.0],
                alpha: 100.0,
            },
        );
        assert_eq!(picker.components().values, [0.0, 100.0, 100.0]);
    }

    #[test]
    fn stepping_components_stays_in_range() {
        let mut picker = ColorPicker::new(Rgba::from_rgb8(255, 0, 0));
        picker.step_component(ColorMode::Rgb, 1, 10.0);
        assert!((picker.components_in(ColorMode::Rgb).values[1] - 10.0).abs() < 1e-9);

        picker.step_component(ColorMode::Rgb, 0, 10.0);
        assert!((picker.components_in(ColorMode::Rgb).values[0] - 255.0).abs() < 1e-9);

        picker.step_component(ColorMode::Hsb, 0, 400.0);
        assert_eq!(picker.hsb().hue, 360.0);

        assert_eq!(picker.step_component(ColorMode::Hsb, 3, -150.0).a(), 0.0);

        let before = picker.rgba();
        assert_eq!(picker.step_component(ColorMode::Hsb, 4, 1.0), before);
    }

    #[test]
    fn listeners_see_every_edit() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut picker = ColorPicker::new(Rgba::WHITE);
        picker.on_change(move |c| sink.borrow_mut().push(c));
        picker.set_alpha(0.5);
        picker.set_hue_ratio(2.0);
        assert_eq!(seen.borrow().len(), 2);
        assert_eq!(picker.hsb().hue, 360.0);
    }
}

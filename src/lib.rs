//! # floem-gradient
//!
//! The model behind a gradient slider: color stops on a 0.0–1.0 track that can
//! be inserted, dragged, ripped off and recolored, plus the HSB color picker
//! used to edit a stop.
//!
//! Nothing here draws or handles raw input. A front end forwards pointer
//! events to a [`GradientSlider`], draws [`GradientSlider::stops`] and the
//! handles at [`GradientSlider::handle_positions`], and shows a picker backed
//! by [`ColorPicker`] when a stop is double clicked.
//!
//! ## Usage
//!
//! ```rust
//! use floem_gradient::{ColorStop, GradientSlider, Point, Rgba, SliderConfig};
//!
//! let mut slider = GradientSlider::new(
//!     SliderConfig::default(),
//!     200.0,
//!     [
//!         ColorStop::new(0.0, Rgba::from_rgb8(255, 0, 0)),
//!         ColorStop::new(1.0, Rgba::from_rgb8(0, 0, 255)),
//!     ],
//! )
//! .unwrap();
//!
//! // Click the middle of the track to add a green stop there.
//! slider.pointer_down(Point::new(100.0, 6.0), 1, Rgba::from_rgb8(0, 255, 0));
//! slider.pointer_up();
//! assert_eq!(slider.stops().len(), 3);
//! ```
//!
//! All types are single-threaded. Listeners run synchronously inside the call
//! that triggered them.

mod color;
mod config;
mod constants;
mod error;
mod interaction;
mod math;
mod picker;
mod preset;
mod ramp;
mod slider;
mod stop;
mod track;

pub use color::{Hsb, Rgb, Rgba};
pub use config::{HandleStyle, SliderConfig, TrackStyle};
pub use error::{ConfigError, PresetError, SliderError, TrackError};
pub use interaction::{Point, PointerOutcome, TrackGeometry, TrackInteraction};
pub use picker::{ColorMode, ColorPicker, Components};
pub use preset::GradientPreset;
pub use ramp::Ramp;
pub use slider::GradientSlider;
pub use stop::{ColorStop, InteractionState, StopId, StopRecord};
pub use track::{GradientTrack, SubscriptionId, TrackEvent};

/// Thresholds and default sizes.
pub mod defaults {
    pub use crate::constants::*;
}

/// RGB → HSB, keeping `previous_hue` / `previous_saturation` where the color
/// leaves them undefined if `preserve` is set.
///
/// Equivalent to [`Rgb::to_hsb`] / [`Rgb::to_hsb_preserving`], for callers
/// that carry hue and saturation around as plain numbers.
pub fn rgb_to_hsb(rgb: Rgb, preserve: bool, previous_hue: f64, previous_saturation: f64) -> Hsb {
    if preserve {
        rgb.to_hsb_preserving(Hsb::new(previous_hue, previous_saturation, 0.0))
    } else {
        rgb.to_hsb()
    }
}

/// HSB → RGB. Same as [`Hsb::to_rgb`].
pub fn hsb_to_rgb(hsb: Hsb) -> Rgb {
    hsb.to_rgb()
}

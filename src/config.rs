//! Slider configuration, loadable from RON.

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::ConfigError;

/// Appearance of the track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackStyle {
    pub height: f64,
    pub border_width: f64,
}

impl Default for TrackStyle {
    fn default() -> Self {
        Self {
            height: constants::TRACK_HEIGHT,
            border_width: constants::TRACK_BORDER_WIDTH,
        }
    }
}

/// Appearance of a stop handle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandleStyle {
    pub radius: f64,
    pub inner_radius: f64,
    pub border_width: f64,
}

impl Default for HandleStyle {
    fn default() -> Self {
        Self {
            radius: constants::HANDLE_RADIUS,
            inner_radius: constants::HANDLE_INNER_RADIUS,
            border_width: constants::HANDLE_BORDER_WIDTH,
        }
    }
}

impl HandleStyle {
    /// Width and height of the handle's bounding box.
    pub fn size(&self) -> f64 {
        self.radius * 2.0
    }

    pub fn inner_size(&self) -> f64 {
        self.inner_radius * 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    pub track: TrackStyle,
    pub handle: HandleStyle,
    /// Distance from the track centerline at which a dragged stop detaches.
    pub detach_distance: f64,
    /// Distance under which a detached stop re-attaches.
    pub reattach_distance: f64,
    /// Ripping a stop off is refused when it would leave fewer stops than this.
    pub min_interactive_stops: usize,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            track: TrackStyle::default(),
            handle: HandleStyle::default(),
            detach_distance: constants::DETACH_DISTANCE,
            reattach_distance: constants::REATTACH_DISTANCE,
            min_interactive_stops: constants::MIN_INTERACTIVE_STOPS,
        }
    }
}

impl SliderConfig {
    /// Parse a configuration from RON. Missing fields take their defaults.
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reattach_distance >= self.detach_distance {
            return Err(ConfigError::Hysteresis {
                detach: self.detach_distance,
                reattach: self.reattach_distance,
            });
        }
        if self.min_interactive_stops < constants::MIN_STOPS {
            return Err(ConfigError::MinimumStops);
        }
        Ok(())
    }
}

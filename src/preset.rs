//! Gradient presets stored as RON.
//!
//! A preset is the ordered `{id, position, color}` list a track produces with
//! [`GradientTrack::records`] and takes back with
//! [`GradientTrack::replace_records`].

use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};

use crate::error::{PresetError, TrackError};
use crate::stop::StopRecord;
use crate::track::{self, GradientTrack};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientPreset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub stops: Vec<StopRecord>,
}

impl GradientPreset {
    /// Snapshot every stop on `track`, sorted by position.
    pub fn from_track(track: &GradientTrack) -> Self {
        Self {
            name: None,
            stops: track.records(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn from_ron_str(source: &str) -> Result<Self, PresetError> {
        let preset: Self = ron::from_str(source)?;
        if preset.stops.is_empty() {
            return Err(TrackError::EmptyTrack.into());
        }
        track::ensure_unique_ids(preset.stops.iter().map(|s| s.id))?;
        Ok(preset)
    }

    pub fn to_ron_string(&self) -> Result<String, PresetError> {
        Ok(ron::ser::to_string_pretty(self, PrettyConfig::default())?)
    }

    /// Build a fresh track from this preset.
    pub fn to_track(&self) -> Result<GradientTrack, PresetError> {
        let stops = self.stops.iter().copied().map(Into::into);
        Ok(GradientTrack::new(stops)?)
    }

    /// Load this preset into an existing track, replacing its stops.
    pub fn apply(&self, track: &mut GradientTrack) -> Result<(), PresetError> {
        track.replace_records(self.stops.iter().copied())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;

    const SUNSET: &str = r#"(
        name: Some("sunset"),
        stops: [
            (id: 9001, position: 0.0, color: (r: 1.0, g: 0.5, b: 0.0, a: 1.0)),
            (id: 9002, position: 1.0, color: (r: 0.3, g: 0.0, b: 0.5, a: 1.0)),
        ],
    )"#;

    #[test]
    fn parses_a_preset_file() {
        let preset = GradientPreset::from_ron_str(SUNSET).unwrap();
        assert_eq!(preset.name.as_deref(), Some("sunset"));
        assert_eq!(preset.stops.len(), 2);
        assert_eq!(preset.stops[1].color, Rgba::new(0.3, 0.0, 0.5, 1.0));
    }

    #[test]
    fn empty_preset_is_invalid() {
        let err = GradientPreset::from_ron_str("(stops: [])").unwrap_err();
        assert!(matches!(err, PresetError::Invalid(TrackError::EmptyTrack)));
    }

    #[test]
    fn repeated_ids_are_invalid() {
        let source = r#"(
            stops: [
                (id: 7, position: 0.0, color: (r: 1.0, g: 0.0, b: 0.0, a: 1.0)),
                (id: 7, position: 1.0, color: (r: 0.0, g: 0.0, b: 1.0, a: 1.0)),
            ],
        )"#;
        let err = GradientPreset::from_ron_str(source).unwrap_err();
        assert!(matches!(
            err,
            PresetError::Invalid(TrackError::DuplicateStop(id)) if id.get() == 7
        ));
    }

    #[test]
    fn out_of_range_channels_are_clamped_on_load() {
        let source = r#"(
            stops: [
                (id: 9101, position: 0.0, color: (r: 5.0, g: -2.0, b: 0.0, a: 9.0)),
                (id: 9102, position: 1.0, color: (r: 0.0, g: 0.0, b: 1.0, a: 1.0)),
            ],
        )"#;
        let track = GradientPreset::from_ron_str(source)
            .unwrap()
            .to_track()
            .unwrap();
        let color = track.records()[0].color;
        assert_eq!(color, Rgba::new(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        assert!(matches!(
            GradientPreset::from_ron_str("stops"),
            Err(PresetError::Parse(_))
        ));
    }

    #[test]
    fn track_survives_a_save_and_load() {
        let mut track = GradientTrack::default();
        track.insert(0.25, Rgba::from_rgb8(255, 0, 0));
        let saved = GradientPreset::from_track(&track)
            .with_name("three")
            .to_ron_string()
            .unwrap();

        let loaded = GradientPreset::from_ron_str(&saved).unwrap();
        let restored = loaded.to_track().unwrap();
        assert_eq!(restored.records(), track.records());
    }

    #[test]
    fn loaded_ids_do_not_collide_with_new_stops() {
        let preset = GradientPreset::from_ron_str(SUNSET).unwrap();
        let mut track = preset.to_track().unwrap();
        let id = track.insert(0.5, Rgba::WHITE);
        assert!(id.get() > 9002);
    }
}

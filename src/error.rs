//! Error types.

use thiserror::Error;

use crate::stop::StopId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackError {
    #[error("cannot remove a stop: track holds {count} stops, minimum is {minimum}")]
    MinimumStopsViolation { count: usize, minimum: usize },

    #[error("no stop with id {0}")]
    StopNotFound(StopId),

    #[error("a track needs at least one stop")]
    EmptyTrack,

    #[error("stop id {0} appears more than once")]
    DuplicateStop(StopId),
}

#[derive(Error, Debug)]
pub enum PresetError {
    #[error("failed to parse preset: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("failed to serialize preset: {0}")]
    Serialize(#[from] ron::Error),

    #[error("invalid preset: {0}")]
    Invalid(#[from] TrackError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("reattach distance ({reattach}) must be smaller than detach distance ({detach})")]
    Hysteresis { detach: f64, reattach: f64 },

    #[error("minimum stop count must be at least 1")]
    MinimumStops,
}

/// Errors from building a [`GradientSlider`](crate::GradientSlider).
#[derive(Error, Debug)]
pub enum SliderError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Track(#[from] TrackError),
}

pub type Result<T, E = TrackError> = std::result::Result<T, E>;

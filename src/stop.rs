//! Color stops: a positioned color marker on a 0.0–1.0 track.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::color::Rgba;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identifier of a stop, unique within the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopId(u64);

impl StopId {
    /// Allocate a fresh id.
    pub fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Reuse a known id, e.g. one read back from a saved gradient.
    ///
    /// Ids handed out by [`StopId::next`] afterwards never collide with it.
    pub fn from_raw(raw: u64) -> Self {
        NEXT_ID.fetch_max(raw.saturating_add(1), Ordering::Relaxed);
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the user is currently doing with a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InteractionState {
    #[default]
    Idle,
    Selected,
    EditingColor,
}

impl InteractionState {
    pub fn is_idle(self) -> bool {
        self == Self::Idle
    }
}

#[derive(Debug, Clone)]
pub struct ColorStop {
    id: StopId,
    pub(crate) position: f64,
    pub(crate) color: Rgba,
    pub(crate) state: InteractionState,
}

impl ColorStop {
    /// Create an idle stop with a fresh id. The position is stored as given;
    /// the track clamps it on insertion.
    pub fn new(position: f64, color: Rgba) -> Self {
        Self::with_id(StopId::next(), position, color)
    }

    pub fn with_id(id: StopId, position: f64, color: Rgba) -> Self {
        Self {
            id,
            position,
            color,
            state: InteractionState::Idle,
        }
    }

    pub fn id(&self) -> StopId {
        self.id
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// The serializable shape of this stop.
    pub fn record(&self) -> StopRecord {
        StopRecord {
            id: self.id,
            position: self.position,
            color: self.color,
        }
    }
}

impl PartialEq for ColorStop {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ColorStop {}

/// A stop as stored on disk or handed to a renderer: `{id, position, color}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StopRecord {
    pub id: StopId,
    pub position: f64,
    pub color: Rgba,
}

impl From<StopRecord> for ColorStop {
    fn from(record: StopRecord) -> Self {
        Self::with_id(StopId::from_raw(record.id.get()), record.position, record.color)
    }
}

impl From<&ColorStop> for StopRecord {
    fn from(stop: &ColorStop) -> Self {
        stop.record()
    }
}

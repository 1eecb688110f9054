//! Pointer interaction on the track: selecting, inserting, dragging and
//! ripping stops off.
//!
//! Coordinates are in the track view's space: `x` runs along the track, `y`
//! across it, and the track's centerline sits at half the view height.
//! Event delivery, hit-testing of other views and animation belong to the
//! front end; this module only decides what a pointer event does to the
//! [`GradientTrack`].

use tracing::{debug, trace, warn};

use crate::color::Rgba;
use crate::config::{HandleStyle, SliderConfig};
use crate::stop::{InteractionState, StopId};
use crate::track::GradientTrack;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Maps between track ratios (0.0–1.0) and view coordinates.
///
/// The drawable track is inset on both ends by a handle radius plus two
/// border widths so handles at 0.0 and 1.0 are not cut off.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackGeometry {
    width: f64,
    height: f64,
    handle: HandleStyle,
}

impl TrackGeometry {
    pub fn new(width: f64, height: f64, handle: HandleStyle) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            handle,
        }
    }

    pub fn from_config(width: f64, config: &SliderConfig) -> Self {
        Self::new(width, config.track.height, config.handle)
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn inset(&self) -> f64 {
        self.handle.radius + self.handle.border_width * 2.0
    }

    /// Length of the drawable track.
    pub fn track_width(&self) -> f64 {
        (self.width - 2.0 * self.inset()).max(0.0)
    }

    pub fn mid_y(&self) -> f64 {
        self.height * 0.5
    }

    /// Track ratio under `x`, clamped to 0.0–1.0.
    pub fn ratio_at(&self, x: f64) -> f64 {
        let track_width = self.track_width();
        if track_width <= 0.0 {
            return 0.0;
        }
        ((x - self.inset()) / track_width).clamp(0.0, 1.0)
    }

    /// Center of the handle for a stop at `position`.
    pub fn handle_center(&self, position: f64) -> Point {
        Point::new(self.inset() + position * self.track_width(), self.mid_y())
    }

    /// Whether `point` falls inside the square frame of a handle at `position`.
    pub fn handle_contains(&self, position: f64, point: Point) -> bool {
        let center = self.handle_center(position);
        let r = self.handle.radius;
        (point.x - center.x).abs() <= r && (point.y - center.y).abs() <= r
    }

    /// Perpendicular distance from the track centerline.
    pub fn distance_from_track(&self, point: Point) -> f64 {
        (point.y - self.mid_y()).abs()
    }
}

/// What a pointer event did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerOutcome {
    /// Nothing changed.
    Ignored,
    Selected(StopId),
    /// A double click asked to edit this stop's color.
    OpenColorPicker(StopId),
    /// A click on empty track inserted (and selected) a new stop.
    Inserted(StopId),
    Moved { id: StopId, position: f64 },
    Detached(StopId),
    /// The detached stop follows the pointer away from the track.
    Dragging(StopId),
    Reattached { id: StopId, position: f64 },
    /// Released while detached.
    Removed(StopId),
    /// Released on the track; the stop is idle again.
    Released(StopId),
}

/// Turns pointer events into track mutations.
///
/// A stop is detached once the pointer is at least `detach_distance` from the
/// centerline and the track holds more than `min_interactive_stops` stops.
/// It only re-attaches once the pointer is back within `reattach_distance`,
/// so the two thresholds form a hysteresis band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackInteraction {
    geometry: TrackGeometry,
    detach_distance: f64,
    reattach_distance: f64,
    min_interactive_stops: usize,
}

impl TrackInteraction {
    pub fn new(geometry: TrackGeometry, config: &SliderConfig) -> Self {
        Self {
            geometry,
            detach_distance: config.detach_distance,
            reattach_distance: config.reattach_distance,
            min_interactive_stops: config.min_interactive_stops,
        }
    }

    pub fn geometry(&self) -> &TrackGeometry {
        &self.geometry
    }

    pub fn set_geometry(&mut self, geometry: TrackGeometry) {
        self.geometry = geometry;
    }

    /// The stop whose handle is under `point`.
    pub fn hit_test(&self, track: &GradientTrack, point: Point) -> Option<StopId> {
        track
            .stops()
            .iter()
            .filter(|s| Some(s.id()) != track.detached())
            .find(|s| self.geometry.handle_contains(s.position(), point))
            .map(|s| s.id())
    }

    /// Press. One click selects the stop under the pointer, two clicks ask to
    /// edit its color. Pressing empty track inserts `new_color` there.
    ///
    /// Ignored while a stop's color is being edited.
    pub fn pointer_down(
        &self,
        track: &mut GradientTrack,
        point: Point,
        click_count: u32,
        new_color: Rgba,
    ) -> PointerOutcome {
        if track.is_editing_color() {
            return PointerOutcome::Ignored;
        }

        match self.hit_test(track, point) {
            Some(id) if click_count == 2 => {
                track.set_interaction_state(id, InteractionState::EditingColor);
                PointerOutcome::OpenColorPicker(id)
            }
            Some(id) if click_count == 1 => {
                track.set_interaction_state(id, InteractionState::Selected);
                PointerOutcome::Selected(id)
            }
            Some(_) => PointerOutcome::Ignored,
            None => {
                let ratio = self.geometry.ratio_at(point.x);
                let id = track.insert(ratio, new_color);
                track.set_interaction_state(id, InteractionState::Selected);
                PointerOutcome::Inserted(id)
            }
        }
    }

    /// Drag of the selected stop.
    pub fn pointer_dragged(&self, track: &mut GradientTrack, point: Point) -> PointerOutcome {
        let Some((id, state)) = track.active().map(|s| (s.id(), s.state())) else {
            return PointerOutcome::Ignored;
        };
        if state == InteractionState::EditingColor {
            return PointerOutcome::Ignored;
        }

        let distance = self.geometry.distance_from_track(point);
        let is_detached = track.detached() == Some(id);

        if track.len() > self.min_interactive_stops && distance >= self.detach_distance {
            if is_detached {
                return PointerOutcome::Dragging(id);
            }
            track.detach(id);
            return PointerOutcome::Detached(id);
        }

        let ratio = self.geometry.ratio_at(point.x);
        if is_detached {
            if distance < self.reattach_distance {
                track.reattach(id, ratio);
                return PointerOutcome::Reattached {
                    id,
                    position: ratio,
                };
            }
            trace!(%id, distance, "detached stop inside hysteresis band");
            return PointerOutcome::Dragging(id);
        }

        track.move_stop(id, ratio);
        PointerOutcome::Moved {
            id,
            position: ratio,
        }
    }

    /// Release. A detached stop is removed; otherwise a selected stop goes
    /// back to idle. A stop whose color is being edited stays as it is.
    pub fn pointer_up(&self, track: &mut GradientTrack) -> PointerOutcome {
        if let Some(id) = track.detached() {
            return match track.remove_keeping(id, self.min_interactive_stops) {
                Ok(()) => PointerOutcome::Removed(id),
                Err(err) => {
                    warn!(%id, %err, "could not remove detached stop, putting it back");
                    self.restore(track, id);
                    PointerOutcome::Released(id)
                }
            };
        }

        match track.active().map(|s| (s.id(), s.state())) {
            Some((id, InteractionState::Selected)) => {
                track.reset(id);
                PointerOutcome::Released(id)
            }
            _ => PointerOutcome::Ignored,
        }
    }

    /// Abandon the current drag: a detached stop goes back to where it left
    /// the track and the active stop returns to idle.
    pub fn cancel(&self, track: &mut GradientTrack) {
        if let Some(id) = track.detached() {
            debug!(%id, "drag cancelled while detached");
            self.restore(track, id);
            return;
        }
        if let Some(id) = track.active().map(|s| s.id()) {
            track.reset(id);
        }
    }

    fn restore(&self, track: &mut GradientTrack, id: StopId) {
        let position = track.get(id).map_or(0.0, |s| s.position());
        track.reattach(id, position);
        track.reset(id);
    }
}

//! Gradient stop track: the ordered, positioned set of color stops.
//!
//! Storage order is insertion order and is never rearranged by moves; the
//! position-sorted view is recomputed on demand by [`GradientTrack::sorted_ramp`].
//!
//! Listeners registered with [`GradientTrack::subscribe`] are called
//! synchronously, before the mutating call returns, on the caller's thread.
//! A listener only sees a `&TrackEvent` and cannot reach back into the track.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

use tracing::{debug, trace, warn};

use crate::color::Rgba;
use crate::constants;
use crate::error::{Result, TrackError};
use crate::ramp::Ramp;
use crate::stop::{ColorStop, InteractionState, StopId, StopRecord};

/// Change notification delivered to track listeners.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackEvent {
    StopAdded(StopRecord),
    StopRemoved(StopId),
    StopMoved { id: StopId, position: f64 },
    ColorChanged { id: StopId, color: Rgba },
    StateChanged { id: StopId, state: InteractionState },
    Detached(StopId),
    Reattached { id: StopId, position: f64 },
    /// All stops were swapped out by [`GradientTrack::replace_all`].
    Replaced,
    /// The renderable ramp changed. Sent after every event that affects it.
    RampChanged(Ramp),
}

/// Handle returned by [`GradientTrack::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&TrackEvent)>;

pub struct GradientTrack {
    stops: Vec<ColorStop>,
    min_stops: usize,
    detached: Option<StopId>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl fmt::Debug for GradientTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GradientTrack")
            .field("stops", &self.stops)
            .field("min_stops", &self.min_stops)
            .field("detached", &self.detached)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for GradientTrack {
    /// Black at 0.0 to white at 1.0.
    fn default() -> Self {
        Self::from_vec(vec![
            ColorStop::new(0.0, Rgba::BLACK),
            ColorStop::new(1.0, Rgba::WHITE),
        ])
    }
}

fn clamp_position(position: f64) -> f64 {
    if position.is_nan() {
        0.0
    } else {
        position.clamp(0.0, 1.0)
    }
}

/// Fails with the first id that occurs twice.
pub(crate) fn ensure_unique_ids(ids: impl IntoIterator<Item = StopId>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(TrackError::DuplicateStop(id));
        }
    }
    Ok(())
}

fn by_position(a: &f64, b: &f64) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

impl GradientTrack {
    /// Create a track from an initial set of stops.
    ///
    /// Positions are clamped and every stop starts out idle. Fails with
    /// [`TrackError::EmptyTrack`] when `stops` is empty and with
    /// [`TrackError::DuplicateStop`] when two stops share an id.
    pub fn new(stops: impl IntoIterator<Item = ColorStop>) -> Result<Self> {
        let stops: Vec<ColorStop> = stops.into_iter().collect();
        if stops.is_empty() {
            return Err(TrackError::EmptyTrack);
        }
        ensure_unique_ids(stops.iter().map(ColorStop::id))?;
        Ok(Self::from_vec(stops))
    }

    fn from_vec(stops: Vec<ColorStop>) -> Self {
        let mut track = Self {
            stops: Vec::new(),
            min_stops: constants::MIN_STOPS,
            detached: None,
            listeners: Vec::new(),
            next_subscription: 0,
        };
        track.stops = stops.into_iter().map(Self::normalized).collect();
        track
    }

    /// Raise the number of stops [`GradientTrack::remove`] always keeps.
    /// Values below 1 are ignored.
    pub fn with_min_stops(mut self, min_stops: usize) -> Self {
        self.min_stops = min_stops.max(constants::MIN_STOPS);
        self
    }

    fn normalized(mut stop: ColorStop) -> ColorStop {
        stop.position = clamp_position(stop.position);
        stop.state = InteractionState::Idle;
        stop
    }

    pub fn min_stops(&self) -> usize {
        self.min_stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Stops in insertion order.
    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    pub fn get(&self, id: StopId) -> Option<&ColorStop> {
        self.stops.iter().find(|s| s.id() == id)
    }

    fn get_mut(&mut self, id: StopId) -> Option<&mut ColorStop> {
        self.stops.iter_mut().find(|s| s.id() == id)
    }

    pub fn contains(&self, id: StopId) -> bool {
        self.get(id).is_some()
    }

    /// The stop that is selected or being edited, if any.
    pub fn active(&self) -> Option<&ColorStop> {
        self.stops.iter().find(|s| !s.state().is_idle())
    }

    /// Whether a stop's color is currently open in a picker.
    pub fn is_editing_color(&self) -> bool {
        self.stops
            .iter()
            .any(|s| s.state() == InteractionState::EditingColor)
    }

    /// The stop currently dragged off the track, if any.
    pub fn detached(&self) -> Option<StopId> {
        self.detached
    }

    /// Stops on the track sorted by position, ties kept in insertion order.
    /// A detached stop is left out.
    pub fn sorted_stops(&self) -> Vec<&ColorStop> {
        let mut sorted: Vec<&ColorStop> = self
            .stops
            .iter()
            .filter(|s| Some(s.id()) != self.detached)
            .collect();
        sorted.sort_by(|a, b| by_position(&a.position(), &b.position()));
        sorted
    }

    /// The renderable ramp.
    pub fn sorted_ramp(&self) -> Ramp {
        Ramp::from_sorted(self.sorted_stops().into_iter().map(ColorStop::record).collect())
    }

    /// Every stop, detached or not, sorted by position. This is the shape
    /// [`GradientTrack::replace_all`] accepts back.
    pub fn records(&self) -> Vec<StopRecord> {
        let mut records: Vec<StopRecord> = self.stops.iter().map(ColorStop::record).collect();
        records.sort_by(|a, b| by_position(&a.position, &b.position));
        records
    }

    /// Add a stop at `position` (clamped to 0.0–1.0) and return its id.
    pub fn insert(&mut self, position: f64, color: Rgba) -> StopId {
        let stop = ColorStop::new(clamp_position(position), color);
        let id = stop.id();
        debug!(%id, position = stop.position(), "inserted stop");
        let record = stop.record();
        self.stops.push(stop);
        self.emit(TrackEvent::StopAdded(record));
        self.ramp_changed();
        id
    }

    /// Move a stop to `position` (clamped to 0.0–1.0). Unknown ids are ignored.
    pub fn move_stop(&mut self, id: StopId, position: f64) {
        if let Err(err) = self.try_move_stop(id, position) {
            debug!(%err, "ignored move");
        }
    }

    pub fn try_move_stop(&mut self, id: StopId, position: f64) -> Result<()> {
        let position = clamp_position(position);
        let stop = self.get_mut(id).ok_or(TrackError::StopNotFound(id))?;
        stop.position = position;
        trace!(%id, position, "moved stop");
        self.emit(TrackEvent::StopMoved { id, position });
        if self.detached != Some(id) {
            self.ramp_changed();
        }
        Ok(())
    }

    /// Put `id` into `state` and every other stop back to idle. Unknown ids
    /// are ignored.
    pub fn set_interaction_state(&mut self, id: StopId, state: InteractionState) {
        if let Err(err) = self.try_set_interaction_state(id, state) {
            debug!(%err, "ignored state change");
        }
    }

    pub fn try_set_interaction_state(
        &mut self,
        id: StopId,
        state: InteractionState,
    ) -> Result<()> {
        if !self.contains(id) {
            return Err(TrackError::StopNotFound(id));
        }
        let mut changed = Vec::new();
        for stop in &mut self.stops {
            let next = if stop.id() == id {
                state
            } else {
                InteractionState::Idle
            };
            if stop.state != next {
                stop.state = next;
                changed.push((stop.id(), next));
            }
        }
        for (id, state) in changed {
            trace!(%id, ?state, "stop state changed");
            self.emit(TrackEvent::StateChanged { id, state });
        }
        Ok(())
    }

    /// Force a stop back to idle, e.g. when the picker editing it closes.
    /// Unknown ids are ignored.
    pub fn reset(&mut self, id: StopId) {
        let Some(stop) = self.get_mut(id) else {
            debug!(%id, "ignored reset of unknown stop");
            return;
        };
        if stop.state.is_idle() {
            return;
        }
        stop.state = InteractionState::Idle;
        self.emit(TrackEvent::StateChanged {
            id,
            state: InteractionState::Idle,
        });
    }

    /// Remove a stop, keeping at least [`GradientTrack::min_stops`].
    pub fn remove(&mut self, id: StopId) -> Result<()> {
        self.remove_keeping(id, self.min_stops)
    }

    /// Remove a stop, keeping at least `minimum` stops (never fewer than the
    /// track's own floor).
    pub fn remove_keeping(&mut self, id: StopId, minimum: usize) -> Result<()> {
        let minimum = minimum.max(self.min_stops);
        let index = self
            .stops
            .iter()
            .position(|s| s.id() == id)
            .ok_or(TrackError::StopNotFound(id))?;
        if self.stops.len() <= minimum {
            warn!(%id, count = self.stops.len(), minimum, "refused to remove stop");
            return Err(TrackError::MinimumStopsViolation {
                count: self.stops.len(),
                minimum,
            });
        }
        self.stops.remove(index);
        if self.detached == Some(id) {
            self.detached = None;
        }
        debug!(%id, remaining = self.stops.len(), "removed stop");
        self.emit(TrackEvent::StopRemoved(id));
        self.ramp_changed();
        Ok(())
    }

    /// Replace a stop's color. Unknown ids are ignored.
    pub fn update_color(&mut self, id: StopId, color: Rgba) {
        if let Err(err) = self.try_update_color(id, color) {
            debug!(%err, "ignored color update");
        }
    }

    pub fn try_update_color(&mut self, id: StopId, color: Rgba) -> Result<()> {
        let stop = self.get_mut(id).ok_or(TrackError::StopNotFound(id))?;
        stop.color = color;
        self.emit(TrackEvent::ColorChanged { id, color });
        if self.detached != Some(id) {
            self.ramp_changed();
        }
        Ok(())
    }

    /// Discard every stop and load `stops` instead. All stops come in idle.
    ///
    /// An empty list is rejected with [`TrackError::EmptyTrack`], a list
    /// repeating an id with [`TrackError::DuplicateStop`]. Either way the
    /// track is left untouched.
    pub fn replace_all(&mut self, stops: impl IntoIterator<Item = ColorStop>) -> Result<()> {
        let stops: Vec<ColorStop> = stops.into_iter().map(Self::normalized).collect();
        if stops.is_empty() {
            warn!("refused to replace stops with an empty list");
            return Err(TrackError::EmptyTrack);
        }
        if let Err(err) = ensure_unique_ids(stops.iter().map(ColorStop::id)) {
            warn!(%err, "refused to replace stops");
            return Err(err);
        }
        debug!(count = stops.len(), "replaced all stops");
        self.stops = stops;
        self.detached = None;
        self.emit(TrackEvent::Replaced);
        self.ramp_changed();
        Ok(())
    }

    /// Load stops from their serializable shape.
    pub fn replace_records(&mut self, records: impl IntoIterator<Item = StopRecord>) -> Result<()> {
        self.replace_all(records.into_iter().map(ColorStop::from))
    }

    /// Take a stop off the track. It stays in the collection but no longer
    /// appears in the ramp. Unknown ids are ignored.
    pub fn detach(&mut self, id: StopId) {
        if !self.contains(id) || self.detached == Some(id) {
            return;
        }
        // Only one stop can be dragged at a time.
        self.detached = Some(id);
        debug!(%id, "detached stop");
        self.emit(TrackEvent::Detached(id));
        self.ramp_changed();
    }

    /// Put a detached stop back on the track at `position`.
    pub fn reattach(&mut self, id: StopId, position: f64) {
        if self.detached != Some(id) {
            return;
        }
        let position = clamp_position(position);
        self.detached = None;
        if let Some(stop) = self.get_mut(id) {
            stop.position = position;
        }
        debug!(%id, position, "reattached stop");
        self.emit(TrackEvent::Reattached { id, position });
        self.ramp_changed();
    }

    /// Register a listener. It runs synchronously inside every mutating call
    /// that changes the track.
    pub fn subscribe(&mut self, listener: impl FnMut(&TrackEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    fn emit(&mut self, event: TrackEvent) {
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }

    fn ramp_changed(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        let ramp = self.sorted_ramp();
        self.emit(TrackEvent::RampChanged(ramp));
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn track_with(positions: &[f64]) -> (GradientTrack, Vec<StopId>) {
        let stops: Vec<ColorStop> = positions
            .iter()
            .map(|&p| ColorStop::new(p, Rgba::WHITE))
            .collect();
        let ids = stops.iter().map(ColorStop::id).collect();
        (GradientTrack::new(stops).unwrap(), ids)
    }

    fn recorder(track: &mut GradientTrack) -> Rc<RefCell<Vec<TrackEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        track.subscribe(move |e| sink.borrow_mut().push(e.clone()));
        events
    }

    #[test]
    fn new_clamps_and_idles() {
        let mut stop = ColorStop::new(1.5, Rgba::WHITE);
        stop.state = InteractionState::Selected;
        let track = GradientTrack::new([stop, ColorStop::new(-1.0, Rgba::BLACK)]).unwrap();
        let positions: Vec<f64> = track.stops().iter().map(ColorStop::position).collect();
        assert_eq!(positions, vec![1.0, 0.0]);
        assert!(track.active().is_none());
    }

    #[test]
    fn new_rejects_empty() {
        assert_eq!(
            GradientTrack::new(Vec::new()).unwrap_err(),
            TrackError::EmptyTrack
        );
    }

    #[test]
    fn new_rejects_repeated_ids() {
        let stop = ColorStop::new(0.2, Rgba::WHITE);
        let id = stop.id();
        assert_eq!(
            GradientTrack::new([stop.clone(), stop]).unwrap_err(),
            TrackError::DuplicateStop(id)
        );
    }

    #[test]
    fn nan_position_lands_at_start() {
        let (mut track, _) = track_with(&[0.5]);
        let id = track.insert(f64::NAN, Rgba::BLACK);
        assert_eq!(track.get(id).unwrap().position(), 0.0);
    }

    #[test]
    fn strict_variants_report_unknown_ids() {
        let (mut track, _) = track_with(&[0.0, 1.0]);
        let ghost = StopId::next();
        assert_eq!(
            track.try_move_stop(ghost, 0.5),
            Err(TrackError::StopNotFound(ghost))
        );
        assert_eq!(
            track.try_update_color(ghost, Rgba::BLACK),
            Err(TrackError::StopNotFound(ghost))
        );
        assert_eq!(
            track.try_set_interaction_state(ghost, InteractionState::Selected),
            Err(TrackError::StopNotFound(ghost))
        );
        assert_eq!(track.remove(ghost), Err(TrackError::StopNotFound(ghost)));
    }

    #[test]
    fn tolerant_variants_ignore_unknown_ids() {
        let (mut track, _) = track_with(&[0.0, 1.0]);
        let events = recorder(&mut track);
        let ghost = StopId::next();
        track.move_stop(ghost, 0.5);
        track.update_color(ghost, Rgba::BLACK);
        track.set_interaction_state(ghost, InteractionState::Selected);
        track.reset(ghost);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn insert_notifies_added_then_ramp() {
        let (mut track, _) = track_with(&[0.0]);
        let events = recorder(&mut track);
        let id = track.insert(0.5, Rgba::BLACK);
        let events = events.borrow();
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], TrackEvent::StopAdded(r) if r.id == id));
        assert!(matches!(&events[1], TrackEvent::RampChanged(r) if r.len() == 2));
    }

    #[test]
    fn state_change_only_reports_stops_that_changed() {
        let (mut track, ids) = track_with(&[0.0, 0.5, 1.0]);
        track.set_interaction_state(ids[0], InteractionState::Selected);
        let events = recorder(&mut track);
        track.set_interaction_state(ids[2], InteractionState::EditingColor);
        assert_eq!(
            *events.borrow(),
            vec![
                TrackEvent::StateChanged {
                    id: ids[0],
                    state: InteractionState::Idle
                },
                TrackEvent::StateChanged {
                    id: ids[2],
                    state: InteractionState::EditingColor
                },
            ]
        );
        assert!(track.is_editing_color());
    }

    #[test]
    fn reset_idles_the_stop() {
        let (mut track, ids) = track_with(&[0.0, 1.0]);
        track.set_interaction_state(ids[1], InteractionState::EditingColor);
        track.reset(ids[1]);
        assert!(track.active().is_none());
    }

    #[test]
    fn detached_stop_leaves_the_ramp_until_reattached() {
        let (mut track, ids) = track_with(&[0.1, 0.5, 0.9]);
        track.detach(ids[1]);
        assert_eq!(track.detached(), Some(ids[1]));
        assert_eq!(track.sorted_ramp().ids(), vec![ids[0], ids[2]]);
        assert_eq!(track.len(), 3);

        track.reattach(ids[1], 0.95);
        assert_eq!(track.detached(), None);
        assert_eq!(track.sorted_ramp().ids(), vec![ids[0], ids[2], ids[1]]);
    }

    #[test]
    fn removing_the_detached_stop_clears_the_flag() {
        let (mut track, ids) = track_with(&[0.1, 0.5, 0.9]);
        track.detach(ids[0]);
        track.remove(ids[0]).unwrap();
        assert_eq!(track.detached(), None);
        assert_eq!(track.len(), 2);
    }

    #[test]
    fn remove_respects_track_floor() {
        let (track, ids) = track_with(&[0.0, 1.0]);
        let mut track = track.with_min_stops(2);
        assert_eq!(
            track.remove(ids[0]),
            Err(TrackError::MinimumStopsViolation {
                count: 2,
                minimum: 2
            })
        );
        assert_eq!(track.len(), 2);
    }

    #[test]
    fn last_stop_is_never_removed() {
        let (mut track, ids) = track_with(&[0.3]);
        assert!(matches!(
            track.remove_keeping(ids[0], 0),
            Err(TrackError::MinimumStopsViolation { count: 1, minimum: 1 })
        ));
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let (mut track, _) = track_with(&[0.0]);
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let sub = track.subscribe(move |_| *sink.borrow_mut() += 1);
        track.insert(0.2, Rgba::BLACK);
        assert!(track.unsubscribe(sub));
        assert!(!track.unsubscribe(sub));
        track.insert(0.4, Rgba::BLACK);
        assert_eq!(*count.borrow(), 2);
    }
}

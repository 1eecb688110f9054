//! Gradient slider: a track, its pointer interaction and the color picker
//! opened on a stop.
//!
//! This is the piece a front end drives. It forwards pointer events, shows a
//! picker when [`PointerOutcome::OpenColorPicker`] comes back, routes picker
//! edits through [`GradientSlider::edit_color`] and calls
//! [`GradientSlider::close_color_picker`] when the picker goes away.

use tracing::debug;

use crate::color::Rgba;
use crate::config::SliderConfig;
use crate::error::{Result, SliderError};
use crate::interaction::{Point, PointerOutcome, TrackGeometry, TrackInteraction};
use crate::picker::ColorPicker;
use crate::ramp::Ramp;
use crate::stop::{ColorStop, InteractionState, StopId, StopRecord};
use crate::track::{self, GradientTrack, SubscriptionId, TrackEvent};

/// A picker editing one stop.
#[derive(Debug)]
struct PickerSession {
    stop: StopId,
    picker: ColorPicker,
}

#[derive(Debug)]
pub struct GradientSlider {
    config: SliderConfig,
    track: GradientTrack,
    interaction: TrackInteraction,
    picker: Option<PickerSession>,
}

impl GradientSlider {
    /// Create a slider `width` units wide showing `stops`.
    pub fn new(
        config: SliderConfig,
        width: f64,
        stops: impl IntoIterator<Item = ColorStop>,
    ) -> std::result::Result<Self, SliderError> {
        config.validate()?;
        let track = GradientTrack::new(stops)?;
        Ok(Self::with_track(config, width, track))
    }

    /// Wrap an existing track. `config` is assumed valid.
    pub fn with_track(config: SliderConfig, width: f64, track: GradientTrack) -> Self {
        let geometry = TrackGeometry::from_config(width, &config);
        Self {
            interaction: TrackInteraction::new(geometry, &config),
            config,
            track,
            picker: None,
        }
    }

    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    pub fn track(&self) -> &GradientTrack {
        &self.track
    }

    pub fn geometry(&self) -> &TrackGeometry {
        self.interaction.geometry()
    }

    /// The track view was resized.
    pub fn resize(&mut self, width: f64) {
        self.interaction
            .set_geometry(TrackGeometry::from_config(width, &self.config));
    }

    /// Stops sorted by position, as the renderer should draw them.
    pub fn stops(&self) -> Ramp {
        self.track.sorted_ramp()
    }

    /// Where to draw the handle of each stop, detached stops excluded.
    pub fn handle_positions(&self) -> Vec<(StopId, Point)> {
        let geometry = self.interaction.geometry();
        self.track
            .sorted_stops()
            .into_iter()
            .map(|s| (s.id(), geometry.handle_center(s.position())))
            .collect()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&TrackEvent) + 'static) -> SubscriptionId {
        self.track.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.track.unsubscribe(id)
    }

    /// Load a new set of stops, e.g. a preset or an undo step. Any open
    /// picker is closed first. Rejected input leaves the picker open.
    pub fn replace_all(&mut self, records: impl IntoIterator<Item = StopRecord>) -> Result<()> {
        let stops: Vec<ColorStop> = records.into_iter().map(ColorStop::from).collect();
        let accepted =
            !stops.is_empty() && track::ensure_unique_ids(stops.iter().map(ColorStop::id)).is_ok();
        if accepted {
            self.close_color_picker();
        }
        self.track.replace_all(stops)
    }

    pub fn pointer_down(&mut self, point: Point, click_count: u32, new_color: Rgba) -> PointerOutcome {
        let outcome = self
            .interaction
            .pointer_down(&mut self.track, point, click_count, new_color);
        if let PointerOutcome::OpenColorPicker(id) = outcome {
            self.open_color_picker(id);
        }
        outcome
    }

    pub fn pointer_dragged(&mut self, point: Point) -> PointerOutcome {
        self.interaction.pointer_dragged(&mut self.track, point)
    }

    pub fn pointer_up(&mut self) -> PointerOutcome {
        self.interaction.pointer_up(&mut self.track)
    }

    /// Abandon an in-progress drag.
    pub fn cancel_drag(&mut self) {
        self.interaction.cancel(&mut self.track);
    }

    fn open_color_picker(&mut self, stop: StopId) {
        let Some(color) = self.track.get(stop).map(ColorStop::color) else {
            return;
        };
        debug!(%stop, "opened color picker");
        self.picker = Some(PickerSession {
            stop,
            picker: ColorPicker::new(color),
        });
    }

    /// The open picker, if any.
    pub fn color_picker(&self) -> Option<&ColorPicker> {
        self.picker.as_ref().map(|s| &s.picker)
    }

    /// The stop the open picker edits.
    pub fn editing_stop(&self) -> Option<StopId> {
        self.picker.as_ref().map(|s| s.stop)
    }

    /// Apply an edit to the open picker and copy the resulting color onto the
    /// stop it edits. Returns `None` when no picker is open.
    ///
    /// ```
    /// # use floem_gradient::{GradientSlider, Point, Rgba, SliderConfig};
    /// # let mut slider = GradientSlider::new(SliderConfig::default(), 200.0, [
    /// #     floem_gradient::ColorStop::new(0.5, Rgba::WHITE),
    /// # ]).unwrap();
    /// slider.pointer_down(Point::new(100.0, 6.0), 2, Rgba::BLACK);
    /// let color = slider.edit_color(|picker| picker.set_alpha(0.5));
    /// assert_eq!(color.map(|c| c.a()), Some(0.5));
    /// ```
    pub fn edit_color(&mut self, edit: impl FnOnce(&mut ColorPicker) -> Rgba) -> Option<Rgba> {
        let session = self.picker.as_mut()?;
        let color = edit(&mut session.picker);
        // The stop may have been removed while the picker was open.
        self.track.update_color(session.stop, color);
        Some(color)
    }

    /// The picker went away: forget it and put its stop back to idle.
    pub fn close_color_picker(&mut self) {
        if let Some(session) = self.picker.take() {
            debug!(stop = %session.stop, "closed color picker");
            self.track.reset(session.stop);
        }
    }

    pub fn is_picking_color(&self) -> bool {
        self.track
            .active()
            .is_some_and(|s| s.state() == InteractionState::EditingColor)
    }
}

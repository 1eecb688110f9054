//! Sizing and interaction constants for the gradient slider.

/// Track height
pub const TRACK_HEIGHT: f64 = 12.0;

/// Track border width
pub const TRACK_BORDER_WIDTH: f64 = 1.0;

/// Outer radius of a stop handle
pub const HANDLE_RADIUS: f64 = 10.0;

/// Radius of the color swatch inside a stop handle
pub const HANDLE_INNER_RADIUS: f64 = 5.0;

/// Border width around a stop handle
pub const HANDLE_BORDER_WIDTH: f64 = 1.0;

/// Vertical distance from the track centerline at which a dragged stop detaches
pub const DETACH_DISTANCE: f64 = 50.0;

/// Vertical distance under which a detached stop snaps back onto the track
pub const REATTACH_DISTANCE: f64 = 20.0;

/// Fewest stops a track may hold
pub const MIN_STOPS: usize = 1;

/// Fewest stops left after ripping one off the track
pub const MIN_INTERACTIVE_STOPS: usize = 2;

//! Sorted color ramp: what a renderer draws for the track.
//!
//! Besides handing the stops to a native gradient primitive, the ramp can be
//! sampled directly or rasterized to an RGBA8 strip for renderers without
//! one.

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::math;
use crate::stop::{StopId, StopRecord};

/// Stops ascending by position, ties in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ramp {
    stops: Vec<StopRecord>,
}

impl Ramp {
    /// Build a ramp from unsorted records. The sort is stable.
    pub fn new(mut stops: Vec<StopRecord>) -> Self {
        stops.sort_by(|a, b| {
            a.position
                .partial_cmp(&b.position)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Self { stops }
    }

    pub(crate) fn from_sorted(stops: Vec<StopRecord>) -> Self {
        Self { stops }
    }

    pub fn stops(&self) -> &[StopRecord] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn ids(&self) -> Vec<StopId> {
        self.stops.iter().map(|s| s.id).collect()
    }

    /// Positions in ramp order, e.g. for a gradient layer's `locations`.
    pub fn positions(&self) -> Vec<f64> {
        self.stops.iter().map(|s| s.position).collect()
    }

    pub fn colors(&self) -> Vec<Rgba> {
        self.stops.iter().map(|s| s.color).collect()
    }

    /// Color at `t` (clamped to 0.0–1.0), linearly interpolated between the
    /// surrounding stops. Before the first / after the last stop the end
    /// color is held. `None` for an empty ramp.
    pub fn sample(&self, t: f64) -> Option<Rgba> {
        let first = self.stops.first()?;
        let last = self.stops.last()?;
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        if t <= first.position {
            return Some(first.color);
        }
        if t >= last.position {
            return Some(last.color);
        }
        for pair in self.stops.windows(2) {
            let (from, to) = (&pair[0], &pair[1]);
            if t > to.position {
                continue;
            }
            let span = to.position - from.position;
            if span <= 0.0 {
                return Some(to.color);
            }
            let f = (t - from.position) / span;
            let (a, b) = (from.color, to.color);
            return Some(Rgba::new(
                math::lerp(a.r(), b.r(), f),
                math::lerp(a.g(), b.g(), f),
                math::lerp(a.b(), b.b(), f),
                math::lerp(a.a(), b.a(), f),
            ));
        }
        Some(last.color)
    }

    /// Rasterize the ramp left to right into an RGBA8 buffer.
    ///
    /// Pixel centers are sampled, so the outermost columns sit half a pixel
    /// inside the 0.0 and 1.0 ends. An empty ramp gives a transparent
    /// buffer. Returns `None` when `width * height * 4` bytes do not fit in
    /// a `usize`.
    pub fn rasterize(&self, width: u32, height: u32) -> Option<Vec<u8>> {
        let (width, height) = (width as usize, height as usize);
        let row_len = width.checked_mul(4)?;
        let len = row_len.checked_mul(height)?;
        let mut buf = vec![0u8; len];
        if self.stops.is_empty() || len == 0 {
            return Some(buf);
        }

        let (first_row, rest) = buf.split_at_mut(row_len);
        for (px, pixel) in first_row.chunks_exact_mut(4).enumerate() {
            let t = (px as f64 + 0.5) / width as f64;
            let (r, g, b, a) = self.sample(t).unwrap_or_default().to_rgba8();
            pixel.copy_from_slice(&[r, g, b, a]);
        }
        for row in rest.chunks_exact_mut(row_len) {
            row.copy_from_slice(first_row);
        }
        Some(buf)
    }
}

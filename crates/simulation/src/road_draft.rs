//! Transient freehand road stroke state.
//!
//! At most one draft exists at a time. Points accumulate while the pointer
//! button is held, gated by a minimum spacing; preview geometry is derived
//! from the draft each accepted point and is never persisted.

use bevy::prelude::*;

use crate::config::{COMMIT_SUBDIV, DEFAULT_ROAD_WIDTH, PREVIEW_SUBDIV, ROAD_MIN_SAMPLE_DIST};
use crate::spline::{polyline_length, sample_catmull_rom};

#[derive(Resource, Default, Debug)]
pub struct RoadDraft {
    /// Ground-plane positions in drawing order.
    pub points: Vec<Vec2>,
    /// Whether the pointer button is currently held for this stroke.
    pub drawing: bool,
}

impl RoadDraft {
    /// Accept `pos` if it clears the spacing gate. Returns `true` when the
    /// point was added.
    pub fn add_sample(&mut self, pos: Vec2) -> bool {
        if let Some(&last) = self.points.last() {
            if (pos - last).length() < ROAD_MIN_SAMPLE_DIST {
                return false;
            }
        }
        self.points.push(pos);
        true
    }

    /// Drop the stroke without committing anything.
    pub fn reset(&mut self) {
        self.points.clear();
        self.drawing = false;
    }

    /// A draft needs at least two accepted points to become a road.
    pub fn can_finalize(&self) -> bool {
        self.points.len() >= 2
    }

    /// Low-resolution spline samples for the live preview polyline.
    pub fn preview_polyline(&self) -> Vec<Vec2> {
        sample_catmull_rom(&self.points, PREVIEW_SUBDIV)
    }

    /// High-resolution spline samples used to extrude the committed ribbon.
    pub fn commit_polyline(&self) -> Vec<Vec2> {
        sample_catmull_rom(&self.points, COMMIT_SUBDIV)
    }

    /// Arc length of the committed curve; `round()` of this is the road cost.
    pub fn arc_length(&self) -> f32 {
        polyline_length(&self.commit_polyline())
    }
}

/// Runtime-adjustable road appearance. Width changes apply to roads committed
/// afterwards; existing ribbons keep the width they were extruded with.
#[derive(Resource, Debug, Clone, Copy)]
pub struct RoadStyle {
    pub width: f32,
}

impl Default for RoadStyle {
    fn default() -> Self {
        Self {
            width: DEFAULT_ROAD_WIDTH,
        }
    }
}

//! The single interaction mode.
//!
//! One enum replaces a pile of independent mode booleans, so mutual
//! exclusion between dragging, road drawing, tree planting, and free camera
//! navigation is structural: camera input systems run only in [`Idle`], and
//! every tool handler checks the mode before touching the pointer.
//!
//! [`Idle`]: InteractionMode::Idle

use bevy::prelude::*;

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum InteractionMode {
    /// Free camera navigation; clicks select, drags start on placed objects.
    #[default]
    Idle,
    /// A placed object is tracking the pointer ray on the ground plane.
    Dragging { entity: Entity },
    /// Freehand road drawing; pointer strokes feed the active draft.
    DrawingRoad,
    /// Every ground click plants a tree.
    PlantingTree,
}

impl InteractionMode {
    /// Camera orbit/pan/zoom is allowed only while idle.
    pub fn camera_enabled(self) -> bool {
        matches!(self, InteractionMode::Idle)
    }

    pub fn is_dragging(self) -> bool {
        matches!(self, InteractionMode::Dragging { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_locked_in_every_tool_mode() {
        assert!(InteractionMode::Idle.camera_enabled());
        assert!(!InteractionMode::DrawingRoad.camera_enabled());
        assert!(!InteractionMode::PlantingTree.camera_enabled());
        let dragging = InteractionMode::Dragging {
            entity: Entity::from_raw(7),
        };
        assert!(!dragging.camera_enabled());
        assert!(dragging.is_dragging());
    }
}

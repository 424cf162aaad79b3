//! Selection and drag control for placed objects.
//!
//! Pointer-down over a registry member grabs it and opens the context panel;
//! while the button is held the object tracks the pointer ray on the ground
//! plane; release snaps non-road kinds to the grid and returns to idle.
//! Camera navigation is locked out for the whole gesture via the mode enum.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use simulation::config::SNAP_CELL_SIZE;
use simulation::modes::InteractionMode;
use simulation::objects::{ObjectRegistry, PlacedObject};
use simulation::snap::snap_to_grid;

use crate::input::{egui_wants_pointer, CursorGround, SelectedObject};
use crate::picking::{pick_nearest, PickBounds};

#[allow(clippy::too_many_arguments)]
pub fn handle_select_and_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    mut contexts: EguiContexts,
    cursor: Res<CursorGround>,
    mut mode: ResMut<InteractionMode>,
    mut selected: ResMut<SelectedObject>,
    registry: Res<ObjectRegistry>,
    mut objects: Query<(&PlacedObject, &mut Transform, &PickBounds)>,
) {
    // Road drawing and tree planting own the pointer in their modes.
    if matches!(
        *mode,
        InteractionMode::DrawingRoad | InteractionMode::PlantingTree
    ) {
        return;
    }

    // Pointer-down while idle: resolve the topmost object under the cursor.
    if buttons.just_pressed(MouseButton::Left) && *mode == InteractionMode::Idle {
        if egui_wants_pointer(&mut contexts) {
            return;
        }
        let Ok(window) = windows.get_single() else {
            return;
        };
        let Ok((camera, cam_transform)) = camera_q.get_single() else {
            return;
        };
        let Some(screen_pos) = window.cursor_position() else {
            return;
        };
        let Ok(ray) = camera.viewport_to_world(cam_transform, screen_pos) else {
            return;
        };

        let hit = pick_nearest(
            ray,
            registry.iter().filter_map(|entity| {
                objects.get(entity).ok().map(|(_, transform, bounds)| {
                    (entity, transform.translation + bounds.offset, bounds.half)
                })
            }),
        );

        match hit {
            Some((entity, _)) => {
                selected.0 = Some(entity);
                *mode = InteractionMode::Dragging { entity };
            }
            None => {
                // Nothing under the pointer: close the context panel.
                selected.0 = None;
            }
        }
        return;
    }

    let InteractionMode::Dragging { entity } = *mode else {
        return;
    };

    // Track the ground-plane hit while the button is held.
    if buttons.pressed(MouseButton::Left) && cursor.valid {
        if let Ok((_, mut transform, _)) = objects.get_mut(entity) {
            transform.translation.x = cursor.world_pos.x;
            transform.translation.z = cursor.world_pos.y;
        }
    }

    // Release: snap non-road kinds, re-enable the camera.
    if buttons.just_released(MouseButton::Left) {
        if let Ok((placed, mut transform, _)) = objects.get_mut(entity) {
            if placed.kind.snaps_to_grid() {
                transform.translation.x = snap_to_grid(transform.translation.x, SNAP_CELL_SIZE);
                transform.translation.z = snap_to_grid(transform.translation.z, SNAP_CELL_SIZE);
            }
        }
        *mode = InteractionMode::Idle;
    }
}

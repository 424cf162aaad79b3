//! Shared pointer/keyboard state: ground cursor, selection, status messages,
//! and the egui pointer guard.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use simulation::config::TERRAIN_SIZE;
use simulation::modes::InteractionMode;
use simulation::road_draft::RoadDraft;

use crate::picking::ray_ground_intersection;
use crate::road_draw::despawn_road_preview;

/// Where the pointer ray meets the ground plane this frame.
#[derive(Resource, Default)]
pub struct CursorGround {
    pub world_pos: Vec2,
    pub valid: bool,
}

/// Currently selected placed object; drives the context panel.
#[derive(Resource, Default)]
pub struct SelectedObject(pub Option<Entity>);

/// Status message shown briefly on screen.
#[derive(Resource, Default)]
pub struct StatusMessage {
    pub text: String,
    pub timer: f32,
    pub is_error: bool,
}

impl StatusMessage {
    pub fn set(&mut self, text: impl Into<String>, is_error: bool) {
        self.text = text.into();
        self.timer = 3.0;
        self.is_error = is_error;
    }

    pub fn active(&self) -> bool {
        self.timer > 0.0
    }
}

pub fn tick_status_message(time: Res<Time>, mut status: ResMut<StatusMessage>) {
    if status.timer > 0.0 {
        status.timer -= time.delta_secs();
    }
}

/// Returns `true` when egui wants the pointer — i.e. the cursor is over an
/// egui panel or egui is actively handling a drag/click. World input systems
/// must early-return when this is `true`, so menu interaction can never
/// select objects or feed a road stroke underneath the UI.
#[inline]
pub fn egui_wants_pointer(contexts: &mut EguiContexts) -> bool {
    let ctx = contexts.ctx_mut();
    ctx.wants_pointer_input() || ctx.is_pointer_over_area()
}

/// Each frame, project the cursor onto the ground plane.
pub fn update_cursor_ground(
    windows: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    mut cursor: ResMut<CursorGround>,
) {
    cursor.valid = false;

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
    let Some(hit) = ray_ground_intersection(ray) else {
        return;
    };

    let half = TERRAIN_SIZE / 2.0;
    if hit.x.abs() <= half && hit.z.abs() <= half {
        cursor.world_pos = Vec2::new(hit.x, hit.z);
        cursor.valid = true;
    }
}

/// Escape backs out of the active tool mode (or drops the selection).
/// A road stroke in progress is discarded without charging anything.
pub fn handle_escape_key(
    keys: Res<ButtonInput<KeyCode>>,
    mut commands: Commands,
    mut mode: ResMut<InteractionMode>,
    mut draft: ResMut<RoadDraft>,
    mut selected: ResMut<SelectedObject>,
    mut status: ResMut<StatusMessage>,
    preview_q: Query<Entity, With<crate::road_draw::RoadPreview>>,
) {
    if !keys.just_pressed(KeyCode::Escape) {
        return;
    }

    match *mode {
        InteractionMode::DrawingRoad => {
            draft.reset();
            despawn_road_preview(&mut commands, &preview_q);
            *mode = InteractionMode::Idle;
            status.set("Road drawing cancelled", false);
        }
        InteractionMode::PlantingTree => {
            *mode = InteractionMode::Idle;
            status.set("Tree planting off", false);
        }
        InteractionMode::Dragging { .. } => {}
        InteractionMode::Idle => {
            selected.0 = None;
        }
    }
}

/// Keyboard tool shortcuts mirroring the build panel entries.
pub fn keyboard_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    mut commands_out: EventWriter<simulation::game_actions::BuildCommand>,
) {
    use simulation::game_actions::BuildCommand;

    if keys.just_pressed(KeyCode::KeyR) {
        commands_out.send(BuildCommand::EnterRoadMode);
    }
    if keys.just_pressed(KeyCode::KeyT) {
        commands_out.send(BuildCommand::EnterTreeMode);
    }
    if keys.just_pressed(KeyCode::Delete) {
        commands_out.send(BuildCommand::DeleteSelected);
    }
    if keys.just_pressed(KeyCode::Backspace) {
        commands_out.send(BuildCommand::DeleteLast);
    }
}

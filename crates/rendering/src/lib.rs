use bevy::prelude::*;

pub mod camera;
pub mod drag;
pub mod input;
pub mod lifecycle;
pub mod object_meshes;
pub mod picking;
pub mod road_draw;
pub mod road_mesh;
pub mod terrain_render;

use camera::{CameraOrbitDrag, CameraPanDrag};
use input::{CursorGround, SelectedObject, StatusMessage};

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraPanDrag>()
            .init_resource::<CameraOrbitDrag>()
            .init_resource::<CursorGround>()
            .init_resource::<SelectedObject>()
            .init_resource::<StatusMessage>()
            .add_systems(
                Startup,
                (
                    camera::setup_camera,
                    terrain_render::setup_lighting,
                    terrain_render::spawn_terrain,
                    object_meshes::load_models,
                    road_draw::setup_road_surface,
                ),
            )
            .add_systems(
                Update,
                (
                    camera::camera_pan_keyboard,
                    camera::camera_pan_drag,
                    camera::camera_orbit_drag,
                    camera::camera_zoom,
                    camera::apply_orbit_camera,
                ),
            )
            .add_systems(
                Update,
                (
                    input::update_cursor_ground,
                    drag::handle_select_and_drag,
                    road_draw::handle_road_drawing,
                    lifecycle::handle_tree_planting,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    lifecycle::handle_build_commands,
                    lifecycle::register_ready_assets,
                    input::handle_escape_key,
                    input::keyboard_shortcuts,
                    input::tick_status_message,
                ),
            );
    }
}

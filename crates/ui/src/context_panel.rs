//! Context panel anchored to the selected object.
//!
//! The panel follows the object's projected screen position: world position
//! through the camera projection to NDC, then NDC to viewport pixels with
//! the vertical axis flipped.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::game_actions::BuildCommand;
use simulation::modes::InteractionMode;
use simulation::objects::{PlacedObject, RoadRibbon};

use rendering::input::SelectedObject;
use rendering::picking::ndc_to_viewport;

pub fn context_panel_ui(
    mut contexts: EguiContexts,
    selected: Res<SelectedObject>,
    mode: Res<InteractionMode>,
    windows: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    objects: Query<(&PlacedObject, &Transform, Option<&RoadRibbon>)>,
    mut commands_out: EventWriter<BuildCommand>,
) {
    // Hidden while a gesture owns the pointer.
    if *mode != InteractionMode::Idle {
        return;
    }
    let Some(entity) = selected.0 else {
        return;
    };
    let Ok((placed, transform, ribbon)) = objects.get(entity) else {
        return;
    };
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok((camera, cam_transform)) = camera_q.get_single() else {
        return;
    };
    let Some(ndc) = camera.world_to_ndc(cam_transform, transform.translation) else {
        return;
    };
    // Behind the camera: nothing to anchor to.
    if ndc.z < 0.0 || ndc.z > 1.0 {
        return;
    }

    let viewport = Vec2::new(window.width(), window.height());
    let anchor = ndc_to_viewport(ndc.truncate(), viewport);

    egui::Window::new("object")
        .title_bar(false)
        .resizable(false)
        .collapsible(false)
        .fixed_pos(egui::pos2(anchor.x + 12.0, anchor.y - 12.0))
        .show(contexts.ctx_mut(), |ui| {
            ui.label(egui::RichText::new(placed.kind.label()).strong());
            if let Some(ribbon) = ribbon {
                ui.label(format!("length {:.0}", ribbon.arc_length));
            }
            ui.label(format!("cost {}", placed.cost));

            ui.horizontal(|ui| {
                if ui.button("Duplicate").clicked() {
                    commands_out.send(BuildCommand::DuplicateSelected);
                }
                if ui.button("Delete").clicked() {
                    commands_out.send(BuildCommand::DeleteSelected);
                }
            });
        });
}

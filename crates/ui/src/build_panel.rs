//! The build panel: every externally triggered entry point of the core is a
//! button here, emitting [`BuildCommand`] events for the executors.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::economy::{OnceFlags, Wallet};
use simulation::game_actions::BuildCommand;
use simulation::modes::InteractionMode;
use simulation::objects::ObjectKind;
use simulation::road_draft::RoadStyle;

/// Whether the build panel is open; toggled from the info bar.
#[derive(Resource)]
pub struct BuildPanelVisible(pub bool);

impl Default for BuildPanelVisible {
    fn default() -> Self {
        Self(true)
    }
}

fn build_button(
    ui: &mut egui::Ui,
    label: &str,
    kind: ObjectKind,
    once: &OnceFlags,
    wallet: &Wallet,
) -> bool {
    let built = once.already_built(kind);
    let text = if built {
        format!("{label} (built)")
    } else {
        format!("{label} — {} crafties", kind.cost())
    };
    let enabled = !built && wallet.can_afford(kind.cost());
    ui.add_enabled(enabled, egui::Button::new(text).min_size(egui::vec2(170.0, 24.0)))
        .clicked()
}

#[allow(clippy::too_many_arguments)]
pub fn build_panel_ui(
    mut contexts: EguiContexts,
    visible: Res<BuildPanelVisible>,
    wallet: Res<Wallet>,
    once: Res<OnceFlags>,
    mode: Res<InteractionMode>,
    mut style: ResMut<RoadStyle>,
    mut commands_out: EventWriter<BuildCommand>,
) {
    if !visible.0 {
        return;
    }

    egui::SidePanel::left("build_panel")
        .resizable(false)
        .default_width(190.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.heading("New Plan");
            ui.separator();

            if build_button(ui, "Street Light", ObjectKind::StreetLight, &once, &wallet) {
                commands_out.send(BuildCommand::BuildStreetLight);
            }
            if build_button(ui, "House", ObjectKind::House, &once, &wallet) {
                commands_out.send(BuildCommand::BuildHouse);
            }
            if build_button(ui, "Custom Block", ObjectKind::CustomBlock, &once, &wallet) {
                commands_out.send(BuildCommand::BuildCustomBlock);
            }

            ui.separator();

            let road_active = *mode == InteractionMode::DrawingRoad;
            if ui
                .selectable_label(road_active, "Draw Road (R)")
                .clicked()
                && !road_active
            {
                commands_out.send(BuildCommand::EnterRoadMode);
            }
            let tree_active = *mode == InteractionMode::PlantingTree;
            if ui
                .selectable_label(tree_active, "Plant Trees (T)")
                .clicked()
                && !tree_active
            {
                commands_out.send(BuildCommand::EnterTreeMode);
            }

            // Width applies to roads committed after the change.
            ui.add(
                egui::Slider::new(&mut style.width, 2.0..=12.0)
                    .text("road width")
                    .fixed_decimals(1),
            );

            ui.separator();

            if ui.button("Duplicate Selected").clicked() {
                commands_out.send(BuildCommand::DuplicateSelected);
            }
            if ui.button("Delete Selected (Del)").clicked() {
                commands_out.send(BuildCommand::DeleteSelected);
            }
            if ui.button("Delete Last").clicked() {
                commands_out.send(BuildCommand::DeleteLast);
            }

            ui.separator();

            if ui.button("Save Scene").clicked() {
                commands_out.send(BuildCommand::SaveScene);
            }
            if ui.button("Load Scene").clicked() {
                commands_out.send(BuildCommand::LoadScene);
            }

            ui.separator();
            if ui.button("Close Panel").clicked() {
                commands_out.send(BuildCommand::ClosePanel);
            }
        });
}

/// The close-panel command also collapses the panel itself.
pub fn apply_close_panel(
    mut events: EventReader<BuildCommand>,
    mut visible: ResMut<BuildPanelVisible>,
) {
    for &command in events.read() {
        if command == BuildCommand::ClosePanel {
            visible.0 = false;
        }
    }
}

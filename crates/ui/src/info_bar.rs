//! Top info bar: crafties, happiness, active mode, and status messages.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::economy::Wallet;
use simulation::happiness::Happiness;
use simulation::modes::InteractionMode;

use rendering::input::StatusMessage;

use crate::build_panel::BuildPanelVisible;

fn mode_label(mode: InteractionMode) -> &'static str {
    match mode {
        InteractionMode::Idle => "select",
        InteractionMode::Dragging { .. } => "dragging",
        InteractionMode::DrawingRoad => "road",
        InteractionMode::PlantingTree => "trees",
    }
}

pub fn info_bar_ui(
    mut contexts: EguiContexts,
    wallet: Res<Wallet>,
    happiness: Res<Happiness>,
    mode: Res<InteractionMode>,
    status: Res<StatusMessage>,
    mut panel_visible: ResMut<BuildPanelVisible>,
) {
    egui::TopBottomPanel::top("info_bar")
        .exact_height(30.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.horizontal_centered(|ui| {
                ui.spacing_mut().item_spacing.x = 12.0;

                if ui.button("New Plan").clicked() {
                    panel_visible.0 = !panel_visible.0;
                }

                ui.separator();
                ui.label(
                    egui::RichText::new(format!("crafties-{}", wallet.crafties))
                        .color(egui::Color32::from_rgb(230, 200, 50)),
                );
                ui.label(format!("happiness {}", happiness.score));

                ui.separator();
                ui.label(mode_label(*mode));

                if status.active() {
                    ui.separator();
                    let color = if status.is_error {
                        egui::Color32::from_rgb(220, 60, 60)
                    } else {
                        egui::Color32::from_rgb(160, 220, 160)
                    };
                    ui.label(egui::RichText::new(&status.text).color(color));
                }
            });
        });
}

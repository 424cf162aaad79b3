use bevy::prelude::*;
use bevy_egui::EguiPlugin;

pub mod build_panel;
pub mod context_panel;
pub mod info_bar;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<build_panel::BuildPanelVisible>()
            .add_systems(
                Update,
                (
                    info_bar::info_bar_ui,
                    build_panel::build_panel_ui,
                    build_panel::apply_close_panel,
                    context_panel::context_panel_ui,
                ),
            );
    }
}

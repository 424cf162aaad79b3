use bevy::prelude::*;

pub mod config;
pub mod economy;
pub mod game_actions;
pub mod happiness;
pub mod modes;
pub mod objects;
pub mod road_draft;
pub mod sim_rng;
pub mod snap;
pub mod spline;
pub mod telemetry;


use economy::{OnceFlags, Wallet};
use game_actions::BuildCommand;
use happiness::Happiness;
use modes::InteractionMode;
use objects::{InventoryChanged, ObjectRegistry};
use road_draft::{RoadDraft, RoadStyle};
use sim_rng::SimRng;
use telemetry::{PlacementEvent, Telemetry};

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Wallet>()
            .init_resource::<OnceFlags>()
            .init_resource::<Happiness>()
            .init_resource::<ObjectRegistry>()
            .init_resource::<InteractionMode>()
            .init_resource::<RoadDraft>()
            .init_resource::<RoadStyle>()
            .init_resource::<SimRng>()
            .init_resource::<Telemetry>()
            .add_event::<BuildCommand>()
            .add_event::<InventoryChanged>()
            .add_event::<PlacementEvent>()
            .add_systems(
                Update,
                (happiness::update_happiness, telemetry::forward_placements),
            );
    }
}

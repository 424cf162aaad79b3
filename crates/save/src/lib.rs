use bevy::prelude::*;

pub mod atomic_write;
pub mod save_error;
pub mod snapshot;

pub use save_error::SnapshotError;
pub use snapshot::{BlockRecord, PositionRecord, SnapshotPath};

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SnapshotPath>()
            .add_systems(Update, snapshot::handle_snapshot_commands);
    }
}

/// Side length of the square terrain plane in world units.
pub const TERRAIN_SIZE: f32 = 100.0;

/// Grid cell size used when snapping placed objects on drag release.
pub const SNAP_CELL_SIZE: f32 = 10.0;

/// Crafties granted at session start.
pub const STARTING_CRAFTIES: i64 = 200;

/// Minimum distance (world units) between consecutive accepted road points.
/// Gates freehand sampling so duplicate/near-duplicate vertices never enter
/// a draft and point density stays bounded.
pub const ROAD_MIN_SAMPLE_DIST: f32 = 2.0;

/// Spline samples per control span for the live road preview.
pub const PREVIEW_SUBDIV: usize = 4;

/// Spline samples per control span for the committed ribbon mesh.
pub const COMMIT_SUBDIV: usize = 8;

/// Default ribbon width for newly committed roads (world units).
pub const DEFAULT_ROAD_WIDTH: f32 = 5.0;

/// Horizontal offset applied to duplicated objects.
pub const DUPLICATE_OFFSET: f32 = 10.0;

/// Build placements scatter within [-SPAWN_RANGE, SPAWN_RANGE] on x and z.
pub const SPAWN_RANGE: f32 = 25.0;

/// Edge length of the custom block cube.
pub const BLOCK_SIZE: f32 = 5.0;

/// Resting height of a custom block's center above the terrain.
pub const BLOCK_REST_Y: f32 = 2.6;

use std::time::Duration;

/// Grid dimensions (32x32 = 1024 cells)
pub const GRID_WIDTH: u32 = 32;
pub const GRID_HEIGHT: u32 = 32;

/// Compute shader workgroup size (8x8 invocations per workgroup)
pub const WORKGROUP_SIZE: u32 = 8;

/// Simulation tick period
pub const TICK_INTERVAL: Duration = Duration::from_millis(500);

/// Initial snake length, laid along row 0 starting at cell 0
pub const INITIAL_LENGTH: u32 = 4;

/// Food marker in the cell buffer (all bits set, never a valid body rank)
pub const FOOD_CELL: u32 = 0xFFFF_FFFF;

/// Probe attempts when respawning food after a meal; if every probe lands
/// on an occupied cell, no food spawns that tick
pub const FOOD_SPAWN_PROBES: u32 = 8;

/// Window size in logical pixels
pub const WINDOW_SIZE: u32 = 640;

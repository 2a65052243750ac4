// Physical Constants
pub const GRAVITY: f64 = 9.8; // m/s²
pub const AIR_DENSITY: f64 = 1.225; // kg/m³ (sea level)

// Simulation Parameters
pub const DEFAULT_START_HEIGHT: f64 = 169.0; // m
pub const DEFAULT_ANIMATION_SPEED: f64 = 1.0; // real-time
pub const FRAME_INTERVAL: f64 = 1.0 / 60.0; // s (nominal display refresh)
pub const MAX_SIMULATION_TIME: f64 = 600.0; // s

// History Buffer Parameters
pub const HISTORY_COMPACTION_THRESHOLD: usize = 1500; // samples
pub const HISTORY_COMPACTION_FACTOR: usize = 2;

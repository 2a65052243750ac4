pub mod constants;
pub mod driver;
pub mod errors;
pub mod physics;
pub mod presets;
pub mod telemetry;

pub use constants::*;
pub use errors::SimulationError;
pub use presets::{default_preset, find_preset, ObjectPreset, OBJECT_PRESETS};

// Re-export commonly used items from physics
pub use physics::integrator::{step, ObjectParameters, PhysicalState};

// Re-export commonly used items from driver
pub use driver::simulation::{RunState, Simulation, TickToken};

// Re-export commonly used items from telemetry
pub use telemetry::history::{History, HistorySample};
pub use telemetry::recorder::FlightRecorder;

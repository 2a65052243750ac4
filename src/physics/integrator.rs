use crate::constants::{AIR_DENSITY, GRAVITY};
use crate::errors::SimulationError;
use crate::presets::ObjectPreset;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalState {
    pub time: f64,             // s
    pub height: f64,           // m above ground
    pub velocity: f64,         // m/s, downward-positive
    pub acceleration: f64,     // m/s²
    pub force_of_gravity: f64, // N
    pub drag_force: f64,       // N
}

impl PhysicalState {
    pub fn at_rest(start_height: f64) -> Self {
        PhysicalState {
            time: 0.0,
            height: start_height,
            velocity: 0.0,
            acceleration: 0.0,
            force_of_gravity: 0.0,
            drag_force: 0.0,
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.height <= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectParameters {
    mass: f64,
    diameter: f64,
    drag_coefficient: f64,
}

impl ObjectParameters {
    pub fn new(mass: f64, diameter: f64, drag_coefficient: f64) -> Result<Self, SimulationError> {
        if !(mass > 0.0) {
            return Err(SimulationError::InvalidParameter(format!(
                "mass must be positive, got {} kg",
                mass
            )));
        }
        if !(diameter > 0.0) {
            return Err(SimulationError::InvalidParameter(format!(
                "diameter must be positive, got {} m",
                diameter
            )));
        }
        if !(drag_coefficient >= 0.0) {
            return Err(SimulationError::InvalidParameter(format!(
                "drag coefficient must be non-negative, got {}",
                drag_coefficient
            )));
        }

        Ok(ObjectParameters {
            mass,
            diameter,
            drag_coefficient,
        })
    }

    pub fn from_preset(preset: &ObjectPreset) -> Result<Self, SimulationError> {
        ObjectParameters::new(preset.mass, preset.diameter, preset.drag_coefficient)
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    pub fn drag_coefficient(&self) -> f64 {
        self.drag_coefficient
    }

    pub fn cross_sectional_area(&self) -> f64 {
        std::f64::consts::PI * (self.diameter / 2.0).powi(2)
    }

    // Steady-state velocity where drag balances gravity. Infinite when the
    // drag coefficient is zero.
    pub fn terminal_velocity(&self) -> f64 {
        let denominator = AIR_DENSITY * self.drag_coefficient * self.cross_sectional_area();
        (2.0 * self.mass * GRAVITY / denominator).sqrt()
    }
}

// Explicit Euler step. Drag uses the velocity carried in from the previous
// step, not the velocity computed within this one. The returned height is
// clamped to the ground; callers needing the raw value must recompute it.
pub fn step(state: &PhysicalState, params: &ObjectParameters, dt: f64) -> PhysicalState {
    let area = params.cross_sectional_area();
    let force_of_gravity = params.mass * GRAVITY;
    let drag_force = 0.5 * AIR_DENSITY * state.velocity.powi(2) * params.drag_coefficient * area;
    let net_force = force_of_gravity - drag_force;
    let acceleration = net_force / params.mass;
    let velocity = state.velocity + acceleration * dt;
    let height = (state.height - velocity * dt).max(0.0);

    PhysicalState {
        time: state.time + dt,
        height,
        velocity,
        acceleration,
        force_of_gravity,
        drag_force,
    }
}

use crate::driver::simulation::RunState;
use crate::physics::integrator::PhysicalState;

pub struct FlightRecorder {
    pub log: Vec<String>,
    max_velocity: f64,
    max_acceleration: f64,
    max_drag_force: f64,
    landing_time: Option<f64>,
    state_times: Vec<(RunState, f64)>,
}

impl FlightRecorder {
    pub fn new() -> Self {
        FlightRecorder {
            log: Vec::new(),
            max_velocity: 0.0,
            max_acceleration: 0.0,
            max_drag_force: 0.0,
            landing_time: None,
            state_times: Vec::new(),
        }
    }

    fn format_time(elapsed_time: f64) -> String {
        if elapsed_time >= 60.0 {
            let minutes = (elapsed_time / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}m {:.2}s", minutes, seconds)
        } else {
            format!("{:.2}s", elapsed_time)
        }
    }

    pub fn collect_data(&mut self, state: &PhysicalState, run_state: RunState) {
        if state.velocity > self.max_velocity {
            self.max_velocity = state.velocity;
        }
        if state.acceleration > self.max_acceleration {
            self.max_acceleration = state.acceleration;
        }
        if state.drag_force > self.max_drag_force {
            self.max_drag_force = state.drag_force;
        }
        if run_state == RunState::Landed && self.landing_time.is_none() {
            self.landing_time = Some(state.time);
        }

        let data = format!(
            "Time: {}\n\
                 Height: {:.2} m\n\
                 Velocity: {:.2} m/s\n\
                 Acceleration: {:.2} m/s²\n\
                 Gravitational Force: {:.2} N\n\
                 Drag Force: {:.2} N\n",
            Self::format_time(state.time),
            state.height,
            state.velocity,
            state.acceleration,
            state.force_of_gravity,
            state.drag_force
        );
        self.log.push(data);

        // Track state transitions
        if let Some((last_state, _)) = self.state_times.last() {
            if *last_state != run_state {
                self.state_times.push((run_state, state.time));
            }
        } else {
            self.state_times.push((run_state, state.time));
        }
    }

    pub fn max_velocity(&self) -> f64 {
        self.max_velocity
    }

    pub fn landing_time(&self) -> Option<f64> {
        self.landing_time
    }

    pub fn display_summary(&self) {
        println!("--- Simulation Summary ---");
        println!("Max Velocity: {:.2} m/s", self.max_velocity);
        println!("Max Acceleration: {:.2} m/s²", self.max_acceleration);
        println!("Max Drag Force: {:.2} N", self.max_drag_force);
        match self.landing_time {
            Some(time) => println!("Landed at: {}", Self::format_time(time)),
            None => println!("Object did not reach the ground"),
        }

        println!("\n--- State Transitions ---");
        for (state, time) in &self.state_times {
            println!("State {:?} reached at: {}", state, Self::format_time(*time));
        }
    }
}

impl Default for FlightRecorder {
    fn default() -> Self {
        FlightRecorder::new()
    }
}

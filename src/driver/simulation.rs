use crate::constants::DEFAULT_ANIMATION_SPEED;
use crate::errors::SimulationError;
use crate::physics::integrator::{step, ObjectParameters, PhysicalState};
use crate::presets::ObjectPreset;
use crate::telemetry::history::{History, HistorySample};

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum RunState {
    Idle,
    Running,
    Landed,
}

// Stands in for the host's "run this callback before the next display
// refresh" handle. The driver stamps each token with its current epoch;
// pause/reset bump the epoch so a token that was already queued when the
// cancellation happened is rejected when it finally fires.
#[derive(Debug)]
#[must_use = "an unscheduled tick token stalls the simulation"]
pub struct TickToken {
    epoch: u64,
}

pub struct Simulation {
    params: ObjectParameters,
    start_height: f64,
    animation_speed: f64,
    state: PhysicalState,
    run_state: RunState,
    history: History,
    epoch: u64,
    last_tick: Option<f64>,
}

impl Simulation {
    pub fn new(params: ObjectParameters, start_height: f64) -> Result<Self, SimulationError> {
        if !(start_height > 0.0) {
            return Err(SimulationError::InvalidParameter(format!(
                "start height must be positive, got {} m",
                start_height
            )));
        }

        Ok(Simulation {
            params,
            start_height,
            animation_speed: DEFAULT_ANIMATION_SPEED,
            state: PhysicalState::at_rest(start_height),
            run_state: RunState::Idle,
            history: History::new(),
            epoch: 0,
            last_tick: None,
        })
    }

    pub fn from_preset(preset: &ObjectPreset, start_height: f64) -> Result<Self, SimulationError> {
        Simulation::new(ObjectParameters::from_preset(preset)?, start_height)
    }

    // Idle -> Running. The returned token must be delivered back through
    // `tick` by the host scheduler; the first delivery only establishes the
    // clock baseline so scheduling latency never turns into a giant dt.
    pub fn start(&mut self) -> Option<TickToken> {
        if self.run_state != RunState::Idle {
            return None;
        }

        self.run_state = RunState::Running;
        self.last_tick = None;
        Some(TickToken { epoch: self.epoch })
    }

    pub fn pause(&mut self) {
        if self.run_state == RunState::Running {
            self.cancel_pending_tick();
            self.run_state = RunState::Idle;
        }
    }

    pub fn reset(&mut self) {
        // Cancellation must precede the state reset so an in-flight tick can
        // never commit against the fresh state.
        self.cancel_pending_tick();
        self.run_state = RunState::Idle;
        self.state = PhysicalState::at_rest(self.start_height);
        self.history.reset();
    }

    // Invalidates any outstanding token. Idempotent: cancelling with nothing
    // scheduled is a no-op apart from the epoch bump.
    fn cancel_pending_tick(&mut self) {
        self.epoch += 1;
        self.last_tick = None;
    }

    pub fn tick(&mut self, token: TickToken, now_seconds: f64) -> Option<TickToken> {
        if token.epoch != self.epoch || self.run_state != RunState::Running {
            return None;
        }

        let last = match self.last_tick {
            Some(last) => last,
            None => {
                self.last_tick = Some(now_seconds);
                return Some(TickToken { epoch: self.epoch });
            }
        };

        if self.state.is_grounded() {
            self.run_state = RunState::Landed;
            return None;
        }

        let dt = (now_seconds - last).max(0.0) * self.animation_speed;
        self.state = step(&self.state, &self.params, dt);
        self.history.push(HistorySample {
            time: self.state.time,
            velocity: self.state.velocity,
        });
        self.last_tick = Some(now_seconds);

        if self.state.is_grounded() {
            self.run_state = RunState::Landed;
            None
        } else {
            Some(TickToken { epoch: self.epoch })
        }
    }

    pub fn set_animation_speed(&mut self, factor: f64) -> Result<(), SimulationError> {
        if !(factor > 0.0) {
            return Err(SimulationError::InvalidParameter(format!(
                "animation speed must be positive, got {}",
                factor
            )));
        }
        self.animation_speed = factor;
        Ok(())
    }

    pub fn set_object_parameters(
        &mut self,
        mass: f64,
        diameter: f64,
        drag_coefficient: f64,
    ) -> Result<(), SimulationError> {
        if self.run_state == RunState::Running {
            return Err(SimulationError::ParametersLocked);
        }
        self.params = ObjectParameters::new(mass, diameter, drag_coefficient)?;
        self.reset();
        Ok(())
    }

    pub fn apply_preset(&mut self, preset: &ObjectPreset) -> Result<(), SimulationError> {
        self.set_object_parameters(preset.mass, preset.diameter, preset.drag_coefficient)
    }

    pub fn set_start_height(&mut self, height: f64) -> Result<(), SimulationError> {
        if self.run_state == RunState::Running {
            return Err(SimulationError::ParametersLocked);
        }
        if !(height > 0.0) {
            return Err(SimulationError::InvalidParameter(format!(
                "start height must be positive, got {} m",
                height
            )));
        }
        self.start_height = height;
        self.reset();
        Ok(())
    }

    pub fn state(&self) -> &PhysicalState {
        &self.state
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn object_parameters(&self) -> &ObjectParameters {
        &self.params
    }

    pub fn start_height(&self) -> f64 {
        self.start_height
    }

    pub fn animation_speed(&self) -> f64 {
        self.animation_speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::default_preset;
    use approx::assert_relative_eq;

    fn create_test_simulation(start_height: f64) -> Simulation {
        Simulation::from_preset(default_preset(), start_height).unwrap()
    }

    fn assert_reset_state(sim: &Simulation, start_height: f64) {
        assert_eq!(sim.run_state(), RunState::Idle);
        assert_eq!(*sim.state(), PhysicalState::at_rest(start_height));
        assert_eq!(sim.history().len(), 1);
        assert_eq!(
            *sim.history().last().unwrap(),
            HistorySample {
                time: 0.0,
                velocity: 0.0
            }
        );
    }

    #[test]
    fn test_initial_state() {
        let sim = create_test_simulation(169.0);
        assert_reset_state(&sim, 169.0);
        assert_eq!(sim.animation_speed(), 1.0);
    }

    #[test]
    fn test_rejects_non_positive_start_height() {
        assert!(Simulation::from_preset(default_preset(), 0.0).is_err());
        assert!(Simulation::from_preset(default_preset(), -5.0).is_err());
    }

    #[test]
    fn test_first_tick_only_establishes_baseline() {
        let mut sim = create_test_simulation(169.0);
        let token = sim.start().expect("start from Idle should issue a token");
        assert_eq!(sim.run_state(), RunState::Running);

        // Scheduling latency of half a second must not advance the state
        let token = sim.tick(token, 0.5).expect("baseline tick should reschedule");
        assert_eq!(sim.state().time, 0.0);
        assert_eq!(sim.state().velocity, 0.0);
        assert_eq!(sim.state().height, 169.0);

        // The next tick advances by the delta since the baseline only
        let _ = sim.tick(token, 0.6).expect("second tick should reschedule");
        assert_relative_eq!(sim.state().time, 0.1, epsilon = 1e-12);
        assert!(sim.state().velocity > 0.0);
        assert!(sim.state().height < 169.0);
    }

    #[test]
    fn test_tick_appends_history() {
        let mut sim = create_test_simulation(169.0);
        let token = sim.start().unwrap();
        let token = sim.tick(token, 0.0).unwrap();
        let _ = sim.tick(token, 0.1).unwrap();

        assert_eq!(sim.history().len(), 2);
        let last = *sim.history().last().unwrap();
        assert_eq!(last.time, sim.state().time);
        assert_eq!(last.velocity, sim.state().velocity);
    }

    #[test]
    fn test_animation_speed_scales_dt() {
        let mut sim = create_test_simulation(169.0);
        sim.set_animation_speed(5.0).unwrap();

        let token = sim.start().unwrap();
        let token = sim.tick(token, 0.0).unwrap();
        let _ = sim.tick(token, 0.1).unwrap();

        // 0.1 s of wall clock at 5x yields 0.5 s of simulated time
        assert_relative_eq!(sim.state().time, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_speed_may_change_while_running() {
        let mut sim = create_test_simulation(169.0);
        let token = sim.start().unwrap();
        let token = sim.tick(token, 0.0).unwrap();

        sim.set_animation_speed(2.0).unwrap();
        let _ = sim.tick(token, 0.1).unwrap();
        assert_relative_eq!(sim.state().time, 0.2, epsilon = 1e-12);

        assert!(sim.set_animation_speed(0.0).is_err());
        assert!(sim.set_animation_speed(-1.0).is_err());
    }

    #[test]
    fn test_pause_freezes_state_and_cancels_token() {
        let mut sim = create_test_simulation(169.0);
        let token = sim.start().unwrap();
        let token = sim.tick(token, 0.0).unwrap();
        let token = sim.tick(token, 0.1).unwrap();
        let frozen = *sim.state();

        sim.pause();
        assert_eq!(sim.run_state(), RunState::Idle);

        // The already-queued token fires after the pause: must be a no-op
        assert!(sim.tick(token, 0.2).is_none());
        assert_eq!(*sim.state(), frozen);
    }

    #[test]
    fn test_resume_re_establishes_clock_baseline() {
        let mut sim = create_test_simulation(169.0);
        let token = sim.start().unwrap();
        let token = sim.tick(token, 0.0).unwrap();
        let _ = sim.tick(token, 0.1).unwrap();
        sim.pause();
        let frozen = *sim.state();

        // Resume much later; the gap must not be integrated
        let token = sim.start().unwrap();
        let token = sim.tick(token, 100.0).unwrap();
        assert_eq!(*sim.state(), frozen);

        let _ = sim.tick(token, 100.1).unwrap();
        assert_relative_eq!(sim.state().time, frozen.time + 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_reset_after_start_leaves_stale_token_inert() {
        let mut sim = create_test_simulation(169.0);
        let token = sim.start().unwrap();

        // Reset lands before the scheduled tick ever fires
        sim.reset();
        assert!(sim.tick(token, 0.016).is_none());
        assert_reset_state(&sim, 169.0);
    }

    #[test]
    fn test_reset_mid_run_restores_initial_state() {
        let mut sim = create_test_simulation(169.0);
        let token = sim.start().unwrap();
        let token = sim.tick(token, 0.0).unwrap();
        let token = sim.tick(token, 0.5).unwrap();
        assert!(sim.state().time > 0.0);

        sim.reset();
        assert_reset_state(&sim, 169.0);

        // The token issued before the reset is stale
        assert!(sim.tick(token, 0.6).is_none());
        assert_reset_state(&sim, 169.0);
    }

    #[test]
    fn test_landing_transition_stops_scheduling() {
        let mut sim = create_test_simulation(1.0);
        sim.set_animation_speed(50.0).unwrap();

        let mut pending = sim.start();
        let mut now = 0.0;
        let mut ticks = 0;
        while let Some(token) = pending.take() {
            pending = sim.tick(token, now);
            now += 0.1;
            ticks += 1;
            assert!(ticks < 1000, "Simulation failed to land");
        }

        assert_eq!(sim.run_state(), RunState::Landed);
        assert_eq!(sim.state().height, 0.0);
        assert!(sim.state().velocity > 0.0);
        // Accumulated history survives the landing until the next reset
        assert!(sim.history().len() > 1);
    }

    #[test]
    fn test_start_from_landed_is_rejected_until_reset() {
        let mut sim = create_test_simulation(1.0);
        sim.set_animation_speed(50.0).unwrap();

        let mut pending = sim.start();
        let mut now = 0.0;
        while let Some(token) = pending.take() {
            pending = sim.tick(token, now);
            now += 0.1;
        }
        assert_eq!(sim.run_state(), RunState::Landed);

        assert!(sim.start().is_none());
        sim.reset();
        assert!(sim.start().is_some());
    }

    #[test]
    fn test_object_parameters_locked_while_running() {
        let mut sim = create_test_simulation(169.0);
        let _token = sim.start().unwrap();

        assert!(matches!(
            sim.set_object_parameters(1.0, 0.1, 0.5),
            Err(SimulationError::ParametersLocked)
        ));
        assert!(matches!(
            sim.set_start_height(50.0),
            Err(SimulationError::ParametersLocked)
        ));
    }

    #[test]
    fn test_parameter_change_forces_full_reset() {
        let mut sim = create_test_simulation(169.0);
        let token = sim.start().unwrap();
        let token = sim.tick(token, 0.0).unwrap();
        let _ = sim.tick(token, 0.5).unwrap();
        sim.pause();
        assert!(sim.state().time > 0.0);

        sim.set_object_parameters(7.2, 0.21, 0.4).unwrap();
        assert_reset_state(&sim, 169.0);
        assert_eq!(sim.object_parameters().mass(), 7.2);
    }

    #[test]
    fn test_start_height_change_forces_full_reset() {
        let mut sim = create_test_simulation(169.0);
        let token = sim.start().unwrap();
        let token = sim.tick(token, 0.0).unwrap();
        let _ = sim.tick(token, 0.5).unwrap();
        sim.pause();

        sim.set_start_height(400.0).unwrap();
        assert_reset_state(&sim, 400.0);

        assert!(sim.set_start_height(0.0).is_err());
    }

    #[test]
    fn test_backwards_host_clock_is_clamped() {
        let mut sim = create_test_simulation(169.0);
        let token = sim.start().unwrap();
        let token = sim.tick(token, 1.0).unwrap();
        let token = sim.tick(token, 1.1).unwrap();
        let advanced = *sim.state();

        // A non-monotonic timestamp must not rewind time or height
        let _ = sim.tick(token, 0.9).unwrap();
        assert_eq!(sim.state().time, advanced.time);
        assert_eq!(sim.state().height, advanced.height);
    }
}

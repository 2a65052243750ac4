use freefall_simulation::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let preset = default_preset();
    println!(
        "Dropping {} (mass {:.2} kg, diameter {:.2} m, Cd {:.2}) from {:.0} m",
        preset.name, preset.mass, preset.diameter, preset.drag_coefficient, DEFAULT_START_HEIGHT
    );

    let mut simulation = Simulation::from_preset(preset, DEFAULT_START_HEIGHT)?;
    let mut recorder = FlightRecorder::new();

    let mut pending = simulation.start();
    let mut now = 0.0;

    // Drive the tick loop with synthetic frame timestamps in place of the
    // host's display-refresh callback.
    while let Some(token) = pending.take() {
        pending = simulation.tick(token, now);
        recorder.collect_data(simulation.state(), simulation.run_state());
        now += FRAME_INTERVAL;

        if simulation.state().time >= MAX_SIMULATION_TIME {
            println!("Simulation time limit reached. Ending simulation.");
            break;
        }
    }

    if simulation.run_state() == RunState::Landed {
        println!(
            "Object landed after {:.2} s at {:.2} m/s (terminal velocity {:.2} m/s)",
            simulation.state().time,
            simulation.state().velocity,
            simulation.object_parameters().terminal_velocity()
        );
    }

    println!("History samples collected: {}", simulation.history().len());
    recorder.display_summary();

    Ok(())
}

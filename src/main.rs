//! Rock Drift entry point
//!
//! Headless demo driver: runs the simulation with a simple autopilot in
//! place of the interactive input collaborator, logging session events.
//! A graphical frontend would consume [`rock_drift::sim::render_frame`]
//! and draw the returned handles instead of discarding them.
//!
//! Usage: `rock-drift [seed] [special-weapon]` where the special weapon is
//! a weapon identifier ("plasma" or "deathblossom").

use std::str::FromStr;

use rock_drift::consts::TICK_RATE_HZ;
use rock_drift::sim::{DistanceTarget, GameState, TickInput, WeaponKind, render_frame, tick};
use rock_drift::{GameError, Tuning};

/// Demo length in ticks (one minute of play)
const DEMO_TICKS: u64 = 60 * TICK_RATE_HZ as u64;

fn main() -> Result<(), GameError> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0xD81F7);
    let special = match args.next() {
        Some(name) => WeaponKind::from_str(&name)?,
        None => WeaponKind::Deathblossom,
    };

    let mut state = GameState::from_tuning(seed, Tuning::default())?;
    log::info!(
        "demo run: seed {seed}, {} asteroids, world {}x{}",
        state.asteroids.len(),
        state.tuning.world_width,
        state.tuning.world_height
    );

    let dt = 1.0 / TICK_RATE_HZ;
    for frame in 0..DEMO_TICKS {
        let now = frame as f64 * dt;
        let input = autopilot_input(frame, &state, special);
        tick(&mut state, &input, now);
        let drawn = render_frame(&mut state, now);

        if frame.is_multiple_of(TICK_RATE_HZ as u64 * 10) {
            log::info!(
                "t={now:.1}s level {} score {} lives {} drawables {}",
                state.session.level,
                state.session.score,
                state.session.lives,
                drawn.len()
            );
        }
    }

    println!(
        "final: level {} score {} high score {}",
        state.session.level, state.session.score, state.session.high_score
    );
    Ok(())
}

/// Scripted stand-in for the input collaborator: sweep the heading, thrust
/// in bursts, fire on a steady cadence, restart when the run ends.
fn autopilot_input(frame: u64, state: &GameState, special: WeaponKind) -> TickInput {
    let mut input = TickInput::default();

    input.rotate_left = frame.is_multiple_of(3);
    input.thrust = frame % 90 < 20;
    input.fire_plasma = frame.is_multiple_of(7);

    // Pop the special weapon when rocks crowd in
    if frame.is_multiple_of(45) {
        let crowded = state
            .asteroids
            .iter()
            .any(|rock| rock.distance_to(DistanceTarget::Body(&state.ship.body)) < 150.0);
        if crowded {
            match special {
                WeaponKind::Plasma => input.fire_plasma = true,
                WeaponKind::Deathblossom => input.fire_deathblossom = true,
            }
        }
    }

    input.restart = state.session.game_over;
    input
}

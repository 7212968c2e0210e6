//! Per-tick simulation update
//!
//! One call to [`tick`] advances the whole world by a frame: entity motion,
//! hit resolution, fragmentation, dead-object retirement, respawn and level
//! progression, camera re-centering. Ordering inside the tick matters:
//! fragments spawn before cleanup, and the camera reads the ship's
//! post-update position.
//!
//! The driver supplies `now` in seconds; every timer in the core is a plain
//! comparison against it.

use glam::Vec2;

use super::body::{DistanceTarget, Drawable};
use super::ship::WeaponKind;
use super::state::GameState;
use crate::consts::{SHIP_THRUST_DELTA, SHIP_TURN_RATE_DEG};

/// Input digest for a single tick
///
/// Rotation and thrust are continuous key states; the fire and restart
/// flags are edge-triggered key-down events.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
    pub fire_plasma: bool,
    pub fire_deathblossom: bool,
    pub restart: bool,
}

/// Advance the game state by one tick.
pub fn tick(state: &mut GameState, input: &TickInput, now: f64) {
    if state.session.game_over {
        if input.restart {
            state.restart();
        }
        return;
    }

    handle_input(state, input, now);

    // Asteroid advance and hit resolution. Fragment spawns are deferred so
    // they land in the same tick, before dead-object cleanup.
    let mut fragments: Vec<(Vec2, u8)> = Vec::new();

    for rock in state.asteroids.iter_mut() {
        rock.update();

        // Plasma hits resolve in roster insertion order; the first bolt to
        // connect claims the rock and later bolts pass through.
        for bolt in state.projectiles.iter_mut() {
            if bolt.body.is_collision(&rock.body) {
                state.session.score += state.tuning.score_per_asteroid;
                rock.body.alive = false;
                bolt.body.alive = false;
                fragments.push((rock.body.pos, rock.size()));
                break;
            }
        }

        // Deathblossom deals continuous damage while active. Area kills
        // vaporize the rock outright; only plasma hits fragment it.
        if rock.body.alive
            && state.ship.blossom.active
            && rock.distance_to(DistanceTarget::Body(&state.ship.body))
                <= state.ship.blossom.radius + rock.half_min_extent()
        {
            state.session.score += state.tuning.score_per_asteroid;
            rock.body.alive = false;
        }

        // Ramming the ship kills the ship, not the rock.
        if rock.body.is_collision(&state.ship.body) {
            if let Err(err) = state.ship.explode() {
                log::error!("ship explosion failed: {err}");
            }
            state.session.respawn_at = now + state.tuning.respawn_delay_secs;
            log::info!("ship destroyed at level {}", state.session.level);
        }
    }

    for (origin, size) in fragments {
        state.spawn_fragments(origin, size);
    }

    for bolt in state.projectiles.iter_mut() {
        bolt.update(now);
    }

    // Retire the dead; their fragments are already in the field.
    state.asteroids.retain(|rock| rock.body.alive);
    state.projectiles.retain(|bolt| bolt.body.alive);

    // The camera follows the ship's post-update position for as long as
    // there is something to watch (including the death animation).
    state.ship.update();
    if state.ship.body.alive || !state.ship.body.anim.complete {
        let pos = state.ship.body.pos;
        if let Some(cam) = state.viewport.camera.as_mut() {
            cam.update(state.camera_mode, pos.x, pos.y);
        }
    } else if state.session.lives > 0 {
        if now > state.session.respawn_at {
            state.respawn_ship();
            state.session.lives -= 1;
            log::info!("ship respawned, {} lives remaining", state.session.lives);
        }
    } else if !state.session.game_over {
        state.session.game_over = true;
        if state.session.record_high_score() {
            log::info!("new high score: {}", state.session.high_score);
        }
        log::info!("game over, final score {}", state.session.score);
    }

    // An empty field starts the level-clear delay; the reward lands on
    // entry, the bigger field after the delay.
    if state.asteroids.is_empty() {
        if !state.session.level_clear_pending {
            state.session.level += 1;
            if state.session.lives < state.tuning.max_lives {
                state.session.lives += 1;
            }
            state.session.level_clear_pending = true;
            state.session.next_level_at = now + state.tuning.levelup_delay_secs;
            log::info!("level {} cleared", state.session.level - 1);
        } else if now > state.session.next_level_at {
            let count = state.tuning.asteroid_count_for_level(state.session.level);
            state.spawn_asteroids(count);
            state.session.level_clear_pending = false;
            log::info!("level {} started with {} asteroids", state.session.level, count);
        }
    }
}

fn handle_input(state: &mut GameState, input: &TickInput, now: f64) {
    if input.rotate_left && !input.rotate_right {
        state.ship.body.rotate(SHIP_TURN_RATE_DEG);
    } else if input.rotate_right && !input.rotate_left {
        state.ship.body.rotate(-SHIP_TURN_RATE_DEG);
    }
    if input.thrust {
        state.ship.thrust(SHIP_THRUST_DELTA);
    }
    if input.fire_plasma
        && let Err(err) = state.fire_weapon(WeaponKind::Plasma, now)
    {
        log::error!("plasma fire failed: {err}");
    }
    if input.fire_deathblossom
        && let Err(err) = state.fire_weapon(WeaponKind::Deathblossom, now)
    {
        log::error!("deathblossom fire failed: {err}");
    }
}

/// A drawable plus the screen position to draw it at
#[derive(Debug, Clone, Copy)]
pub struct RenderItem {
    pub drawable: Drawable,
    pub screen_x: f32,
    pub screen_y: f32,
}

/// Collect render handles from surviving entities, projected through the
/// camera, in draw order: asteroids, then bolts, then the ship on top.
pub fn render_frame(state: &mut GameState, now: f64) -> Vec<RenderItem> {
    let mut items = Vec::new();

    for rock in state.asteroids.iter_mut() {
        if let Some(drawable) = rock.body.render(now) {
            let (screen_x, screen_y) = state.viewport.project(rock.body.pos.x, rock.body.pos.y);
            items.push(RenderItem {
                drawable,
                screen_x,
                screen_y,
            });
        }
    }

    for bolt in state.projectiles.iter_mut() {
        if let Some(drawable) = bolt.body.render(now) {
            let (screen_x, screen_y) = state.viewport.project(bolt.body.pos.x, bolt.body.pos.y);
            items.push(RenderItem {
                drawable,
                screen_x,
                screen_y,
            });
        }
    }

    if let Some(drawable) = state.ship.render(now) {
        let pos = state.ship.body.pos;
        let (screen_x, screen_y) = state.viewport.project(pos.x, pos.y);
        items.push(RenderItem {
            drawable,
            screen_x,
            screen_y,
        });
    }

    items
}

//! Per-frame simulation step
//!
//! Advances the round by a variable `dt`: clock, spawn ramp, farmer movement,
//! spawning, crop collection and win/lose checks.

use std::collections::HashSet;

use super::collision::overlaps;
use super::state::{GameEvent, GamePhase, GameState};
use crate::clamp;

/// Advance the game state by `dt` seconds using the currently held keys.
///
/// Does nothing unless the phase is [`GamePhase::Playing`].
pub fn tick(state: &mut GameState, keys: &HashSet<String>, dt: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }

    // Round clock
    state.time_left = clamp(state.time_left - dt, 0.0, state.tuning.game_len);
    if state.time_left <= 0.0 {
        let outcome = if state.score >= state.goal {
            GamePhase::Win
        } else {
            GamePhase::GameOver
        };
        log::info!("Time up with {} / {} points: {:?}", state.score, state.goal, outcome);
        state.set_phase(outcome);
        state.events.push(GameEvent::ScoreChanged(state.score));
        state.events.push(GameEvent::TimeChanged(state.time_left));
        return;
    }

    // Spawns speed up as the round goes on
    state.spawn_every = state.tuning.spawn_interval(state.time_left);

    let field = state.tuning.field_size();
    state.farmer.handle_input(keys);
    state.farmer.update(dt, field);

    state.accum_spawn += dt;
    // A non-positive interval would never drain the accumulator
    while state.spawn_every > 0.0 && state.accum_spawn >= state.spawn_every {
        state.accum_spawn -= state.spawn_every;
        state.spawn_crop();
    }

    collect_crops(state);

    state.crops.retain(|c| !c.dead);
    for crop in &mut state.crops {
        crop.update(dt);
    }

    state.events.push(GameEvent::TimeChanged(state.time_left));
}

/// Mark every crop under the farmer as collected and bank its points
fn collect_crops(state: &mut GameState) {
    let mut count = 0;
    let mut points = 0;
    for crop in state.crops.iter_mut().filter(|c| !c.dead) {
        if overlaps(&state.farmer, &*crop) {
            crop.dead = true;
            count += 1;
            points += crop.points();
        }
    }
    if count == 0 {
        return;
    }

    state.score += points;
    log::debug!("Collected {} crop(s) for {} points, score {}", count, points, state.score);
    state.events.push(GameEvent::CropsCollected { count, points });
    state.events.push(GameEvent::ScoreChanged(state.score));

    if state.score >= state.goal {
        log::info!("Goal of {} reached with {:.1}s left", state.goal, state.time_left);
        state.set_phase(GamePhase::Win);
    }
}

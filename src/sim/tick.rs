//! Fixed timestep simulation tick
//!
//! One call advances the whole arena by `dt`. The outcome is checked first,
//! then the player is moved and collided against each obstacle category in
//! turn, then the air gauge drains.

use super::state::{GameEvent, GameState, LossCause, Outcome};

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, dt: f32) {
    evaluate_outcome(state);
    state.time_ticks += 1;

    state
        .player
        .update(dt, &mut state.platforms, &mut state.pending);
    state.settle();
    state
        .player
        .update(dt, &mut state.ceilings, &mut state.pending);
    state.settle();
    state
        .player
        .update(dt, &mut state.right_walls, &mut state.pending);
    state.settle();
    state
        .player
        .update(dt, &mut state.left_walls, &mut state.pending);
    state.settle();
    state.player.update(dt, &mut state.food, &mut state.pending);
    state.settle();
    state
        .player
        .update(dt, &mut state.hazards, &mut state.pending);
    state.settle();

    if state.progress.belly_filled() {
        state.player.update(
            dt,
            std::slice::from_mut(&mut state.escape),
            &mut state.pending,
        );
        state.settle();
    }

    state.air.update(dt, &mut [], &mut state.pending);
    state.settle();
}

/// Check the win/lose predicates; escaping wins over losing when both hold
pub fn evaluate_outcome(state: &mut GameState) {
    if state.outcome().is_terminal() {
        return;
    }

    if state.player.escaped {
        state.finish(Outcome::Won, GameEvent::Won);
    } else if state.air.scale.x <= 0.0 {
        state.finish(
            Outcome::Lost,
            GameEvent::Lost {
                cause: LossCause::AirExhausted,
            },
        );
    } else if !state.player.active {
        state.finish(
            Outcome::Lost,
            GameEvent::Lost {
                cause: LossCause::Hazard,
            },
        );
    }
}

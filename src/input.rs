//! Key state to player intent mapping
//!
//! Raw keys are folded into a fixed set of logical actions once per frame,
//! then turned into acceleration and intent on the player. Once the run is
//! over the player no longer listens.

use glam::Vec3;

use crate::approach_zero;
use crate::consts::*;
use crate::sim::GameState;

/// Physical keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    Up,
    Left,
    Right,
    A,
    D,
    Q,
    Escape,
}

/// Logical actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ThrustUp,
    MoveLeft,
    MoveRight,
    Quit,
}

/// Map a key to the action it drives
pub fn action_for(key: Key) -> Action {
    match key {
        Key::Space | Key::Up => Action::ThrustUp,
        Key::Left | Key::A => Action::MoveLeft,
        Key::Right | Key::D => Action::MoveRight,
        Key::Q | Key::Escape => Action::Quit,
    }
}

/// Key-down state for each action, polled once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyState {
    pub thrust_up: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub quit: bool,
}

impl KeyState {
    /// Fold the keys currently held down into action state
    pub fn from_pressed(keys: &[Key]) -> Self {
        let mut state = Self::default();
        for key in keys {
            state.press(action_for(*key));
        }
        state
    }

    pub fn press(&mut self, action: Action) {
        match action {
            Action::ThrustUp => self.thrust_up = true,
            Action::MoveLeft => self.move_left = true,
            Action::MoveRight => self.move_right = true,
            Action::Quit => self.quit = true,
        }
    }

    pub fn is_down(&self, action: Action) -> bool {
        match action {
            Action::ThrustUp => self.thrust_up,
            Action::MoveLeft => self.move_left,
            Action::MoveRight => self.move_right,
            Action::Quit => self.quit,
        }
    }
}

/// Apply one frame of input to the player. Returns false when the player
/// asked to quit.
pub fn apply_input(state: &mut GameState, keys: &KeyState) -> bool {
    let player = &mut state.player;
    player.movement = Vec3::ZERO;

    if state.progress.outcome().is_terminal() {
        return !keys.quit;
    }

    if keys.thrust_up {
        player.thrust_up(ACC * THRUST_FACTOR);
    } else {
        // Sink under gravity when not swimming up
        player.acceleration.y = -ACC;
    }

    if keys.move_left {
        player.move_left(ACC * STEER_FACTOR);
    } else if keys.move_right {
        player.move_right(ACC * STEER_FACTOR);
    } else {
        player.acceleration.x = approach_zero(player.acceleration.x, ACC * STEER_FACTOR);
    }

    player.cap_acceleration(MAX_ACC);

    !keys.quit
}

/// Demo-mode driver: swims toward the nearest krill, then the way out
pub fn autopilot(state: &GameState) -> KeyState {
    let player = &state.player;
    let mut keys = KeyState::default();

    let target = state
        .food
        .iter()
        .filter(|f| f.active)
        .chain(std::iter::once(&state.escape).filter(|e| e.active))
        .map(|e| e.position)
        .min_by(|a, b| {
            a.distance_squared(player.position)
                .partial_cmp(&b.distance_squared(player.position))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let Some(target) = target else {
        return keys;
    };

    let dx = target.x - player.position.x;
    if dx < -0.05 {
        keys.move_left = true;
    } else if dx > 0.05 {
        keys.move_right = true;
    }

    // Stay clear of the fires on the seabed
    keys.thrust_up = target.y > player.position.y || player.position.y < -1.8;
    keys
}

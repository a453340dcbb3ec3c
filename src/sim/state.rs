//! Game state and core simulation types
//!
//! `GameState` owns every entity for the whole run and is the context every
//! subsystem (input, tick, render) is handed explicitly.

use glam::Vec3;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::entity::{Entity, EntityKind};
use crate::assets::Textures;
use crate::consts::*;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    Playing,
    Won,
    Lost,
}

impl Outcome {
    /// Won and Lost are final
    pub fn is_terminal(self) -> bool {
        self != Outcome::Playing
    }
}

/// Why a run was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossCause {
    AirExhausted,
    Hazard,
}

/// Something that happened during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A krill was eaten; `index` is its slot in `GameState::food`
    FoodConsumed { index: usize },
    /// Every krill is gone and the escape point is open
    BellyFilled,
    /// The player touched the fire at `index` in `GameState::hazards`
    HazardContact { index: usize },
    EscapeReached,
    Won,
    Lost { cause: LossCause },
}

/// Food count and outcome for the run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    food_eaten: u32,
    food_total: u32,
    belly_filled: bool,
    outcome: Outcome,
}

impl Progress {
    pub fn new(food_total: u32) -> Self {
        Self {
            food_eaten: 0,
            food_total,
            belly_filled: false,
            outcome: Outcome::Playing,
        }
    }

    pub fn food_eaten(&self) -> u32 {
        self.food_eaten
    }

    pub fn food_total(&self) -> u32 {
        self.food_total
    }

    /// Sticky once every krill has been eaten
    pub fn belly_filled(&self) -> bool {
        self.belly_filled
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Count one eaten krill. Returns true on the call that fills the belly.
    pub fn record_food(&mut self) -> bool {
        self.food_eaten = (self.food_eaten + 1).min(self.food_total);
        if !self.belly_filled && self.food_eaten == self.food_total {
            self.belly_filled = true;
            return true;
        }
        false
    }

    /// Leave `Playing` for good. Refused (returns false) once the run has
    /// already ended or when asked to "finish" back into `Playing`.
    pub fn finish(&mut self, outcome: Outcome) -> bool {
        if self.outcome.is_terminal() || !outcome.is_terminal() {
            log::warn!(
                "Ignoring outcome change {:?} -> {:?}",
                self.outcome,
                outcome
            );
            return false;
        }
        self.outcome = outcome;
        true
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the food layout was drawn from
    pub seed: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Entity,
    pub platforms: [Entity; PLATFORM_COUNT],
    pub ceilings: [Entity; CEILING_COUNT],
    pub left_walls: [Entity; LEFT_WALL_COUNT],
    pub right_walls: [Entity; RIGHT_WALL_COUNT],
    pub food: [Entity; FOOD_COUNT],
    pub hazards: [Entity; HAZARD_COUNT],
    pub background: Entity,
    pub midground: Entity,
    pub air: Entity,
    pub win_banner: Entity,
    pub lose_banner: Entity,
    pub escape: Entity,
    pub progress: Progress,
    /// Events raised by the current collision pass, not yet settled
    #[serde(skip)]
    pub(crate) pending: Vec<GameEvent>,
    /// Settled events waiting for `drain_events`
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameState {
    /// Build the arena, scattering food with the given seed
    pub fn new(seed: u64, textures: &Textures) -> Self {
        let platforms = std::array::from_fn(|i| {
            Entity::new(EntityKind::Platform, textures.floor)
                .with_position(i as f32 - PLATFORM_COUNT as f32 / 2.0, -3.5)
                .with_size(1.0, 0.8)
        });
        let ceilings = std::array::from_fn(|i| {
            Entity::new(EntityKind::Ceiling, textures.ceiling)
                .with_position(i as f32 - CEILING_COUNT as f32 / 1.8, 3.5)
                .with_size(1.0, 0.5)
        });
        let left_walls = std::array::from_fn(|i| {
            Entity::new(EntityKind::Wall, textures.left_wall)
                .with_position(-VIEW_HALF_WIDTH, i as f32 - LEFT_WALL_COUNT as f32 / 2.0)
                .with_size(0.1, 1.0)
                .with_scale(0.5, 1.5)
        });
        let right_walls = std::array::from_fn(|i| {
            Entity::new(EntityKind::Wall, textures.right_wall)
                .with_position(VIEW_HALF_WIDTH, i as f32 - RIGHT_WALL_COUNT as f32 / 2.0)
                .with_size(0.1, 1.0)
                .with_scale(0.5, 1.5)
        });
        let hazards = [
            Entity::new(EntityKind::Hazard, textures.fire)
                .with_position(2.0, -2.75)
                .with_size(0.7, 0.7),
            Entity::new(EntityKind::Hazard, textures.fire)
                .with_position(-2.0, -2.75)
                .with_size(0.7, 0.7),
        ];

        let mut rng = Pcg32::seed_from_u64(seed);
        let food = std::array::from_fn(|_| {
            let mut krill = Entity::new(EntityKind::Food, textures.food)
                .with_scale(0.15, 0.15)
                .with_size(0.25, 0.25);
            place_food(&mut krill, &hazards, &mut rng);
            krill
        });

        log::info!("New game (seed {seed}): {FOOD_COUNT} krill to find");

        Self {
            seed,
            time_ticks: 0,
            player: Entity::player(textures.whale),
            platforms,
            ceilings,
            left_walls,
            right_walls,
            food,
            hazards,
            background: Entity::new(EntityKind::Decoration, textures.background)
                .with_scale(10.0, 10.0),
            midground: Entity::new(EntityKind::Decoration, textures.midground)
                .with_scale(16.0, 7.5),
            air: Entity::air_gauge(textures.air),
            win_banner: Entity::new(EntityKind::Decoration, textures.win)
                .with_scale(2.0, 2.0)
                .inactive(),
            lose_banner: Entity::new(EntityKind::Decoration, textures.lose)
                .with_scale(2.0, 2.0)
                .inactive(),
            escape: Entity::new(EntityKind::EscapePoint, textures.escape)
                .with_scale(2.0, 2.0)
                .with_size(0.5, 0.5)
                .inactive(),
            progress: Progress::new(FOOD_COUNT as u32),
            pending: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn outcome(&self) -> Outcome {
        self.progress.outcome()
    }

    /// Apply events raised by the last collision pass
    ///
    /// Food is counted here, exactly once per `FoodConsumed`, and the escape
    /// point opens on the event that fills the belly.
    pub(crate) fn settle(&mut self) {
        for event in std::mem::take(&mut self.pending) {
            log::debug!("Tick {}: {:?}", self.time_ticks, event);
            self.events.push(event);

            if let GameEvent::FoodConsumed { .. } = event
                && self.progress.record_food()
            {
                log::info!("Belly filled, escape point open");
                self.escape.activate();
                self.events.push(GameEvent::BellyFilled);
            }
        }
    }

    /// End the run, freezing the player and hiding the air gauge.
    /// Only the first call has any effect.
    pub(crate) fn finish(&mut self, outcome: Outcome, event: GameEvent) {
        if !self.progress.finish(outcome) {
            return;
        }

        self.player.freeze();
        self.air.deactivate();
        match outcome {
            Outcome::Won => self.win_banner.activate(),
            Outcome::Lost => self.lose_banner.activate(),
            Outcome::Playing => {}
        }

        log::info!("Run over after {} ticks: {:?}", self.time_ticks, event);
        self.events.push(event);
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Drop `krill` somewhere in the spawn square, away from the fires
fn place_food(krill: &mut Entity, hazards: &[Entity], rng: &mut Pcg32) {
    let extent = FOOD_SPAWN_HALF_EXTENT;
    for _ in 0..FOOD_SPAWN_ATTEMPTS {
        krill.position = Vec3::new(
            rng.random_range(-extent..extent),
            rng.random_range(-extent..extent),
            0.0,
        );
        let spot = Aabb::of(krill);
        if !hazards.iter().any(|h| spot.overlaps(&Aabb::of(h))) {
            return;
        }
    }
    log::warn!("No hazard-free spot found for krill at {:?}", krill.position);
}

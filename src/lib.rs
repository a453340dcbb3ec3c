//! Water Swimmer - a small underwater arcade game
//!
//! Core modules:
//! - `sim`: Fixed-timestep simulation (entities, collisions, outcome)
//! - `input`: Key state to player intent mapping
//! - `renderer`: CPU-side sprite batching for the draw pass
//! - `assets`: Texture loading
//! - `settings`: Run options

pub mod assets;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use assets::{AssetError, TextureHandle, Textures};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (seconds)
    pub const SIM_DT: f32 = 0.016_666_6;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Visible arena, orthographic half extents
    pub const VIEW_HALF_WIDTH: f32 = 5.0;
    pub const VIEW_HALF_HEIGHT: f32 = 3.75;

    /// Entity counts per category
    pub const PLATFORM_COUNT: usize = 13;
    pub const CEILING_COUNT: usize = 13;
    pub const LEFT_WALL_COUNT: usize = 10;
    pub const RIGHT_WALL_COUNT: usize = 10;
    pub const FOOD_COUNT: usize = 7;
    pub const HAZARD_COUNT: usize = 2;

    /// Base acceleration unit; gravity pulls down with exactly this much.
    ///
    /// The player is integrated once per obstacle category each step, so
    /// the effective rates are several times what these numbers read as.
    pub const ACC: f32 = 0.3;
    /// Cap on the length of the player's acceleration vector
    pub const MAX_ACC: f32 = 0.6;
    /// Share of `ACC` added per frame while thrusting up
    pub const THRUST_FACTOR: f32 = 0.02;
    /// Share of `ACC` applied per frame while steering (and when easing off)
    pub const STEER_FACTOR: f32 = 0.2;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 0.45;
    pub const PLAYER_MAX_SPEED: f32 = 0.6;
    pub const PLAYER_JUMP_POWER: f32 = 3.0;
    /// Fraction of velocity shed per second of water resistance
    pub const WATER_DRAG: f32 = 0.15;

    /// Air gauge scale lost per second (full gauge is 1.0)
    pub const AIR_DRAIN_PER_SECOND: f32 = 1.0 / 45.0;

    /// Seconds each animation frame stays on screen
    pub const ANIMATION_FRAME_SECONDS: f32 = 0.5;

    /// Food spawns inside this half extent, on both axes
    pub const FOOD_SPAWN_HALF_EXTENT: f32 = 2.5;
    /// Attempts at finding a hazard-free spot before giving up
    pub const FOOD_SPAWN_ATTEMPTS: u32 = 32;
}

/// Move `value` toward zero by `amount` without crossing it
#[inline]
pub fn approach_zero(value: f32, amount: f32) -> f32 {
    if value > 0.0 {
        (value - amount).max(0.0)
    } else if value < 0.0 {
        (value + amount).min(0.0)
    } else {
        0.0
    }
}

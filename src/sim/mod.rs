//! Fixed-timestep simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, input or platform dependencies

pub mod clock;
pub mod collision;
pub mod entity;
pub mod state;
pub mod tick;

pub use clock::{FixedClock, FrameSteps};
pub use collision::{Aabb, push_out, resolve};
pub use entity::{Animation, Entity, EntityKind, Facing};
pub use state::{GameEvent, GameState, LossCause, Outcome, Progress};
pub use tick::{evaluate_outcome, tick};

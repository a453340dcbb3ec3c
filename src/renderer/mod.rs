//! Presentation layer
//!
//! The draw pass is read-only: it walks the game state in painter's order
//! and hands each active entity to a `Renderer`.

pub mod batch;
pub mod vertex;

pub use batch::{DrawCall, SpriteBatch};
pub use vertex::Vertex;

use crate::sim::{Entity, GameState};

/// Something that can draw a single entity as a textured quad
pub trait Renderer {
    fn render(&mut self, entity: &Entity);
}

/// Draw the whole scene, back to front. Inactive entities are skipped.
pub fn render_scene<R: Renderer + ?Sized>(state: &GameState, renderer: &mut R) {
    let mut draw = |entity: &Entity| {
        if entity.active {
            renderer.render(entity);
        }
    };

    draw(&state.background);
    draw(&state.midground);
    draw(&state.player);
    state.right_walls.iter().for_each(&mut draw);
    state.left_walls.iter().for_each(&mut draw);
    state.platforms.iter().for_each(&mut draw);
    state.ceilings.iter().for_each(&mut draw);
    state.hazards.iter().for_each(&mut draw);
    draw(&state.air);
    state.food.iter().for_each(&mut draw);
    draw(&state.escape);
    draw(&state.win_banner);
    draw(&state.lose_banner);
}

//! The single simulated object type
//!
//! Every player, obstacle, pickup and HUD element is an `Entity`; the
//! behavioural variant is picked by its `EntityKind` tag.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::collision;
use super::state::GameEvent;
use crate::assets::TextureHandle;
use crate::consts::*;

/// Behavioural category of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    /// Solid floor tile
    Platform,
    /// Solid ceiling tile
    Ceiling,
    /// Solid arena side
    Wall,
    /// Krill, eaten on contact
    Food,
    /// Fire, fatal on contact
    Hazard,
    /// Air gauge, drains over time
    Resource,
    /// Way out, opens once every krill is eaten
    EscapePoint,
    /// Backgrounds and banners; never collides
    Decoration,
}

impl EntityKind {
    /// Solid categories push movers out instead of reacting to them
    pub fn is_solid(self) -> bool {
        matches!(
            self,
            EntityKind::Platform | EntityKind::Ceiling | EntityKind::Wall
        )
    }
}

/// Which sprite row an animation plays from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Sprite-sheet animation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Animation {
    /// Atlas indices played while facing left
    pub left: Vec<u32>,
    /// Atlas indices played while facing right
    pub right: Vec<u32>,
    pub cols: u32,
    pub rows: u32,
    /// Position within the active index set
    pub frame: usize,
    pub timer: f32,
    pub facing: Facing,
}

impl Animation {
    /// Sheet laid out as one row per direction, left row first
    pub fn rows(cols: u32) -> Self {
        Self {
            left: (0..cols).collect(),
            right: (cols..cols * 2).collect(),
            cols,
            rows: 2,
            frame: 0,
            timer: 0.0,
            facing: Facing::default(),
        }
    }

    fn frames(&self) -> &[u32] {
        match self.facing {
            Facing::Left => &self.left,
            Facing::Right => &self.right,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames().len()
    }

    /// Atlas index of the frame on screen
    pub fn current_index(&self) -> u32 {
        let frames = self.frames();
        if frames.is_empty() {
            return 0;
        }
        frames[self.frame % frames.len()]
    }

    /// Advance the frame timer; the sign of `intent_x` picks the row
    pub fn advance(&mut self, dt: f32, intent_x: f32) {
        if intent_x < 0.0 {
            self.facing = Facing::Left;
        } else if intent_x > 0.0 {
            self.facing = Facing::Right;
        }

        let count = self.frame_count();
        if count <= 1 {
            return;
        }

        self.timer += dt;
        if self.timer >= ANIMATION_FRAME_SECONDS {
            self.timer -= ANIMATION_FRAME_SECONDS;
            self.frame = (self.frame + 1) % count;
        }
    }

    /// UV rectangle `(min, max)` of the current frame in the sheet
    pub fn atlas_cell(&self) -> (Vec2, Vec2) {
        let index = self.current_index();
        let cols = self.cols.max(1);
        let rows = self.rows.max(1);
        let size = Vec2::new(1.0 / cols as f32, 1.0 / rows as f32);
        let min = Vec2::new((index % cols) as f32, (index / cols) as f32) * size;
        (min, min + size)
    }
}

/// A simulated object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    pub position: Vec3,
    pub scale: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    /// Directional intent from input, applied instantly (not accumulated)
    pub movement: Vec3,
    /// Collision width before scaling
    pub width: f32,
    /// Collision height before scaling
    pub height: f32,
    pub texture: TextureHandle,
    /// Inactive entities neither collide nor render
    pub active: bool,
    pub animation: Option<Animation>,
    /// Horizontal distance per second per unit of intent
    pub speed: f32,
    /// Velocity magnitude cap, if this category has one
    pub max_speed: Option<f32>,
    /// Thrust multiplier for upward intent
    pub jump_power: f32,
    /// Fraction of velocity lost per second
    pub drag: f32,
    /// Set when the player reaches an open escape point
    pub escaped: bool,
}

impl Entity {
    /// A unit-sized, motionless, active entity
    pub fn new(kind: EntityKind, texture: TextureHandle) -> Self {
        Self {
            kind,
            position: Vec3::ZERO,
            scale: Vec3::ONE,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            movement: Vec3::ZERO,
            width: 1.0,
            height: 1.0,
            texture,
            active: true,
            animation: None,
            speed: 0.0,
            max_speed: None,
            jump_power: 0.0,
            drag: 0.0,
            escaped: false,
        }
    }

    /// The whale, sinking under gravity from the arena centre
    pub fn player(texture: TextureHandle) -> Self {
        Self {
            acceleration: Vec3::new(0.0, -ACC, 0.0),
            animation: Some(Animation::rows(10)),
            speed: PLAYER_SPEED,
            max_speed: Some(PLAYER_MAX_SPEED),
            jump_power: PLAYER_JUMP_POWER,
            drag: WATER_DRAG,
            ..Self::new(EntityKind::Player, texture)
        }
        .with_size(0.7, 0.7)
        .with_scale(0.625, 1.2)
    }

    /// Full air gauge in the top-left corner
    pub fn air_gauge(texture: TextureHandle) -> Self {
        Self::new(EntityKind::Resource, texture)
            .with_position(-4.4, 3.3)
            .with_scale(1.0, 0.2)
    }

    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.position = Vec3::new(x, y, 0.0);
        self
    }

    pub fn with_scale(mut self, x: f32, y: f32) -> Self {
        self.scale = Vec3::new(x, y, 1.0);
        self
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Half of the scaled collision box
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width * self.scale.x, self.height * self.scale.y) * 0.5
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Stop all motion and intent
    pub fn freeze(&mut self) {
        self.acceleration = Vec3::ZERO;
        self.velocity = Vec3::ZERO;
        self.movement = Vec3::ZERO;
    }

    /// Upward thrust, scaled by this entity's jump power
    pub fn thrust_up(&mut self, amount: f32) {
        self.movement.y = 1.0;
        self.acceleration.y += amount * self.jump_power;
    }

    pub fn move_left(&mut self, amount: f32) {
        self.movement.x = -1.0;
        self.acceleration.x -= amount;
    }

    pub fn move_right(&mut self, amount: f32) {
        self.movement.x = 1.0;
        self.acceleration.x += amount;
    }

    /// Rescale acceleration down to `max` if it is longer
    pub fn cap_acceleration(&mut self, max: f32) {
        self.acceleration = self.acceleration.clamp_length_max(max);
    }

    /// Advance one fixed step and resolve collisions against `peers`
    ///
    /// Inactive peers are skipped. Pickups and hazards report what happened
    /// through `events`; solid peers only move `self`.
    pub fn update(&mut self, dt: f32, peers: &mut [Entity], events: &mut Vec<GameEvent>) {
        if !self.active {
            return;
        }

        if let Some(animation) = &mut self.animation {
            animation.advance(dt, self.movement.x);
        }

        self.integrate(dt);

        for (index, peer) in peers.iter_mut().enumerate() {
            if !self.active {
                break;
            }
            if !peer.active {
                continue;
            }
            collision::resolve(self, peer, index, events);
        }
    }

    fn integrate(&mut self, dt: f32) {
        if self.kind == EntityKind::Resource {
            self.drain(dt);
            return;
        }

        self.velocity += self.acceleration * dt;
        if self.drag > 0.0 {
            self.velocity *= (1.0 - self.drag * dt).max(0.0);
        }
        if let Some(max_speed) = self.max_speed {
            self.velocity = self.velocity.clamp_length_max(max_speed);
        }

        self.position.y += self.velocity.y * dt;
        self.position.x += (self.velocity.x + self.movement.x * self.speed) * dt;
    }

    /// Shrink the gauge, keeping its left edge in place
    fn drain(&mut self, dt: f32) {
        let drained = (AIR_DRAIN_PER_SECOND * dt).min(self.scale.x.max(0.0));
        self.scale.x -= drained;
        self.position.x -= drained * self.width * 0.5;
    }
}

//! Axis-aligned collision detection and response
//!
//! Boxes never rotate, so overlap reduces to two independent 1D tests.
//! Response is dispatched on the mover's category first, then on the
//! obstacle's.

use glam::Vec2;

use super::entity::{Entity, EntityKind};
use super::state::GameEvent;

/// An axis-aligned box given by centre and half extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    /// Box of an entity's scaled collision size around its position
    pub fn of(entity: &Entity) -> Self {
        Self::new(entity.position.truncate(), entity.half_extents())
    }

    /// Penetration depth on each axis (positive means overlapping)
    #[inline]
    pub fn penetration(&self, other: &Aabb) -> Vec2 {
        (self.half_extents + other.half_extents) - (self.center - other.center).abs()
    }

    /// Boxes only collide when both axes penetrate
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let depth = self.penetration(other);
        depth.x > 0.0 && depth.y > 0.0
    }
}

/// Resolve one mover/obstacle pair; `index` is the obstacle's slot in its
/// collection and is only used for event reporting
pub fn resolve(
    mover: &mut Entity,
    obstacle: &mut Entity,
    index: usize,
    events: &mut Vec<GameEvent>,
) {
    let depth = Aabb::of(mover).penetration(&Aabb::of(obstacle));
    if depth.x <= 0.0 || depth.y <= 0.0 {
        return;
    }

    match mover.kind {
        EntityKind::Player => resolve_player(mover, obstacle, depth, index, events),
        EntityKind::Platform
        | EntityKind::Ceiling
        | EntityKind::Wall
        | EntityKind::Food
        | EntityKind::Hazard
        | EntityKind::Resource
        | EntityKind::EscapePoint
        | EntityKind::Decoration => {}
    }
}

fn resolve_player(
    player: &mut Entity,
    obstacle: &mut Entity,
    depth: Vec2,
    index: usize,
    events: &mut Vec<GameEvent>,
) {
    match obstacle.kind {
        kind if kind.is_solid() => push_out(player, obstacle, depth),
        EntityKind::Food => {
            obstacle.deactivate();
            events.push(GameEvent::FoodConsumed { index });
        }
        EntityKind::Hazard => {
            player.deactivate();
            events.push(GameEvent::HazardContact { index });
        }
        EntityKind::EscapePoint => {
            if !player.escaped {
                player.escaped = true;
                events.push(GameEvent::EscapeReached);
            }
        }
        // Other players, the gauge and decorations never react
        _ => {}
    }
}

/// Move `mover` out of a solid along the axis of least penetration, placing
/// it flush against the boundary and stopping it on that axis
pub fn push_out(mover: &mut Entity, solid: &Entity, depth: Vec2) {
    let reach = mover.half_extents() + solid.half_extents();

    if depth.x < depth.y {
        let side = if mover.position.x < solid.position.x { -1.0 } else { 1.0 };
        mover.position.x = solid.position.x + side * reach.x;
        mover.velocity.x = 0.0;
    } else {
        let side = if mover.position.y < solid.position.y { -1.0 } else { 1.0 };
        mover.position.y = solid.position.y + side * reach.y;
        mover.velocity.y = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::TextureHandle;
    use glam::Vec3;
    use proptest::prelude::*;

    const EPSILON: f32 = 1e-5;

    fn entity(kind: EntityKind) -> Entity {
        Entity::new(kind, TextureHandle::default())
    }

    fn player_at(x: f32, y: f32) -> Entity {
        Entity::player(TextureHandle::default()).with_position(x, y)
    }

    #[test]
    fn test_penetration_per_axis() {
        let a = Aabb::new(Vec2::ZERO, Vec2::splat(1.0));
        let b = Aabb::new(Vec2::new(1.5, 0.5), Vec2::splat(1.0));
        let depth = a.penetration(&b);
        assert!((depth.x - 0.5).abs() < EPSILON);
        assert!((depth.y - 1.5).abs() < EPSILON);
        assert!(a.overlaps(&b));
    }

    #[test]
    fn test_single_axis_overlap_is_not_a_collision() {
        let a = Aabb::new(Vec2::ZERO, Vec2::splat(1.0));
        let b = Aabb::new(Vec2::new(0.5, 3.0), Vec2::splat(1.0));
        assert!(!a.overlaps(&b));

        // Touching edges do not count either
        let c = Aabb::new(Vec2::new(2.0, 0.0), Vec2::splat(1.0));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_player_lands_on_platform() {
        let platform = entity(EntityKind::Platform)
            .with_position(0.0, -3.5)
            .with_size(1.0, 0.8);
        let mut player = player_at(0.1, -2.8);
        player.velocity = Vec3::new(0.2, -0.5, 0.0);

        let mut events = Vec::new();
        resolve(&mut player, &mut platform.clone(), 0, &mut events);

        let top = platform.position.y + platform.half_extents().y;
        let bottom = player.position.y - player.half_extents().y;
        assert!((top - bottom).abs() < EPSILON);
        assert_eq!(player.velocity.y, 0.0);
        assert_eq!(player.velocity.x, 0.2);
        assert!(events.is_empty());
    }

    #[test]
    fn test_player_enclosed_by_platform_resolves_vertically() {
        // Wide, short slab around the player: Y is the shallow axis
        let platform = entity(EntityKind::Platform)
            .with_position(0.0, 0.0)
            .with_size(10.0, 1.0);
        let mut player = player_at(0.0, 0.05);
        player.velocity = Vec3::new(0.3, -0.4, 0.0);

        resolve(&mut player, &mut platform.clone(), 0, &mut Vec::new());

        let depth = Aabb::of(&player).penetration(&Aabb::of(&platform));
        assert!(depth.y.abs() < EPSILON);
        assert_eq!(player.velocity.y, 0.0);
        assert_eq!(player.velocity.x, 0.3);
        assert!(player.position.y > 0.0);
    }

    #[test]
    fn test_player_pushed_off_wall_horizontally() {
        let wall = entity(EntityKind::Wall)
            .with_position(5.0, 0.0)
            .with_size(0.1, 1.0)
            .with_scale(0.5, 1.5);
        let mut player = player_at(4.8, 0.0);
        player.velocity = Vec3::new(0.5, 0.1, 0.0);

        resolve(&mut player, &mut wall.clone(), 0, &mut Vec::new());

        let right = player.position.x + player.half_extents().x;
        let wall_left = wall.position.x - wall.half_extents().x;
        assert!((right - wall_left).abs() < EPSILON);
        assert_eq!(player.velocity.x, 0.0);
        assert_eq!(player.velocity.y, 0.1);
    }

    #[test]
    fn test_ceiling_pushes_down() {
        let ceiling = entity(EntityKind::Ceiling)
            .with_position(0.0, 3.5)
            .with_size(1.0, 0.5);
        let mut player = player_at(0.0, 3.0);
        player.velocity = Vec3::new(0.0, 0.4, 0.0);

        resolve(&mut player, &mut ceiling.clone(), 0, &mut Vec::new());

        assert!(player.position.y < 3.0);
        assert_eq!(player.velocity.y, 0.0);
    }

    #[test]
    fn test_food_is_eaten_once() {
        let mut player = player_at(0.0, 0.0);
        let mut food = vec![entity(EntityKind::Food).with_scale(0.3, 0.3)];
        player.acceleration = Vec3::ZERO;

        let mut events = Vec::new();
        player.update(0.0, &mut food, &mut events);
        player.update(0.0, &mut food, &mut events);
        player.update(0.0, &mut food, &mut events);

        assert!(!food[0].active);
        assert_eq!(events, vec![GameEvent::FoodConsumed { index: 0 }]);
        assert_eq!(player.position, Vec3::ZERO);
    }

    #[test]
    fn test_hazard_deactivates_player() {
        let mut player = player_at(2.0, -2.75);
        let mut fire = vec![
            entity(EntityKind::Hazard).with_position(-2.0, -2.75),
            entity(EntityKind::Hazard).with_position(2.0, -2.75),
        ];

        let mut events = Vec::new();
        player.update(0.0, &mut fire, &mut events);

        assert!(!player.active);
        assert!(fire.iter().all(|f| f.active));
        assert_eq!(events, vec![GameEvent::HazardContact { index: 1 }]);
    }

    #[test]
    fn test_escape_sets_flag_once() {
        let mut player = player_at(0.0, 0.0);
        let mut escape = vec![
            entity(EntityKind::EscapePoint)
                .with_size(0.5, 0.5)
                .with_scale(2.0, 2.0),
        ];

        let mut events = Vec::new();
        player.update(0.0, &mut escape, &mut events);
        player.update(0.0, &mut escape, &mut events);

        assert!(player.escaped);
        assert!(escape[0].active);
        assert_eq!(events, vec![GameEvent::EscapeReached]);
    }

    #[test]
    fn test_hazard_stops_the_rest_of_the_pass() {
        let mut player = player_at(0.0, 0.0);
        let mut peers = vec![
            entity(EntityKind::Hazard),
            entity(EntityKind::Food).with_scale(0.3, 0.3),
        ];

        let mut events = Vec::new();
        player.update(0.0, &mut peers, &mut events);

        assert!(!player.active);
        assert!(peers[1].active);
        assert_eq!(events, vec![GameEvent::HazardContact { index: 0 }]);
    }

    #[test]
    fn test_only_solids_push_out() {
        for kind in [EntityKind::Platform, EntityKind::Ceiling, EntityKind::Wall] {
            let mut player = player_at(0.0, 0.3);
            resolve(&mut player, &mut entity(kind), 0, &mut Vec::new());
            assert!(player.position.y > 0.3, "{kind:?} should push the player out");
        }

        for kind in [EntityKind::Decoration, EntityKind::Resource, EntityKind::Player] {
            let mut player = player_at(0.0, 0.3);
            let mut events = Vec::new();
            resolve(&mut player, &mut entity(kind), 0, &mut events);
            assert_eq!(player.position.y, 0.3);
            assert!(events.is_empty());
        }
    }

    #[test]
    fn test_inactive_peers_are_ignored() {
        let mut player = player_at(0.0, 0.0);
        let mut peers = vec![entity(EntityKind::Hazard).inactive()];

        let mut events = Vec::new();
        player.update(0.0, &mut peers, &mut events);

        assert!(player.active);
        assert!(events.is_empty());
    }

    #[test]
    fn test_non_player_movers_ignore_obstacles() {
        let mut food = entity(EntityKind::Food);
        let mut fire = entity(EntityKind::Hazard);
        let mut events = Vec::new();
        resolve(&mut food, &mut fire, 0, &mut events);
        assert!(food.active && fire.active);
        assert!(events.is_empty());
    }

    proptest! {
        #[test]
        fn prop_push_out_leaves_no_overlap(
            px in -0.6f32..0.6,
            py in -0.6f32..0.6,
            vx in -1.0f32..1.0,
            vy in -1.0f32..1.0,
        ) {
            let platform = entity(EntityKind::Platform).with_size(1.0, 0.8);
            let mut player = player_at(px, py);
            player.velocity = Vec3::new(vx, vy, 0.0);

            let before = Aabb::of(&player).penetration(&Aabb::of(&platform));
            prop_assume!(before.x > 0.0 && before.y > 0.0);

            resolve(&mut player, &mut platform.clone(), 0, &mut Vec::new());

            let after = Aabb::of(&player).penetration(&Aabb::of(&platform));
            if before.x < before.y {
                prop_assert!(after.x <= EPSILON);
                prop_assert_eq!(player.velocity.x, 0.0);
                prop_assert_eq!(player.velocity.y, vy);
            } else {
                prop_assert!(after.y <= EPSILON);
                prop_assert_eq!(player.velocity.y, 0.0);
                prop_assert_eq!(player.velocity.x, vx);
            }
        }
    }
}

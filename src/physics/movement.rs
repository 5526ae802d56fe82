//! Horizontal Movement
//!
//! Turns a desired XY move into an accepted position. Two gates run in
//! order: the terrain gate (leading footprint corners must land on walkable
//! cells no higher than the mover's feet) and the entity resolver, which
//! tries the full diagonal move, then an X-only slide, then a Y-only slide
//! before rejecting.

use glam::Vec3;

use crate::actor::{ActorId, ActorSet};
use crate::physics::bounds::{BoundingVolume, Footprint, volumes_collide};
use crate::world::heightmap::Heightmap;

/// Result of entity-collision resolution for one attempted move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveOutcome {
    /// Accepted X; either the requested value or the mover's exact old X.
    pub x: f32,
    /// Accepted Y; either the requested value or the mover's exact old Y.
    pub y: f32,
    /// The obstacle from the last collision test executed: `None` whenever
    /// any step accepted, the blocker only when all three were rejected.
    /// Callers drive a "blocked by entity" reaction off this, never off a
    /// successful slide.
    pub blocked_by: Option<ActorId>,
}

/// First solid, visible actor colliding with `mover` placed at `(x, y)`.
///
/// The mover itself and the entity it is carrying are never obstacles.
fn obstacle_at(actors: &ActorSet, mover: ActorId, x: f32, y: f32, margin: f32) -> Option<ActorId> {
    let m = actors.get(mover);
    let probe = BoundingVolume {
        pos: Vec3::new(x, y, m.pos.z),
        size: m.size,
        height: m.height,
    };
    for (id, other) in actors.iter() {
        if id == mover || m.grabbed == Some(id) {
            continue;
        }
        if !other.solid || !other.visible {
            continue;
        }
        if volumes_collide(&probe, &other.volume(), margin) {
            return Some(id);
        }
    }
    None
}

/// Resolves a desired move against the other actors: direct move, slide-X,
/// slide-Y, reject.
///
/// When a slide accepts, the untouched axis keeps the mover's old
/// coordinate bit-for-bit.
pub fn resolve_move(
    actors: &ActorSet,
    mover: ActorId,
    new_x: f32,
    new_y: f32,
    margin: f32,
) -> MoveOutcome {
    let old = actors.get(mover).pos;

    if obstacle_at(actors, mover, new_x, new_y, margin).is_none() {
        return MoveOutcome { x: new_x, y: new_y, blocked_by: None };
    }
    if obstacle_at(actors, mover, new_x, old.y, margin).is_none() {
        return MoveOutcome { x: new_x, y: old.y, blocked_by: None };
    }
    let blocked_by = obstacle_at(actors, mover, old.x, new_y, margin);
    if blocked_by.is_none() {
        return MoveOutcome { x: old.x, y: new_y, blocked_by: None };
    }
    MoveOutcome { x: old.x, y: old.y, blocked_by }
}

/// Terrain gate for one axis move: every leading footprint corner of the
/// moved position must land on a walkable cell whose height does not
/// exceed the mover's foot Z.
///
/// Cells outside the grid are the blocked sentinel, so walking off the map
/// is rejected here too.
pub fn terrain_allows_move(
    map: &Heightmap,
    moved_footprint: &Footprint,
    foot_z: f32,
    dx: f32,
    dy: f32,
) -> bool {
    let [left, bottom, right, top] = moved_footprint.corners();
    // Two corners on the leading edge of the move; a pure axis move checks
    // exactly the pair the move pushes forward.
    let leading: [(f32, f32); 2] = if dx < 0.0 {
        [top, left]
    } else if dx > 0.0 {
        [right, bottom]
    } else if dy < 0.0 {
        [top, right]
    } else {
        [left, bottom]
    };

    leading.iter().all(|&(cx, cy)| {
        let cell = map.cell_or_blocked(cx.floor() as i32, cy.floor() as i32);
        cell.is_walkable() && (cell.height as f32) <= foot_z
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::Actor;

    const MARGIN: f32 = 0.125;

    fn hero_at(x: f32, y: f32) -> ActorSet {
        let hero = Actor::new(Vec3::new(x, y, 0.0), 1.0, 2.0, MARGIN).unwrap();
        ActorSet::with_hero(hero)
    }

    fn block_at(set: &mut ActorSet, x: f32, y: f32) -> ActorId {
        set.spawn(Actor::new(Vec3::new(x, y, 0.0), 1.0, 1.0, MARGIN).unwrap())
    }

    #[test]
    fn test_clear_diagonal_accepts() {
        let actors = hero_at(5.0, 5.0);
        let out = resolve_move(&actors, actors.hero_id(), 6.0, 6.0, MARGIN);
        assert_eq!((out.x, out.y), (6.0, 6.0));
        assert_eq!(out.blocked_by, None);
    }

    #[test]
    fn test_blocked_diagonal_slides_along_x() {
        let mut actors = hero_at(5.0, 5.0);
        block_at(&mut actors, 6.0, 6.0);
        let out = resolve_move(&actors, actors.hero_id(), 6.0, 6.0, MARGIN);
        assert_eq!(out.x, 6.0);
        // Slide invariant: Y is the old value bit-for-bit
        assert_eq!(out.y.to_bits(), 5.0f32.to_bits());
        assert_eq!(out.blocked_by, None);
    }

    #[test]
    fn test_blocked_x_slides_along_y() {
        let mut actors = hero_at(5.0, 5.0);
        block_at(&mut actors, 6.0, 6.0);
        block_at(&mut actors, 6.0, 5.0);
        let out = resolve_move(&actors, actors.hero_id(), 6.0, 6.0, MARGIN);
        assert_eq!(out.x.to_bits(), 5.0f32.to_bits());
        assert_eq!(out.y, 6.0);
        assert_eq!(out.blocked_by, None);
    }

    #[test]
    fn test_fully_blocked_reports_last_obstacle() {
        let mut actors = hero_at(5.0, 5.0);
        block_at(&mut actors, 6.0, 6.0);
        block_at(&mut actors, 6.0, 5.0);
        let y_blocker = block_at(&mut actors, 5.0, 6.0);
        let out = resolve_move(&actors, actors.hero_id(), 6.0, 6.0, MARGIN);
        assert_eq!((out.x, out.y), (5.0, 5.0));
        assert_eq!(out.blocked_by, Some(y_blocker));
    }

    #[test]
    fn test_grabbed_entity_is_not_an_obstacle() {
        let mut actors = hero_at(5.0, 5.0);
        let crate_id = block_at(&mut actors, 6.0, 5.0);
        actors.hero_mut().grabbed = Some(crate_id);
        let out = resolve_move(&actors, actors.hero_id(), 6.0, 5.0, MARGIN);
        assert_eq!((out.x, out.y), (6.0, 5.0));
    }

    #[test]
    fn test_invisible_and_nonsolid_do_not_block() {
        let mut actors = hero_at(5.0, 5.0);
        let ghost = block_at(&mut actors, 6.0, 5.0);
        actors.get_mut(ghost).visible = false;
        let decor = block_at(&mut actors, 6.0, 5.0);
        actors.get_mut(decor).solid = false;
        let out = resolve_move(&actors, actors.hero_id(), 6.0, 5.0, MARGIN);
        assert_eq!((out.x, out.y), (6.0, 5.0));
    }

    #[test]
    fn test_terrain_gate_blocks_high_ground() {
        // 2x1 map: flat cell then a 2-high cell
        let map = Heightmap::from_hex_rows(2, 1, 0, 0, "00,02").unwrap();
        let fp = Footprint::of(Vec3::new(1.0, 0.0, 0.0), 1.0, MARGIN);
        assert!(!terrain_allows_move(&map, &fp, 0.0, 1.0, 0.0));
        // Standing at that height already: allowed
        assert!(terrain_allows_move(&map, &fp, 2.0, 1.0, 0.0));
    }

    #[test]
    fn test_terrain_gate_blocks_map_edge() {
        let map = Heightmap::from_hex_rows(2, 2, 0, 0, "00,00\n00,00").unwrap();
        let fp = Footprint::of(Vec3::new(-1.0, 0.0, 0.0), 1.0, MARGIN);
        assert!(!terrain_allows_move(&map, &fp, 0.0, -1.0, 0.0));
    }
}

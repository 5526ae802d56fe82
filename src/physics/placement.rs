//! Placement Validation
//!
//! Checks for the pickup/drop interaction: whether a carried entity can be
//! set down at a candidate spot, which entity the hero is facing, and the
//! one-tile-ahead drop position. The checks short-circuit in a fixed
//! order so rejections are cheap and deterministic.

use glam::Vec3;
use tracing::debug;

use crate::actor::{ActorId, ActorSet};
use crate::config::PhysicsConfig;
use crate::physics::bounds::{BoundingVolume, Footprint, volumes_collide};
use crate::world::heightmap::Heightmap;

/// Side of the probe square used to find the entity the hero faces.
const PROBE_SIZE: f32 = 0.8;

/// Whether `placing` may be set down with its foot at `candidate`.
///
/// Four checks in order: the target tile exists, it is walkable, its
/// height is within the step threshold of the placer's feet, and the
/// placed volume collides with no other solid actor.
pub fn can_place(
    actors: &ActorSet,
    map: &Heightmap,
    config: &PhysicsConfig,
    placing: ActorId,
    placer_z: f32,
    candidate: Vec3,
) -> bool {
    let tile_x = candidate.x.floor() as i32;
    let tile_y = candidate.y.floor() as i32;

    let Some(cell) = map.cell(tile_x, tile_y) else {
        debug!(tile_x, tile_y, "placement rejected: outside the room");
        return false;
    };
    if !cell.is_walkable() {
        debug!(tile_x, tile_y, grade = cell.grade, "placement rejected: cell not walkable");
        return false;
    }
    if cell.height as f32 - placer_z > config.step_threshold {
        debug!(
            tile_x,
            tile_y,
            cell_height = cell.height,
            "placement rejected: ledge too high"
        );
        return false;
    }

    let subject = actors.get(placing);
    let volume = BoundingVolume {
        pos: candidate,
        size: subject.size,
        height: subject.height,
    };
    for (id, other) in actors.iter() {
        if id == placing || !other.solid || !other.visible {
            continue;
        }
        if volumes_collide(&volume, &other.volume(), config.margin) {
            debug!(obstacle = id.0, "placement rejected: spot occupied");
            return false;
        }
    }
    true
}

/// The position one tile ahead of an actor, by its facing.
pub fn position_in_front(actors: &ActorSet, id: ActorId) -> (f32, f32) {
    let actor = actors.get(id);
    let (dx, dy) = actor.facing.offset();
    (actor.pos.x + dx, actor.pos.y + dy)
}

/// First solid, visible actor overlapping a probe square one tile ahead
/// of `id`, at the same height band. The probe is what pickup targets.
pub fn entity_in_front(actors: &ActorSet, id: ActorId, config: &PhysicsConfig) -> Option<ActorId> {
    let subject = actors.get(id);
    let (px, py) = position_in_front(actors, id);
    let inset = (1.0 - PROBE_SIZE) / 2.0;
    let probe = Footprint {
        x: px + inset,
        y: py + inset,
        w: PROBE_SIZE,
        h: PROBE_SIZE,
    };

    for (other_id, other) in actors.iter() {
        if other_id == id || subject.grabbed == Some(other_id) {
            continue;
        }
        if !other.solid || !other.visible {
            continue;
        }
        if !probe.overlaps(&other.footprint(config.margin)) {
            continue;
        }
        // Same strict vertical overlap the collision predicate uses
        if subject.pos.z < other.top() && subject.top() > other.pos.z {
            return Some(other_id);
        }
    }
    None
}

/// Attempts to grab the portable entity the actor faces. Returns the
/// grabbed id on success.
pub fn try_grab(actors: &mut ActorSet, id: ActorId, config: &PhysicsConfig) -> Option<ActorId> {
    if actors.get(id).grabbed.is_some() {
        return None;
    }
    let target = entity_in_front(actors, id, config)?;
    if !actors.get(target).portable {
        debug!(target = target.0, "grab rejected: entity not portable");
        return None;
    }
    actors.get_mut(id).grabbed = Some(target);
    debug!(holder = id.0, target = target.0, "entity grabbed");
    Some(target)
}

/// Attempts to set the grabbed entity down one tile ahead, resting on the
/// terrain there. Returns the released id on success; on failure the
/// entity stays grabbed.
pub fn try_place_grabbed(
    actors: &mut ActorSet,
    id: ActorId,
    map: &Heightmap,
    config: &PhysicsConfig,
) -> Option<ActorId> {
    let grabbed = actors.get(id).grabbed?;
    let (px, py) = position_in_front(actors, id);
    let ground = map.height_at_clamped(px.floor() as i32, py.floor() as i32);
    let candidate = Vec3::new(px, py, ground);

    if !can_place(actors, map, config, grabbed, actors.get(id).pos.z, candidate) {
        return None;
    }

    {
        let placed = actors.get_mut(grabbed);
        placed.pos = candidate;
        placed.grounded = true;
    }
    actors.get_mut(id).grabbed = None;
    debug!(holder = id.0, placed = grabbed.0, "entity placed");
    Some(grabbed)
}

//! Vertical Integration
//!
//! Per-frame gravity: sample the terrain under an actor's footprint
//! corners, find the highest solid actor top beneath its feet, and either
//! fall by the gravity step or snap exactly onto the support surface.
//! Standing on another actor is reported so the behavior layer can react
//! (a raft drifting, a pressure plate, and so on).

use crate::actor::{ActorId, ActorSet};
use crate::config::PhysicsConfig;
use crate::physics::bounds::Footprint;
use crate::world::heightmap::Heightmap;

/// The surface directly beneath an actor's footprint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupportSurface {
    /// Z of the surface in tile units.
    pub height: f32,
    /// The actor providing the surface, or `None` when terrain is highest.
    pub entity: Option<ActorId>,
}

/// Terrain support: maximum cell height under the four footprint corners,
/// with corner tile indices clamped to the grid.
pub fn terrain_support(map: &Heightmap, footprint: &Footprint) -> f32 {
    footprint
        .corners()
        .iter()
        .map(|&(cx, cy)| map.height_at_clamped(cx.floor() as i32, cy.floor() as i32))
        .fold(0.0, f32::max)
}

/// Highest solid, visible actor top at or below `foot_z` (plus the standing
/// tolerance) whose footprint overlaps `footprint`.
///
/// `exclude` is the falling actor; its grabbed entity is skipped too.
pub fn entity_support(
    actors: &ActorSet,
    exclude: ActorId,
    footprint: &Footprint,
    foot_z: f32,
    config: &PhysicsConfig,
) -> Option<(f32, ActorId)> {
    let grabbed = actors.get(exclude).grabbed;
    let mut best: Option<(f32, ActorId)> = None;

    for (id, other) in actors.iter() {
        if id == exclude || grabbed == Some(id) {
            continue;
        }
        if !other.solid || !other.visible {
            continue;
        }
        if !footprint.overlaps(&other.footprint(config.margin)) {
            continue;
        }
        let top = other.top();
        // At most one minor unit above the foot counts as "below"
        if top <= foot_z + config.standing_tolerance {
            match best {
                Some((highest, _)) if top <= highest => {}
                _ => best = Some((top, id)),
            }
        }
    }
    best
}

/// The actor `id` is standing on, if any: the highest overlapping solid,
/// visible actor whose top is within the standing tolerance of the foot.
pub fn standing_on(actors: &ActorSet, id: ActorId, config: &PhysicsConfig) -> Option<ActorId> {
    let actor = actors.get(id);
    let footprint = actor.footprint(config.margin);
    let mut best: Option<(f32, ActorId)> = None;

    for (other_id, other) in actors.iter() {
        if other_id == id || actor.grabbed == Some(other_id) {
            continue;
        }
        if !other.solid || !other.visible {
            continue;
        }
        if !footprint.overlaps(&other.footprint(config.margin)) {
            continue;
        }
        let top = other.top();
        if (actor.pos.z - top).abs() <= config.standing_tolerance {
            match best {
                Some((highest, _)) if top <= highest => {}
                _ => best = Some((top, other_id)),
            }
        }
    }
    best.map(|(_, other_id)| other_id)
}

/// Combined support surface beneath an actor: terrain and entity tops.
pub fn support_surface(
    actors: &ActorSet,
    map: &Heightmap,
    id: ActorId,
    config: &PhysicsConfig,
) -> SupportSurface {
    let actor = actors.get(id);
    let footprint = actor.footprint(config.margin);
    let terrain = terrain_support(map, &footprint);

    match entity_support(actors, id, &footprint, actor.pos.z, config) {
        Some((top, entity_id)) if top >= terrain => SupportSurface {
            height: top,
            entity: Some(entity_id),
        },
        Some((top, _)) => SupportSurface {
            height: terrain.max(top),
            entity: None,
        },
        None => SupportSurface {
            height: terrain,
            entity: None,
        },
    }
}

/// Integrates gravity for one actor and returns the entity it is standing
/// on, if any, for the behavior-layer notification.
///
/// Skips actors without gravity and actors mid-jump. An actor above its
/// support surface falls by the gravity step, snapping exactly onto the
/// surface when the step would cross it; an actor at or below the surface
/// snaps up onto it. `grounded` is updated either way.
pub fn integrate_actor(
    actors: &mut ActorSet,
    map: &Heightmap,
    id: ActorId,
    config: &PhysicsConfig,
) -> Option<ActorId> {
    {
        let actor = actors.get(id);
        if !actor.gravity || actor.jump.active {
            return None;
        }
    }

    let support = support_surface(actors, map, id, config);

    let actor = actors.get_mut(id);
    if actor.pos.z > support.height {
        let new_z = actor.pos.z - config.gravity_step;
        if new_z <= support.height {
            actor.pos.z = support.height;
            actor.grounded = true;
        } else {
            actor.pos.z = new_z;
            actor.grounded = false;
        }
    } else {
        actor.pos.z = support.height;
        actor.grounded = true;
    }

    // Standing is tested at the settled position so a landing frame
    // reports its support.
    standing_on(actors, id, config)
}

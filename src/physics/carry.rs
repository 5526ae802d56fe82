//! Carry Propagation
//!
//! Actors standing on a moving actor inherit its horizontal motion. One
//! carrier can ride another, so the pass repeats until no actor moves;
//! each pass applies only the shortfall between the carrier's frame delta
//! and what the rider has already received, which makes the loop a fixed
//! point bounded by the number of actors.
//!
//! This is the last physics stage of a frame: it also re-seats grabbed
//! entities above their carrier and commits every actor's previous-frame
//! position.

use glam::Vec3;

use crate::actor::{ActorId, ActorSet};
use crate::config::PhysicsConfig;
use crate::physics::gravity::standing_on;

/// Propagates carrier motion to riders, re-seats grabbed entities, and
/// closes the frame by committing previous positions.
pub fn propagate_carries(actors: &mut ActorSet, config: &PhysicsConfig) {
    let count = actors.len();
    // Horizontal delta already handed to each rider this frame
    let mut applied: Vec<Vec3> = vec![Vec3::ZERO; count];

    // A chain of N stacked actors settles in at most N passes
    for _ in 0..count {
        let mut moved = false;

        for i in 0..count {
            let id = ActorId(i);
            if actors.is_carried(id) {
                continue;
            }
            let Some(carrier) = standing_on(actors, id, config) else {
                continue;
            };
            let delta = actors.get(carrier).delta();
            let shortfall = Vec3::new(delta.x - applied[i].x, delta.y - applied[i].y, 0.0);
            if shortfall.x == 0.0 && shortfall.y == 0.0 {
                continue;
            }
            let rider = actors.get_mut(id);
            rider.pos.x += shortfall.x;
            rider.pos.y += shortfall.y;
            applied[i] += shortfall;
            moved = true;
        }

        if !moved {
            break;
        }
    }

    reseat_grabbed(actors);
    actors.commit_frame();
}

/// Pins every grabbed entity above its carrier's head.
fn reseat_grabbed(actors: &mut ActorSet) {
    let count = actors.len();
    for i in 0..count {
        let holder = actors.get(ActorId(i));
        let Some(grabbed) = holder.grabbed else {
            continue;
        };
        let seat = Vec3::new(holder.pos.x, holder.pos.y, holder.top());
        let carried = actors.get_mut(grabbed);
        carried.pos = seat;
        carried.grounded = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::Actor;

    fn config() -> PhysicsConfig {
        PhysicsConfig::default()
    }

    fn actor(pos: Vec3, height: f32) -> Actor {
        Actor::new(pos, 1.0, height, config().margin).unwrap()
    }

    #[test]
    fn test_rider_follows_carrier_delta() {
        let cfg = config();
        let mut actors = ActorSet::with_hero(actor(Vec3::new(2.0, 2.0, 1.0), 2.0));
        let raft = actors.spawn(actor(Vec3::new(2.0, 2.0, 0.0), 1.0));

        // Raft drifted half a tile this frame
        actors.get_mut(raft).pos.x += 0.5;

        propagate_carries(&mut actors, &cfg);
        assert_eq!(actors.hero().pos.x, 2.5);
        assert_eq!(actors.hero().pos.y, 2.0);
    }

    #[test]
    fn test_propagation_is_idempotent_within_a_frame() {
        let cfg = config();
        let mut actors = ActorSet::with_hero(actor(Vec3::new(2.0, 2.0, 1.0), 2.0));
        let raft = actors.spawn(actor(Vec3::new(2.0, 2.0, 0.0), 1.0));
        actors.get_mut(raft).pos.x += 0.5;

        propagate_carries(&mut actors, &cfg);
        let after_first = actors.hero().pos;
        // Deltas were committed, so a second run moves nobody
        propagate_carries(&mut actors, &cfg);
        assert_eq!(actors.hero().pos, after_first);
    }

    #[test]
    fn test_stacked_riders_all_follow() {
        let cfg = config();
        // Raft at z 0..1, crate on it at 1..2, hero on the crate at 2..4
        let mut actors = ActorSet::with_hero(actor(Vec3::new(2.0, 2.0, 2.0), 2.0));
        let raft = actors.spawn(actor(Vec3::new(2.0, 2.0, 0.0), 1.0));
        let box_id = actors.spawn(actor(Vec3::new(2.0, 2.0, 1.0), 1.0));
        actors.get_mut(raft).pos.y += 0.25;

        propagate_carries(&mut actors, &cfg);
        assert_eq!(actors.get(box_id).pos.y, 2.25);
        assert_eq!(actors.hero().pos.y, 2.25);
    }

    #[test]
    fn test_stationary_carrier_moves_nobody() {
        let cfg = config();
        let mut actors = ActorSet::with_hero(actor(Vec3::new(2.0, 2.0, 1.0), 2.0));
        actors.spawn(actor(Vec3::new(2.0, 2.0, 0.0), 1.0));

        propagate_carries(&mut actors, &cfg);
        assert_eq!(actors.hero().pos, Vec3::new(2.0, 2.0, 1.0));
    }

    #[test]
    fn test_grabbed_entity_reseated_above_holder() {
        let cfg = config();
        let mut actors = ActorSet::with_hero(actor(Vec3::new(2.0, 2.0, 0.0), 2.0));
        let crate_id = actors.spawn(actor(Vec3::new(5.0, 5.0, 0.0), 1.0));
        actors.hero_mut().grabbed = Some(crate_id);

        propagate_carries(&mut actors, &cfg);
        let carried = actors.get(crate_id);
        assert_eq!(carried.pos, Vec3::new(2.0, 2.0, 2.0));
        assert!(!carried.grounded);
    }

    #[test]
    fn test_commit_runs_even_without_carriers() {
        let cfg = config();
        let mut actors = ActorSet::with_hero(actor(Vec3::new(2.0, 2.0, 0.0), 2.0));
        actors.hero_mut().pos.x = 3.0;

        propagate_carries(&mut actors, &cfg);
        assert_eq!(actors.hero().prev_pos, actors.hero().pos);
        assert_eq!(actors.hero().delta(), Vec3::ZERO);
    }
}

//! Actors
//!
//! Mutable per-entity simulation state: world position in tile units, the
//! footprint/height that define the bounding volume, collision flags, and
//! the previous-frame position the carry propagator works from.
//!
//! Actors live in a dense [`ActorSet`] indexed by [`ActorId`]; slot 0 is
//! always the hero. The set is never resized mid-frame by the core.

use std::fmt;

use glam::Vec3;

use crate::physics::bounds::{BoundingVolume, Footprint};

/// Index of an actor inside its [`ActorSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActorId(pub usize);

/// Cardinal facing on the isometric ground plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    /// Facing implied by a movement delta; the larger axis wins, zero
    /// movement keeps the current facing.
    pub fn from_delta(dx: f32, dy: f32) -> Option<Facing> {
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        Some(if dx.abs() > dy.abs() {
            if dx < 0.0 { Facing::Left } else { Facing::Right }
        } else if dy < 0.0 {
            Facing::Up
        } else {
            Facing::Down
        })
    }

    /// One-tile offset in this direction.
    pub fn offset(&self) -> (f32, f32) {
        match self {
            Facing::Up => (0.0, -1.0),
            Facing::Down => (0.0, 1.0),
            Facing::Left => (-1.0, 0.0),
            Facing::Right => (1.0, 0.0),
        }
    }
}

/// Jump ascent state. While `active`, gravity is suspended and the actor
/// rises by the configured jump step until `progress` reaches the maximum.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JumpState {
    pub active: bool,
    /// Height gained so far in tile units.
    pub progress: f32,
}

/// One simulated actor (the hero or any room entity).
#[derive(Debug, Clone)]
pub struct Actor {
    /// World position in tile units; Z is the foot height.
    pub pos: Vec3,
    /// Position at the start of this frame. Written exactly once per frame,
    /// by the carry propagator's commit step.
    pub prev_pos: Vec3,
    /// Square footprint side in tile units. Always > 2x the collision
    /// margin, enforced at construction.
    pub size: f32,
    /// Height in tile units, > 0.
    pub height: f32,
    /// Solid actors block movement and provide support surfaces.
    pub solid: bool,
    /// Invisible actors are skipped by every collision and support check.
    pub visible: bool,
    /// Whether the vertical integrator applies to this actor.
    pub gravity: bool,
    /// Whether pickup interaction may grab this actor.
    pub portable: bool,
    /// Set by the vertical integrator: resting on a support surface.
    pub grounded: bool,
    /// Entity this actor is carrying, excluded from its collision checks.
    pub grabbed: Option<ActorId>,
    pub jump: JumpState,
    pub facing: Facing,
}

impl Actor {
    /// Creates an actor at `pos` with a square footprint of side `size`
    /// and the given height.
    ///
    /// `margin` is the collision margin from the physics config; a size
    /// that the margin shrink would invert is a configuration error.
    pub fn new(pos: Vec3, size: f32, height: f32, margin: f32) -> Result<Self, ActorError> {
        if !(size > 2.0 * margin) {
            return Err(ActorError::DegenerateFootprint { size, margin });
        }
        if !(height > 0.0) {
            return Err(ActorError::NonPositiveHeight { height });
        }
        Ok(Self {
            pos,
            prev_pos: pos,
            size,
            height,
            solid: true,
            visible: true,
            gravity: true,
            portable: true,
            grounded: false,
            grabbed: None,
            jump: JumpState::default(),
            facing: Facing::default(),
        })
    }

    /// Bounding volume at the actor's current position.
    pub fn volume(&self) -> BoundingVolume {
        BoundingVolume {
            pos: self.pos,
            size: self.size,
            height: self.height,
        }
    }

    /// Margin-shrunk footprint at the actor's current position.
    pub fn footprint(&self, margin: f32) -> Footprint {
        Footprint::of(self.pos, self.size, margin)
    }

    /// Z of the top face, `pos.z + height`.
    pub fn top(&self) -> f32 {
        self.pos.z + self.height
    }

    /// Movement since the start of the frame. Valid for exactly one frame;
    /// zeroed by the commit step.
    pub fn delta(&self) -> Vec3 {
        self.pos - self.prev_pos
    }
}

/// Errors constructing an actor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActorError {
    /// `size <= 2 * margin`: the margin shrink would invert the footprint.
    DegenerateFootprint { size: f32, margin: f32 },
    /// Height must be positive.
    NonPositiveHeight { height: f32 },
}

impl fmt::Display for ActorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActorError::DegenerateFootprint { size, margin } => write!(
                f,
                "actor footprint size {size} inverts under collision margin {margin}"
            ),
            ActorError::NonPositiveHeight { height } => {
                write!(f, "actor height {height} must be positive")
            }
        }
    }
}

impl std::error::Error for ActorError {}

/// Dense actor storage for one room. Slot 0 is the hero.
#[derive(Debug, Clone)]
pub struct ActorSet {
    actors: Vec<Actor>,
}

impl ActorSet {
    /// Creates a set containing only the hero.
    pub fn with_hero(hero: Actor) -> Self {
        Self { actors: vec![hero] }
    }

    /// Adds a room entity and returns its id. Must not be called mid-frame.
    pub fn spawn(&mut self, actor: Actor) -> ActorId {
        self.actors.push(actor);
        ActorId(self.actors.len() - 1)
    }

    pub fn hero_id(&self) -> ActorId {
        ActorId(0)
    }

    pub fn hero(&self) -> &Actor {
        &self.actors[0]
    }

    pub fn hero_mut(&mut self) -> &mut Actor {
        &mut self.actors[0]
    }

    pub fn get(&self, id: ActorId) -> &Actor {
        &self.actors[id.0]
    }

    pub fn get_mut(&mut self, id: ActorId) -> &mut Actor {
        &mut self.actors[id.0]
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Iterates ids and actors in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (ActorId, &Actor)> {
        self.actors.iter().enumerate().map(|(i, a)| (ActorId(i), a))
    }

    /// True if some other actor is carrying `id`.
    pub fn is_carried(&self, id: ActorId) -> bool {
        self.actors.iter().any(|a| a.grabbed == Some(id))
    }

    /// Overwrites every actor's previous-frame position with its current
    /// position, closing the frame. The carry propagator is the only
    /// caller.
    pub(crate) fn commit_frame(&mut self) {
        for actor in &mut self.actors {
            actor.prev_pos = actor.pos;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARGIN: f32 = 0.125;

    #[test]
    fn test_degenerate_footprint_rejected() {
        let err = Actor::new(Vec3::ZERO, 0.25, 1.0, MARGIN).unwrap_err();
        assert!(matches!(err, ActorError::DegenerateFootprint { .. }));
        // Exactly 2x margin still inverts to a zero-width footprint
        assert!(Actor::new(Vec3::ZERO, 2.0 * MARGIN, 1.0, MARGIN).is_err());
        assert!(Actor::new(Vec3::ZERO, 1.0, 1.0, MARGIN).is_ok());
    }

    #[test]
    fn test_non_positive_height_rejected() {
        assert!(matches!(
            Actor::new(Vec3::ZERO, 1.0, 0.0, MARGIN),
            Err(ActorError::NonPositiveHeight { .. })
        ));
    }

    #[test]
    fn test_delta_tracks_prev_position() {
        let mut actor = Actor::new(Vec3::new(1.0, 2.0, 0.0), 1.0, 1.0, MARGIN).unwrap();
        assert_eq!(actor.delta(), Vec3::ZERO);
        actor.pos.x += 0.5;
        assert_eq!(actor.delta(), Vec3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn test_commit_frame_zeroes_every_delta() {
        let hero = Actor::new(Vec3::ZERO, 1.0, 2.0, MARGIN).unwrap();
        let mut set = ActorSet::with_hero(hero);
        let id = set.spawn(Actor::new(Vec3::new(3.0, 0.0, 0.0), 1.0, 1.0, MARGIN).unwrap());
        set.get_mut(id).pos.y += 1.0;
        set.hero_mut().pos.x += 1.0;
        set.commit_frame();
        assert_eq!(set.get(id).delta(), Vec3::ZERO);
        assert_eq!(set.hero().delta(), Vec3::ZERO);
    }

    #[test]
    fn test_facing_from_delta_prefers_larger_axis() {
        assert_eq!(Facing::from_delta(-1.0, 0.2), Some(Facing::Left));
        assert_eq!(Facing::from_delta(0.1, 0.5), Some(Facing::Down));
        assert_eq!(Facing::from_delta(0.0, -0.5), Some(Facing::Up));
        assert_eq!(Facing::from_delta(0.0, 0.0), None);
    }
}

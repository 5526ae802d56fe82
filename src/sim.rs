//! Frame Pipeline
//!
//! One simulation step in a fixed order: horizontal resolution from the
//! input intent (terrain gate, then entity sliding), jump ascent, gravity
//! for every actor, carry propagation with the previous-position commit,
//! and finally the warp and fall checks. Single-threaded, no I/O; each
//! stage only reads what earlier stages wrote.

use tracing::debug;

use crate::actor::{ActorId, ActorSet, Facing};
use crate::config::{ConfigError, PhysicsConfig};
use crate::physics::bounds::Footprint;
use crate::physics::carry::propagate_carries;
use crate::physics::gravity::integrate_actor;
use crate::physics::movement::{resolve_move, terrain_allows_move};
use crate::world::room::Room;
use crate::world::warp::{WarpEvent, WarpTracker};

/// Hero movement input for one frame, in axis units of full walk speed.
/// `walk(1.0, 0.0)` is one frame of walking along +X.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveIntent {
    pub move_x: f32,
    pub move_y: f32,
    pub jump: bool,
}

impl MoveIntent {
    /// Walking intent with no jump.
    pub fn walk(move_x: f32, move_y: f32) -> Self {
        Self { move_x, move_y, jump: false }
    }

    /// Jump press with no horizontal movement.
    pub fn jump() -> Self {
        Self { move_x: 0.0, move_y: 0.0, jump: true }
    }
}

/// What one frame reported back to the behavior layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameEvents {
    /// Entity that fully blocked the hero's move this frame.
    pub blocked_by: Option<ActorId>,
    /// `(actor, support)` pairs: actor came to rest standing on support.
    pub standing_on: Vec<(ActorId, ActorId)>,
    /// Warp zone the hero entered this frame.
    pub warp: Option<WarpEvent>,
    /// Room to fall into: the hero's feet reached the room floor in a room
    /// with a fall destination.
    pub fell: Option<u16>,
}

/// The per-frame simulation driver. Owns the physics configuration and the
/// warp tracker; all world state lives in the caller's [`Room`] and
/// [`ActorSet`].
#[derive(Debug)]
pub struct Simulation {
    config: PhysicsConfig,
    tracker: WarpTracker,
    /// Whether the hero was already on the floor last frame; makes the
    /// fall trigger fire once per touchdown, not every frame.
    on_floor: bool,
}

impl Simulation {
    /// Creates a driver with a validated configuration.
    pub fn new(config: PhysicsConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            tracker: WarpTracker::new(),
            on_floor: false,
        })
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Re-arms the warp and fall triggers after a room swap so the arrival
    /// position does not immediately re-trigger.
    pub fn notify_room_entered(&mut self, tile: (i32, i32)) {
        self.tracker.reset(tile);
        self.on_floor = false;
    }

    /// Advances the world by one frame.
    pub fn step(&mut self, room: &Room, actors: &mut ActorSet, intent: &MoveIntent) -> FrameEvents {
        let mut events = FrameEvents::default();

        events.blocked_by = self.move_hero(room, actors, intent);
        self.handle_jump(actors, intent);

        for i in 0..actors.len() {
            let id = ActorId(i);
            if actors.is_carried(id) {
                continue;
            }
            if let Some(support) = integrate_actor(actors, &room.heightmap, id, &self.config) {
                events.standing_on.push((id, support));
            }
        }

        propagate_carries(actors, &self.config);

        let hero = actors.hero();
        events.warp = self
            .tracker
            .check(hero.footprint(self.config.margin).center(), room.number, &room.warps);
        // Edge-triggered like the warp check: only the transition onto the
        // floor reports a fall.
        let on_floor = hero.pos.z <= 0.0;
        if on_floor && !self.on_floor {
            if let Some(dest) = room.fall_destination {
                debug!(room = room.number, dest, "hero reached the floor of a fall room");
                events.fell = Some(dest);
            }
        }
        self.on_floor = on_floor;

        events
    }

    /// Horizontal stage: facing update, per-axis terrain gate, then the
    /// entity resolver. Returns the blocking entity on a full rejection.
    fn move_hero(&self, room: &Room, actors: &mut ActorSet, intent: &MoveIntent) -> Option<ActorId> {
        let mut dx = intent.move_x * self.config.walk_speed;
        let mut dy = intent.move_y * self.config.walk_speed;
        if dx == 0.0 && dy == 0.0 {
            return None;
        }

        let hero_id = actors.hero_id();
        let (old, size, foot_z) = {
            let hero = actors.hero_mut();
            if let Some(facing) = Facing::from_delta(dx, dy) {
                hero.facing = facing;
            }
            (hero.pos, hero.size, hero.pos.z)
        };

        // Each axis passes the terrain gate independently; a blocked axis is
        // dropped, not the whole move.
        if dx != 0.0 {
            let moved = Footprint::of(
                glam::Vec3::new(old.x + dx, old.y, old.z),
                size,
                self.config.margin,
            );
            if !terrain_allows_move(&room.heightmap, &moved, foot_z, dx, 0.0) {
                dx = 0.0;
            }
        }
        if dy != 0.0 {
            let moved = Footprint::of(
                glam::Vec3::new(old.x, old.y + dy, old.z),
                size,
                self.config.margin,
            );
            if !terrain_allows_move(&room.heightmap, &moved, foot_z, 0.0, dy) {
                dy = 0.0;
            }
        }
        if dx == 0.0 && dy == 0.0 {
            return None;
        }

        let outcome = resolve_move(actors, hero_id, old.x + dx, old.y + dy, self.config.margin);
        let hero = actors.hero_mut();
        hero.pos.x = outcome.x;
        hero.pos.y = outcome.y;
        outcome.blocked_by
    }

    /// Jump stage: a press while grounded starts a fixed-step ascent;
    /// gravity takes over once the ascent reaches its maximum.
    fn handle_jump(&self, actors: &mut ActorSet, intent: &MoveIntent) {
        let hero = actors.hero_mut();
        if intent.jump && hero.grounded && !hero.jump.active {
            hero.jump.active = true;
            hero.jump.progress = 0.0;
            hero.grounded = false;
        }
        if !hero.jump.active {
            return;
        }
        // The frame after the ascent tops out hands the hero to gravity.
        if hero.jump.progress >= self.config.max_jump {
            hero.jump.active = false;
            hero.jump.progress = 0.0;
            return;
        }
        hero.pos.z += self.config.jump_step;
        hero.jump.progress += self.config.jump_step;
    }
}

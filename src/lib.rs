//! Isoquest Core
//!
//! Tile-based 3D collision and physics resolution for an isometric room
//! world. The crate owns the hard invariants of the simulation: whether two
//! actors overlap in 3D, how a move slides around obstacles, how gravity
//! settles actors onto terrain or onto other actors, how riders follow a
//! moving platform, and when a warp zone fires a room transition.
//!
//! All world coordinates are tile units (`f32`): X/Y span the isometric
//! ground plane, Z is vertical height. Rendering, assets, audio and scripted
//! behavior are collaborators outside this crate; they consume the events
//! the simulation reports and feed movement intent back in.
//!
//! # Modules
//!
//! - [`world`] - Terrain heightmap, room data records, warp zones
//! - [`actor`] - Actor state and the dense actor set
//! - [`physics`] - Bounding volumes, movement resolution, gravity, carrying,
//!   placement validation
//! - [`sim`] - The per-frame pipeline tying the pieces together
//! - [`config`] - Validated physics constants
//!
//! # Example
//!
//! ```ignore
//! use glam::Vec3;
//! use isoquest::{Actor, ActorSet, MoveIntent, PhysicsConfig, Room, Simulation};
//!
//! let room = Room::from_json(include_str!("rooms/room_001.json"))?;
//! let config = PhysicsConfig::default();
//!
//! let hero = Actor::new(Vec3::new(5.0, 5.0, 0.0), 1.0, 2.0, config.margin)?;
//! let mut actors = ActorSet::with_hero(hero);
//!
//! let mut sim = Simulation::new(config)?;
//! let events = sim.step(&room, &mut actors, &MoveIntent::walk(1.0, 0.0));
//! if let Some(warp) = events.warp {
//!     // load warp.target_room, move the hero to warp.dest_tile
//! }
//! ```

pub mod actor;
pub mod config;
pub mod physics;
pub mod sim;
pub mod world;

// Re-export the types most callers touch every frame.
pub use actor::{Actor, ActorError, ActorId, ActorSet, Facing};
pub use config::{ConfigError, PhysicsConfig};
pub use physics::bounds::{BoundingVolume, Footprint, volumes_collide};
pub use sim::{FrameEvents, MoveIntent, Simulation};
pub use world::heightmap::{HeightCell, Heightmap};
pub use world::room::{Room, RoomData, RoomDataError, WarpRecord};
pub use world::warp::{TileRect, Warp, WarpEvent, WarpTracker};

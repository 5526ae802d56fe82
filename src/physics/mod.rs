//! Physics Core
//!
//! The collision and resolution subsystem: bounding volumes and the 3D
//! collision predicate, horizontal movement with obstacle sliding, the
//! vertical integrator (gravity and support surfaces), carry propagation
//! for actors riding moving platforms, and the placement validator used by
//! pickup/drop.

pub mod bounds;
pub mod carry;
pub mod gravity;
pub mod movement;
pub mod placement;

pub use bounds::{BoundingVolume, Footprint, volumes_collide};
pub use carry::propagate_carries;
pub use gravity::{SupportSurface, integrate_actor, standing_on};
pub use movement::{MoveOutcome, resolve_move, terrain_allows_move};
pub use placement::{can_place, entity_in_front, position_in_front, try_grab, try_place_grabbed};

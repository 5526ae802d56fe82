//! World Data
//!
//! Static per-room data the simulation reads: the terrain heightmap, the
//! room records it is loaded from, and warp-zone geometry. Everything here
//! is immutable during a frame and replaced wholesale on room transition.

pub mod heightmap;
pub mod room;
pub mod warp;

pub use heightmap::{HeightCell, Heightmap, HeightmapError};
pub use room::{Room, RoomData, RoomDataError, WarpRecord};
pub use warp::{TileRect, Warp, WarpEvent, WarpTracker};

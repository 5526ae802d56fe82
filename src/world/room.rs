//! Room Data Records
//!
//! Serde records for one room's simulation data (heightmap text, warp
//! geometry, fall destination) and the loader that turns them into the
//! runtime [`Room`]. Tile images, sprites and audio belong to the
//! presentation layer and are not part of these records.

use std::fmt;

use serde::Deserialize;
use tracing::info;

use crate::world::heightmap::{Heightmap, HeightmapError};
use crate::world::warp::Warp;

/// Sentinel room id meaning "no fall destination".
const NO_FALL_DESTINATION: u16 = 65535;

/// One warp zone as stored in room data: two room ids and a rectangle
/// origin on each side sharing one width/height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct WarpRecord {
    pub room1: u16,
    pub room2: u16,
    /// Rectangle origin on the `room1` side, tile coordinates.
    pub x: i32,
    pub y: i32,
    /// Rectangle origin on the `room2` side.
    pub x2: i32,
    pub y2: i32,
    pub width: i32,
    pub height: i32,
}

/// Raw room record as deserialized from JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct RoomData {
    /// Room identifier.
    pub room: u16,
    /// Heightmap width in tiles.
    pub hmwidth: usize,
    /// Heightmap height in tiles.
    pub hmheight: usize,
    /// Tile-space offsets consumed by the projection layer.
    #[serde(default)]
    pub hmleft: i32,
    #[serde(default)]
    pub hmtop: i32,
    /// Heightmap cells as rows of hex words (see `Heightmap::from_hex_rows`).
    pub heightmap: String,
    #[serde(default)]
    pub warps: Vec<WarpRecord>,
    /// Room to fall into when the hero reaches Z = 0; 65535 means none.
    #[serde(default = "no_fall_destination")]
    pub fall_destination: u16,
}

fn no_fall_destination() -> u16 {
    NO_FALL_DESTINATION
}

/// A loaded room: everything the simulation reads each frame.
#[derive(Debug, Clone)]
pub struct Room {
    /// Room identifier, matched against warp sides.
    pub number: u16,
    pub heightmap: Heightmap,
    pub warps: Vec<Warp>,
    /// Destination room for bottomless pits, if this room has one.
    pub fall_destination: Option<u16>,
}

impl Room {
    /// Loads a room from its JSON record.
    pub fn from_json(text: &str) -> Result<Self, RoomDataError> {
        let data: RoomData = serde_json::from_str(text)?;
        Self::from_data(data)
    }

    /// Builds the runtime room from an already-deserialized record.
    pub fn from_data(data: RoomData) -> Result<Self, RoomDataError> {
        let heightmap = Heightmap::from_hex_rows(
            data.hmwidth,
            data.hmheight,
            data.hmleft,
            data.hmtop,
            &data.heightmap,
        )?;
        let warps: Vec<Warp> = data.warps.iter().map(Warp::from_record).collect();

        info!(
            room = data.room,
            width = data.hmwidth,
            height = data.hmheight,
            warps = warps.len(),
            "room loaded"
        );

        Ok(Self {
            number: data.room,
            heightmap,
            warps,
            fall_destination: match data.fall_destination {
                NO_FALL_DESTINATION => None,
                dest => Some(dest),
            },
        })
    }
}

/// Errors while loading a room record.
#[derive(Debug)]
pub enum RoomDataError {
    /// The JSON record did not deserialize.
    Json(serde_json::Error),
    /// The heightmap text was malformed.
    Heightmap(HeightmapError),
}

impl fmt::Display for RoomDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomDataError::Json(err) => write!(f, "room record did not parse: {err}"),
            RoomDataError::Heightmap(err) => write!(f, "room heightmap invalid: {err}"),
        }
    }
}

impl std::error::Error for RoomDataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RoomDataError::Json(err) => Some(err),
            RoomDataError::Heightmap(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for RoomDataError {
    fn from(err: serde_json::Error) -> Self {
        RoomDataError::Json(err)
    }
}

impl From<HeightmapError> for RoomDataError {
    fn from(err: HeightmapError) -> Self {
        RoomDataError::Heightmap(err)
    }
}

//! Warp Zones
//!
//! Edge-triggered room-transition triggers. A warp pairs a tile rectangle
//! in one room with a tile rectangle in another; when the hero's footprint
//! center enters a new tile inside the entry rectangle, the trigger fires
//! once and reports the paired destination. Actually loading the new room
//! is the caller's job.

use tracing::{debug, info};

use crate::world::room::WarpRecord;

/// Integer rectangle in tile space, half-open on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl TileRect {
    /// Half-open point-in-rectangle test:
    /// `x <= tx < x + w`, `y <= ty < y + h`.
    pub fn contains(&self, tx: i32, ty: i32) -> bool {
        self.x <= tx && tx < self.x + self.w && self.y <= ty && ty < self.y + self.h
    }
}

/// A two-sided warp: one rectangle per room, same dimensions on both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Warp {
    pub room_a: u16,
    pub room_b: u16,
    pub rect_a: TileRect,
    pub rect_b: TileRect,
}

impl Warp {
    /// Builds the runtime warp from its room-data record.
    pub fn from_record(rec: &WarpRecord) -> Self {
        Self {
            room_a: rec.room1,
            room_b: rec.room2,
            rect_a: TileRect {
                x: rec.x,
                y: rec.y,
                w: rec.width,
                h: rec.height,
            },
            rect_b: TileRect {
                x: rec.x2,
                y: rec.y2,
                w: rec.width,
                h: rec.height,
            },
        }
    }

    /// Entry rectangle, exit rectangle and target room as seen from
    /// `current_room`, or `None` if this warp touches neither side.
    fn sides(&self, current_room: u16) -> Option<(TileRect, TileRect, u16)> {
        if current_room == self.room_a {
            Some((self.rect_a, self.rect_b, self.room_b))
        } else if current_room == self.room_b {
            Some((self.rect_b, self.rect_a, self.room_a))
        } else {
            None
        }
    }

    /// Fires this warp for a tile inside its entry rectangle.
    ///
    /// The destination preserves the hero's offset within the entry
    /// rectangle: entering one tile in from the corner exits one tile in
    /// from the paired corner.
    pub fn trigger(&self, current_room: u16, tile: (i32, i32)) -> Option<WarpEvent> {
        let (entry, exit, target_room) = self.sides(current_room)?;
        if !entry.contains(tile.0, tile.1) {
            return None;
        }
        Some(WarpEvent {
            target_room,
            dest_tile: (exit.x + (tile.0 - entry.x), exit.y + (tile.1 - entry.y)),
        })
    }
}

/// A fired warp: where to go. The caller loads the room, looks up the
/// destination terrain height, and repositions the hero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarpEvent {
    pub target_room: u16,
    pub dest_tile: (i32, i32),
}

/// Edge-trigger state for warp checks.
///
/// Remembers the hero's last-checked tile so a warp fires once on entry
/// instead of every frame the hero stands inside the zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WarpTracker {
    last_tile: Option<(i32, i32)>,
}

impl WarpTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks the warps for the hero's footprint center.
    ///
    /// Skips entirely while the center stays on the tile of the previous
    /// check. The new tile is recorded before the warps are scanned, so a
    /// non-firing tile is not re-tested every frame either.
    pub fn check(
        &mut self,
        footprint_center: (f32, f32),
        current_room: u16,
        warps: &[Warp],
    ) -> Option<WarpEvent> {
        let tile = (
            footprint_center.0.floor() as i32,
            footprint_center.1.floor() as i32,
        );
        if self.last_tile == Some(tile) {
            return None;
        }
        self.last_tile = Some(tile);
        debug!(?tile, room = current_room, "warp check on tile change");

        for warp in warps {
            if let Some(event) = warp.trigger(current_room, tile) {
                info!(
                    from = current_room,
                    to = event.target_room,
                    dest = ?event.dest_tile,
                    "warp fired"
                );
                return Some(event);
            }
        }
        None
    }

    /// Re-arms tracking after a room swap so the spawn tile cannot
    /// immediately re-fire the paired warp.
    pub fn reset(&mut self, tile: (i32, i32)) {
        self.last_tile = Some(tile);
    }

    /// Forgets the tracked tile (e.g. after a scripted teleport).
    pub fn clear(&mut self) {
        self.last_tile = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warp() -> Warp {
        Warp::from_record(&WarpRecord {
            room1: 1,
            room2: 2,
            x: 10,
            y: 10,
            x2: 2,
            y2: 2,
            width: 2,
            height: 2,
        })
    }

    #[test]
    fn test_rect_contains_is_half_open() {
        let rect = TileRect { x: 10, y: 10, w: 2, h: 2 };
        assert!(rect.contains(10, 10));
        assert!(rect.contains(11, 11));
        assert!(!rect.contains(12, 11));
        assert!(!rect.contains(11, 12));
        assert!(!rect.contains(9, 10));
    }

    #[test]
    fn test_destination_preserves_offset_within_rect() {
        let event = warp().trigger(1, (11, 11)).unwrap();
        assert_eq!(event.target_room, 2);
        assert_eq!(event.dest_tile, (3, 3));

        let event = warp().trigger(1, (10, 11)).unwrap();
        assert_eq!(event.dest_tile, (2, 3));
    }

    #[test]
    fn test_trigger_from_either_side() {
        let event = warp().trigger(2, (2, 3)).unwrap();
        assert_eq!(event.target_room, 1);
        assert_eq!(event.dest_tile, (10, 11));
    }

    #[test]
    fn test_unrelated_room_never_fires() {
        assert_eq!(warp().trigger(9, (11, 11)), None);
    }

    #[test]
    fn test_tracker_fires_once_per_tile_entry() {
        let warps = [warp()];
        let mut tracker = WarpTracker::new();

        // Footprint center inside tile (11, 11)
        assert!(tracker.check((11.4, 11.4), 1, &warps).is_some());
        // Same tile: edge-triggered, no refire
        assert!(tracker.check((11.6, 11.5), 1, &warps).is_none());
        // Leave and come back: fires again
        assert!(tracker.check((13.5, 11.5), 1, &warps).is_none());
        assert!(tracker.check((11.4, 11.4), 1, &warps).is_some());
    }

    #[test]
    fn test_tracker_reset_suppresses_spawn_tile() {
        let warps = [warp()];
        let mut tracker = WarpTracker::new();
        tracker.reset((3, 3));
        // Spawned inside the room-2 rect; must not bounce straight back.
        assert!(tracker.check((3.5, 3.5), 2, &warps).is_none());
    }
}

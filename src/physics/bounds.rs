//! Bounding Volumes
//!
//! Pure geometry for actor collision: the margin-shrunk XY footprint, its
//! four diamond corners, and the strict 3D overlap predicate. Everything
//! in tile units; no actor state is touched here.

use glam::Vec3;

/// An actor's XY extent after the margin shrink.
///
/// The shrink keeps actors standing on edge-adjacent tiles from reading as
/// colliding. Constructing one assumes `size > 2 * margin`; `Actor::new`
/// enforces that, so a footprint can never invert.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Footprint {
    /// Footprint of a square actor at `pos` with side `size`.
    pub fn of(pos: Vec3, size: f32, margin: f32) -> Self {
        Self {
            x: pos.x + margin,
            y: pos.y + margin,
            w: size - 2.0 * margin,
            h: size - 2.0 * margin,
        }
    }

    /// Strict AABB overlap: footprints sharing only an edge do not overlap.
    pub fn overlaps(&self, other: &Footprint) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }

    /// The four corners in fixed order: left, bottom, right, top.
    ///
    /// Names follow the isometric diamond as drawn on screen, not compass
    /// directions; "left" is the minimum-X/maximum-Y corner.
    pub fn corners(&self) -> [(f32, f32); 4] {
        [
            (self.x, self.y + self.h),          // left
            (self.x + self.w, self.y + self.h), // bottom
            (self.x + self.w, self.y),          // right
            (self.x, self.y),                   // top
        ]
    }

    /// Center of the footprint in world XY.
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// A box in tile space: position (foot at `pos.z`), square footprint side,
/// and height. Mirrors the owning actor's position; it never owns it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingVolume {
    pub pos: Vec3,
    pub size: f32,
    pub height: f32,
}

impl BoundingVolume {
    pub fn footprint(&self, margin: f32) -> Footprint {
        Footprint::of(self.pos, self.size, margin)
    }

    /// Z of the top face.
    pub fn top(&self) -> f32 {
        self.pos.z + self.height
    }
}

/// True iff two volumes intersect in 3D.
///
/// XY uses the strict footprint overlap; Z overlaps the half-open ranges
/// `[z, z + height)` under the same strict rule, so a box resting exactly
/// on another's top face does not collide. Pure and symmetric; callers
/// exclude self-comparisons.
pub fn volumes_collide(a: &BoundingVolume, b: &BoundingVolume, margin: f32) -> bool {
    if !a.footprint(margin).overlaps(&b.footprint(margin)) {
        return false;
    }
    a.pos.z < b.top() && a.top() > b.pos.z
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARGIN: f32 = 0.125;

    fn volume(x: f32, y: f32, z: f32) -> BoundingVolume {
        BoundingVolume {
            pos: Vec3::new(x, y, z),
            size: 1.0,
            height: 1.0,
        }
    }

    #[test]
    fn test_footprint_applies_margin_shrink() {
        let fp = Footprint::of(Vec3::new(2.0, 3.0, 0.0), 1.0, MARGIN);
        assert_eq!(fp.x, 2.125);
        assert_eq!(fp.y, 3.125);
        assert_eq!(fp.w, 0.75);
        assert_eq!(fp.h, 0.75);
    }

    #[test]
    fn test_corner_order_left_bottom_right_top() {
        let fp = Footprint { x: 0.0, y: 0.0, w: 2.0, h: 2.0 };
        let [left, bottom, right, top] = fp.corners();
        assert_eq!(left, (0.0, 2.0));
        assert_eq!(bottom, (2.0, 2.0));
        assert_eq!(right, (2.0, 0.0));
        assert_eq!(top, (0.0, 0.0));
    }

    #[test]
    fn test_direct_overlap_collides() {
        // Half-tile offset boxes at the same height
        assert!(volumes_collide(&volume(0.0, 0.0, 0.0), &volume(0.5, 0.0, 0.0), MARGIN));
    }

    #[test]
    fn test_collision_is_symmetric() {
        let a = volume(0.0, 0.0, 0.0);
        let b = volume(0.5, 0.25, 0.5);
        assert_eq!(
            volumes_collide(&a, &b, MARGIN),
            volumes_collide(&b, &a, MARGIN)
        );
    }

    #[test]
    fn test_edge_adjacent_tiles_do_not_collide() {
        // Whole-tile neighbors: margin keeps them apart
        assert!(!volumes_collide(&volume(0.0, 0.0, 0.0), &volume(1.0, 0.0, 0.0), MARGIN));
        // Even with zero margin the strict inequality keeps shared edges clear
        assert!(!volumes_collide(&volume(0.0, 0.0, 0.0), &volume(1.0, 0.0, 0.0), 0.0));
    }

    #[test]
    fn test_stacked_boxes_do_not_collide() {
        // B rests exactly on A's top face: half-open Z ranges
        let a = volume(0.0, 0.0, 0.0);
        let b = volume(0.0, 0.0, 1.0);
        assert!(!volumes_collide(&a, &b, MARGIN));
        // Lower B into A and they collide
        let c = volume(0.0, 0.0, 0.99);
        assert!(volumes_collide(&a, &c, MARGIN));
    }

    #[test]
    fn test_identical_volumes_collide_with_themselves() {
        let a = volume(4.0, 4.0, 0.0);
        assert!(volumes_collide(&a, &a.clone(), MARGIN));
    }
}

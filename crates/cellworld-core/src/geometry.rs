//! Grid geometry: mapping between creature-local cell coordinates and
//! world pixel coordinates, plus the AABB overlap test.

use serde::{Deserialize, Serialize};

/// World pixel coordinate of a local cell index, given the owning
/// creature's origin and the grid unit size.
pub fn cell_to_world(origin: i32, index: i32, unit: i32) -> i32 {
    origin + index * unit
}

/// Cell-index delta between two world coordinates. Truncates toward zero;
/// origins are assumed to stay unit-aligned (see `Creature::eat`).
pub fn world_delta_to_cells(from: i32, to: i32, unit: i32) -> i32 {
    (to - from) / unit
}

/// Axis-aligned bounding box in world pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aabb {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Aabb {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Strict open-interval overlap: boxes that merely touch at an edge
    /// do not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    /// True if this box lies fully inside `[0, width] x [0, height]`.
    pub fn contained_in(&self, width: i32, height: i32) -> bool {
        self.x >= 0 && self.y >= 0 && self.x + self.width <= width && self.y + self.height <= height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_cell_to_world() {
        assert_eq!(cell_to_world(100, 0, 10), 100);
        assert_eq!(cell_to_world(100, 3, 10), 130);
    }

    #[test]
    fn test_world_delta_truncates_toward_zero() {
        assert_eq!(world_delta_to_cells(0, 25, 10), 2);
        assert_eq!(world_delta_to_cells(25, 0, 10), -2);
    }

    #[test]
    fn test_overlapping_boxes() {
        let a = Aabb::new(0, 0, 20, 20);
        let b = Aabb::new(10, 10, 20, 20);
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_edge_touching_boxes_do_not_overlap() {
        let a = Aabb::new(0, 0, 10, 10);
        let b = Aabb::new(10, 0, 10, 10);
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn test_containment() {
        assert!(Aabb::new(0, 0, 100, 100).contained_in(100, 100));
        assert!(!Aabb::new(-1, 0, 10, 10).contained_in(100, 100));
        assert!(!Aabb::new(95, 0, 10, 10).contained_in(100, 100));
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(
            ax in -200i32..200, ay in -200i32..200,
            aw in 0i32..100, ah in 0i32..100,
            bx in -200i32..200, by in -200i32..200,
            bw in 0i32..100, bh in 0i32..100,
        ) {
            let a = Aabb::new(ax, ay, aw, ah);
            let b = Aabb::new(bx, by, bw, bh);
            prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        }
    }
}

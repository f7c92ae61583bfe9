//! Corners and bounds of centered, rotatable rectangles
//!
//! Screen coordinates: x grows right, y grows down, and a positive tilt turns
//! the rectangle clockwise on screen.

use glam::Vec2;

/// A rectangle described by its center, full extents and tilt
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedRect {
    pub center: Vec2,
    pub size: Vec2,
    pub tilt: f32,
}

/// The four corners, named as they sit before any rotation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corners {
    pub top_left: Vec2,
    pub top_right: Vec2,
    pub bottom_right: Vec2,
    pub bottom_left: Vec2,
}

impl Corners {
    pub fn to_array(&self) -> [Vec2; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn left(&self) -> f32 {
        self.min.x
    }

    pub fn right(&self) -> f32 {
        self.max.x
    }

    pub fn top(&self) -> f32 {
        self.min.y
    }

    pub fn bottom(&self) -> f32 {
        self.max.y
    }
}

/// Anything that occupies a centered, rotatable rectangle
pub trait CenteredRotatable {
    fn oriented_rect(&self) -> OrientedRect;
}

impl OrientedRect {
    pub fn new(center: Vec2, size: Vec2, tilt: f32) -> Self {
        Self { center, size, tilt }
    }

    /// Offset of the bottom-right corner from the center.
    /// The top-left offset is its exact negation.
    pub fn bottom_right_offset(&self) -> Vec2 {
        Vec2::from_angle(self.tilt).rotate(self.size * 0.5)
    }

    /// Offset of the bottom-left corner from the center
    pub fn bottom_left_offset(&self) -> Vec2 {
        let half = self.size * 0.5;
        Vec2::from_angle(self.tilt).rotate(Vec2::new(-half.x, half.y))
    }

    pub fn corners(&self) -> Corners {
        let br = self.bottom_right_offset();
        let bl = self.bottom_left_offset();
        Corners {
            top_left: self.center - br,
            top_right: self.center - bl,
            bottom_right: self.center + br,
            bottom_left: self.center + bl,
        }
    }

    pub fn top_left(&self) -> Vec2 {
        self.center - self.bottom_right_offset()
    }

    pub fn bottom_right(&self) -> Vec2 {
        self.center + self.bottom_right_offset()
    }

    pub fn bounding_box(&self) -> Aabb {
        let corners = self.corners().to_array();
        let mut min = corners[0];
        let mut max = corners[0];
        for corner in &corners[1..] {
            min = min.min(*corner);
            max = max.max(*corner);
        }
        Aabb { min, max }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn test_axis_aligned_corners_exact() {
        let rect = OrientedRect::new(Vec2::new(640.0, 360.0), Vec2::new(100.0, 200.0), 0.0);
        let c = rect.corners();
        assert_eq!(c.top_left, Vec2::new(590.0, 260.0));
        assert_eq!(c.top_right, Vec2::new(690.0, 260.0));
        assert_eq!(c.bottom_right, Vec2::new(690.0, 460.0));
        assert_eq!(c.bottom_left, Vec2::new(590.0, 460.0));

        let bb = rect.bounding_box();
        assert_eq!(bb.min, Vec2::new(590.0, 260.0));
        assert_eq!(bb.max, Vec2::new(690.0, 460.0));
    }

    #[test]
    fn test_quarter_turn_swaps_extents() {
        let rect = OrientedRect::new(Vec2::ZERO, Vec2::new(100.0, 200.0), FRAC_PI_2);
        let bb = rect.bounding_box();
        assert!(approx(bb.min, Vec2::new(-100.0, -50.0)));
        assert!(approx(bb.max, Vec2::new(100.0, 50.0)));
        // Clockwise turn: the top-left corner swings to the top right
        assert!(approx(rect.top_left(), Vec2::new(100.0, -50.0)));
    }

    #[test]
    fn test_half_turn_flips_corners() {
        let rect = OrientedRect::new(Vec2::new(10.0, 20.0), Vec2::new(30.0, 60.0), PI);
        assert!(approx(rect.top_left(), Vec2::new(25.0, 50.0)));
        assert!(approx(rect.bottom_right(), Vec2::new(-5.0, -10.0)));
    }

    #[test]
    fn test_corner_distance_is_half_diagonal() {
        let rect = OrientedRect::new(Vec2::ZERO, Vec2::new(30.0, 40.0), 0.7);
        for corner in rect.corners().to_array() {
            assert!((corner.length() - 25.0).abs() < 1e-3);
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn top_left_mirrors_bottom_right(
                w in 1.0f32..500.0,
                h in 1.0f32..500.0,
                tilt in -20.0f32..20.0,
            ) {
                let rect = OrientedRect::new(Vec2::ZERO, Vec2::new(w, h), tilt);
                prop_assert_eq!(rect.top_left(), -rect.bottom_right());
                let c = rect.corners();
                prop_assert_eq!(c.top_right, -c.bottom_left);
            }

            #[test]
            fn bounding_box_contains_every_corner(
                x in -1000.0f32..1000.0,
                y in -1000.0f32..1000.0,
                w in 1.0f32..500.0,
                h in 1.0f32..500.0,
                tilt in -20.0f32..20.0,
            ) {
                let rect = OrientedRect::new(Vec2::new(x, y), Vec2::new(w, h), tilt);
                let bb = rect.bounding_box();
                for corner in rect.corners().to_array() {
                    prop_assert!(corner.cmpge(bb.min).all() && corner.cmple(bb.max).all());
                }
            }
        }
    }
}

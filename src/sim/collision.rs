//! Ball-in-basket containment
//!
//! The basket mouth is a band that slides right as it goes down: at the top it
//! spans the left half of the basket (less the inset), and each pixel of depth
//! moves both edges right by `(w - 2 * inset) / (2 * h)`. The shape follows the
//! net artwork rather than a symmetric funnel.

use glam::Vec2;

/// Axis-aligned sprite placement: top-left corner plus size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub pos: Vec2,
    pub size: Vec2,
}

/// Whether `point` lies inside the basket mouth. All bounds are strict.
pub fn point_in_basket(point: Vec2, basket: Placement, inset: f32) -> bool {
    let Placement { pos, size } = basket;
    let shift = (point.y - pos.y) * (size.x - inset * 2.0) / (2.0 * size.y);

    point.x > pos.x + inset + shift
        && point.x < pos.x - inset + size.x / 2.0 + shift
        && point.y < pos.y + size.y
        && point.y > pos.y
}

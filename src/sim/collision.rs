//! Axis-aligned bounding box overlap
//!
//! Rectangles are half-open: a box covers `[x, x + w)` by `[y, y + h)`, so two
//! boxes sharing only an edge do not collide.

use super::actor::Actor;
use crate::Rect;

/// True when the two rectangles overlap by at least one pixel
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    if a.x >= b.right() {
        return false;
    }
    if a.y >= b.bottom() {
        return false;
    }
    if b.x >= a.right() {
        return false;
    }
    if b.y >= a.bottom() {
        return false;
    }
    true
}

/// Bounding-box collision between two actors
#[inline]
pub fn check_collision(a: &Actor, b: &Actor) -> bool {
    rects_overlap(&a.bounds(), &b.bounds())
}

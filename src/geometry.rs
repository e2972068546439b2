// src/geometry.rs

//! Pixel-space points and rectangles shared by the surface and the formatter.
//!
//! Coordinates are surface-local document pixels. Rectangles are half-open:
//! `left`/`top` are inclusive, `right`/`bottom` are exclusive.

use serde::{Deserialize, Serialize};

/// A point in surface-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in surface-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Builds a rectangle from a top-left corner and a size, the way toolkits
    /// usually report damaged regions.
    pub const fn from_origin_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x.saturating_add(width), y.saturating_add(height))
    }

    pub fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x < self.right && p.y >= self.top && p.y < self.bottom
    }

    /// True if `y` lies within the rectangle's vertical band.
    pub fn spans_row(&self, y: i32) -> bool {
        y >= self.top && y < self.bottom
    }

    /// Horizontal distance from `x` to the rectangle; zero when inside the band.
    /// Saturates at `i32::MAX` for points far off the surface.
    pub fn horizontal_distance(&self, x: i32) -> i32 {
        if x < self.left {
            self.left.saturating_sub(x)
        } else if x >= self.right {
            x.saturating_sub(self.right).saturating_add(1)
        } else {
            0
        }
    }

    /// Smallest rectangle covering both. Empty rectangles are ignored.
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Rect::new(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_is_half_open() {
        let r = Rect::from_origin_size(10, 20, 30, 10);
        assert!(r.contains(Point::new(10, 20)));
        assert!(r.contains(Point::new(39, 29)));
        assert!(!r.contains(Point::new(40, 25)));
        assert!(!r.contains(Point::new(15, 30)));
    }

    #[test]
    fn union_skips_empty() {
        let a = Rect::new(0, 0, 10, 10);
        let empty = Rect::default();
        assert_eq!(a.union(&empty), a);
        assert_eq!(empty.union(&a), a);
        assert_eq!(a.union(&Rect::new(5, 5, 20, 12)), Rect::new(0, 0, 20, 12));
    }

    #[test]
    fn horizontal_distance_outside_band() {
        let r = Rect::new(10, 0, 20, 10);
        assert_eq!(r.horizontal_distance(15), 0);
        assert_eq!(r.horizontal_distance(4), 6);
        assert_eq!(r.horizontal_distance(20), 1);
    }

    #[test]
    fn extreme_coordinates_saturate() {
        let r = Rect::from_origin_size(i32::MAX - 1, i32::MIN, 10, i32::MAX);
        assert_eq!(r.right, i32::MAX);
        assert_eq!(r.bottom, -1);
        assert_eq!(r.width(), 1);
        assert!(r.contains(Point::new(i32::MAX - 1, -2)));

        let wide = Rect::new(i32::MIN, 0, i32::MAX, 10);
        assert_eq!(wide.width(), i32::MAX);
        assert!(!wide.is_empty());

        let r = Rect::new(10, 0, 20, 10);
        assert_eq!(r.horizontal_distance(i32::MIN), i32::MAX);
        assert_eq!(Rect::new(i32::MIN, 0, -5, 10).horizontal_distance(i32::MAX), i32::MAX);
    }
}

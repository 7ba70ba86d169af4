//! Core geometry types: Point, Rect.
//!
//! Coordinates are `f64` in the local space of the view that owns them. A view's
//! frame rect is expressed in its parent's space; everything it draws is expressed
//! relative to its own top-left corner.

use std::ops::{Add, Neg, Sub};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A 2D position or displacement.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The origin.
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate by `(dx, dy)`.
    #[inline]
    pub fn offset(self, dx: f64, dy: f64) -> Point {
        Point { x: self.x + dx, y: self.y + dy }
    }

    /// Linearly interpolate between `self` and `other`.
    ///
    /// `t = 0.0` returns `self`, `t = 1.0` returns `other`.
    #[inline]
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl Neg for Point {
    type Output = Point;
    #[inline]
    fn neg(self) -> Point {
        Point { x: -self.x, y: -self.y }
    }
}

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// An axis-aligned rectangle stored as its four edges.
///
/// A normalized rect has `right >= left` and `bottom >= top`. Containment is
/// half-open: the left/top edges are inside, the right/bottom edges are not.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    /// An empty rect at the origin.
    pub const EMPTY: Rect = Rect { left: 0.0, top: 0.0, right: 0.0, bottom: 0.0 };

    /// Create a rect from its edges.
    #[inline]
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self { left, top, right, bottom }
    }

    /// Create a rect from an origin and a size.
    #[inline]
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { left: x, top: y, right: x + width, bottom: y + height }
    }

    /// A rect at the origin with the given size.
    #[inline]
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::from_xywh(0.0, 0.0, width, height)
    }

    #[inline]
    pub fn width(self) -> f64 {
        self.right - self.left
    }

    #[inline]
    pub fn height(self) -> f64 {
        self.bottom - self.top
    }

    /// The top-left corner.
    #[inline]
    pub fn origin(self) -> Point {
        Point { x: self.left, y: self.top }
    }

    /// Width and height as a [`Point`].
    #[inline]
    pub fn size(self) -> Point {
        Point { x: self.width(), y: self.height() }
    }

    #[inline]
    pub fn center(self) -> Point {
        Point {
            x: self.left + self.width() / 2.0,
            y: self.top + self.height() / 2.0,
        }
    }

    /// Whether the rect has no area.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    /// Whether `right >= left` and `bottom >= top`.
    #[inline]
    pub fn is_normalized(self) -> bool {
        self.right >= self.left && self.bottom >= self.top
    }

    /// Swap edges so that `right >= left` and `bottom >= top`.
    #[inline]
    pub fn normalize(self) -> Rect {
        Rect {
            left: self.left.min(self.right),
            top: self.top.min(self.bottom),
            right: self.left.max(self.right),
            bottom: self.top.max(self.bottom),
        }
    }

    /// Translate by `(dx, dy)`.
    #[inline]
    pub fn offset(self, dx: f64, dy: f64) -> Rect {
        Rect {
            left: self.left + dx,
            top: self.top + dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
        }
    }

    /// Translate by a [`Point`].
    #[inline]
    pub fn translate(self, by: Point) -> Rect {
        self.offset(by.x, by.y)
    }

    /// Move the rect so its origin is `origin`, keeping its size.
    #[inline]
    pub fn move_to(self, origin: Point) -> Rect {
        Rect::from_xywh(origin.x, origin.y, self.width(), self.height())
    }

    /// The same size at the origin (a view's local bounds).
    #[inline]
    pub fn local_bounds(self) -> Rect {
        Rect::from_size(self.width(), self.height())
    }

    /// Shrink by `dx` on the left and right and `dy` on the top and bottom.
    #[inline]
    pub fn inset(self, dx: f64, dy: f64) -> Rect {
        Rect {
            left: self.left + dx,
            top: self.top + dy,
            right: self.right - dx,
            bottom: self.bottom - dy,
        }
    }

    /// Grow by `dx` on the left and right and `dy` on the top and bottom.
    #[inline]
    pub fn extend(self, dx: f64, dy: f64) -> Rect {
        self.inset(-dx, -dy)
    }

    /// Smallest rect containing both. An empty operand is ignored.
    #[inline]
    pub fn union(self, other: Rect) -> Rect {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        Rect {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Bound `self` to `other`.
    ///
    /// Non-overlapping rects collapse to a zero-sized rect; the result is never
    /// denormalized.
    #[inline]
    pub fn intersect(self, other: Rect) -> Rect {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right.min(other.right).max(left);
        let bottom = self.bottom.min(other.bottom).max(top);
        Rect { left, top, right, bottom }
    }

    /// Whether the point lies inside (half-open on the right/bottom edges).
    #[inline]
    pub fn point_inside(self, p: Point) -> bool {
        p.x >= self.left && p.x < self.right && p.y >= self.top && p.y < self.bottom
    }

    /// Whether the two rects share a non-zero area.
    #[inline]
    pub fn overlaps(self, other: Rect) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    /// Whether `other` lies entirely within `self`.
    #[inline]
    pub fn contains_rect(self, other: Rect) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right <= self.right
            && other.bottom <= self.bottom
    }

    /// Round edges outward to whole pixels.
    #[inline]
    pub fn make_integral(self) -> Rect {
        Rect {
            left: self.left.floor(),
            top: self.top.floor(),
            right: self.right.ceil(),
            bottom: self.bottom.ceil(),
        }
    }

    /// Interpolate every edge between `self` and `other`.
    pub fn lerp(self, other: Rect, t: f64) -> Rect {
        Rect {
            left: self.left + (other.left - self.left) * t,
            top: self.top + (other.top - self.top) * t,
            right: self.right + (other.right - self.right) * t,
            bottom: self.bottom + (other.bottom - self.bottom) * t,
        }
    }
}

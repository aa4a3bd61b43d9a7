// Math utilities shared across the engine

use glam::Vec2;

/// World axis, used to tag which component of a motion is being resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

/// Axis-aligned rectangle in world space.
///
/// The world is y-down: `min` is the top-left corner and `bottom()` returns
/// a larger value than `top()`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Width and height, both non-negative
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size / 2.0,
            size,
        }
    }

    pub fn left(&self) -> f32 {
        self.min.x
    }

    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.min.y
    }

    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    pub fn set_left(&mut self, x: f32) {
        self.min.x = x;
    }

    pub fn set_right(&mut self, x: f32) {
        self.min.x = x - self.size.x;
    }

    pub fn set_top(&mut self, y: f32) {
        self.min.y = y;
    }

    pub fn set_bottom(&mut self, y: f32) {
        self.min.y = y - self.size.y;
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.min = center - self.size / 2.0;
    }

    pub fn set_center_x(&mut self, x: f32) {
        self.min.x = x - self.size.x / 2.0;
    }

    pub fn set_center_y(&mut self, y: f32) {
        self.min.y = y - self.size.y / 2.0;
    }

    /// Grow (or shrink, for negative deltas) around the center: `dx` and
    /// `dy` are applied to the total width and height
    pub fn inflate(&self, dx: f32, dy: f32) -> Self {
        Self {
            min: self.min - Vec2::new(dx, dy) / 2.0,
            size: self.size + Vec2::new(dx, dy),
        }
    }

    /// Overlap test with exclusive edges: rectangles that merely touch do
    /// not intersect, so a hitbox clamped flush against an obstacle is free
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Clamp a value between min and max
#[allow(dead_code)]
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Check if two f32 values are approximately equal
#[allow(dead_code)]
pub fn approx_equal(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}

// Axis-separated AABB collision resolution against static obstacles
//
// Movement is resolved one axis at a time: integrate a component, recenter
// the hitbox, then push it flush against anything it overlaps. Resolving
// per-axis is what makes actors slide along walls instead of sticking.

use glam::Vec2;

use crate::core::math::{Axis, Rect};

/// What a static obstacle means to the things that touch it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObstacleKind {
    /// Blocks movement (walls, rocks, trees)
    Solid,

    /// Trigger zone that swaps the active map; never blocks
    Transition,

    /// Collectible marker; never blocks
    Relic,
}

/// A static rectangle in the live obstacle set
#[derive(Debug, Clone, Copy)]
pub struct Obstacle {
    pub rect: Rect,
    pub kind: ObstacleKind,
}

impl Obstacle {
    pub fn solid(rect: Rect) -> Self {
        Self {
            rect,
            kind: ObstacleKind::Solid,
        }
    }

    pub fn transition(rect: Rect) -> Self {
        Self {
            rect,
            kind: ObstacleKind::Transition,
        }
    }

    pub fn relic(rect: Rect) -> Self {
        Self {
            rect,
            kind: ObstacleKind::Relic,
        }
    }

    /// Only solid obstacles participate in movement clamping
    pub fn blocks(&self) -> bool {
        matches!(self.kind, ObstacleKind::Solid)
    }
}

/// Push `hitbox` out of every blocking obstacle it overlaps, along one axis.
///
/// `sign` is the motion direction on that axis; zero motion clamps nothing.
/// Obstacles are visited in slice order and each overlap snaps the hitbox
/// flush, so with stacked obstacles the last overlap wins. Returns whether
/// any clamp happened.
pub fn clamp_axis(hitbox: &mut Rect, obstacles: &[Obstacle], axis: Axis, sign: f32) -> bool {
    let mut clamped = false;

    for obstacle in obstacles.iter().filter(|o| o.blocks()) {
        if !obstacle.rect.intersects(hitbox) {
            continue;
        }

        match axis {
            Axis::X => {
                if sign > 0.0 {
                    hitbox.set_right(obstacle.rect.left());
                    clamped = true;
                } else if sign < 0.0 {
                    hitbox.set_left(obstacle.rect.right());
                    clamped = true;
                }
            }
            Axis::Y => {
                if sign > 0.0 {
                    hitbox.set_bottom(obstacle.rect.top());
                    clamped = true;
                } else if sign < 0.0 {
                    hitbox.set_top(obstacle.rect.bottom());
                    clamped = true;
                }
            }
        }
    }

    clamped
}

/// Stepped resolution: move and clamp the x axis fully before touching y.
///
/// `position` keeps sub-pixel precision; the hitbox is recentered on the
/// rounded position before each clamp pass. When a pass clamps, the position
/// is pulled back onto the hitbox center so the actor does not keep
/// accumulating motion into a wall.
pub fn resolve_stepped(
    position: &mut Vec2,
    hitbox: &mut Rect,
    velocity: Vec2,
    dt: f32,
    obstacles: &[Obstacle],
) {
    position.x += velocity.x * dt;
    hitbox.set_center_x(position.x.round());
    if clamp_axis(hitbox, obstacles, Axis::X, velocity.x) {
        position.x = hitbox.center().x;
    }

    position.y += velocity.y * dt;
    hitbox.set_center_y(position.y.round());
    if clamp_axis(hitbox, obstacles, Axis::Y, velocity.y) {
        position.y = hitbox.center().y;
    }
}

/// Swept resolution: integrate the whole motion vector first, then clamp x
/// and y in sequence against the already-moved hitbox
pub fn resolve_swept(
    position: &mut Vec2,
    hitbox: &mut Rect,
    velocity: Vec2,
    dt: f32,
    obstacles: &[Obstacle],
) {
    *position += velocity * dt;
    hitbox.set_center(position.round());

    if clamp_axis(hitbox, obstacles, Axis::X, velocity.x) {
        position.x = hitbox.center().x;
    }
    if clamp_axis(hitbox, obstacles, Axis::Y, velocity.y) {
        position.y = hitbox.center().y;
    }
}

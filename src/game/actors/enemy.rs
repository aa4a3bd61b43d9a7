// Enemy actor, driven by a radius-gated pursuit policy

use glam::Vec2;

use crate::core::math::Rect;
use crate::engine::physics::Obstacle;

use super::actor::Actor;
use super::animation::FrameSet;
use super::stats::PursuitProfile;

/// An enemy that idles until the player comes close, then gives chase.
///
/// The pursuit state machine is encoded in `active_radius`: it starts at
/// `detect_radius` and widens to `chase_radius` once the player has been
/// seen inside chase range, which makes a chasing enemy much harder to
/// shake off than an idle one is to wake.
#[derive(Debug, Clone)]
pub struct Enemy {
    actor: Actor,
    detect_radius: f32,
    chase_radius: f32,
    active_radius: f32,
}

impl Enemy {
    /// Spawn an enemy. `speed` is sampled by the caller from the profile's
    /// range so two spawns of the same archetype still differ.
    pub fn new(position: Vec2, speed: f32, profile: &PursuitProfile, frames: FrameSet) -> Self {
        Self {
            actor: Actor::new(position, speed, frames),
            detect_radius: profile.detect_radius,
            chase_radius: profile.chase_radius,
            active_radius: profile.detect_radius,
        }
    }

    /// Decide this frame's movement direction from the player's position.
    ///
    /// The give-up threshold is captured before the sticky widen lands, so
    /// the frame that first sees the player inside `chase_radius` still
    /// compares against the old radius; the widened one takes over from the
    /// next frame on.
    pub fn seek(&mut self, player_position: Vec2) {
        let threshold = self.active_radius;
        let offset = player_position - self.actor.position();
        let dist = offset.length();

        if dist < self.chase_radius {
            self.active_radius = self.chase_radius;
        }

        if dist > threshold {
            self.actor.set_direction(Vec2::ZERO);
            self.active_radius = self.detect_radius;
        } else {
            self.actor.set_direction(offset.normalize_or_zero());
        }
    }

    /// One simulation step: seek, move with collision, animate
    pub fn update(&mut self, player_position: Vec2, dt: f32, obstacles: &[Obstacle]) {
        self.seek(player_position);
        self.actor.move_swept(dt, obstacles);
        self.actor.animate(dt);
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn position(&self) -> Vec2 {
        self.actor.position()
    }

    pub fn hitbox(&self) -> Rect {
        self.actor.hitbox()
    }

    /// True while the widened chase radius is in effect
    pub fn is_chasing(&self) -> bool {
        self.active_radius == self.chase_radius && self.actor.direction() != Vec2::ZERO
    }
}

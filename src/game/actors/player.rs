// Player actor, steered directly by the input snapshot

use glam::Vec2;

use crate::core::math::Rect;
use crate::engine::input::{Action, InputState};
use crate::engine::physics::Obstacle;

use super::actor::Actor;
use super::animation::FrameSet;
use super::stats::PLAYER_SPEED;

/// The hero controlled by the keyboard
#[derive(Debug, Clone)]
pub struct Player {
    actor: Actor,
}

impl Player {
    pub fn new(position: Vec2, frames: FrameSet) -> Self {
        Self {
            actor: Actor::new(position, PLAYER_SPEED, frames),
        }
    }

    /// Desired movement direction for the currently held movement keys.
    ///
    /// Opposite keys cancel out; diagonals are normalized so the player
    /// never moves faster than along a single axis. Direction snaps
    /// instantly, there is no acceleration.
    pub fn control_direction(input: &InputState) -> Vec2 {
        let x = input.is_held(Action::MoveRight) as i32 - input.is_held(Action::MoveLeft) as i32;
        let y = input.is_held(Action::MoveDown) as i32 - input.is_held(Action::MoveUp) as i32;
        Vec2::new(x as f32, y as f32).normalize_or_zero()
    }

    /// One simulation step: read input, move with collision, animate
    pub fn update(&mut self, input: &InputState, dt: f32, obstacles: &[Obstacle]) {
        self.actor.set_direction(Self::control_direction(input));
        self.actor.move_stepped(dt, obstacles);
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
}

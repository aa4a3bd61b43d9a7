// Shared actor body
//
// Player and enemies compose this instead of inheriting from it: a sprite
// rect, the trimmed hitbox that actually collides, a sub-pixel position, and
// the walk animation. The hitbox is authoritative; the sprite rect trails it.

use glam::Vec2;

use crate::core::math::Rect;
use crate::engine::physics::{resolve_stepped, resolve_swept, Obstacle};
use crate::engine::renderer::TextureHandle;

use super::animation::{AnimationState, Facing, FrameSet};
use super::stats::{ACTOR_HEIGHT, ACTOR_WIDTH, HITBOX_INSET};

/// A moving body on the map
#[derive(Debug, Clone)]
pub struct Actor {
    /// Sub-pixel hitbox center
    position: Vec2,
    /// Full sprite rect, re-centered on the hitbox after every move
    visual: Rect,
    /// Height-trimmed rect used for collision and overlap checks
    hitbox: Rect,
    /// Unit movement direction, or zero when standing
    direction: Vec2,
    /// Movement speed in world pixels per second
    speed: f32,
    /// Walk-cycle playhead
    animation: AnimationState,
}

impl Actor {
    pub fn new(position: Vec2, speed: f32, frames: FrameSet) -> Self {
        let visual = Rect::from_center(position.round(), Vec2::new(ACTOR_WIDTH, ACTOR_HEIGHT));
        let hitbox = visual.inflate(0.0, -HITBOX_INSET);
        Self {
            position,
            visual,
            hitbox,
            direction: Vec2::ZERO,
            speed,
            animation: AnimationState::new(frames),
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn visual(&self) -> Rect {
        self.visual
    }

    pub fn hitbox(&self) -> Rect {
        self.hitbox
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn facing(&self) -> Facing {
        self.animation.facing()
    }

    pub fn set_direction(&mut self, direction: Vec2) {
        self.direction = direction;
    }

    /// Move one axis at a time, clamping each before the next
    pub fn move_stepped(&mut self, dt: f32, obstacles: &[Obstacle]) {
        resolve_stepped(
            &mut self.position,
            &mut self.hitbox,
            self.direction * self.speed,
            dt,
            obstacles,
        );
        self.visual.set_center(self.hitbox.center());
    }

    /// Move the whole step at once, then clamp both axes
    pub fn move_swept(&mut self, dt: f32, obstacles: &[Obstacle]) {
        resolve_swept(
            &mut self.position,
            &mut self.hitbox,
            self.direction * self.speed,
            dt,
            obstacles,
        );
        self.visual.set_center(self.hitbox.center());
    }

    /// Advance the walk cycle against the current direction
    pub fn animate(&mut self, dt: f32) {
        self.animation.advance(self.direction, dt);
    }

    /// The frame to draw this actor with
    pub fn current_frame(&self) -> TextureHandle {
        self.animation.current_frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use glam::vec2;

    fn frames() -> FrameSet {
        FrameSet::uniform(vec![TextureHandle::from_raw(0), TextureHandle::from_raw(1)]).unwrap()
    }

    fn wall(x: f32, y: f32, w: f32, h: f32) -> Obstacle {
        Obstacle::solid(Rect::new(vec2(x, y), vec2(w, h)))
    }

    #[test]
    fn test_new_actor_rects_share_a_center() {
        let actor = Actor::new(vec2(100.0, 100.0), 400.0, frames());

        assert_eq!(actor.visual().center(), vec2(100.0, 100.0));
        assert_eq!(actor.hitbox().center(), vec2(100.0, 100.0));
        assert_eq!(actor.visual().size, vec2(ACTOR_WIDTH, ACTOR_HEIGHT));
        assert_eq!(
            actor.hitbox().size,
            vec2(ACTOR_WIDTH, ACTOR_HEIGHT - HITBOX_INSET)
        );
    }

    #[test]
    fn test_stepped_movement_drags_the_sprite_along() {
        let mut actor = Actor::new(vec2(100.0, 100.0), 100.0, frames());
        actor.set_direction(vec2(1.0, 0.0));

        actor.move_stepped(0.5, &[]);

        assert_abs_diff_eq!(actor.position().x, 150.0);
        assert_eq!(actor.visual().center(), actor.hitbox().center());
    }

    #[test]
    fn test_stepped_movement_stops_at_walls() {
        let mut actor = Actor::new(vec2(100.0, 100.0), 100.0, frames());
        actor.set_direction(vec2(1.0, 0.0));

        actor.move_stepped(0.5, &[wall(140.0, 0.0, 64.0, 300.0)]);

        assert_eq!(actor.hitbox().right(), 140.0);
        assert_eq!(actor.visual().center(), actor.hitbox().center());
    }

    #[test]
    fn test_swept_movement_resolves_both_axes() {
        let mut actor = Actor::new(vec2(100.0, 100.0), 100.0, frames());
        actor.set_direction(vec2(1.0, 1.0).normalize());

        actor.move_swept(1.0, &[wall(140.0, 0.0, 64.0, 400.0)]);

        assert_eq!(actor.hitbox().right(), 140.0);
        assert!(actor.position().y > 100.0, "free axis keeps its motion");
    }

    #[test]
    fn test_animate_uses_current_direction() {
        let mut actor = Actor::new(vec2(0.0, 0.0), 100.0, frames());

        actor.set_direction(vec2(0.0, -1.0));
        actor.animate(0.1);
        assert_eq!(actor.facing(), Facing::Up);

        actor.set_direction(Vec2::ZERO);
        actor.animate(0.1);
        assert_eq!(actor.facing(), Facing::Up);
        assert_eq!(actor.current_frame(), TextureHandle::from_raw(0));
    }
}

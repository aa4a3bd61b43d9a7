// Actor tuning values
//
// Every actor shares the same sprite footprint; archetypes differ in speed
// and, for enemies, pursuit radii.

use std::ops::RangeInclusive;

/// Sprite width in world pixels (16 map-native, scaled 2x)
pub const ACTOR_WIDTH: f32 = 32.0;

/// Sprite height in world pixels (32 map-native, scaled 2x)
pub const ACTOR_HEIGHT: f32 = 64.0;

/// Total height shaved off the sprite rect to form the hitbox, so heads can
/// overlap scenery while feet still collide
pub const HITBOX_INSET: f32 = 30.0;

/// Player walk speed in world pixels per second
pub const PLAYER_SPEED: f32 = 400.0;

/// Pursuit tuning for one enemy archetype
#[derive(Debug, Clone)]
pub struct PursuitProfile {
    /// Speed range sampled once at spawn, world pixels per second
    pub speed: RangeInclusive<f32>,
    /// Radius inside which an idle enemy wakes up and starts chasing
    pub detect_radius: f32,
    /// Radius the catch range widens to once a chase has begun
    pub chase_radius: f32,
}

/// Regular roamer: slower than the player, shakeable with some distance
pub const ENEMY_PROFILE: PursuitProfile = PursuitProfile {
    speed: 80.0..=140.0,
    detect_radius: 200.0,
    chase_radius: 700.0,
};

/// Boss: faster, wakes earlier, nearly impossible to lose
pub const BOSS_PROFILE: PursuitProfile = PursuitProfile {
    speed: 150.0..=190.0,
    detect_radius: 320.0,
    chase_radius: 900.0,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hitbox_fits_inside_sprite() {
        assert!(HITBOX_INSET < ACTOR_HEIGHT);
        assert!(HITBOX_INSET > 0.0);
    }

    #[test]
    fn test_enemies_slower_than_player() {
        assert!(*ENEMY_PROFILE.speed.end() < PLAYER_SPEED);
        assert!(*BOSS_PROFILE.speed.end() < PLAYER_SPEED);
    }

    #[test]
    fn test_chase_radius_at_least_detect_radius() {
        assert!(ENEMY_PROFILE.chase_radius >= ENEMY_PROFILE.detect_radius);
        assert!(BOSS_PROFILE.chase_radius >= BOSS_PROFILE.detect_radius);
    }

    #[test]
    fn test_boss_outpaces_regular_enemies() {
        assert!(*BOSS_PROFILE.speed.start() > *ENEMY_PROFILE.speed.end());
        assert!(BOSS_PROFILE.detect_radius > ENEMY_PROFILE.detect_radius);
    }
}

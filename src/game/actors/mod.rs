// Actor system
//
// This module contains everything that moves on a map:
// - The shared actor body (position, hitbox, sprite rect)
// - The four-facing walk animation machine
// - Player (input-driven) and Enemy (pursuit-driven) entities
// - Tuning constants for both archetypes

pub mod actor;
pub mod animation;
pub mod enemy;
pub mod player;
pub mod stats;

// Re-export commonly used types
pub use actor::Actor;
pub use animation::{AnimationError, AnimationState, Facing, FrameSet};
pub use enemy::Enemy;
pub use player::Player;
pub use stats::{PursuitProfile, BOSS_PROFILE, ENEMY_PROFILE, PLAYER_SPEED};

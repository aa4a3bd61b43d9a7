// Four-facing walk animation
//
// An actor's facing follows its movement direction and its walk cycle is a
// real-valued frame counter. The displayed frame is the truncated counter
// modulo the cycle length, so the cycle loops for as long as the actor keeps
// moving and snaps back to the first frame the moment it stops.

use glam::Vec2;

use crate::engine::renderer::TextureHandle;

/// How many walk frames elapse per second of movement
pub const ANIMATION_RATE: f32 = 5.0;

/// The four directions an actor can face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facing {
    Left,
    Right,
    Up,
    Down,
}

impl Default for Facing {
    fn default() -> Self {
        Self::Down
    }
}

impl Facing {
    /// Facing after one frame of moving in `direction`; zero keeps `self`.
    ///
    /// Both axes are checked every frame, horizontal first, so diagonal
    /// movement always lands on the vertical facing (last write wins).
    pub fn from_direction(self, direction: Vec2) -> Self {
        let mut facing = self;
        if direction.x != 0.0 {
            facing = if direction.x > 0.0 {
                Self::Right
            } else {
                Self::Left
            };
        }
        if direction.y != 0.0 {
            facing = if direction.y > 0.0 { Self::Down } else { Self::Up };
        }
        facing
    }

    /// Stable name for logs and texture labels
    pub fn name(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

/// Animation configuration errors
#[derive(Debug, thiserror::Error)]
pub enum AnimationError {
    #[error("Frame set has no frames for facing {0:?}")]
    EmptyFacing(Facing),
}

/// Walk-cycle frames for every facing.
///
/// Construction rejects empty cycles, so lookups never have to guard
/// against a zero-length modulo.
#[derive(Debug, Clone)]
pub struct FrameSet {
    left: Vec<TextureHandle>,
    right: Vec<TextureHandle>,
    up: Vec<TextureHandle>,
    down: Vec<TextureHandle>,
}

impl FrameSet {
    pub fn new(
        left: Vec<TextureHandle>,
        right: Vec<TextureHandle>,
        up: Vec<TextureHandle>,
        down: Vec<TextureHandle>,
    ) -> Result<Self, AnimationError> {
        let set = Self {
            left,
            right,
            up,
            down,
        };
        for facing in [Facing::Left, Facing::Right, Facing::Up, Facing::Down] {
            if set.frames(facing).is_empty() {
                return Err(AnimationError::EmptyFacing(facing));
            }
        }
        Ok(set)
    }

    /// Reuse one cycle for all four facings
    pub fn uniform(frames: Vec<TextureHandle>) -> Result<Self, AnimationError> {
        Self::new(frames.clone(), frames.clone(), frames.clone(), frames)
    }

    /// The walk cycle for a facing, always non-empty
    pub fn frames(&self, facing: Facing) -> &[TextureHandle] {
        match facing {
            Facing::Left => &self.left,
            Facing::Right => &self.right,
            Facing::Up => &self.up,
            Facing::Down => &self.down,
        }
    }
}

/// Animation playhead for one actor
#[derive(Debug, Clone)]
pub struct AnimationState {
    frames: FrameSet,
    facing: Facing,
    frame_index: f32,
}

impl AnimationState {
    pub fn new(frames: FrameSet) -> Self {
        Self {
            frames,
            facing: Facing::default(),
            frame_index: 0.0,
        }
    }

    /// Advance the walk cycle for one frame of movement.
    /// A zero direction resets the cycle but keeps the facing.
    pub fn advance(&mut self, direction: Vec2, dt: f32) {
        self.facing = self.facing.from_direction(direction);
        if direction != Vec2::ZERO {
            self.frame_index += ANIMATION_RATE * dt;
        } else {
            self.frame_index = 0.0;
        }
    }

    /// The frame to display right now
    pub fn current_frame(&self) -> TextureHandle {
        let cycle = self.frames.frames(self.facing);
        cycle[self.frame_index as usize % cycle.len()]
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn frame_index(&self) -> f32 {
        self.frame_index
    }
}

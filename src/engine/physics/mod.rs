// Hand-rolled tile collision, resolved one axis at a time

mod collision;

pub use collision::{clamp_axis, resolve_stepped, resolve_swept, Obstacle, ObstacleKind};

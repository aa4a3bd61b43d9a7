// Engine modules: renderer, physics, input, maps, timing

pub mod game_loop;
pub mod input;
pub mod map;
pub mod physics;
pub mod renderer;

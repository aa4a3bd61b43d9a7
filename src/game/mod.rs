// Game layer
//
// Everything above the engine: actor behavior, the built-in maps, the
// session that outlives map swaps, and the world that ties one frame
// together.

pub mod actors;
pub mod art;
pub mod maps;
pub mod session;
pub mod world;

// Re-export commonly used types
pub use actors::{Enemy, Player};
pub use art::{build_catalog, SpriteCatalog};
pub use maps::{BuiltinMaps, MapId, MapSource};
pub use session::Session;
pub use world::{Phase, World, WorldError};

// Built-in demo maps
//
// Maps are authored as one ASCII grid read through several legends: the
// same picture yields the ground layer, the decoration layer, the relic
// tile, and the collision strips. Spawn points and trigger zones are listed
// separately in map-native pixels (cell = 32), matching the grid by hand.

use crate::engine::map::{grid_objects, MapBuilder, MapData, MapObject, TileId, TILE_SIZE};

/// Identifies one of the built-in maps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapId {
    Snow,
    Forest,
}

impl MapId {
    /// The map a transition from this one leads to
    pub fn other(self) -> Self {
        match self {
            Self::Snow => Self::Forest,
            Self::Forest => Self::Snow,
        }
    }

    /// Stable name for logs
    pub fn name(self) -> &'static str {
        match self {
            Self::Snow => "snow",
            Self::Forest => "forest",
        }
    }
}

/// Anything that can hand out map content by id
pub trait MapSource {
    fn map(&self, id: MapId) -> Option<&MapData>;
}

// Tile ids shared by the built-in maps and the sprite catalog
pub const TILE_SNOW: TileId = TileId(0);
pub const TILE_ICE: TileId = TileId(1);
pub const TILE_ROCK: TileId = TileId(2);
pub const TILE_GRASS: TileId = TileId(3);
pub const TILE_TREE: TileId = TileId(4);
pub const TILE_RELIC: TileId = TileId(5);

/// The two maps shipped with the game, built once up front
pub struct BuiltinMaps {
    snow: MapData,
    forest: MapData,
}

impl Default for BuiltinMaps {
    fn default() -> Self {
        Self::new()
    }
}

impl BuiltinMaps {
    pub fn new() -> Self {
        Self {
            snow: snow_map(),
            forest: forest_map(),
        }
    }
}

impl MapSource for BuiltinMaps {
    fn map(&self, id: MapId) -> Option<&MapData> {
        Some(match id {
            MapId::Snow => &self.snow,
            MapId::Forest => &self.forest,
        })
    }
}

// Grid glyphs: '#' solid scenery, '.' open ground, '~' ice patch,
// 'R' relic cell. The border gap on the right (rows 6-7) is the doorway
// covered by the Transition zone below.
const SNOW_ROWS: [&str; 14] = [
    "####################",
    "#..................#",
    "#..................#",
    "#...##.........~...#",
    "#..................#",
    "#..................#",
    "#...................",
    "#...................",
    "#......##..........#",
    "#..................#",
    "#.........R........#",
    "#..................#",
    "#..................#",
    "####################",
];

fn snow_map() -> MapData {
    MapBuilder::new("snow")
        .tile_layer(
            "Ground",
            &SNOW_ROWS,
            &[
                ('.', TILE_SNOW),
                ('#', TILE_SNOW),
                ('R', TILE_SNOW),
                ('~', TILE_ICE),
            ],
        )
        .tile_layer("Objects", &SNOW_ROWS, &[('#', TILE_ROCK)])
        .tile_layer("Relics", &SNOW_ROWS, &[('R', TILE_RELIC)])
        .object_layer("Collision", grid_objects(&SNOW_ROWS, '#', TILE_SIZE))
        .object_layer(
            "Places",
            vec![
                MapObject::point(112.0, 80.0, "Hero"),
                MapObject::point(528.0, 144.0, "Enemy"),
                MapObject::point(528.0, 336.0, "Enemy"),
                MapObject::rect(608.0, 192.0, 32.0, 64.0, "Transition"),
                MapObject::rect(320.0, 320.0, 32.0, 32.0, "Relic"),
            ],
        )
        .build()
}

// Doorway back to the snow map is the border gap on the left (rows 6-7).
const FOREST_ROWS: [&str; 14] = [
    "####################",
    "#..................#",
    "#.......##.........#",
    "#.....R............#",
    "#..................#",
    "#..................#",
    "...................#",
    "...................#",
    "#..........##......#",
    "#..................#",
    "#..................#",
    "#..................#",
    "#..................#",
    "####################",
];

fn forest_map() -> MapData {
    MapBuilder::new("forest")
        .tile_layer(
            "Ground",
            &FOREST_ROWS,
            &[('.', TILE_GRASS), ('#', TILE_GRASS), ('R', TILE_GRASS)],
        )
        .tile_layer("Objects", &FOREST_ROWS, &[('#', TILE_TREE)])
        .tile_layer("Relics", &FOREST_ROWS, &[('R', TILE_RELIC)])
        .object_layer("Collision", grid_objects(&FOREST_ROWS, '#', TILE_SIZE))
        .object_layer(
            "Places",
            vec![
                MapObject::point(112.0, 208.0, "Hero"),
                MapObject::point(528.0, 80.0, "Enemy"),
                MapObject::point(336.0, 336.0, "Boss"),
                MapObject::rect(0.0, 192.0, 32.0, 64.0, "Transition"),
                MapObject::rect(192.0, 96.0, 32.0, 32.0, "Relic"),
            ],
        )
        .build()
}

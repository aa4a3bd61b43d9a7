// Tile map data model
//
// A map is an ordered stack of named layers. Tile layers place images on a
// fixed grid; object layers carry free rectangles and named points. The
// engine treats map content as opaque data: which layer names matter is the
// game's business.

/// Base tile size of the map grid, in map-native units
pub const TILE_SIZE: f32 = 32.0;

/// Uniform scale applied when projecting map-native units to world pixels
pub const SCALE_FACTOR: f32 = 2.0;

/// World-pixel span of one scaled tile
pub const WORLD_TILE: f32 = TILE_SIZE * SCALE_FACTOR;

/// Identifies one tile image in whatever tileset the game registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId(pub u16);

/// One tile stamped onto a grid cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilePlacement {
    pub grid_x: u32,
    pub grid_y: u32,
    pub tile: TileId,
}

/// A free rectangle (or point, when the size is zero) in map-native units
#[derive(Debug, Clone, PartialEq)]
pub struct MapObject {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Spawn/trigger label; empty for anonymous geometry
    pub name: String,
}

impl MapObject {
    pub fn rect(x: f32, y: f32, width: f32, height: f32, name: &str) -> Self {
        Self {
            x,
            y,
            width,
            height,
            name: name.to_string(),
        }
    }

    /// A named zero-size marker, positioned at a point
    pub fn point(x: f32, y: f32, name: &str) -> Self {
        Self::rect(x, y, 0.0, 0.0, name)
    }
}

/// Payload of one layer
#[derive(Debug, Clone)]
pub enum LayerData {
    Tiles(Vec<TilePlacement>),
    Objects(Vec<MapObject>),
}

impl LayerData {
    fn kind(&self) -> &'static str {
        match self {
            LayerData::Tiles(_) => "tiles",
            LayerData::Objects(_) => "objects",
        }
    }
}

/// A named layer inside a map
#[derive(Debug, Clone)]
pub struct Layer {
    pub name: String,
    pub data: LayerData,
}

/// Map access errors
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Map {map:?} has no layer named {layer:?}")]
    MissingLayer { map: String, layer: String },

    #[error("Layer {layer:?} of map {map:?} holds {actual}, expected {expected}")]
    WrongLayerKind {
        map: String,
        layer: String,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Complete, immutable map content
#[derive(Debug, Clone)]
pub struct MapData {
    name: String,
    layers: Vec<Layer>,
}

impl MapData {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_layer(&self, layer: &str) -> bool {
        self.layers.iter().any(|l| l.name == layer)
    }

    pub fn layer(&self, layer: &str) -> Result<&Layer, MapError> {
        self.layers
            .iter()
            .find(|l| l.name == layer)
            .ok_or_else(|| MapError::MissingLayer {
                map: self.name.clone(),
                layer: layer.to_string(),
            })
    }

    /// Tile placements of a tile layer
    pub fn tiles(&self, layer: &str) -> Result<&[TilePlacement], MapError> {
        let found = self.layer(layer)?;
        match &found.data {
            LayerData::Tiles(tiles) => Ok(tiles),
            other => Err(MapError::WrongLayerKind {
                map: self.name.clone(),
                layer: layer.to_string(),
                expected: "tiles",
                actual: other.kind(),
            }),
        }
    }

    /// Objects of an object layer
    pub fn objects(&self, layer: &str) -> Result<&[MapObject], MapError> {
        let found = self.layer(layer)?;
        match &found.data {
            LayerData::Objects(objects) => Ok(objects),
            other => Err(MapError::WrongLayerKind {
                map: self.name.clone(),
                layer: layer.to_string(),
                expected: "objects",
                actual: other.kind(),
            }),
        }
    }
}

/// Builds `MapData` from ASCII art grids and object lists.
///
/// Each row string is one grid row; each character one cell. The legend maps
/// characters to tile ids, and anything not in the legend leaves the cell
/// empty.
pub struct MapBuilder {
    name: String,
    layers: Vec<Layer>,
}

impl MapBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            layers: Vec::new(),
        }
    }

    pub fn tile_layer(mut self, name: &str, rows: &[&str], legend: &[(char, TileId)]) -> Self {
        let mut tiles = Vec::new();
        for (grid_y, row) in rows.iter().enumerate() {
            for (grid_x, cell) in row.chars().enumerate() {
                let Some(&(_, tile)) = legend.iter().find(|(c, _)| *c == cell) else {
                    continue;
                };
                tiles.push(TilePlacement {
                    grid_x: grid_x as u32,
                    grid_y: grid_y as u32,
                    tile,
                });
            }
        }
        self.layers.push(Layer {
            name: name.to_string(),
            data: LayerData::Tiles(tiles),
        });
        self
    }

    pub fn object_layer(mut self, name: &str, objects: Vec<MapObject>) -> Self {
        self.layers.push(Layer {
            name: name.to_string(),
            data: LayerData::Objects(objects),
        });
        self
    }

    pub fn build(self) -> MapData {
        MapData {
            name: self.name,
            layers: self.layers,
        }
    }
}

/// Turn marked cells of an ASCII grid into anonymous collision rectangles,
/// merging horizontal runs within each row into single strips
pub fn grid_objects(rows: &[&str], solid: char, cell: f32) -> Vec<MapObject> {
    let mut objects = Vec::new();

    for (grid_y, row) in rows.iter().enumerate() {
        let mut run_start: Option<usize> = None;
        let columns = row.chars().count();

        for (grid_x, glyph) in row.chars().enumerate() {
            if glyph == solid {
                run_start.get_or_insert(grid_x);
                continue;
            }
            if let Some(start) = run_start.take() {
                objects.push(strip(start, grid_x, grid_y, cell));
            }
        }
        if let Some(start) = run_start {
            objects.push(strip(start, columns, grid_y, cell));
        }
    }

    objects
}

fn strip(start: usize, end: usize, grid_y: usize, cell: f32) -> MapObject {
    MapObject::rect(
        start as f32 * cell,
        grid_y as f32 * cell,
        (end - start) as f32 * cell,
        cell,
        "",
    )
}

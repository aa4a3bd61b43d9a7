// Placeholder art and the sprite catalog
//
// All art is generated at startup: flat-color tiles with a sparse stipple,
// actors as colored bodies whose face strip marks the facing and whose feet
// alternate with the walk cycle. Everything is uploaded once and addressed
// by handle afterwards.

use std::collections::HashMap;

use anyhow::Result;
use image::{Rgba, RgbaImage};

use crate::engine::map::TileId;
use crate::engine::renderer::{Renderer, TextureHandle};

use super::actors::animation::{Facing, FrameSet};
use super::maps::{TILE_GRASS, TILE_ICE, TILE_RELIC, TILE_ROCK, TILE_SNOW, TILE_TREE};

/// Frames in every walk cycle
const WALK_FRAMES: usize = 4;

/// Map-native pixel size of one tile image
const TILE_PIXELS: u32 = 32;

/// Map-native pixel size of one actor frame
const FRAME_WIDTH: u32 = 16;
const FRAME_HEIGHT: u32 = 32;

/// Every texture handle the game draws with
pub struct SpriteCatalog {
    player_frames: FrameSet,
    enemy_frames: FrameSet,
    boss_frames: FrameSet,
    tiles: HashMap<TileId, TextureHandle>,
    overlay: TextureHandle,
}

impl SpriteCatalog {
    pub fn new(
        player_frames: FrameSet,
        enemy_frames: FrameSet,
        boss_frames: FrameSet,
        tiles: HashMap<TileId, TextureHandle>,
        overlay: TextureHandle,
    ) -> Self {
        Self {
            player_frames,
            enemy_frames,
            boss_frames,
            tiles,
            overlay,
        }
    }

    pub fn player_frames(&self) -> &FrameSet {
        &self.player_frames
    }

    pub fn enemy_frames(&self) -> &FrameSet {
        &self.enemy_frames
    }

    pub fn boss_frames(&self) -> &FrameSet {
        &self.boss_frames
    }

    /// The image registered for a tile id, if any
    pub fn tile(&self, id: TileId) -> Option<TextureHandle> {
        self.tiles.get(&id).copied()
    }

    /// Plain white texture used for tinted debug quads
    pub fn overlay(&self) -> TextureHandle {
        self.overlay
    }
}

/// Generate and upload the full placeholder catalog
pub fn build_catalog(renderer: &mut Renderer) -> Result<SpriteCatalog> {
    let mut tiles = HashMap::new();
    let mut tile = |id: TileId, label: &str, img: RgbaImage| -> Result<()> {
        tiles.insert(id, renderer.load_texture_image(label, &img)?);
        Ok(())
    };

    tile(
        TILE_SNOW,
        "tile_snow",
        tile_image([228, 233, 238, 255], [203, 212, 222, 255]),
    )?;
    tile(
        TILE_ICE,
        "tile_ice",
        tile_image([176, 205, 229, 255], [214, 232, 244, 255]),
    )?;
    tile(
        TILE_ROCK,
        "tile_rock",
        tile_image([121, 112, 104, 255], [87, 80, 74, 255]),
    )?;
    tile(
        TILE_GRASS,
        "tile_grass",
        tile_image([88, 129, 61, 255], [70, 107, 48, 255]),
    )?;
    tile(
        TILE_TREE,
        "tile_tree",
        tile_image([54, 83, 42, 255], [33, 54, 26, 255]),
    )?;
    tile(TILE_RELIC, "tile_relic", relic_image())?;

    let player_frames = upload_actor_frames(renderer, "player", [57, 98, 171, 255])?;
    let enemy_frames = upload_actor_frames(renderer, "enemy", [146, 52, 48, 255])?;
    let boss_frames = upload_actor_frames(renderer, "boss", [84, 37, 97, 255])?;

    let overlay = renderer.create_color_texture("overlay_white", [255, 255, 255, 255])?;

    Ok(SpriteCatalog::new(
        player_frames,
        enemy_frames,
        boss_frames,
        tiles,
        overlay,
    ))
}

fn upload_actor_frames(renderer: &mut Renderer, name: &str, body: [u8; 4]) -> Result<FrameSet> {
    let mut cycle = |facing: Facing| -> Result<Vec<TextureHandle>> {
        (0..WALK_FRAMES)
            .map(|frame| {
                let label = format!("{}_{}_{}", name, facing.name(), frame);
                renderer.load_texture_image(&label, &actor_frame(body, facing, frame))
            })
            .collect()
    };

    let left = cycle(Facing::Left)?;
    let right = cycle(Facing::Right)?;
    let up = cycle(Facing::Up)?;
    let down = cycle(Facing::Down)?;
    Ok(FrameSet::new(left, right, up, down)?)
}

/// Flat tile with a sparse accent stipple
fn tile_image(base: [u8; 4], accent: [u8; 4]) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(TILE_PIXELS, TILE_PIXELS, Rgba(base));
    for (x, y) in [(5, 7), (13, 21), (22, 12), (27, 26), (9, 28)] {
        img.put_pixel(x, y, Rgba(accent));
    }
    img
}

/// Gold diamond on a transparent field, drawn over the ground layer
fn relic_image() -> RgbaImage {
    let mut img = RgbaImage::new(TILE_PIXELS, TILE_PIXELS);
    let center = (TILE_PIXELS / 2) as i32;
    for y in 0..TILE_PIXELS {
        for x in 0..TILE_PIXELS {
            let d = (x as i32 - center).abs() + (y as i32 - center).abs();
            if d <= 7 {
                let color = if d <= 3 {
                    [255, 230, 120, 255]
                } else {
                    [212, 175, 55, 255]
                };
                img.put_pixel(x, y, Rgba(color));
            }
        }
    }
    img
}

/// One walk frame: body fill, a face strip on the facing side (none when
/// walking away), feet alternating with the frame parity
fn actor_frame(body: [u8; 4], facing: Facing, frame: usize) -> RgbaImage {
    let mut img = RgbaImage::new(FRAME_WIDTH, FRAME_HEIGHT);

    for y in 4u32..26 {
        for x in 2u32..14 {
            img.put_pixel(x, y, Rgba(body));
        }
    }

    let face = Rgba([235, 221, 190, 255]);
    let face_columns: Option<std::ops::Range<u32>> = match facing {
        Facing::Left => Some(2..6),
        Facing::Right => Some(10..14),
        Facing::Down => Some(5..11),
        Facing::Up => None,
    };
    if let Some(columns) = face_columns {
        for y in 6u32..12 {
            for x in columns.clone() {
                img.put_pixel(x, y, face);
            }
        }
    }

    let bob = (frame % 2) as u32 * 2;
    for x in 3u32..7 {
        for y in (26 + bob)..(30 + bob) {
            img.put_pixel(x, y, Rgba(body));
        }
    }
    for x in 9u32..13 {
        for y in (28 - bob)..(32 - bob) {
            img.put_pixel(x, y, Rgba(body));
        }
    }

    img
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_image_base_and_stipple() {
        let img = tile_image([10, 20, 30, 255], [200, 200, 200, 255]);
        assert_eq!(img.get_pixel(0, 0).0, [10, 20, 30, 255]);
        assert_eq!(img.get_pixel(5, 7).0, [200, 200, 200, 255]);
    }

    #[test]
    fn test_relic_image_is_transparent_outside_the_diamond() {
        let img = relic_image();
        assert_eq!(img.get_pixel(0, 0).0[3], 0);
        assert_eq!(img.get_pixel(16, 16).0, [255, 230, 120, 255]);
    }

    #[test]
    fn test_actor_frames_mark_the_facing() {
        let body = [100, 0, 0, 255];
        let left = actor_frame(body, Facing::Left, 0);
        let right = actor_frame(body, Facing::Right, 0);
        let up = actor_frame(body, Facing::Up, 0);

        // Face strip sits on the side the actor looks toward
        assert_ne!(left.get_pixel(3, 8).0, body);
        assert_eq!(left.get_pixel(12, 8).0, body);
        assert_ne!(right.get_pixel(12, 8).0, body);

        // Walking away shows only the back of the head
        assert_eq!(up.get_pixel(8, 8).0, body);
    }

    #[test]
    fn test_walk_frames_alternate() {
        let body = [0, 100, 0, 255];
        let stand = actor_frame(body, Facing::Down, 0);
        let step = actor_frame(body, Facing::Down, 1);
        assert_ne!(stand.as_raw(), step.as_raw());
    }

    #[test]
    fn test_catalog_lookups() {
        let frames = FrameSet::uniform(vec![TextureHandle::from_raw(0)]).unwrap();
        let mut tiles = HashMap::new();
        tiles.insert(TILE_SNOW, TextureHandle::from_raw(1));

        let catalog = SpriteCatalog::new(
            frames.clone(),
            frames.clone(),
            frames,
            tiles,
            TextureHandle::from_raw(2),
        );

        assert_eq!(catalog.tile(TILE_SNOW), Some(TextureHandle::from_raw(1)));
        assert_eq!(catalog.tile(TILE_TREE), None);
        assert_eq!(catalog.overlay(), TextureHandle::from_raw(2));
    }
}

// Game world assembly and per-frame orchestration
//
// A world is one live map plus the session that outlives map swaps. Map
// loads are staged off to the side and committed only after every piece
// succeeded, so a failed load leaves the current map fully playable.

use std::time::Instant;

use glam::{vec2, Vec2, Vec4};
use log::{error, info, warn};
use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::core::math::Rect;
use crate::engine::input::{Action, InputState};
use crate::engine::map::{
    MapData, MapError, MapObject, TileId, TilePlacement, SCALE_FACTOR, WORLD_TILE,
};
use crate::engine::physics::{Obstacle, ObstacleKind};
use crate::engine::renderer::{RenderFrame, SpriteInstance};

use super::actors::{Actor, Enemy, FrameSet, Player, PursuitProfile, BOSS_PROFILE, ENEMY_PROFILE};
use super::art::SpriteCatalog;
use super::maps::{MapId, MapSource};
use super::session::{Session, CONTACT_DAMAGE, WIN_RELIC_COUNT};

/// Where the game is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Loading,
    Running,
    Transitioning,
    GameOver,
    GameWon,
}

/// Errors staging a map into a playable state
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    #[error("No map registered for {0:?}")]
    UnknownMap(MapId),

    #[error("Map '{map}' has no Hero spawn")]
    MissingHeroSpawn { map: String },

    #[error("Map '{map}' places tile {tile:?} but no image is registered for it")]
    UnknownTile { map: String, tile: TileId },

    #[error(transparent)]
    Map(#[from] MapError),
}

/// Everything a map swap produces, built before any of it is installed
struct StagedMap {
    map_id: MapId,
    tiles: Vec<SpriteInstance>,
    relic_tiles: Vec<SpriteInstance>,
    obstacles: Vec<Obstacle>,
    player: Player,
    enemies: Vec<Enemy>,
}

/// The live game state
pub struct World {
    source: Box<dyn MapSource>,
    catalog: SpriteCatalog,
    session: Session,
    phase: Phase,
    rng: SmallRng,

    // Contents of the current map, replaced wholesale on a committed load
    tiles: Vec<SpriteInstance>,
    relic_tiles: Vec<SpriteInstance>,
    obstacles: Vec<Obstacle>,
    player: Player,
    enemies: Vec<Enemy>,

    show_hitboxes: bool,
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

impl World {
    /// Build a world with its starting map already live
    pub fn new(
        source: Box<dyn MapSource>,
        catalog: SpriteCatalog,
        start_map: MapId,
    ) -> Result<Self, WorldError> {
        Self::with_rng(source, catalog, start_map, SmallRng::from_entropy())
    }

    /// Like [`World::new`] with a caller-supplied rng, so spawn rolls can
    /// be reproduced
    pub fn with_rng(
        source: Box<dyn MapSource>,
        catalog: SpriteCatalog,
        start_map: MapId,
        mut rng: SmallRng,
    ) -> Result<Self, WorldError> {
        let session = Session::new(start_map);
        let staged = stage(source.as_ref(), &catalog, &session, &mut rng, start_map)?;

        Ok(Self {
            source,
            catalog,
            session,
            phase: Phase::Running,
            rng,
            tiles: staged.tiles,
            relic_tiles: staged.relic_tiles,
            obstacles: staged.obstacles,
            player: staged.player,
            enemies: staged.enemies,
            show_hitboxes: false,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// False once the player quit, won, or died; the app loop exits on it
    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }

    /// Stage `map_id` and swap it in. On failure the world keeps running
    /// on the current map.
    pub fn load_map(&mut self, map_id: MapId) -> Result<(), WorldError> {
        self.phase = Phase::Loading;
        match stage(
            self.source.as_ref(),
            &self.catalog,
            &self.session,
            &mut self.rng,
            map_id,
        ) {
            Ok(staged) => {
                self.commit(staged);
                info!("Map '{}' is live", map_id.name());
                Ok(())
            }
            Err(err) => {
                self.phase = Phase::Running;
                Err(err)
            }
        }
    }

    fn commit(&mut self, staged: StagedMap) {
        self.session.set_current_map(staged.map_id);
        self.tiles = staged.tiles;
        self.relic_tiles = staged.relic_tiles;
        self.obstacles = staged.obstacles;
        self.player = staged.player;
        self.enemies = staged.enemies;
        self.phase = Phase::Running;
    }

    fn switch_map(&mut self, map_id: MapId) {
        if let Err(err) = self.load_map(map_id) {
            error!("Failed to load map '{}': {}", map_id.name(), err);
        }
    }

    /// Advance the world by one frame.
    ///
    /// Zone effects are checked after movement in a fixed order: transition,
    /// then relic pickup, then the win check, then the death check. A frame
    /// that both completes the relic set and drops health to zero is a win.
    pub fn update(&mut self, input: &InputState, dt: f32, now: Instant) {
        if self.phase != Phase::Running || !self.session.is_running() {
            return;
        }

        if input.just_pressed(Action::Quit) {
            info!("Quit requested");
            self.session.stop();
            return;
        }
        if input.just_pressed(Action::ToggleHitboxes) {
            self.show_hitboxes = !self.show_hitboxes;
        }
        if input.just_pressed(Action::MapSlot1) {
            self.switch_map(MapId::Snow);
            return;
        }
        if input.just_pressed(Action::MapSlot2) {
            self.switch_map(MapId::Forest);
            return;
        }

        self.session.tick(now);

        self.player.update(input, dt, &self.obstacles);
        let player_position = self.player.position();
        for enemy in &mut self.enemies {
            enemy.update(player_position, dt, &self.obstacles);
        }

        let hitbox = self.player.hitbox();
        let touched = self
            .enemies
            .iter()
            .any(|enemy| enemy.hitbox().intersects(&hitbox));
        if touched && self.session.take_damage(CONTACT_DAMAGE, now) {
            warn!("Player hit, {} health left", self.session.health());
        }

        if self.touching(ObstacleKind::Transition) {
            let target = self.session.current_map().other();
            info!("Transition to '{}'", target.name());
            self.phase = Phase::Transitioning;
            if let Err(err) = self.load_map(target) {
                error!("Map swap to '{}' failed: {}", target.name(), err);
            }
            return;
        }

        if self.touching(ObstacleKind::Relic) {
            let current = self.session.current_map();
            if self.session.collect_relic(current) {
                self.obstacles
                    .retain(|obstacle| obstacle.kind != ObstacleKind::Relic);
                self.relic_tiles.clear();
                info!(
                    "Relic collected on '{}', {} of {}",
                    current.name(),
                    self.session.relics_collected(),
                    WIN_RELIC_COUNT
                );
            }
        }

        if self.session.has_won() {
            info!("Every relic collected, the quest is complete");
            self.phase = Phase::GameWon;
            self.session.stop();
            return;
        }

        if self.session.is_dead() {
            warn!("Out of health");
            self.phase = Phase::GameOver;
            self.session.stop();
        }
    }

    /// Does the player hitbox overlap any obstacle of `kind`?
    fn touching(&self, kind: ObstacleKind) -> bool {
        let hitbox = self.player.hitbox();
        self.obstacles
            .iter()
            .any(|obstacle| obstacle.kind == kind && obstacle.rect.intersects(&hitbox))
    }

    /// Flatten the world into one frame for the renderer, back to front:
    /// tiles, relics, enemies, the player, then any debug overlay
    pub fn render_frame(&self) -> RenderFrame {
        let mut frame = RenderFrame::new(self.player.position());
        for sprite in &self.tiles {
            frame.push(*sprite);
        }
        for sprite in &self.relic_tiles {
            frame.push(*sprite);
        }
        for enemy in &self.enemies {
            frame.push(actor_sprite(enemy.actor()));
        }
        frame.push(actor_sprite(self.player.actor()));

        if self.show_hitboxes {
            self.push_debug_overlay(&mut frame);
        }
        frame
    }

    fn push_debug_overlay(&self, frame: &mut RenderFrame) {
        let overlay = self.catalog.overlay();
        for obstacle in &self.obstacles {
            let color = match obstacle.kind {
                ObstacleKind::Solid => Vec4::new(0.9, 0.2, 0.2, 0.35),
                ObstacleKind::Transition => Vec4::new(0.2, 0.4, 0.9, 0.35),
                ObstacleKind::Relic => Vec4::new(0.9, 0.8, 0.2, 0.35),
            };
            frame.push(
                SpriteInstance::new(overlay, obstacle.rect.min, obstacle.rect.size)
                    .with_color(color),
            );
        }

        let actor_color = Vec4::new(0.2, 0.9, 0.3, 0.35);
        let hitbox = self.player.hitbox();
        frame.push(SpriteInstance::new(overlay, hitbox.min, hitbox.size).with_color(actor_color));
        for enemy in &self.enemies {
            let hitbox = enemy.hitbox();
            frame.push(
                SpriteInstance::new(overlay, hitbox.min, hitbox.size).with_color(actor_color),
            );
        }
    }
}

/// Build everything `map_id` needs without touching the live world
fn stage(
    source: &dyn MapSource,
    catalog: &SpriteCatalog,
    session: &Session,
    rng: &mut SmallRng,
    map_id: MapId,
) -> Result<StagedMap, WorldError> {
    let map = source.map(map_id).ok_or(WorldError::UnknownMap(map_id))?;
    let relic_taken = session.relic_taken(map_id);

    let mut tiles = Vec::new();
    for layer in ["Ground", "Objects"] {
        for placement in map.tiles(layer)? {
            tiles.push(tile_sprite(catalog, map, placement)?);
        }
    }

    // The relic tile layer is optional; maps without a relic just skip it
    let mut relic_tiles = Vec::new();
    if !relic_taken && map.has_layer("Relics") {
        for placement in map.tiles("Relics")? {
            relic_tiles.push(tile_sprite(catalog, map, placement)?);
        }
    }

    let mut obstacles = Vec::new();
    for object in map.objects("Collision")? {
        obstacles.push(Obstacle::solid(world_rect(object)));
    }

    let mut hero = None;
    let mut enemies = Vec::new();
    for object in map.objects("Places")? {
        match object.name.as_str() {
            "Hero" => hero = Some(world_point(object)),
            "Enemy" => {
                enemies.push(spawn(object, &ENEMY_PROFILE, catalog.enemy_frames().clone(), rng))
            }
            "Boss" => {
                enemies.push(spawn(object, &BOSS_PROFILE, catalog.boss_frames().clone(), rng))
            }
            "Transition" => obstacles.push(Obstacle::transition(world_rect(object))),
            "Relic" => {
                if !relic_taken {
                    obstacles.push(Obstacle::relic(world_rect(object)));
                }
            }
            other => warn!("Map '{}' places unknown object '{}'", map.name(), other),
        }
    }

    let hero = hero.ok_or_else(|| WorldError::MissingHeroSpawn {
        map: map.name().to_string(),
    })?;
    let player = Player::new(hero, catalog.player_frames().clone());

    Ok(StagedMap {
        map_id,
        tiles,
        relic_tiles,
        obstacles,
        player,
        enemies,
    })
}

/// Spawn a pursuer with a speed rolled from its profile
fn spawn(
    object: &MapObject,
    profile: &PursuitProfile,
    frames: FrameSet,
    rng: &mut SmallRng,
) -> Enemy {
    let speed = rng.gen_range(profile.speed.clone());
    Enemy::new(world_point(object), speed, profile, frames)
}

fn tile_sprite(
    catalog: &SpriteCatalog,
    map: &MapData,
    placement: &TilePlacement,
) -> Result<SpriteInstance, WorldError> {
    let texture = catalog
        .tile(placement.tile)
        .ok_or_else(|| WorldError::UnknownTile {
            map: map.name().to_string(),
            tile: placement.tile,
        })?;
    Ok(SpriteInstance::new(
        texture,
        vec2(placement.grid_x as f32, placement.grid_y as f32) * WORLD_TILE,
        Vec2::splat(WORLD_TILE),
    ))
}

/// Scale a map-native object rect into world space
fn world_rect(object: &MapObject) -> Rect {
    Rect::new(
        vec2(object.x, object.y) * SCALE_FACTOR,
        vec2(object.width, object.height) * SCALE_FACTOR,
    )
}

/// Scale a map-native spawn point into world space
fn world_point(object: &MapObject) -> Vec2 {
    vec2(object.x, object.y) * SCALE_FACTOR
}

fn actor_sprite(actor: &Actor) -> SpriteInstance {
    let visual = actor.visual();
    SpriteInstance::new(actor.current_frame(), visual.min, visual.size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    use crate::engine::map::{grid_objects, MapBuilder, TILE_SIZE};
    use crate::engine::renderer::TextureHandle;
    use crate::game::maps::{
        BuiltinMaps, TILE_GRASS, TILE_ICE, TILE_RELIC, TILE_ROCK, TILE_SNOW, TILE_TREE,
    };

    // 6x5 arena with a two-cell doorway on the right edge
    const ARENA_ROWS: [&str; 5] = [
        "######",
        "#....#",
        "#.....",
        "#.....",
        "######",
    ];

    // Same arena mirrored, doorway on the left edge
    const MIRROR_ROWS: [&str; 5] = [
        "######",
        "#....#",
        ".....#",
        ".....#",
        "######",
    ];

    // Closed arena with a relic cell at grid (2, 2)
    const RELIC_ROWS: [&str; 5] = [
        "######",
        "#....#",
        "#.R..#",
        "#....#",
        "######",
    ];

    fn arena(name: &str, rows: &[&str], places: Vec<MapObject>) -> MapData {
        MapBuilder::new(name)
            .tile_layer(
                "Ground",
                rows,
                &[('.', TILE_SNOW), ('#', TILE_SNOW), ('R', TILE_SNOW)],
            )
            .tile_layer("Objects", rows, &[('#', TILE_ROCK)])
            .tile_layer("Relics", rows, &[('R', TILE_RELIC)])
            .object_layer("Collision", grid_objects(rows, '#', TILE_SIZE))
            .object_layer("Places", places)
            .build()
    }

    struct TestSource {
        snow: MapData,
        forest: Option<MapData>,
    }

    impl MapSource for TestSource {
        fn map(&self, id: MapId) -> Option<&MapData> {
            match id {
                MapId::Snow => Some(&self.snow),
                MapId::Forest => self.forest.as_ref(),
            }
        }
    }

    fn test_catalog() -> SpriteCatalog {
        let player = FrameSet::uniform(vec![TextureHandle::from_raw(0)]).unwrap();
        let enemy = FrameSet::uniform(vec![TextureHandle::from_raw(4)]).unwrap();
        let boss = FrameSet::uniform(vec![TextureHandle::from_raw(5)]).unwrap();
        let mut tiles = HashMap::new();
        tiles.insert(TILE_SNOW, TextureHandle::from_raw(1));
        tiles.insert(TILE_ROCK, TextureHandle::from_raw(2));
        tiles.insert(TILE_RELIC, TextureHandle::from_raw(3));
        tiles.insert(TILE_ICE, TextureHandle::from_raw(6));
        tiles.insert(TILE_GRASS, TextureHandle::from_raw(7));
        tiles.insert(TILE_TREE, TextureHandle::from_raw(8));
        SpriteCatalog::new(player, enemy, boss, tiles, TextureHandle::from_raw(9))
    }

    // Snow: hero and a far enemy, doorway right. Forest: hero only,
    // doorway left. Hero points are map-native, so world positions double.
    fn basic_source() -> TestSource {
        TestSource {
            snow: arena(
                "snow",
                &ARENA_ROWS,
                vec![
                    MapObject::point(128.0, 80.0, "Hero"),
                    MapObject::point(64.0, 96.0, "Enemy"),
                    MapObject::rect(160.0, 64.0, 32.0, 64.0, "Transition"),
                    MapObject::point(32.0, 32.0, "Campfire"),
                ],
            ),
            forest: Some(arena(
                "forest",
                &MIRROR_ROWS,
                vec![
                    MapObject::point(96.0, 80.0, "Hero"),
                    MapObject::rect(0.0, 64.0, 32.0, 64.0, "Transition"),
                ],
            )),
        }
    }

    // Hero spawns directly on the relic zone; optionally an enemy on top
    fn relic_places(with_enemy: bool) -> Vec<MapObject> {
        let mut places = vec![
            MapObject::point(64.0, 64.0, "Hero"),
            MapObject::rect(64.0, 64.0, 32.0, 32.0, "Relic"),
        ];
        if with_enemy {
            places.push(MapObject::point(64.0, 64.0, "Enemy"));
        }
        places
    }

    fn world_with(source: TestSource) -> World {
        World::with_rng(
            Box::new(source),
            test_catalog(),
            MapId::Snow,
            SmallRng::seed_from_u64(7),
        )
        .unwrap()
    }

    fn held(actions: &[Action]) -> InputState {
        let mut state = InputState::new();
        for &action in actions {
            state.press(action);
        }
        state
    }

    #[test]
    fn test_world_starts_on_the_hero_spawn() {
        let world = world_with(basic_source());

        assert_eq!(world.phase(), Phase::Running);
        assert!(world.is_running());
        assert_eq!(world.session().current_map(), MapId::Snow);
        assert_eq!(world.player().position(), vec2(256.0, 160.0));

        assert_eq!(world.enemies().len(), 1);
        assert_eq!(world.enemies()[0].position(), vec2(128.0, 192.0));

        let kinds = |kind| {
            world
                .obstacles()
                .iter()
                .filter(|o| o.kind == kind)
                .count()
        };
        assert!(kinds(ObstacleKind::Solid) > 0);
        assert_eq!(kinds(ObstacleKind::Transition), 1);
        assert_eq!(kinds(ObstacleKind::Relic), 0);
    }

    #[test]
    fn test_staging_requires_a_hero_spawn() {
        let source = TestSource {
            snow: arena("snow", &ARENA_ROWS, vec![]),
            forest: None,
        };
        let err = World::with_rng(
            Box::new(source),
            test_catalog(),
            MapId::Snow,
            SmallRng::seed_from_u64(1),
        )
        .unwrap_err();
        assert!(matches!(err, WorldError::MissingHeroSpawn { .. }));
    }

    #[test]
    fn test_staging_requires_registered_tiles() {
        let frames = FrameSet::uniform(vec![TextureHandle::from_raw(0)]).unwrap();
        let mut tiles = HashMap::new();
        tiles.insert(TILE_SNOW, TextureHandle::from_raw(1));
        let catalog = SpriteCatalog::new(
            frames.clone(),
            frames.clone(),
            frames,
            tiles,
            TextureHandle::from_raw(9),
        );

        let source = TestSource {
            snow: arena(
                "snow",
                &ARENA_ROWS,
                vec![MapObject::point(128.0, 80.0, "Hero")],
            ),
            forest: None,
        };
        let err = World::with_rng(
            Box::new(source),
            catalog,
            MapId::Snow,
            SmallRng::seed_from_u64(1),
        )
        .unwrap_err();

        match err {
            WorldError::UnknownTile { map, tile } => {
                assert_eq!(map, "snow");
                assert_eq!(tile, TILE_ROCK);
            }
            other => panic!("Expected an unknown tile error, got {other:?}"),
        }
    }

    #[test]
    fn test_relic_tile_layer_is_optional() {
        let map = MapBuilder::new("snow")
            .tile_layer("Ground", &ARENA_ROWS, &[('.', TILE_SNOW), ('#', TILE_SNOW)])
            .tile_layer("Objects", &ARENA_ROWS, &[('#', TILE_ROCK)])
            .object_layer("Collision", grid_objects(&ARENA_ROWS, '#', TILE_SIZE))
            .object_layer("Places", vec![MapObject::point(128.0, 80.0, "Hero")])
            .build();

        let world = world_with(TestSource {
            snow: map,
            forest: None,
        });
        assert_eq!(world.phase(), Phase::Running);
    }

    #[test]
    fn test_failed_load_keeps_the_current_map_live() {
        let mut world = world_with(TestSource {
            snow: arena(
                "snow",
                &ARENA_ROWS,
                vec![MapObject::point(128.0, 80.0, "Hero")],
            ),
            forest: None,
        });
        let before = world.player().position();

        let err = world.load_map(MapId::Forest).unwrap_err();
        assert!(matches!(err, WorldError::UnknownMap(MapId::Forest)));

        assert_eq!(world.phase(), Phase::Running);
        assert_eq!(world.session().current_map(), MapId::Snow);
        assert_eq!(world.player().position(), before);
        assert!(!world.render_frame().sprites.is_empty());
    }

    #[test]
    fn test_transition_swaps_maps_and_keeps_session_state() {
        let mut source = basic_source();
        // Stack an enemy on the hero so the first frame costs one health
        source.snow = arena(
            "snow",
            &ARENA_ROWS,
            vec![
                MapObject::point(128.0, 80.0, "Hero"),
                MapObject::point(128.0, 80.0, "Enemy"),
                MapObject::rect(160.0, 64.0, 32.0, 64.0, "Transition"),
            ],
        );
        let mut world = world_with(source);
        let t0 = Instant::now();

        world.update(&InputState::new(), 0.1, t0);
        assert_eq!(world.session().health(), 4);

        // Two frames of walking right cross into the doorway zone
        world.update(&held(&[Action::MoveRight]), 0.1, t0 + Duration::from_millis(100));
        assert_eq!(world.player().position(), vec2(296.0, 160.0));
        world.update(&held(&[Action::MoveRight]), 0.1, t0 + Duration::from_millis(200));

        assert_eq!(world.session().current_map(), MapId::Forest);
        assert_eq!(world.phase(), Phase::Running);
        assert_eq!(world.player().position(), vec2(192.0, 160.0));
        assert!(world.enemies().is_empty());
        assert_eq!(world.session().health(), 4, "Damage must survive the swap");
    }

    #[test]
    fn test_transitions_round_trip_between_the_two_maps() {
        let mut world = world_with(basic_source());
        let t0 = Instant::now();

        // Two frames of walking right reach the forest, three of walking
        // left from its spawn reach the doorway home
        for frame in 0..2 {
            world.update(
                &held(&[Action::MoveRight]),
                0.1,
                t0 + Duration::from_millis(frame * 100),
            );
        }
        assert_eq!(world.session().current_map(), MapId::Forest);

        for frame in 2..5 {
            world.update(
                &held(&[Action::MoveLeft]),
                0.1,
                t0 + Duration::from_millis(frame * 100),
            );
        }
        assert_eq!(world.session().current_map(), MapId::Snow);
        assert_eq!(world.phase(), Phase::Running);
        assert_eq!(world.player().position(), vec2(256.0, 160.0));
        assert_eq!(world.enemies().len(), 1, "Snow respawns its enemy");
    }

    #[test]
    fn test_relic_stays_collected_across_reloads() {
        let mut world = world_with(TestSource {
            snow: arena("snow", &RELIC_ROWS, relic_places(false)),
            forest: None,
        });
        let t0 = Instant::now();

        let before = world.render_frame().sprites.len();
        world.update(&InputState::new(), 0.016, t0);

        assert_eq!(world.session().relics_collected(), 1);
        assert!(world.session().relic_taken(MapId::Snow));
        let after = world.render_frame().sprites.len();
        assert_eq!(after, before - 1, "The relic tile must disappear");
        assert!(world
            .obstacles()
            .iter()
            .all(|o| o.kind != ObstacleKind::Relic));

        // Reloading the map must not bring the relic back
        world.load_map(MapId::Snow).unwrap();
        assert!(world
            .obstacles()
            .iter()
            .all(|o| o.kind != ObstacleKind::Relic));
        assert_eq!(world.render_frame().sprites.len(), after);

        world.update(&InputState::new(), 0.016, t0 + Duration::from_millis(50));
        assert_eq!(world.session().relics_collected(), 1);
    }

    #[test]
    fn test_collecting_every_relic_wins() {
        let mut world = world_with(TestSource {
            snow: arena("snow", &RELIC_ROWS, relic_places(false)),
            forest: Some(arena("forest", &RELIC_ROWS, relic_places(false))),
        });
        let t0 = Instant::now();

        world.update(&InputState::new(), 0.016, t0);
        assert_eq!(world.session().relics_collected(), 1);
        assert_eq!(world.phase(), Phase::Running);

        world.load_map(MapId::Forest).unwrap();
        world.update(&InputState::new(), 0.016, t0 + Duration::from_millis(100));

        assert_eq!(world.session().relics_collected(), 2);
        assert_eq!(world.phase(), Phase::GameWon);
        assert!(!world.is_running());
    }

    #[test]
    fn test_contact_damage_respects_the_invincibility_window() {
        let mut world = world_with(TestSource {
            snow: arena(
                "snow",
                &ARENA_ROWS,
                vec![
                    MapObject::point(128.0, 80.0, "Hero"),
                    MapObject::point(128.0, 80.0, "Enemy"),
                ],
            ),
            forest: None,
        });
        let t0 = Instant::now();

        world.update(&InputState::new(), 0.016, t0);
        assert_eq!(world.session().health(), 4);

        // Still overlapping, still inside the window
        world.update(&InputState::new(), 0.016, t0 + Duration::from_millis(300));
        world.update(&InputState::new(), 0.016, t0 + Duration::from_millis(600));
        assert_eq!(world.session().health(), 4);

        world.update(&InputState::new(), 0.016, t0 + Duration::from_millis(1100));
        assert_eq!(world.session().health(), 3);
    }

    #[test]
    fn test_running_out_of_health_ends_the_game() {
        let mut world = world_with(TestSource {
            snow: arena(
                "snow",
                &ARENA_ROWS,
                vec![
                    MapObject::point(128.0, 80.0, "Hero"),
                    MapObject::point(128.0, 80.0, "Enemy"),
                ],
            ),
            forest: None,
        });
        let t0 = Instant::now();

        for hit in 0..5 {
            world.update(
                &InputState::new(),
                0.016,
                t0 + Duration::from_millis(hit * 1100),
            );
        }

        assert_eq!(world.session().health(), 0);
        assert_eq!(world.phase(), Phase::GameOver);
        assert!(!world.is_running());

        // A dead world ignores further frames
        let before = world.player().position();
        world.update(
            &held(&[Action::MoveRight]),
            0.1,
            t0 + Duration::from_millis(6000),
        );
        assert_eq!(world.player().position(), before);
    }

    #[test]
    fn test_winning_and_dying_on_the_same_frame_is_a_win() {
        let mut world = world_with(TestSource {
            snow: arena("snow", &RELIC_ROWS, relic_places(true)),
            forest: Some(arena("forest", &RELIC_ROWS, relic_places(true))),
        });
        let t0 = Instant::now();

        // Four spaced hits on the snow map, plus its relic on the first
        for hit in 0..4 {
            world.update(
                &InputState::new(),
                0.016,
                t0 + Duration::from_millis(hit * 1100),
            );
        }
        assert_eq!(world.session().health(), 1);
        assert_eq!(world.session().relics_collected(), 1);

        // The forest frame lands the killing blow and the final relic
        world.load_map(MapId::Forest).unwrap();
        world.update(&InputState::new(), 0.016, t0 + Duration::from_millis(5500));

        assert!(world.session().is_dead());
        assert!(world.session().has_won());
        assert_eq!(world.phase(), Phase::GameWon);
        assert!(!world.is_running());
    }

    #[test]
    fn test_map_slots_jump_straight_to_a_map() {
        let mut world = world_with(basic_source());
        let t0 = Instant::now();

        world.update(&held(&[Action::MapSlot2]), 0.016, t0);
        assert_eq!(world.session().current_map(), MapId::Forest);
        assert_eq!(world.player().position(), vec2(192.0, 160.0));

        world.update(
            &held(&[Action::MapSlot1]),
            0.016,
            t0 + Duration::from_millis(100),
        );
        assert_eq!(world.session().current_map(), MapId::Snow);
        assert_eq!(world.player().position(), vec2(256.0, 160.0));
    }

    #[test]
    fn test_quit_stops_the_session() {
        let mut world = world_with(basic_source());
        let t0 = Instant::now();

        world.update(&held(&[Action::Quit]), 0.016, t0);
        assert!(!world.is_running());

        let before = world.player().position();
        world.update(
            &held(&[Action::MoveRight]),
            0.1,
            t0 + Duration::from_millis(100),
        );
        assert_eq!(world.player().position(), before);
    }

    #[test]
    fn test_hitbox_overlay_adds_debug_quads() {
        let mut world = world_with(basic_source());
        let before = world.render_frame().sprites.len();

        world.update(&held(&[Action::ToggleHitboxes]), 0.016, Instant::now());

        let expected = before + world.obstacles().len() + 1 + world.enemies().len();
        assert_eq!(world.render_frame().sprites.len(), expected);
    }

    #[test]
    fn test_render_frame_orders_back_to_front() {
        let world = world_with(basic_source());
        let frame = world.render_frame();

        assert_eq!(frame.camera_center, world.player().position());
        assert_eq!(frame.sprites[0].texture, TextureHandle::from_raw(1));
        assert_eq!(
            frame.sprites.last().unwrap().texture,
            TextureHandle::from_raw(0),
            "The player draws on top"
        );

        let enemy_at = frame
            .sprites
            .iter()
            .position(|s| s.texture == TextureHandle::from_raw(4))
            .unwrap();
        assert!(enemy_at < frame.sprites.len() - 1);
    }

    #[test]
    fn test_spawned_speeds_come_from_the_profiles() {
        let world = world_with(TestSource {
            snow: arena(
                "snow",
                &ARENA_ROWS,
                vec![
                    MapObject::point(128.0, 80.0, "Hero"),
                    MapObject::point(64.0, 64.0, "Enemy"),
                    MapObject::point(64.0, 96.0, "Enemy"),
                    MapObject::point(128.0, 96.0, "Boss"),
                ],
            ),
            forest: None,
        });

        let speeds: Vec<f32> = world
            .enemies()
            .iter()
            .map(|enemy| enemy.actor().speed())
            .collect();
        assert_eq!(speeds.len(), 3);
        assert_eq!(
            speeds
                .iter()
                .filter(|s| ENEMY_PROFILE.speed.contains(*s))
                .count(),
            2
        );
        assert_eq!(
            speeds
                .iter()
                .filter(|s| BOSS_PROFILE.speed.contains(*s))
                .count(),
            1
        );
    }

    #[test]
    fn test_builtin_maps_stage_with_the_full_catalog() {
        let mut world = World::with_rng(
            Box::new(BuiltinMaps::new()),
            test_catalog(),
            MapId::Snow,
            SmallRng::seed_from_u64(3),
        )
        .unwrap();
        assert_eq!(world.enemies().len(), 2);

        world.load_map(MapId::Forest).unwrap();
        assert_eq!(world.enemies().len(), 2);
        assert!(world
            .enemies()
            .iter()
            .any(|enemy| BOSS_PROFILE.speed.contains(&enemy.actor().speed())));
    }
}

// Session state that survives map transitions
//
// One Session lives for one game run. Map loads rebuild every live entity,
// but health, the invincibility window, and the relic tally carry straight
// through. All timing is injected as `Instant` values so tests can drive a
// fabricated timeline.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use super::maps::MapId;

/// Hearts the player starts a run with
pub const MAX_HEALTH: i32 = 5;

/// Health lost per enemy contact
pub const CONTACT_DAMAGE: i32 = 1;

/// How long damage is ignored after a hit lands
pub const INVINCIBILITY_WINDOW: Duration = Duration::from_secs(1);

/// Relics needed to win the run
pub const WIN_RELIC_COUNT: u32 = 2;

/// Cross-map persistent game state
#[derive(Debug, Clone)]
pub struct Session {
    current_map: MapId,
    health: i32,
    /// End of the active invincibility window, if one is running
    invincible_until: Option<Instant>,
    relics_collected: u32,
    relic_taken: HashMap<MapId, bool>,
    running: bool,
}

impl Session {
    pub fn new(start_map: MapId) -> Self {
        Self {
            current_map: start_map,
            health: MAX_HEALTH,
            invincible_until: None,
            relics_collected: 0,
            relic_taken: HashMap::new(),
            running: true,
        }
    }

    pub fn current_map(&self) -> MapId {
        self.current_map
    }

    /// Record the map the live world now shows
    pub fn set_current_map(&mut self, map: MapId) {
        self.current_map = map;
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_until.is_some()
    }

    /// Apply damage at time `now`. Fully ignored while the invincibility
    /// window is active; otherwise the damage lands and a fresh window
    /// starts. Returns whether the damage landed.
    pub fn take_damage(&mut self, amount: i32, now: Instant) -> bool {
        if let Some(until) = self.invincible_until {
            if now < until {
                return false;
            }
        }
        self.health = (self.health - amount).max(0);
        self.invincible_until = Some(now + INVINCIBILITY_WINDOW);
        true
    }

    /// Expire the invincibility window once its deadline has passed
    pub fn tick(&mut self, now: Instant) {
        if let Some(until) = self.invincible_until {
            if now >= until {
                self.invincible_until = None;
            }
        }
    }

    /// Mark a map's relic as taken. Idempotent: only the first call for a
    /// map counts it. Returns whether this pickup was new.
    pub fn collect_relic(&mut self, map: MapId) -> bool {
        let taken = self.relic_taken.entry(map).or_insert(false);
        if *taken {
            return false;
        }
        *taken = true;
        self.relics_collected += 1;
        true
    }

    pub fn relic_taken(&self, map: MapId) -> bool {
        self.relic_taken.get(&map).copied().unwrap_or(false)
    }

    pub fn relics_collected(&self) -> u32 {
        self.relics_collected
    }

    pub fn has_won(&self) -> bool {
        self.relics_collected >= WIN_RELIC_COUNT
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// End the main loop after this frame
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

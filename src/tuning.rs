//! Data-driven game balance
//!
//! Every gameplay knob the sim reads lives in [`Tuning`]. Defaults match the
//! constants in [`crate::consts`]; a JSON override can be supplied for
//! playtesting without a recompile.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay tuning values, owned by the game state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Playfield dimensions
    pub screen_width: f32,
    pub screen_height: f32,
    /// Height of the ground strip at the bottom of the screen
    pub ground_height: f32,

    /// Downward acceleration per tick
    pub gravity: f32,
    /// Velocity damping per tick
    pub air_resistance: f32,
    /// Upward velocity set by a jump (negative = up)
    pub jump_strength: f32,
    /// Bird bounding box edge length
    pub bird_size: f32,

    pub pipe_width: f32,
    pub pipe_gap: f32,
    /// Horizontal scroll speed per tick (pipes and coins)
    pub pipe_speed: f32,

    pub coin_size: f32,
    /// Probability a freshly spawned pipe carries a coin in its gap
    pub coin_spawn_chance: f64,

    pub cloud_count: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            ground_height: GROUND_HEIGHT,
            gravity: GRAVITY,
            air_resistance: AIR_RESISTANCE,
            jump_strength: JUMP_STRENGTH,
            bird_size: BIRD_SIZE,
            pipe_width: PIPE_WIDTH,
            pipe_gap: PIPE_GAP,
            pipe_speed: PIPE_SPEED,
            coin_size: COIN_SIZE,
            coin_spawn_chance: COIN_SPAWN_CHANCE,
            cloud_count: CLOUD_COUNT,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// y coordinate of the ground line (top of the ground strip)
    #[inline]
    pub fn ground_line(&self) -> f32 {
        self.screen_height - self.ground_height
    }

    /// Highest y at which a pipe gap's top edge may spawn
    #[inline]
    pub fn gap_min_y(&self) -> f32 {
        GAP_MIN_Y
    }

    /// Lowest y at which a pipe gap's top edge may spawn (exclusive).
    /// Keeps the full gap on-screen above the ground with a margin.
    #[inline]
    pub fn gap_max_y(&self) -> f32 {
        self.ground_line() - self.pipe_gap - GAP_GROUND_MARGIN
    }
}

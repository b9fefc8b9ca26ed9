//! Flap Dash - a side-scrolling flap-and-dodge arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `runner`: Fixed-cadence sim and spawn drivers
//! - `render`: Renderer contract (rendering itself lives outside the core)
//! - `highscores`: Process-lifetime leaderboard
//! - `tuning`: Data-driven game balance

pub mod highscores;
pub mod render;
pub mod runner;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (~60 Hz)
    pub const SIM_DT_MS: f64 = 16.0;
    /// Maximum sim substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    pub const GROUND_HEIGHT: f32 = 100.0;

    /// Bird defaults
    pub const BIRD_SIZE: f32 = 34.0;
    pub const BIRD_START_X: f32 = SCREEN_WIDTH / 4.0;
    pub const BIRD_START_Y: f32 = SCREEN_HEIGHT / 2.0;
    pub const GRAVITY: f32 = 0.5;
    pub const AIR_RESISTANCE: f32 = 0.98;
    pub const JUMP_STRENGTH: f32 = -10.0;
    /// Wing animation keeps cycling this long after a jump (ms)
    pub const FLAP_WINDOW_MS: f64 = 150.0;
    /// Number of wing animation frames
    pub const WING_FRAMES: u8 = 4;

    /// Pipe defaults
    pub const PIPE_WIDTH: f32 = 80.0;
    pub const PIPE_GAP: f32 = 200.0;
    pub const PIPE_SPEED: f32 = 5.0;
    /// Wall-clock spawn cadence, independent of the sim tick rate
    pub const PIPE_SPAWN_INTERVAL_MS: f64 = 1500.0;
    /// Gap top edge never spawns above this y
    pub const GAP_MIN_Y: f32 = 80.0;
    /// Clearance kept between gap bottom edge and the ground
    pub const GAP_GROUND_MARGIN: f32 = 20.0;

    /// Coin defaults
    pub const COIN_SIZE: f32 = 20.0;
    pub const COIN_SPAWN_CHANCE: f64 = 0.3;
    /// Coin spins this many degrees per tick
    pub const COIN_SPIN_DEG: f32 = 3.0;

    /// Background cloud population (held constant by recycling)
    pub const CLOUD_COUNT: usize = 5;
    /// Clouds despawn once fully past this x
    pub const CLOUD_OFFSCREEN_X: f32 = -200.0;

    /// Particle burst sizes per event
    pub const BURST_JUMP: usize = 10;
    pub const BURST_PASS: usize = 15;
    pub const BURST_COIN: usize = 20;
    pub const BURST_CRASH: usize = 30;

    /// Welcome-screen play button hit region
    pub const PLAY_BUTTON_W: f32 = 200.0;
    pub const PLAY_BUTTON_H: f32 = 60.0;
    pub const PLAY_BUTTON_X: f32 = (SCREEN_WIDTH - PLAY_BUTTON_W) / 2.0;
    pub const PLAY_BUTTON_Y: f32 = SCREEN_HEIGHT - 200.0;
}

//! Game state and core simulation types
//!
//! Every entity is plain state plus a per-tick update rule. The collections
//! here are mutated only by the tick/spawn drivers (single writer); the
//! renderer reads them through the accessors after each tick completes.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, world idling behind the overlay
    Welcome,
    /// Ready to play, simulation not yet running
    Idle,
    /// Active gameplay
    Playing,
    /// Run ended
    GameOver,
}

/// The player's bird
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    pub pos: Vec2,
    /// Vertical velocity; horizontal position never changes
    pub velocity: f32,
    /// Derived from velocity each tick, clamped to [-25, 90] degrees
    rotation: f32,
    /// Wing animation frame, 0..WING_FRAMES
    wing_frame: u8,
    /// Wall-clock timestamp of the last jump (ms)
    last_flap_ms: f64,
    flapping: bool,
}

impl Bird {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            velocity: 0.0,
            rotation: 0.0,
            wing_frame: 0,
            last_flap_ms: 0.0,
            flapping: false,
        }
    }

    /// Advance one tick: velocity before position, rotation always derived
    pub fn update(&mut self, gravity: f32, resistance: f32, now_ms: f64) {
        self.velocity += gravity;
        self.velocity *= resistance;
        self.pos.y += self.velocity;

        if self.flapping && now_ms - self.last_flap_ms < FLAP_WINDOW_MS {
            self.wing_frame = (self.wing_frame + 1) % WING_FRAMES;
        } else {
            self.wing_frame = 0;
            self.flapping = false;
        }

        self.rotation = (self.velocity * 1.2).clamp(-25.0, 90.0);
    }

    /// Kick the bird upward and restart the wing animation
    pub fn jump(&mut self, strength: f32, now_ms: f64) {
        self.velocity = strength;
        self.flapping = true;
        self.last_flap_ms = now_ms;
        self.wing_frame = 1;
    }

    /// Tilt angle in degrees, for the renderer
    #[inline]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Current wing animation frame, for the renderer
    #[inline]
    pub fn wing_frame(&self) -> u8 {
        self.wing_frame
    }

    /// Bounding box used for all collision tests
    pub fn bounds(&self, size: f32) -> Rect {
        Rect::new(self.pos.x, self.pos.y, size, size)
    }
}

/// A paired top/bottom barrier with a vertical passable gap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipe {
    /// Left edge; decreases monotonically
    pub x: f32,
    /// Top edge of the gap, fixed at spawn
    pub gap_y: f32,
    /// False until the bird clears the trailing edge; never reverts
    passed: bool,
}

impl Pipe {
    pub fn new(x: f32, gap_y: f32) -> Self {
        Self {
            x,
            gap_y,
            passed: false,
        }
    }

    pub fn advance(&mut self, speed: f32) {
        self.x -= speed;
    }

    #[inline]
    pub fn is_passed(&self) -> bool {
        self.passed
    }

    pub fn mark_passed(&mut self) {
        self.passed = true;
    }

    pub fn is_offscreen(&self, t: &Tuning) -> bool {
        self.x + t.pipe_width < 0.0
    }

    /// Barrier above the gap
    pub fn top_rect(&self, t: &Tuning) -> Rect {
        Rect::new(self.x, 0.0, t.pipe_width, self.gap_y)
    }

    /// Barrier below the gap (extends into the ground strip)
    pub fn bottom_rect(&self, t: &Tuning) -> Rect {
        let top = self.gap_y + t.pipe_gap;
        Rect::new(self.x, top, t.pipe_width, t.screen_height - top)
    }

    /// Center of the passable gap, where pass bursts and coins appear
    pub fn gap_center(&self, t: &Tuning) -> Vec2 {
        Vec2::new(self.x + t.pipe_width, self.gap_y + t.pipe_gap / 2.0)
    }
}

/// A bonus item drifting through a pipe gap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    /// Center position; x decreases, y is the rest height of the bounce
    pub pos: Vec2,
    /// Spin in degrees, grows without bound (renderer wraps it)
    pub rotation: f32,
    /// Current vertical bounce offset
    bounce: f32,
}

impl Coin {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            rotation: 0.0,
            bounce: 0.0,
        }
    }

    /// Advance one tick. The bounce tracks wall-clock time so its motion is
    /// frame-rate independent; the clock is injected for testability.
    pub fn advance(&mut self, speed: f32, now_ms: f64) {
        self.pos.x -= speed;
        self.rotation += COIN_SPIN_DEG;
        self.bounce = ((now_ms / 200.0).sin() * 5.0) as f32;
    }

    #[inline]
    pub fn bounce(&self) -> f32 {
        self.bounce
    }

    pub fn is_offscreen(&self, t: &Tuning) -> bool {
        self.pos.x + t.coin_size < 0.0
    }

    /// Bounding box centered on the coin
    pub fn bounds(&self, t: &Tuning) -> Rect {
        Rect::new(
            self.pos.x - t.coin_size / 2.0,
            self.pos.y - t.coin_size / 2.0,
            t.coin_size,
            t.coin_size,
        )
    }
}

/// Cloud silhouette variants. Behavior is identical; only the drawn shape
/// differs, so the renderer switches on this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloudKind {
    Puffy,
    Banded,
    Wispy,
}

impl CloudKind {
    /// Variants are assigned round-robin as clouds are created
    pub fn from_seq(seq: u32) -> Self {
        match seq % 3 {
            0 => CloudKind::Puffy,
            1 => CloudKind::Banded,
            _ => CloudKind::Wispy,
        }
    }
}

/// Non-interactive background filler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cloud {
    pub pos: Vec2,
    /// Horizontal drift per tick, fixed at creation
    pub speed: f32,
    pub scale: f32,
    pub kind: CloudKind,
}

impl Cloud {
    pub fn advance(&mut self) {
        self.pos.x -= self.speed;
    }

    pub fn is_offscreen(&self) -> bool {
        self.pos.x < CLOUD_OFFSCREEN_X
    }
}

/// Short-lived visual feedback spawned on scoring/collision/jump events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Shrinks by a fixed factor each tick
    pub size: f32,
    pub color: [u8; 3],
    /// Remaining ticks; dead at zero
    life: i32,
}

impl Particle {
    pub fn new(pos: Vec2, rng: &mut Pcg32) -> Self {
        Self {
            pos,
            vel: Vec2::new(rng.random_range(-3.0..3.0), rng.random_range(-3.0..3.0)),
            size: rng.random_range(2.0..10.0),
            color: [
                rng.random_range(100..=255),
                rng.random_range(100..=255),
                rng.random_range(100..=255),
            ],
            life: rng.random_range(20..50),
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        self.vel.y += 0.1;
        self.life -= 1;
        self.size *= 0.95;
    }

    pub fn is_dead(&self) -> bool {
        self.life <= 0
    }

    /// Opacity for the renderer, derived from remaining life
    pub fn alpha(&self) -> f32 {
        (self.life as f32 / 50.0).clamp(0.0, 1.0)
    }
}

/// Complete game state. The sim driver is the sole writer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub bird: Bird,
    pub pipes: Vec<Pipe>,
    pub coins: Vec<Coin>,
    pub clouds: Vec<Cloud>,
    /// Visual only, not worth persisting
    #[serde(skip)]
    pub particles: Vec<Particle>,
    /// Pipes cleared this session; monotonic within a session
    pub score: u32,
    /// Best score seen this process; monotonic across sessions
    pub high_score: u32,
    /// Coins picked up this session
    pub coins_collected: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Global animation counter, cycles 0..10
    pub flap_cycle: u8,
    /// Running count of clouds ever created, drives variant round-robin
    cloud_seq: u32,
}

impl GameState {
    /// Fresh state on the welcome screen with default tuning
    pub fn new(rng: &mut Pcg32) -> Self {
        Self::with_tuning(Tuning::default(), rng)
    }

    pub fn with_tuning(tuning: Tuning, rng: &mut Pcg32) -> Self {
        let mut state = Self {
            phase: GamePhase::Welcome,
            bird: Bird::new(BIRD_START_X, BIRD_START_Y),
            pipes: Vec::new(),
            coins: Vec::new(),
            clouds: Vec::new(),
            particles: Vec::new(),
            score: 0,
            high_score: 0,
            coins_collected: 0,
            time_ticks: 0,
            flap_cycle: 0,
            cloud_seq: 0,
            tuning,
        };
        state.seed_clouds(rng);
        state
    }

    /// Full world reset after a run. High score survives; everything else
    /// goes back to its initial state and the phase returns to Idle.
    pub fn reset(&mut self, rng: &mut Pcg32) {
        self.bird = Bird::new(self.tuning.screen_width / 4.0, self.tuning.screen_height / 2.0);
        self.pipes.clear();
        self.coins.clear();
        self.particles.clear();
        self.clouds.clear();
        self.score = 0;
        self.coins_collected = 0;
        self.time_ticks = 0;
        self.flap_cycle = 0;
        self.cloud_seq = 0;
        self.seed_clouds(rng);
        self.phase = GamePhase::Idle;
    }

    fn seed_clouds(&mut self, rng: &mut Pcg32) {
        for _ in 0..self.tuning.cloud_count {
            self.add_cloud(rng);
        }
    }

    /// Spawn one freshly randomized cloud anywhere in the sky band
    pub fn add_cloud(&mut self, rng: &mut Pcg32) {
        let x = rng.random_range(0.0..self.tuning.screen_width);
        let y = rng.random_range(0.0..self.tuning.ground_line() - 100.0);
        let cloud = Cloud {
            pos: Vec2::new(x, y),
            speed: rng.random_range(1..=2) as f32,
            scale: rng.random_range(0.8..1.3),
            kind: CloudKind::from_seq(self.cloud_seq),
        };
        self.cloud_seq += 1;
        self.clouds.push(cloud);
    }

    /// Emit a burst of randomized particles at a point
    pub fn spawn_burst(&mut self, pos: Vec2, count: usize, rng: &mut Pcg32) {
        for _ in 0..count {
            self.particles.push(Particle::new(pos, rng));
        }
    }

    /// Welcome-screen play button hit region (pointer confirm target)
    pub fn play_button_rect(&self) -> Rect {
        Rect::new(PLAY_BUTTON_X, PLAY_BUTTON_Y, PLAY_BUTTON_W, PLAY_BUTTON_H)
    }
}

//! Fixed-cadence game drivers
//!
//! Two independent schedulable tasks share one owned [`GameState`]:
//! the simulation tick (~16 ms) and the pipe spawner (1500 ms wall clock).
//! Both run sequentially on the caller's thread, so a spawn can never
//! interleave with a sim tick mid-mutation. Input commands are applied
//! synchronously between ticks; the renderer reads the state once per frame
//! after all mutation has completed.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::highscores::HighScores;
use crate::render::Renderer;
use crate::sim::{GamePhase, GameState, TickInput, spawn_pipe, tick};
use crate::tuning::Tuning;

/// Owns the game state, the RNG, and both cadence accumulators
pub struct Runner<R: Renderer> {
    pub state: GameState,
    pub highscores: HighScores,
    renderer: R,
    rng: Pcg32,
    input: TickInput,
    sim_accum_ms: f64,
    spawn_accum_ms: f64,
    last_phase: GamePhase,
}

impl<R: Renderer> Runner<R> {
    pub fn new(seed: u64, renderer: R) -> Self {
        Self::with_tuning(seed, Tuning::default(), renderer)
    }

    pub fn with_tuning(seed: u64, tuning: Tuning, renderer: R) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let state = GameState::with_tuning(tuning, &mut rng);
        log::info!("runner initialized with seed {seed}");
        Self {
            last_phase: state.phase,
            state,
            highscores: HighScores::new(),
            renderer,
            rng,
            input: TickInput::default(),
            sim_accum_ms: 0.0,
            spawn_accum_ms: 0.0,
        }
    }

    /// Queue a confirm command for the next tick (space key)
    pub fn queue_confirm(&mut self) {
        self.input.confirm = true;
    }

    /// Queue a jump command for the next tick (space key)
    pub fn queue_flap(&mut self) {
        self.input.flap = true;
    }

    /// Pointer click: counts as confirm only inside the play button region
    /// on the welcome screen.
    pub fn pointer_click(&mut self, pos: Vec2) {
        if self.state.phase == GamePhase::Welcome && self.state.play_button_rect().contains(pos) {
            self.input.confirm = true;
        }
    }

    /// Advance by one frame's worth of wall-clock time and render.
    ///
    /// `now_ms` is the absolute clock at the end of the frame; `dt_ms` the
    /// elapsed time since the previous call.
    pub fn advance(&mut self, dt_ms: f64, now_ms: f64) {
        // Cap runaway frames so a stall cannot trigger a tick avalanche
        let dt_ms = dt_ms.min(100.0);
        self.sim_accum_ms += dt_ms;
        if self.state.phase == GamePhase::Playing {
            self.spawn_accum_ms += dt_ms;
        }

        let mut substeps = 0;
        while self.sim_accum_ms >= SIM_DT_MS && substeps < MAX_SUBSTEPS {
            let input = self.input;
            tick(&mut self.state, &input, &mut self.rng, now_ms);
            self.sim_accum_ms -= SIM_DT_MS;
            substeps += 1;

            // One-shot inputs are consumed by the tick that saw them
            self.input = TickInput::default();
            self.after_tick();
        }
        if substeps == MAX_SUBSTEPS {
            // Drop the backlog rather than spiral
            self.sim_accum_ms = 0.0;
        }

        // Spawner runs between sim ticks, never inside one
        while self.spawn_accum_ms >= PIPE_SPAWN_INTERVAL_MS {
            spawn_pipe(&mut self.state, &mut self.rng);
            self.spawn_accum_ms -= PIPE_SPAWN_INTERVAL_MS;
        }

        self.renderer.render(&self.state, now_ms);
    }

    /// Phase-transition bookkeeping after each tick
    fn after_tick(&mut self) {
        let phase = self.state.phase;
        if phase == self.last_phase {
            return;
        }

        match phase {
            GamePhase::Playing => {
                // Both drivers restart fresh when play begins
                self.spawn_accum_ms = 0.0;
            }
            GamePhase::GameOver => {
                let rank = self.highscores.add_score(
                    self.state.score,
                    self.state.coins_collected,
                    self.state.time_ticks,
                );
                if let Some(rank) = rank {
                    log::info!("run placed #{rank} on the leaderboard");
                }
            }
            _ => {}
        }
        self.last_phase = phase;
    }
}

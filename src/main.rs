//! Flap Dash entry point
//!
//! Runs a headless autopilot session against the simulation core. A real
//! frontend would swap [`LogRenderer`] for something that draws frames and
//! feed the runner from its event loop at the same cadence.

use std::time::{SystemTime, UNIX_EPOCH};

use flap_dash::consts::SIM_DT_MS;
use flap_dash::render::LogRenderer;
use flap_dash::runner::Runner;
use flap_dash::sim::GamePhase;
use flap_dash::tuning::Tuning;

/// Demo length in simulated wall-clock time
const DEMO_MS: f64 = 60_000.0;

fn main() {
    env_logger::init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let tuning = load_tuning();

    log::info!("Flap Dash starting, seed {seed}");
    let mut runner = Runner::with_tuning(seed, tuning, LogRenderer::default());
    runner.queue_confirm();

    let mut now = 0.0;
    let mut runs = 0u32;
    while now < DEMO_MS {
        autopilot(&mut runner, &mut runs);
        now += SIM_DT_MS;
        runner.advance(SIM_DT_MS, now);
    }

    let state = &runner.state;
    log::info!(
        "demo finished: {} runs, high score {}, coins {}",
        runs.max(1),
        state.high_score,
        state.coins_collected
    );
    for (i, entry) in runner.highscores.entries.iter().enumerate() {
        log::info!(
            "  #{:<2} score {:<3} coins {:<3} ({} ticks)",
            i + 1,
            entry.score,
            entry.coins,
            entry.ticks
        );
    }
}

/// Keep the bird near the next pipe gap, restart after a crash
fn autopilot<R: flap_dash::render::Renderer>(runner: &mut Runner<R>, runs: &mut u32) {
    match runner.state.phase {
        GamePhase::GameOver => {
            *runs += 1;
            runner.queue_confirm();
        }
        GamePhase::Idle => runner.queue_confirm(),
        GamePhase::Playing => {
            let state = &runner.state;
            let t = &state.tuning;
            // Aim for the first pipe still ahead of the bird, else mid-screen
            let target_y = state
                .pipes
                .iter()
                .find(|p| p.x + t.pipe_width >= state.bird.pos.x)
                .map(|p| p.gap_y + t.pipe_gap / 2.0)
                .unwrap_or(t.screen_height / 2.0);

            let bird_center = state.bird.pos.y + t.bird_size / 2.0;
            if bird_center > target_y && state.bird.velocity > 0.0 {
                runner.queue_flap();
            }
        }
        GamePhase::Welcome => {}
    }
}

/// Optional tuning overrides from `FLAP_DASH_TUNING` (path to a JSON file)
fn load_tuning() -> Tuning {
    let Some(path) = std::env::var_os("FLAP_DASH_TUNING") else {
        return Tuning::default();
    };
    match std::fs::read_to_string(&path) {
        Ok(json) => match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("loaded tuning overrides from {}", path.to_string_lossy());
                tuning
            }
            Err(e) => {
                log::warn!("ignoring bad tuning file {}: {e}", path.to_string_lossy());
                Tuning::default()
            }
        },
        Err(e) => {
            log::warn!("cannot read tuning file {}: {e}", path.to_string_lossy());
            Tuning::default()
        }
    }
}

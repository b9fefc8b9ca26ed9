//! Renderer contract
//!
//! Rendering is an external collaborator: the core hands it a read-only view
//! of [`GameState`] once per frame, after all mutation for the tick has
//! completed. Draw-relevant attributes (positions, rotation, wing frame,
//! cloud variant, particle alpha) are exposed through accessors on the
//! entity types themselves.

use crate::sim::{GamePhase, GameState};

/// A frame producer. Implementations must treat the state as read-only.
pub trait Renderer {
    /// Produce one frame from the current state. Called every frame
    /// regardless of phase, so overlay screens keep rendering.
    fn render(&mut self, state: &GameState, now_ms: f64);
}

/// Discards every frame. Useful for headless tests and benchmarks.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _state: &GameState, _now_ms: f64) {}
}

/// Logs a compact state line once a second; stands in for a real frontend
/// in the native demo binary.
#[derive(Debug, Default)]
pub struct LogRenderer {
    frames: u64,
}

impl Renderer for LogRenderer {
    fn render(&mut self, state: &GameState, _now_ms: f64) {
        self.frames += 1;
        if self.frames % 60 != 0 {
            return;
        }
        let phase = match state.phase {
            GamePhase::Welcome => "welcome",
            GamePhase::Idle => "idle",
            GamePhase::Playing => "playing",
            GamePhase::GameOver => "game over",
        };
        log::info!(
            "[{phase}] score {} coins {} high {} | bird y={:.0} rot={:.0} | {} pipes {} coins {} particles",
            state.score,
            state.coins_collected,
            state.high_score,
            state.bird.pos.y,
            state.bird.rotation(),
            state.pipes.len(),
            state.coins.len(),
            state.particles.len(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_null_renderer_reads_any_phase() {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut state = GameState::new(&mut rng);
        let mut renderer = NullRenderer;
        for phase in [
            GamePhase::Welcome,
            GamePhase::Idle,
            GamePhase::Playing,
            GamePhase::GameOver,
        ] {
            state.phase = phase;
            renderer.render(&state, 0.0);
        }
    }
}

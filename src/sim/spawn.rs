//! Entity spawning policy
//!
//! Runs on its own wall-clock cadence, independent of the sim tick rate, so
//! obstacle density does not depend on frame rate. The runner invokes this
//! between sim ticks; it never interleaves with a tick mid-mutation.

use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Coin, GamePhase, GameState, Pipe};

/// Spawn one pipe at the right edge with a uniformly random gap position,
/// and with fixed probability a coin centered in that gap.
///
/// A no-op outside active play, so no orphaned entities appear after death.
pub fn spawn_pipe(state: &mut GameState, rng: &mut Pcg32) {
    if state.phase != GamePhase::Playing {
        return;
    }

    let t = &state.tuning;
    let gap_y = rng.random_range(t.gap_min_y()..t.gap_max_y());
    let pipe = Pipe::new(t.screen_width, gap_y);

    if rng.random_bool(t.coin_spawn_chance) {
        let center = pipe.gap_center(t);
        let coin = Coin::new(t.screen_width + t.pipe_width / 2.0, center.y);
        state.coins.push(coin);
        log::debug!("spawned coin in gap at y={:.0}", center.y);
    }

    log::debug!("spawned pipe, gap_y={gap_y:.0}");
    state.pipes.push(pipe);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn playing_state(rng: &mut Pcg32) -> GameState {
        let mut state = GameState::new(rng);
        state.phase = GamePhase::Playing;
        state
    }

    #[test]
    fn test_spawn_adds_pipe_at_right_edge() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut state = playing_state(&mut rng);
        spawn_pipe(&mut state, &mut rng);
        assert_eq!(state.pipes.len(), 1);
        assert_eq!(state.pipes[0].x, state.tuning.screen_width);
    }

    #[test]
    fn test_gap_always_within_bounds() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut state = playing_state(&mut rng);
        for _ in 0..200 {
            spawn_pipe(&mut state, &mut rng);
        }
        let t = state.tuning.clone();
        for pipe in &state.pipes {
            assert!(pipe.gap_y >= t.gap_min_y());
            assert!(pipe.gap_y < t.gap_max_y());
            // Full gap stays above the ground
            assert!(pipe.gap_y + t.pipe_gap < t.ground_line());
        }
    }

    #[test]
    fn test_no_spawn_outside_playing() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut state = GameState::new(&mut rng);
        for phase in [GamePhase::Welcome, GamePhase::Idle, GamePhase::GameOver] {
            state.phase = phase;
            spawn_pipe(&mut state, &mut rng);
        }
        assert!(state.pipes.is_empty());
        assert!(state.coins.is_empty());
    }

    #[test]
    fn test_coin_spawn_rate_roughly_matches_chance() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut state = playing_state(&mut rng);
        for _ in 0..1000 {
            spawn_pipe(&mut state, &mut rng);
        }
        // ~30% of pipes should carry a coin; allow generous slack
        let ratio = state.coins.len() as f64 / state.pipes.len() as f64;
        assert!((0.2..0.4).contains(&ratio), "ratio was {ratio}");
    }

    #[test]
    fn test_coin_centered_in_gap() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut state = playing_state(&mut rng);
        while state.coins.is_empty() {
            state.pipes.clear();
            spawn_pipe(&mut state, &mut rng);
        }
        let t = &state.tuning;
        let pipe = &state.pipes[0];
        let coin = &state.coins[0];
        assert_eq!(coin.pos.x, t.screen_width + t.pipe_width / 2.0);
        assert_eq!(coin.pos.y, pipe.gap_y + t.pipe_gap / 2.0);
    }
}

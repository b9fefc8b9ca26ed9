//! Collision predicates
//!
//! Everything is an open-interval AABB test against the bird's bounding box,
//! so a bird exactly grazing a pipe edge survives. The vertical bounds check
//! is the one non-rectangle test: top of screen and ground line.

use super::state::{Bird, Coin, Pipe};
use crate::tuning::Tuning;

/// Bird vs either barrier of a pipe
pub fn bird_hits_pipe(bird: &Bird, pipe: &Pipe, t: &Tuning) -> bool {
    let bounds = bird.bounds(t.bird_size);
    bounds.overlaps(&pipe.top_rect(t)) || bounds.overlaps(&pipe.bottom_rect(t))
}

/// Bird vs a coin's bounding box
pub fn bird_hits_coin(bird: &Bird, coin: &Coin, t: &Tuning) -> bool {
    bird.bounds(t.bird_size).overlaps(&coin.bounds(t))
}

/// Terminal bounds: crossed the top of the screen or touched the ground line
pub fn bird_out_of_bounds(bird: &Bird, t: &Tuning) -> bool {
    bird.pos.y <= 0.0 || bird.pos.y + t.bird_size >= t.ground_line()
}

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, passed in by the driver
//! - Wall-clock time enters as an explicit parameter, never read directly
//! - No rendering or platform dependencies

pub mod collision;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{bird_hits_coin, bird_hits_pipe, bird_out_of_bounds};
pub use rect::Rect;
pub use spawn::spawn_pipe;
pub use state::{Bird, Cloud, CloudKind, Coin, GamePhase, GameState, Particle, Pipe};
pub use tick::{TickInput, tick};

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One call per frame, no wall-clock time
//! - No randomness
//! - Each frame is a new `Game`; the previous one is never mutated
//! - No rendering or platform dependencies

pub mod geometry;
pub mod physics;
pub mod state;
pub mod tick;

pub use geometry::{Cell, Direction, Point, Velocity};
pub use state::{Action, AnimationPhase, Game, GameState, Hen, Man, Pending};
pub use tick::{apply_action, step_frame, tick};

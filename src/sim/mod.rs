//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per simulation frame
//! - Seeded RNG only
//! - Stable iteration order (column-major bricks)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod ball;
pub mod bricks;
pub mod input;
pub mod paddle;
pub mod rect;
pub mod schedule;
pub mod state;
pub mod tick;

pub use autopilot::autopilot;
pub use ball::Ball;
pub use bricks::{Brick, BrickGrid, BrickStatus};
pub use input::{InputState, Key};
pub use paddle::Paddle;
pub use rect::Rect;
pub use schedule::{Debouncer, FrameScheduler};
pub use state::{GameEvent, GamePhase, GameState, Outcome, ScorePopup};
pub use tick::tick;

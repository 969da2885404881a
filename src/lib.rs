//! Brick Breaker - a responsive Breakout arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, scoring, frame scheduling)
//! - `renderer`: WebGPU rendering pipeline
//! - `tuning`: Data-driven game balance
//! - `audio`: Web Audio music and sound effects (browser only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod error;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use error::InitError;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep; one simulation frame per tick
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest host frame gap fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Canvas size as a fraction of the browser viewport
    pub const CANVAS_WIDTH_FACTOR: f32 = 0.8;
    pub const CANVAS_HEIGHT_FACTOR: f32 = 0.7;

    /// Ball defaults (velocities are pixels per simulation frame)
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_SPEED: f32 = 3.0;
    /// Ball spawns this far above the bottom edge
    pub const BALL_START_OFFSET: f32 = 30.0;
    /// Smallest horizontal speed after a paddle hit, keeps the ball from going vertical
    pub const MIN_BALL_DX: f32 = 0.5;
    /// Paddle edge hits leave at this angle from vertical
    pub const MAX_BOUNCE_ANGLE: f32 = std::f32::consts::FRAC_PI_3;

    /// Paddle defaults
    pub const PADDLE_WIDTH_RATIO: f32 = 0.1;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    pub const PADDLE_SPEED: f32 = 7.0;

    /// Brick grid layout
    pub const BRICK_CELL_WIDTH: f32 = 90.0;
    pub const BRICK_SPACING: f32 = 10.0;
    pub const BRICK_ROWS: usize = 5;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_OFFSET_TOP: f32 = 50.0;

    /// Scoring
    pub const BRICK_REWARD: u32 = 10;
    /// Lifetime of a floating score indicator in simulation frames
    pub const POPUP_FRAMES: u32 = 45;

    /// Resize events are coalesced over this window (milliseconds)
    pub const RESIZE_DEBOUNCE_MS: f64 = 150.0;
}

/// Canvas dimensions in CSS pixels. Game coordinates have the origin at the
/// top-left corner with y growing downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Canvas size for a browser viewport of the given inner size
    pub fn for_viewport(inner_width: f32, inner_height: f32) -> Self {
        Self {
            width: (inner_width * consts::CANVAS_WIDTH_FACTOR).floor().max(1.0),
            height: (inner_height * consts::CANVAS_HEIGHT_FACTOR).floor().max(1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_factors() {
        let bounds = Bounds::for_viewport(1000.0, 800.0);
        assert_eq!(bounds, Bounds::new(800.0, 560.0));
    }

    #[test]
    fn test_viewport_never_collapses() {
        let bounds = Bounds::for_viewport(0.0, 0.0);
        assert!(bounds.width >= 1.0 && bounds.height >= 1.0);
    }
}

//! Data-driven game balance
//!
//! Defaults mirror `consts`. A page can override any subset with a JSON
//! document; missing fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub ball_radius: f32,
    /// Per-axis ball speed at serve (pixels per frame)
    pub ball_speed: f32,
    pub ball_start_offset: f32,
    pub min_ball_dx: f32,
    /// Radians from vertical for a hit on the paddle's very edge
    pub max_bounce_angle: f32,

    pub paddle_width_ratio: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,

    pub brick_cell_width: f32,
    pub brick_spacing: f32,
    pub brick_rows: usize,
    pub brick_height: f32,
    pub brick_offset_top: f32,

    pub brick_reward: u32,
    pub popup_frames: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ball_radius: BALL_RADIUS,
            ball_speed: BALL_SPEED,
            ball_start_offset: BALL_START_OFFSET,
            min_ball_dx: MIN_BALL_DX,
            max_bounce_angle: MAX_BOUNCE_ANGLE,

            paddle_width_ratio: PADDLE_WIDTH_RATIO,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,

            brick_cell_width: BRICK_CELL_WIDTH,
            brick_spacing: BRICK_SPACING,
            brick_rows: BRICK_ROWS,
            brick_height: BRICK_HEIGHT,
            brick_offset_top: BRICK_OFFSET_TOP,

            brick_reward: BRICK_REWARD,
            popup_frames: POPUP_FRAMES,
        }
    }
}

/// Upper bounds for page-supplied grid size and reward
const MAX_BRICK_ROWS: usize = 64;
const MAX_BRICK_REWARD: u32 = 100_000;

impl Tuning {
    /// Parse overrides from JSON and sanitize the result
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Replace values that would break the simulation with their defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        fn positive(value: &mut f32, fallback: f32) {
            if !(value.is_finite() && *value > 0.0) {
                *value = fallback;
            }
        }

        positive(&mut self.ball_radius, defaults.ball_radius);
        positive(&mut self.ball_speed, defaults.ball_speed);
        positive(&mut self.paddle_height, defaults.paddle_height);
        positive(&mut self.paddle_speed, defaults.paddle_speed);
        positive(&mut self.brick_cell_width, defaults.brick_cell_width);
        positive(&mut self.brick_height, defaults.brick_height);

        if !(self.paddle_width_ratio.is_finite()
            && self.paddle_width_ratio > 0.0
            && self.paddle_width_ratio <= 1.0)
        {
            self.paddle_width_ratio = defaults.paddle_width_ratio;
        }
        if !(self.brick_spacing.is_finite() && self.brick_spacing >= 0.0) {
            self.brick_spacing = defaults.brick_spacing;
        }
        if !(self.brick_offset_top.is_finite() && self.brick_offset_top >= 0.0) {
            self.brick_offset_top = defaults.brick_offset_top;
        }
        if !(self.ball_start_offset.is_finite() && self.ball_start_offset >= 0.0) {
            self.ball_start_offset = defaults.ball_start_offset;
        }
        // Deflection must keep a vertical component
        if !(self.max_bounce_angle.is_finite()
            && self.max_bounce_angle > 0.0
            && self.max_bounce_angle < std::f32::consts::FRAC_PI_2)
        {
            self.max_bounce_angle = defaults.max_bounce_angle;
        }
        // Must stay below the full ball speed or dy would vanish
        let full_speed = self.ball_speed * std::f32::consts::SQRT_2;
        if !(self.min_ball_dx.is_finite()
            && self.min_ball_dx > 0.0
            && self.min_ball_dx < full_speed * 0.5)
        {
            self.min_ball_dx = (full_speed * 0.1).min(defaults.min_ball_dx);
        }
        self.brick_rows = self.brick_rows.clamp(1, MAX_BRICK_ROWS);
        self.brick_reward = self.brick_reward.min(MAX_BRICK_REWARD);
        self.popup_frames = self.popup_frames.max(1);

        self
    }
}

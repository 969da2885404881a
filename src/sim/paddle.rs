//! The player's paddle

use glam::Vec2;

use super::ball::Ball;
use super::input::InputState;
use super::rect::Rect;
use crate::Bounds;
use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per frame while a direction key is held
    pub speed: f32,
}

impl Paddle {
    /// Centered paddle along the bottom edge, sized to the canvas width
    pub fn for_bounds(bounds: Bounds, tuning: &Tuning) -> Self {
        let width = bounds.width * tuning.paddle_width_ratio;
        let height = tuning.paddle_height;
        Self {
            pos: Vec2::new((bounds.width - width) / 2.0, bounds.height - height),
            size: Vec2::new(width, height),
            speed: tuning.paddle_speed,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            origin: self.pos,
            size: self.size,
        }
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    /// Largest allowed x for the paddle's left edge
    #[inline]
    pub fn max_x(&self, bounds: Bounds) -> f32 {
        (bounds.width - self.size.x).max(0.0)
    }

    /// Move by the held direction, clamped to [0, width - paddle width]
    pub fn step(&mut self, input: &InputState, bounds: Bounds) {
        let x = self.pos.x + input.direction() * self.speed;
        self.pos.x = x.max(0.0).min(self.max_x(bounds));
    }

    /// Send the ball back up. The exit angle depends on where it struck:
    /// center goes straight up, the edges leave at `max_bounce_angle`.
    /// Speed is preserved.
    pub fn deflect(&self, ball: &mut Ball, tuning: &Tuning) {
        let half = self.size.x / 2.0;
        let offset = if half > 0.0 {
            ((ball.pos.x - self.center_x()) / half).clamp(-1.0, 1.0)
        } else {
            0.0
        };
        let angle = offset * tuning.max_bounce_angle;
        let speed = ball.speed();

        let mut dx = speed * angle.sin();
        if dx.abs() < tuning.min_ball_dx {
            let sign = if angle != 0.0 {
                angle.signum()
            } else {
                ball.vel.x.signum()
            };
            dx = tuning.min_ball_dx * sign;
        }
        let dy = -(speed * speed - dx * dx).max(0.0).sqrt();

        ball.vel = Vec2::new(dx, dy);
    }
}

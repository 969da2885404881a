//! The ball: position, per-frame velocity and wall reflection

use glam::Vec2;
use rand::Rng;

use crate::Bounds;
use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    /// Velocity in pixels per simulation frame
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self { pos, vel, radius }
    }

    /// A freshly served ball for the given canvas
    pub fn serve<R: Rng>(bounds: Bounds, tuning: &Tuning, rng: &mut R) -> Self {
        let mut ball = Self::new(Vec2::ZERO, Vec2::ZERO, tuning.ball_radius);
        ball.reset(bounds, tuning, rng);
        ball
    }

    /// Recenter above the paddle and launch upward in a random horizontal direction
    pub fn reset<R: Rng>(&mut self, bounds: Bounds, tuning: &Tuning, rng: &mut R) {
        let dir = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.radius = tuning.ball_radius;
        self.pos = Vec2::new(bounds.width / 2.0, bounds.height - tuning.ball_start_offset);
        self.vel = Vec2::new(dir * tuning.ball_speed, -tuning.ball_speed);
    }

    /// Where the ball will be after one more frame at its current velocity
    #[inline]
    pub fn next_pos(&self) -> Vec2 {
        self.pos + self.vel
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Advance one frame, reflecting off the side and top walls.
    ///
    /// The bottom edge is left open; the paddle check decides what happens
    /// there. Returns true if a wall was hit.
    pub fn step(&mut self, bounds: Bounds) -> bool {
        let next = self.next_pos();
        let mut bounced = false;

        if next.x > bounds.width - self.radius || next.x < self.radius {
            self.vel.x = -self.vel.x;
            bounced = true;
        }
        if next.y < self.radius {
            self.vel.y = -self.vel.y;
            bounced = true;
        }

        self.pos += self.vel;

        // Clamp back inside so a reflected ball can never stay outside a wall
        self.pos.x = self.pos.x.max(self.radius).min(bounds.width - self.radius);
        self.pos.y = self.pos.y.max(self.radius);

        bounced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const BOUNDS: Bounds = Bounds::new(800.0, 560.0);

    #[test]
    fn test_reset_position_and_velocity() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let ball = Ball::serve(BOUNDS, &tuning, &mut rng);

        assert_eq!(ball.pos, Vec2::new(400.0, 530.0));
        assert_eq!(ball.vel.x.abs(), tuning.ball_speed);
        assert_eq!(ball.vel.y, -tuning.ball_speed);
    }

    #[test]
    fn test_reset_direction_varies_with_seed() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut seen_left = false;
        let mut seen_right = false;
        for _ in 0..64 {
            let ball = Ball::serve(BOUNDS, &tuning, &mut rng);
            seen_left |= ball.vel.x < 0.0;
            seen_right |= ball.vel.x > 0.0;
        }
        assert!(seen_left && seen_right);
    }

    #[test]
    fn test_right_wall_reflects() {
        let mut ball = Ball::new(Vec2::new(789.0, 300.0), Vec2::new(3.0, 3.0), 10.0);
        assert!(ball.step(BOUNDS));
        assert_eq!(ball.vel.x, -3.0);
        assert_eq!(ball.vel.y, 3.0);
        assert!(ball.pos.x <= 790.0);
    }

    #[test]
    fn test_top_wall_reflects() {
        let mut ball = Ball::new(Vec2::new(400.0, 11.0), Vec2::new(3.0, -3.0), 10.0);
        assert!(ball.step(BOUNDS));
        assert_eq!(ball.vel.y, 3.0);
        assert!(ball.pos.y >= 10.0);
    }

    #[test]
    fn test_bottom_is_open() {
        let mut ball = Ball::new(Vec2::new(400.0, 555.0), Vec2::new(3.0, 3.0), 10.0);
        assert!(!ball.step(BOUNDS));
        assert_eq!(ball.vel.y, 3.0);
        assert_eq!(ball.pos.y, 558.0);
    }

    #[test]
    fn test_ball_overlapping_wall_flips_once() {
        // Already past the left wall before the move
        let mut ball = Ball::new(Vec2::new(8.0, 300.0), Vec2::new(-3.0, 3.0), 10.0);
        ball.step(BOUNDS);
        assert_eq!(ball.vel.x, 3.0);
        // And it comes back into the field instead of sticking
        ball.step(BOUNDS);
        assert_eq!(ball.vel.x, 3.0);
        assert!(ball.pos.x > 10.0);
    }

    proptest! {
        #[test]
        fn prop_horizontal_flip_iff_crossing(
            x in 10.0f32..790.0,
            y in 100.0f32..400.0,
            right in any::<bool>(),
        ) {
            let dx = if right { 3.0 } else { -3.0 };
            let mut ball = Ball::new(Vec2::new(x, y), Vec2::new(dx, 3.0), 10.0);
            let next_x = x + dx;
            let crosses = next_x > 790.0 || next_x < 10.0;

            ball.step(BOUNDS);

            if crosses {
                prop_assert_eq!(ball.vel.x, -dx);
            } else {
                prop_assert_eq!(ball.vel.x, dx);
            }
            prop_assert!(ball.pos.x >= 10.0 && ball.pos.x <= 790.0);
            prop_assert!(ball.vel.x != 0.0 && ball.vel.y != 0.0);
        }
    }
}

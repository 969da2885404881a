//! One simulation frame
//!
//! Order within a frame: popups decay, ball moves (walls), paddle moves
//! (input), brick collisions and scoring, win check, paddle collision or loss.

use super::input::InputState;
use super::state::{GameEvent, GamePhase, GameState, Outcome};

/// Advance the session by one frame. Does nothing unless Running.
pub fn tick(state: &mut GameState, input: &InputState) {
    if state.phase != GamePhase::Running {
        return;
    }

    state.frame += 1;

    for popup in &mut state.popups {
        popup.frames_left = popup.frames_left.saturating_sub(1);
    }
    state.popups.retain(|p| p.frames_left > 0);

    if state.ball.step(state.bounds) {
        state.events.push(GameEvent::WallBounce);
    }
    state.paddle.step(input, state.bounds);

    collide_bricks(state);

    if state.bricks.alive_count() == 0 {
        state.finish(Outcome::Won);
        return;
    }

    collide_paddle(state);
}

/// Point-in-rect test of the ball's center against every live brick.
///
/// The radius is deliberately ignored, so a ball grazing a brick with its
/// edge passes through untouched.
fn collide_bricks(state: &mut GameState) {
    let center = state.ball.pos;
    let mut hits = Vec::new();

    for (column, row, brick) in state.bricks.iter_mut() {
        if brick.is_alive() && brick.rect().contains_point(center) {
            state.ball.vel.y = -state.ball.vel.y;
            brick.mark_broken();
            hits.push((column, row, brick.rect().origin));
        }
    }

    for (column, row, origin) in hits {
        state.award_brick(column, row, origin);
    }
}

/// Once the ball is about to cross the paddle's top edge it either bounces
/// off the paddle or the session is lost.
fn collide_paddle(state: &mut GameState) {
    let ball = &state.ball;
    let descending = ball.vel.y > 0.0;
    let next_y = ball.pos.y + ball.vel.y;

    if !descending || next_y <= state.paddle.pos.y - ball.radius {
        return;
    }

    if state.paddle.rect().spans_x(ball.pos.x) {
        state.paddle.deflect(&mut state.ball, &state.tuning);
        state.events.push(GameEvent::PaddleHit);
    } else {
        state.finish(Outcome::Lost);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Bounds;
    use crate::sim::bricks::{Brick, BrickGrid, BrickStatus};
    use crate::sim::input::Key;
    use crate::sim::rect::Rect;
    use glam::Vec2;
    use proptest::prelude::*;

    const BOUNDS: Bounds = Bounds::new(800.0, 560.0);

    /// Session with the ball parked in open space moving up-right
    fn open_field(seed: u64) -> GameState {
        let mut state = GameState::new(BOUNDS, seed);
        state.ball.pos = Vec2::new(400.0, 400.0);
        state.ball.vel = Vec2::new(3.0, -3.0);
        state
    }

    #[test]
    fn test_brick_hit_scenario() {
        // 800 wide canvas, brick spanning [440, 530)
        let mut state = open_field(1);
        state.bricks = BrickGrid::from_columns(vec![
            vec![Brick::new(Rect::new(440.0, 50.0, 90.0, 20.0))],
            vec![Brick::new(Rect::new(100.0, 50.0, 90.0, 20.0))],
        ]);
        state.ball.pos = Vec2::new(442.0, 63.0);

        tick(&mut state, &InputState::default());

        // Ball moved to (445, 60), inside the brick
        assert_eq!(state.ball.vel.y, 3.0);
        assert_eq!(state.bricks.get(0, 0).unwrap().status(), BrickStatus::Broken);
        assert_eq!(state.bricks.get(1, 0).unwrap().status(), BrickStatus::Alive);
        assert_eq!(state.score, 10);
        assert_eq!(state.popups.len(), 1);
        assert_eq!(state.popups[0].pos, Vec2::new(440.0, 50.0));
        assert_eq!(state.popups[0].opacity(), 1.0);
        assert!(state.drain_events().contains(&GameEvent::BrickBroken {
            column: 0,
            row: 0,
            points: 10
        }));
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_score_saturates_instead_of_wrapping() {
        let mut state = open_field(1);
        state.tuning.brick_reward = u32::MAX;
        state.bricks = BrickGrid::from_columns(vec![
            vec![Brick::new(Rect::new(440.0, 50.0, 90.0, 20.0))],
            vec![Brick::new(Rect::new(100.0, 50.0, 90.0, 20.0))],
            vec![Brick::new(Rect::new(600.0, 50.0, 90.0, 20.0))],
        ]);

        state.ball.pos = Vec2::new(442.0, 63.0);
        state.ball.vel = Vec2::new(3.0, -3.0);
        tick(&mut state, &InputState::default());
        assert_eq!(state.score, u32::MAX);

        state.ball.pos = Vec2::new(102.0, 63.0);
        state.ball.vel = Vec2::new(3.0, -3.0);
        tick(&mut state, &InputState::default());

        assert_eq!(state.bricks.alive_count(), 1);
        assert_eq!(state.score, u32::MAX);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_grazing_edge_is_not_a_hit() {
        // Center stays outside the brick even though the radius overlaps it
        let mut state = open_field(1);
        state.bricks = BrickGrid::from_columns(vec![
            vec![Brick::new(Rect::new(440.0, 50.0, 90.0, 20.0))],
            vec![Brick::new(Rect::new(100.0, 50.0, 90.0, 20.0))],
        ]);
        state.ball.pos = Vec2::new(432.0, 63.0);

        tick(&mut state, &InputState::default());

        assert_eq!(state.ball.pos.x, 435.0);
        assert_eq!(state.score, 0);
        assert!(state.bricks.get(0, 0).unwrap().is_alive());
    }

    #[test]
    fn test_last_brick_wins() {
        let mut state = open_field(1);
        state.bricks = BrickGrid::from_columns(vec![vec![Brick::new(Rect::new(
            440.0, 50.0, 90.0, 20.0,
        ))]]);
        state.ball.pos = Vec2::new(442.0, 63.0);

        tick(&mut state, &InputState::default());

        assert_eq!(state.phase, GamePhase::Over(Outcome::Won));
        assert_eq!(state.score, 10);
        assert!(state.drain_events().contains(&GameEvent::Won));
    }

    #[test]
    fn test_paddle_returns_ball() {
        let mut state = open_field(1);
        let paddle_x = state.paddle.center_x();
        state.ball.pos = Vec2::new(paddle_x + 10.0, 537.0);
        state.ball.vel = Vec2::new(3.0, 3.0);

        tick(&mut state, &InputState::default());

        assert!(state.ball.vel.y < 0.0);
        assert!(state.ball.vel.x > 0.0);
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.drain_events().contains(&GameEvent::PaddleHit));
    }

    #[test]
    fn test_missed_ball_loses() {
        let mut state = open_field(1);
        state.ball.pos = Vec2::new(100.0, 537.0);
        state.ball.vel = Vec2::new(3.0, 3.0);

        tick(&mut state, &InputState::default());

        assert_eq!(state.phase, GamePhase::Over(Outcome::Lost));
        assert!(state.drain_events().contains(&GameEvent::Lost));

        // Over is terminal: further ticks change nothing
        let pos = state.ball.pos;
        tick(&mut state, &InputState::default());
        assert_eq!(state.ball.pos, pos);
        assert_eq!(state.frame, 1);
    }

    #[test]
    fn test_paused_session_is_frozen() {
        let mut state = open_field(1);
        state.toggle_pause();
        let before = state.ball.pos;

        let mut input = InputState::default();
        input.press(Key::Left);
        for _ in 0..10 {
            tick(&mut state, &input);
        }

        assert_eq!(state.ball.pos, before);
        assert_eq!(state.frame, 0);
    }

    #[test]
    fn test_popups_fade_and_expire() {
        let mut state = open_field(1);
        state.award_brick(0, 0, Vec2::new(5.0, 50.0));
        let total = state.tuning.popup_frames;

        tick(&mut state, &InputState::default());
        assert_eq!(state.popups[0].frames_left, total - 1);

        for _ in 0..total {
            state.ball.pos = Vec2::new(400.0, 400.0);
            tick(&mut state, &InputState::default());
        }
        assert!(state.popups.is_empty());
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(BOUNDS, 99999);
        let mut b = GameState::new(BOUNDS, 99999);
        let mut input = InputState::default();

        for i in 0..600 {
            input.left = i % 90 < 30;
            input.right = i % 90 > 60;
            tick(&mut a, &input);
            tick(&mut b, &input);
        }

        assert_eq!(a.frame, b.frame);
        assert_eq!(a.ball, b.ball);
        assert_eq!(a.paddle, b.paddle);
        assert_eq!(a.score, b.score);
    }

    proptest! {
        #[test]
        fn prop_score_tracks_broken_bricks(
            seed in any::<u64>(),
            moves in proptest::collection::vec(-1i8..=1, 1..1500),
        ) {
            let mut state = GameState::new(BOUNDS, seed);
            let mut input = InputState::default();
            let mut broken_before = vec![false; state.bricks.len()];

            for m in moves {
                input.left = m < 0;
                input.right = m > 0;
                let score_before = state.score;
                tick(&mut state, &input);

                prop_assert!(state.score >= score_before);
                prop_assert!(state.paddle.pos.x >= 0.0);
                prop_assert!(state.paddle.pos.x <= BOUNDS.width - state.paddle.size.x);

                for (i, (_, _, brick)) in state.bricks.iter().enumerate() {
                    // Monotonic: once broken, never alive again
                    if broken_before[i] {
                        prop_assert!(!brick.is_alive());
                    }
                    broken_before[i] = !brick.is_alive();
                }

                let broken = state.bricks.len() - state.bricks.alive_count();
                prop_assert_eq!(state.score, broken as u32 * state.tuning.brick_reward);
                prop_assert_eq!(
                    state.phase == GamePhase::Over(Outcome::Won),
                    state.bricks.alive_count() == 0
                );
            }
        }
    }
}

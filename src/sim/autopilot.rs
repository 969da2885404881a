//! Idle/demo mode: generate paddle input that chases the ball

use super::input::InputState;
use super::state::GameState;

/// Steer the paddle under the ball.
///
/// The aim point drifts slowly across the paddle so returns come off at
/// varied angles instead of settling into one vertical loop.
pub fn autopilot(state: &GameState) -> InputState {
    let paddle = &state.paddle;
    let time_factor = state.frame as f32 * 0.01;
    // Stays well inside half the paddle width so the ball is never missed
    let aim_offset = (time_factor.sin() * 0.2 + (time_factor * 0.7).sin() * 0.1) * paddle.size.x;

    let target = state.ball.pos.x - aim_offset;
    let center = paddle.center_x();
    let dead_zone = paddle.speed / 2.0;

    InputState {
        left: target < center - dead_zone,
        right: target > center + dead_zone,
    }
}

//! Scene assembly: turn a session into a triangle list
//!
//! Pure CPU work in canvas pixel coordinates; the pipeline maps to NDC.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::Bounds;
use crate::sim::{GameState, Rect};

/// Segments used for the ball and its shadow
const BALL_SEGMENTS: u32 = 24;
/// Drop shadow offset for bricks and paddle
const SHADOW_OFFSET: Vec2 = Vec2::new(2.0, 3.0);

/// Background only, shown before the first session starts
pub fn background(bounds: Bounds) -> Vec<Vertex> {
    let full = Rect::new(0.0, 0.0, bounds.width, bounds.height);
    shapes::vertical_gradient(
        &full,
        colors::rgba(colors::BACKGROUND_TOP, 1.0),
        colors::rgba(colors::BACKGROUND_BOTTOM, 1.0),
    )
    .to_vec()
}

/// What to draw on a canvas of size `canvas`, and the bounds to map it with.
///
/// A session laid out for a different size (a finished one is never rebuilt
/// on resize) is replaced by the background instead of being stretched.
pub fn frame(session: Option<&GameState>, canvas: Bounds) -> (Vec<Vertex>, Bounds) {
    match session {
        Some(state) if state.bounds == canvas => (build(state), canvas),
        _ => (background(canvas), canvas),
    }
}

/// Full frame: background, live bricks, paddle, ball
pub fn build(state: &GameState) -> Vec<Vertex> {
    let mut vertices = background(state.bounds);
    vertices.reserve(state.bricks.alive_count() * 12 + 24 + BALL_SEGMENTS as usize * 6);

    let brick_shadow = colors::rgba(colors::SHADOW, 0.2);
    let brick_light = colors::rgba(colors::BRICK_LIGHT, 1.0);
    let brick_dark = colors::rgba(colors::BRICK_DARK, 1.0);
    for (_, _, brick) in state.bricks.iter().filter(|(_, _, b)| b.is_alive()) {
        let rect = brick.rect();
        vertices.extend(shapes::rect(&rect.translated(SHADOW_OFFSET), brick_shadow));
        vertices.extend(shapes::diagonal_gradient(rect, brick_light, brick_dark));
    }

    let paddle = state.paddle.rect();
    vertices.extend(shapes::rect(
        &paddle.translated(SHADOW_OFFSET),
        colors::rgba(colors::SHADOW, 0.3),
    ));
    vertices.extend(shapes::diagonal_gradient(
        &paddle,
        colors::rgba(colors::PADDLE_LIGHT, 1.0),
        colors::rgba(colors::PADDLE_DARK, 1.0),
    ));

    let ball = &state.ball;
    vertices.extend(shapes::glow(
        ball.pos + Vec2::new(1.0, 2.0),
        ball.radius * 1.6,
        colors::rgba(colors::SHADOW, 0.5),
        BALL_SEGMENTS,
    ));
    vertices.extend(shapes::circle(
        ball.pos,
        ball.radius,
        colors::rgba(colors::BALL, 1.0),
        BALL_SEGMENTS,
    ));

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Bounds = Bounds::new(800.0, 560.0);

    #[test]
    fn test_background_covers_canvas() {
        let verts = background(BOUNDS);
        assert_eq!(verts.len(), 6);
        assert!(verts.iter().any(|v| v.position == [800.0, 560.0]));
    }

    #[test]
    fn test_broken_bricks_are_not_drawn() {
        let mut state = GameState::new(BOUNDS, 1);
        let full = build(&state).len();

        state.bricks.iter_mut().take(3).for_each(|(_, _, b)| {
            b.mark_broken();
        });
        let fewer = build(&state).len();

        // Shadow + body per brick
        assert_eq!(full - fewer, 3 * 12);
    }

    #[test]
    fn test_stale_layout_falls_back_to_background() {
        let mut state = GameState::new(BOUNDS, 1);
        state.phase = crate::sim::GamePhase::Over(crate::sim::Outcome::Lost);
        let resized = Bounds::new(1000.0, 700.0);
        // Over is terminal, so the layout keeps the old size
        assert!(!state.resize(resized));

        let (verts, bounds) = frame(Some(&state), resized);
        assert_eq!(bounds, resized);
        assert_eq!(verts, background(resized));

        let (verts, bounds) = frame(Some(&state), BOUNDS);
        assert_eq!(bounds, BOUNDS);
        assert_eq!(verts.len(), build(&state).len());
    }

    #[test]
    fn test_frame_without_session_is_background() {
        let (verts, bounds) = frame(None, BOUNDS);
        assert_eq!(bounds, BOUNDS);
        assert_eq!(verts.len(), 6);
    }

    #[test]
    fn test_frame_has_every_entity() {
        let state = GameState::new(BOUNDS, 1);
        let verts = build(&state);
        let expected = 6 + 40 * 12 + 12 + 2 * BALL_SEGMENTS as usize * 3;
        assert_eq!(verts.len(), expected);
    }
}

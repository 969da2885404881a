//! Session state and core simulation types
//!
//! A `GameState` is one session: it exclusively owns the ball, paddle and
//! brick grid, and replaces all three wholesale on resize.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::ball::Ball;
use super::bricks::BrickGrid;
use super::paddle::Paddle;
use crate::Bounds;
use crate::tuning::Tuning;

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every brick cleared
    Won,
    /// Ball got past the paddle
    Lost,
}

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Running,
    /// Frame loop suspended; no updates, no draws
    Paused,
    /// Terminal until a new session is started
    Over(Outcome),
}

/// Things that happened during a frame, drained by the front end for
/// audio cues and the score display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    WallBounce,
    PaddleHit,
    BrickBroken { column: usize, row: usize, points: u32 },
    Won,
    Lost,
}

/// Floating "+N" indicator left where a brick was broken
#[derive(Debug, Clone, PartialEq)]
pub struct ScorePopup {
    /// Origin of the broken brick
    pub pos: Vec2,
    pub points: u32,
    pub frames_left: u32,
    pub total_frames: u32,
}

impl ScorePopup {
    /// Fades linearly from 1 to 0 over its lifetime
    pub fn opacity(&self) -> f32 {
        if self.total_frames == 0 {
            0.0
        } else {
            self.frames_left as f32 / self.total_frames as f32
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// Canvas size the entities were laid out for
    pub bounds: Bounds,
    pub ball: Ball,
    pub paddle: Paddle,
    pub bricks: BrickGrid,
    /// Never decreases within a session (resize starts a new layout at 0)
    pub score: u32,
    pub phase: GamePhase,
    pub popups: Vec<ScorePopup>,
    pub events: Vec<GameEvent>,
    /// Simulation frames run so far
    pub frame: u64,
    rng: Pcg32,
}

impl GameState {
    /// Start a session with default tuning
    pub fn new(bounds: Bounds, seed: u64) -> Self {
        Self::with_tuning(bounds, seed, Tuning::default())
    }

    pub fn with_tuning(bounds: Bounds, seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let ball = Ball::serve(bounds, &tuning, &mut rng);
        let paddle = Paddle::for_bounds(bounds, &tuning);
        let bricks = BrickGrid::layout(bounds, &tuning);

        Self {
            tuning,
            bounds,
            ball,
            paddle,
            bricks,
            score: 0,
            phase: GamePhase::Running,
            popups: Vec::new(),
            events: Vec::new(),
            frame: 0,
            rng,
        }
    }

    /// Rebuild every entity for a new canvas size and zero the score.
    ///
    /// A finished session is left alone (Over is terminal); returns whether
    /// the rebuild happened. Running/Paused is preserved.
    pub fn resize(&mut self, bounds: Bounds) -> bool {
        if self.is_over() {
            return false;
        }

        self.bounds = bounds;
        self.ball = Ball::serve(bounds, &self.tuning, &mut self.rng);
        self.paddle = Paddle::for_bounds(bounds, &self.tuning);
        self.bricks = BrickGrid::layout(bounds, &self.tuning);
        self.score = 0;
        self.popups.clear();

        log::info!(
            "Layout rebuilt for {}x{} ({} bricks)",
            bounds.width,
            bounds.height,
            self.bricks.len()
        );
        true
    }

    /// Running ⇄ Paused. No effect once the session is over.
    pub fn toggle_pause(&mut self) -> GamePhase {
        self.phase = match self.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            over @ GamePhase::Over(_) => over,
        };
        self.phase
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::Over(_))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            GamePhase::Over(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Credit a broken brick: score, popup and event
    pub(super) fn award_brick(&mut self, column: usize, row: usize, origin: Vec2) {
        let points = self.tuning.brick_reward;
        self.score = self.score.saturating_add(points);
        self.popups.push(ScorePopup {
            pos: origin,
            points,
            frames_left: self.tuning.popup_frames,
            total_frames: self.tuning.popup_frames,
        });
        self.events.push(GameEvent::BrickBroken {
            column,
            row,
            points,
        });
    }

    /// Enter the terminal phase
    pub(super) fn finish(&mut self, outcome: Outcome) {
        self.phase = GamePhase::Over(outcome);
        self.events.push(match outcome {
            Outcome::Won => GameEvent::Won,
            Outcome::Lost => GameEvent::Lost,
        });
        log::info!(
            "Session over: {:?} with score {} after {} frames",
            outcome,
            self.score,
            self.frame
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Bounds = Bounds::new(800.0, 560.0);

    #[test]
    fn test_new_session() {
        let state = GameState::new(BOUNDS, 12345);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.bricks.alive_count(), 40);
        assert_eq!(state.ball.pos, Vec2::new(400.0, 530.0));
    }

    #[test]
    fn test_pause_toggle() {
        let mut state = GameState::new(BOUNDS, 1);
        assert_eq!(state.toggle_pause(), GamePhase::Paused);
        assert_eq!(state.toggle_pause(), GamePhase::Running);

        state.phase = GamePhase::Over(Outcome::Lost);
        assert_eq!(state.toggle_pause(), GamePhase::Over(Outcome::Lost));
    }

    #[test]
    fn test_resize_rebuilds_everything() {
        let mut state = GameState::new(BOUNDS, 99);
        state.score = 70;
        state.bricks.iter_mut().take(7).for_each(|(_, _, b)| {
            b.mark_broken();
        });
        state.toggle_pause();

        let bigger = Bounds::new(1200.0, 700.0);
        assert!(state.resize(bigger));

        assert_eq!(state.score, 0);
        assert_eq!(state.phase, GamePhase::Paused);
        assert_eq!(state.bricks.columns(), 13);
        assert_eq!(state.bricks.alive_count(), state.bricks.len());
        assert_eq!(state.paddle.size.x, 120.0);
        assert_eq!(state.paddle.pos.y, 690.0);
        assert_eq!(state.ball.pos, Vec2::new(600.0, 670.0));
    }

    #[test]
    fn test_resize_does_not_revive_finished_session() {
        let mut state = GameState::new(BOUNDS, 5);
        state.score = 30;
        state.phase = GamePhase::Over(Outcome::Lost);

        assert!(!state.resize(Bounds::new(400.0, 300.0)));
        assert_eq!(state.score, 30);
        assert_eq!(state.bounds, BOUNDS);
    }

    #[test]
    fn test_popup_opacity() {
        let popup = ScorePopup {
            pos: Vec2::ZERO,
            points: 10,
            frames_left: 15,
            total_frames: 45,
        };
        assert!((popup.opacity() - 1.0 / 3.0).abs() < 1e-6);
    }
}

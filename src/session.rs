//! Game session: the single owner of simulation state
//!
//! The frame loop and the pointer handlers all talk to one `Session` through
//! method calls. The loop asks for a frame each display refresh and stops
//! rescheduling itself once `frame()` returns `None`.

use serde::Serialize;

use crate::sim::{BallState, DragTracker, GameEvent, GameState, PointerSample, Viewport, tick};
use crate::tuning::Tuning;

/// What one frame produced, for the presentation layer
#[derive(Debug, Clone, Serialize)]
pub struct FrameReport {
    pub ball: BallState,
    pub score: u32,
    pub events: Vec<GameEvent>,
}

pub struct Session {
    state: GameState,
    tuning: Tuning,
    drag: DragTracker,
    active: bool,
    /// A frame loop is scheduled and has not yet observed the session ending
    loop_running: bool,
}

impl Session {
    pub fn new(viewport: Viewport, tuning: Tuning) -> Self {
        Self {
            state: GameState::new(viewport),
            tuning,
            drag: DragTracker::new(),
            active: false,
            loop_running: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    /// Begin play with the ball reset to its idle spot
    ///
    /// Returns true when the caller must schedule a new frame loop. A loop
    /// that is still pending from a previous session is reused instead.
    pub fn start(&mut self) -> bool {
        self.drag.cancel(&mut self.state.ball);
        self.state.reset_ball();
        self.active = true;
        log::info!(
            "Session started ({}x{})",
            self.state.viewport.width,
            self.state.viewport.height
        );

        let schedule = !self.loop_running;
        self.loop_running = true;
        schedule
    }

    /// Stop play; the frame loop winds down on its next frame
    pub fn end(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.drag.cancel(&mut self.state.ball);
        log::info!("Session ended with score {}", self.state.score);
    }

    /// Adopt a new viewport size
    ///
    /// The hoop always follows the viewport. The ball is re-centered only
    /// when nobody is playing with it.
    pub fn resize(&mut self, viewport: Viewport) {
        self.state.set_viewport(viewport);
        if !self.active && !self.state.ball.dragging {
            self.state.reset_ball();
        }
        log::info!(
            "Viewport resized to {}x{}, hoop at ({}, {})",
            viewport.width,
            viewport.height,
            self.state.hoop.center.x,
            self.state.hoop.center.y
        );
    }

    /// Try to pick up the ball; returns true if the drag started
    pub fn pointer_down(&mut self, sample: PointerSample) -> bool {
        if !self.active || !self.state.ball.contains(sample.pos) {
            return false;
        }
        self.drag.grab(&mut self.state.ball, sample);
        true
    }

    pub fn pointer_move(&mut self, sample: PointerSample) {
        if self.state.ball.dragging {
            self.drag.drag_to(&mut self.state.ball, sample, &self.tuning);
        }
    }

    /// Release the ball; returns true if a throw was committed
    pub fn pointer_up(&mut self) -> bool {
        self.drag.release(&mut self.state.ball, &self.tuning)
    }

    /// Drop a drag the browser took away; the ball falls from where it was held
    ///
    /// Returns true if a drag was in progress.
    pub fn pointer_cancel(&mut self) -> bool {
        if !self.state.ball.dragging {
            return false;
        }
        self.drag.cancel(&mut self.state.ball);
        self.state.ball.stop();
        log::debug!("Drag cancelled");
        true
    }

    /// Run one animation frame
    ///
    /// Returns `None` once the session has ended, telling the loop not to
    /// reschedule.
    pub fn frame(&mut self) -> Option<FrameReport> {
        if !self.active {
            self.loop_running = false;
            return None;
        }

        let events = tick(&mut self.state, &self.tuning);
        Some(FrameReport {
            ball: self.state.ball,
            score: self.state.score,
            events,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BALL_RADIUS;
    use glam::Vec2;

    fn session() -> Session {
        Session::new(Viewport::new(1000.0, 800.0), Tuning::default())
    }

    fn ball_center(session: &Session) -> Vec2 {
        session.state().ball.center()
    }

    #[test]
    fn test_idle_session_produces_no_frames() {
        let mut s = session();
        assert!(!s.is_active());
        assert!(s.frame().is_none());
    }

    #[test]
    fn test_start_resets_ball_and_schedules_once() {
        let mut s = session();
        assert!(s.start());
        assert_eq!(s.state().ball.pos, Vec2::new(460.0, 700.0));

        // Restart before the loop noticed anything: keep the same loop
        s.end();
        assert!(!s.start());
        assert!(s.frame().is_some());

        // Loop observes the end and stops; the next start needs a fresh loop
        s.end();
        assert!(s.frame().is_none());
        assert!(s.start());
    }

    #[test]
    fn test_pointer_down_needs_active_session_and_hit() {
        let mut s = session();
        let center = ball_center(&s);
        assert!(!s.pointer_down(PointerSample::new(center.x, center.y, 0.0)));

        s.start();
        assert!(!s.pointer_down(PointerSample::new(0.0, 0.0, 0.0)));
        assert!(s.pointer_down(PointerSample::new(center.x, center.y, 0.0)));
        assert!(s.state().ball.dragging);
    }

    #[test]
    fn test_throw_launches_ball() {
        let mut s = session();
        s.start();
        let center = ball_center(&s);
        s.pointer_down(PointerSample::new(center.x, center.y, 100.0));
        s.pointer_move(PointerSample::new(center.x + 10.0, center.y - 20.0, 110.0));

        // Dragged ball does not simulate
        let report = s.frame().unwrap();
        assert!(report.events.is_empty());
        assert_eq!(report.ball.pos, center + Vec2::new(10.0, -20.0) - Vec2::splat(BALL_RADIUS));

        assert!(s.pointer_up());
        let ball = s.state().ball;
        assert!(!ball.dragging);
        assert!((ball.vel.x - 15.0).abs() < 1e-4);
        assert!((ball.vel.y - (-30.0)).abs() < 1e-4);
        assert!((ball.angular_vel - 30.0).abs() < 1e-4);

        let before = s.state().ball.pos;
        s.frame().unwrap();
        assert!(s.state().ball.pos.y < before.y);
    }

    #[test]
    fn test_pointer_move_without_drag_is_ignored() {
        let mut s = session();
        s.start();
        let before = s.state().ball.pos;
        s.pointer_move(PointerSample::new(10.0, 10.0, 5.0));
        assert_eq!(s.state().ball.pos, before);
        assert!(!s.pointer_up());
    }

    #[test]
    fn test_resize_while_idle_recenters() {
        let mut s = session();
        s.resize(Viewport::new(1600.0, 900.0));
        assert_eq!(s.state().hoop.center.x, 1500.0);
        assert_eq!(s.state().ball.pos, Vec2::new(760.0, 800.0));
    }

    #[test]
    fn test_resize_while_playing_keeps_ball() {
        let mut s = session();
        s.start();
        s.state.ball.pos = Vec2::new(123.0, 45.0);
        s.resize(Viewport::new(1600.0, 900.0));
        assert_eq!(s.state().hoop.center.x, 1500.0);
        assert_eq!(s.state().ball.pos, Vec2::new(123.0, 45.0));
    }

    #[test]
    fn test_end_drops_drag() {
        let mut s = session();
        s.start();
        let center = ball_center(&s);
        s.pointer_down(PointerSample::new(center.x, center.y, 0.0));
        s.end();
        assert!(!s.state().ball.dragging);
        assert!(!s.pointer_up());
    }

    #[test]
    fn test_cancelled_drag_resumes_physics() {
        let mut s = session();
        s.start();
        let center = ball_center(&s);
        s.pointer_down(PointerSample::new(center.x, center.y, 0.0));
        s.pointer_move(PointerSample::new(center.x, center.y - 300.0, 20.0));
        let held = s.state().ball.pos;

        // Frozen while held
        s.frame().unwrap();
        assert_eq!(s.state().ball.pos, held);

        assert!(s.pointer_cancel());
        assert!(!s.state().ball.dragging);
        assert_eq!(s.state().ball.vel, Vec2::ZERO);
        assert!(!s.pointer_up());
        assert!(!s.pointer_cancel());

        s.frame().unwrap();
        assert!(s.state().ball.pos.y > held.y);
    }

    #[test]
    fn test_score_survives_restart() {
        let mut s = session();
        s.start();
        s.state.score = 3;
        s.end();
        s.start();
        assert_eq!(s.score(), 3);
    }
}

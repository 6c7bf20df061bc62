//! Pointer dragging and throw estimation
//!
//! While held, the ball follows the pointer directly. Each move sample turns the
//! pointer's displacement over elapsed time into the velocity the ball will
//! leave with when released.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::BallState;
use crate::consts::BALL_RADIUS;
use crate::tuning::Tuning;

/// A pointer position with its event timestamp (milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub pos: Vec2,
    pub time_ms: f64,
}

impl PointerSample {
    pub fn new(x: f32, y: f32, time_ms: f64) -> Self {
        Self {
            pos: Vec2::new(x, y),
            time_ms,
        }
    }
}

/// Tracks the previous pointer sample of an active drag
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DragTracker {
    last: Option<PointerSample>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.last.is_some()
    }

    /// Pick up the ball: motion stops and any scoring arc is forgotten
    pub fn grab(&mut self, ball: &mut BallState, sample: PointerSample) {
        ball.dragging = true;
        ball.stop();
        ball.was_above_rim = false;
        self.last = Some(sample);
    }

    /// Follow the pointer and refresh the throw velocity
    ///
    /// The ball tracks the pointer unclamped, so it may sit outside the court
    /// until released. Velocity is only measured across at least
    /// `min_drag_interval_ms`; closer samples (or out of order ones) move the
    /// ball, leave the velocity alone and keep the older reference sample.
    pub fn drag_to(&mut self, ball: &mut BallState, sample: PointerSample, tuning: &Tuning) {
        let Some(last) = self.last else {
            return;
        };

        ball.pos = sample.pos - Vec2::splat(BALL_RADIUS);

        let elapsed = sample.time_ms - last.time_ms;
        if elapsed <= 0.0 || elapsed < f64::from(tuning.min_drag_interval_ms) {
            return;
        }

        let delta = (sample.pos - last.pos).as_dvec2();
        let vel = (delta / elapsed * f64::from(tuning.throw_power)).as_vec2();
        if vel.is_finite() {
            ball.vel = vel;
        }
        self.last = Some(sample);
    }

    /// Let go: the last estimated velocity becomes the launch velocity
    ///
    /// Returns false if no drag was in progress.
    pub fn release(&mut self, ball: &mut BallState, tuning: &Tuning) -> bool {
        if self.last.take().is_none() {
            return false;
        }
        ball.dragging = false;
        ball.angular_vel = ball.vel.x * tuning.release_spin_factor;
        log::debug!(
            "Ball released: vel=({:.2}, {:.2}) spin={:.2}",
            ball.vel.x,
            ball.vel.y,
            ball.angular_vel
        );
        true
    }

    /// Abandon a drag without throwing
    pub fn cancel(&mut self, ball: &mut BallState) {
        self.last = None;
        ball.dragging = false;
    }
}

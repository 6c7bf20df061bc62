//! Per-frame simulation step
//!
//! One call advances the ball by one animation frame. All constants are
//! per-frame values from `Tuning`.

use super::collision::resolve_collisions;
use super::state::{BallState, GameEvent, GameState, HoopGeometry};
use crate::tuning::Tuning;

/// Advance the game state by one frame
///
/// A ball held by the pointer is left alone. Returns what happened this frame.
pub fn tick(state: &mut GameState, tuning: &Tuning) -> Vec<GameEvent> {
    if state.ball.dragging {
        return Vec::new();
    }

    state.frames += 1;
    let ball = &mut state.ball;

    integrate(ball, tuning);
    let mut events = resolve_collisions(ball, &state.viewport, &state.hoop, tuning);

    if detect_score(ball, &state.hoop, tuning) {
        state.score += 1;
        log::info!("Scored! Total: {}", state.score);
        events.push(GameEvent::Scored { score: state.score });
    }

    events
}

/// Gravity, motion, spin, then air resistance
fn integrate(ball: &mut BallState, tuning: &Tuning) {
    ball.vel.y += tuning.gravity;
    ball.pos += ball.vel;
    ball.rotation += ball.angular_vel;

    ball.vel *= tuning.air_resistance;
    ball.angular_vel *= tuning.spin_decay;
}

/// Track the scoring arc; returns true on the frame a basket completes
///
/// A basket needs the ball center to be seen above the rim and then below it,
/// both while inside the rim span and falling. The flag is consumed by the
/// score, so one arc counts once.
pub fn detect_score(ball: &mut BallState, hoop: &HoopGeometry, tuning: &Tuning) -> bool {
    let center = ball.center();
    let falling = ball.vel.y > 0.0;

    if hoop.spans(center.x) {
        if center.y < hoop.center.y && falling {
            ball.was_above_rim = true;
        } else if center.y > hoop.center.y && ball.was_above_rim && falling {
            ball.was_above_rim = false;
            ball.vel.y *= tuning.swish_damping;
            return true;
        }
    } else if center.y > hoop.center.y + tuning.score_reset_margin {
        ball.was_above_rim = false;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BALL_RADIUS;
    use crate::sim::state::Viewport;
    use glam::Vec2;
    use proptest::prelude::*;

    fn state() -> GameState {
        GameState::new(Viewport::new(1000.0, 800.0))
    }

    /// Place the ball so its center sits at `center`
    fn center_ball(state: &mut GameState, center: Vec2, vel: Vec2) {
        state.ball.pos = center - Vec2::splat(BALL_RADIUS);
        state.ball.vel = vel;
    }

    #[test]
    fn test_gravity_and_air_resistance() {
        let tuning = Tuning::default();
        let mut state = state();
        center_ball(&mut state, Vec2::new(300.0, 300.0), Vec2::new(2.0, 0.0));
        state.ball.angular_vel = 10.0;

        let events = tick(&mut state, &tuning);
        assert!(events.is_empty());
        assert_eq!(state.frames, 1);
        assert!((state.ball.center().x - 302.0).abs() < 1e-4);
        assert!((state.ball.center().y - 300.25).abs() < 1e-4);
        assert!((state.ball.vel.y - 0.25 * 0.998).abs() < 1e-6);
        assert!((state.ball.rotation - 10.0).abs() < 1e-6);
        assert!((state.ball.angular_vel - 9.9).abs() < 1e-5);
    }

    #[test]
    fn test_dragging_ball_is_frozen() {
        let tuning = Tuning::default();
        let mut state = state();
        state.ball.dragging = true;
        state.ball.vel = Vec2::new(5.0, 5.0);
        let before = state.ball;

        assert!(tick(&mut state, &tuning).is_empty());
        assert_eq!(state.ball, before);
        assert_eq!(state.frames, 0);
    }

    #[test]
    fn test_ball_at_rest_stays_put() {
        let tuning = Tuning::default();
        let mut state = state();
        state.ball.pos.y = state.viewport.max_y();

        for _ in 0..10 {
            assert!(tick(&mut state, &tuning).is_empty());
        }
        assert_eq!(state.ball.pos.y, state.viewport.max_y());
        assert_eq!(state.ball.vel, Vec2::ZERO);
    }

    #[test]
    fn test_drop_through_hoop_scores_once() {
        let tuning = Tuning::default();
        let mut state = state();
        let hoop = state.hoop.center;
        // Rim anchors sit 20px left of the hoop center; dropping midway between
        // them grazes neither
        center_ball(&mut state, hoop - Vec2::new(20.0, 120.0), Vec2::new(0.0, 2.0));

        let mut scores = Vec::new();
        for _ in 0..200 {
            for event in tick(&mut state, &tuning) {
                if let GameEvent::Scored { score } = event {
                    scores.push(score);
                }
            }
        }
        assert_eq!(scores, vec![1]);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_swish_damps_fall() {
        let tuning = Tuning::default();
        let mut state = state();
        let hoop = state.hoop;
        center_ball(&mut state, hoop.center + Vec2::new(0.0, 3.0), Vec2::new(0.0, 6.0));
        state.ball.was_above_rim = true;

        assert!(detect_score(&mut state.ball, &hoop, &tuning));
        assert!((state.ball.vel.y - 4.8).abs() < 1e-5);
        assert!(!state.ball.was_above_rim);

        // Still below the rim and falling on the next frame: no second score
        assert!(!detect_score(&mut state.ball, &hoop, &tuning));
    }

    #[test]
    fn test_rising_ball_does_not_arm() {
        let tuning = Tuning::default();
        let mut state = state();
        let hoop = state.hoop;
        center_ball(&mut state, hoop.center - Vec2::new(0.0, 10.0), Vec2::new(0.0, -4.0));
        assert!(!detect_score(&mut state.ball, &hoop, &tuning));
        assert!(!state.ball.was_above_rim);
    }

    #[test]
    fn test_drift_below_rim_clears_flag() {
        let tuning = Tuning::default();
        let mut state = state();
        let hoop = state.hoop;
        state.ball.was_above_rim = true;

        // Outside the span, but not yet past the reset margin
        center_ball(&mut state, hoop.center + Vec2::new(-100.0, 40.0), Vec2::new(0.0, 3.0));
        detect_score(&mut state.ball, &hoop, &tuning);
        assert!(state.ball.was_above_rim);

        center_ball(&mut state, hoop.center + Vec2::new(-100.0, 60.0), Vec2::new(0.0, 3.0));
        detect_score(&mut state.ball, &hoop, &tuning);
        assert!(!state.ball.was_above_rim);
    }

    #[test]
    fn test_floor_bounce_event() {
        let tuning = Tuning::default();
        let mut state = state();
        state.ball.pos = Vec2::new(200.0, state.viewport.max_y() - 1.0);
        state.ball.vel = Vec2::new(0.0, 12.0);

        let events = tick(&mut state, &tuning);
        assert_eq!(events, vec![GameEvent::FloorBounce]);
        let incoming = (12.0 + tuning.gravity) * tuning.air_resistance;
        assert!((state.ball.vel.y - (-incoming * tuning.bounce)).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_ball_stays_in_bounds(
            x in -500.0f32..1500.0,
            y in -500.0f32..1300.0,
            vx in -80.0f32..80.0,
            vy in -80.0f32..80.0,
            spin in -50.0f32..50.0,
            frames in 1usize..120,
        ) {
            let tuning = Tuning::default();
            let mut state = state();
            state.ball.pos = Vec2::new(x, y);
            state.ball.vel = Vec2::new(vx, vy);
            state.ball.angular_vel = spin;

            for _ in 0..frames {
                tick(&mut state, &tuning);
                let pos = state.ball.pos;
                prop_assert!(pos.x >= 0.0 && pos.x <= state.viewport.max_x());
                prop_assert!(pos.y >= 0.0 && pos.y <= state.viewport.max_y());
                prop_assert!(state.ball.vel.is_finite());
            }
        }
    }
}

//! Collision detection and response against the court
//!
//! The court is an axis-aligned box plus two rim points. Resolution order is
//! fixed: floor, walls, ceiling, rim, then a final clamp into the play field.

use glam::Vec2;

use super::state::{BallState, GameEvent, HoopGeometry, RimSide, Viewport};
use crate::consts::BALL_RADIUS;
use crate::tuning::Tuning;

/// Result of a ball vs rim point check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Unit vector from the rim point toward the ball center
    pub normal: Vec2,
    /// Overlap depth (for position correction)
    pub penetration: f32,
    /// Horizontal offset of the ball center from the rim point
    pub dx: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
            dx: 0.0,
        }
    }
}

/// Resolve every court collision for one frame
pub fn resolve_collisions(
    ball: &mut BallState,
    viewport: &Viewport,
    hoop: &HoopGeometry,
    tuning: &Tuning,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if let Some(event) = floor_collision(ball, viewport, tuning) {
        events.push(event);
    }
    if wall_collision(ball, viewport, tuning) {
        events.push(GameEvent::WallHit);
    }
    if ceiling_collision(ball, tuning) {
        events.push(GameEvent::CeilingHit);
    }
    for (side, point) in hoop.rim_points() {
        if rim_collision(ball, point, tuning) {
            events.push(GameEvent::RimHit { side });
        }
    }

    // A rim push can shove the ball past an edge
    ball.pos = viewport.clamp(ball.pos);

    events
}

/// Bounce off the floor, coming to rest when slow enough
///
/// A ball already lying on the floor sinks a fraction of a pixel under gravity
/// each frame and is put back here; that settling contact reports nothing.
pub fn floor_collision(
    ball: &mut BallState,
    viewport: &Viewport,
    tuning: &Tuning,
) -> Option<GameEvent> {
    let floor = viewport.max_y();
    if ball.pos.y <= floor {
        return None;
    }

    let incoming = ball.vel;
    ball.pos.y = floor;
    ball.vel.y *= -tuning.bounce;
    ball.vel.x *= tuning.friction;
    ball.angular_vel *= tuning.friction;

    if ball.vel.y.abs() < tuning.rest_speed && ball.vel.x.abs() < tuning.rest_speed {
        ball.stop();
        let settling =
            incoming.y.abs() < tuning.rest_speed && incoming.x.abs() < tuning.rest_speed;
        return (!settling).then_some(GameEvent::CameToRest);
    }

    Some(GameEvent::FloorBounce)
}

/// Bounce off the left or right wall; returns true on a hit
pub fn wall_collision(ball: &mut BallState, viewport: &Viewport, tuning: &Tuning) -> bool {
    let right = viewport.max_x();
    let mut hit = false;

    if ball.pos.x < 0.0 {
        ball.pos.x = 0.0;
        hit = true;
    }
    if ball.pos.x > right {
        ball.pos.x = right;
        hit = true;
    }

    if hit {
        ball.vel.x *= -tuning.bounce;
        ball.angular_vel *= -tuning.wall_spin_damping;
    }
    hit
}

/// Bounce off the top of the viewport; returns true on a hit
pub fn ceiling_collision(ball: &mut BallState, tuning: &Tuning) -> bool {
    if ball.pos.y >= 0.0 {
        return false;
    }
    ball.pos.y = 0.0;
    ball.vel.y *= -tuning.bounce;
    true
}

/// Check the ball against a single rim point
pub fn ball_rim_point_collision(center: Vec2, point: Vec2, reach: f32) -> CollisionResult {
    let offset = center - point;
    let dist = offset.length();
    if dist >= reach {
        return CollisionResult::miss();
    }

    // atan2(0, 0) is 0, so a dead-center hit pushes right rather than going NaN
    let angle = offset.y.atan2(offset.x);
    CollisionResult {
        hit: true,
        normal: Vec2::new(angle.cos(), angle.sin()),
        penetration: reach - dist,
        dx: offset.x,
    }
}

/// Knock the ball off a rim point; returns true on a hit
pub fn rim_collision(ball: &mut BallState, point: Vec2, tuning: &Tuning) -> bool {
    let result = ball_rim_point_collision(ball.center(), point, BALL_RADIUS + tuning.rim_thickness);
    if !result.hit {
        return false;
    }

    let impulse = tuning.rim_push_factor * ball.speed() + tuning.rim_push_base;
    ball.vel += result.normal * impulse;
    ball.pos += result.normal * result.penetration;
    ball.angular_vel += if result.dx > 0.0 {
        -tuning.rim_spin_impulse
    } else {
        tuning.rim_spin_impulse
    };

    log::debug!(
        "Rim hit at ({:.1}, {:.1}), impulse {:.2}",
        point.x,
        point.y,
        impulse
    );
    true
}

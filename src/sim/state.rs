//! Game state and core simulation types
//!
//! Screen-space pixels throughout: origin at the top-left, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Play-field size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Largest x for the ball's top-left corner
    pub fn max_x(&self) -> f32 {
        (self.width - BALL_SIZE).max(0.0)
    }

    /// Largest y for the ball's top-left corner (the floor)
    pub fn max_y(&self) -> f32 {
        (self.height - BALL_SIZE).max(0.0)
    }

    /// Clamp a top-left ball position into the play field
    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        Vec2::new(pos.x.clamp(0.0, self.max_x()), pos.y.clamp(0.0, self.max_y()))
    }

    /// Where an idle ball waits: centered horizontally, near the bottom
    pub fn rest_position(&self) -> Vec2 {
        Vec2::new(
            self.width / 2.0 - BALL_RADIUS,
            self.height - REST_MARGIN_Y,
        )
    }
}

/// Which rim point was struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RimSide {
    Left,
    Right,
}

/// Hoop placement, derived from the viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoopGeometry {
    pub center: Vec2,
    pub rim_radius: f32,
}

impl HoopGeometry {
    pub fn for_viewport(viewport: &Viewport) -> Self {
        Self {
            center: Vec2::new(viewport.width - HOOP_MARGIN_X, HOOP_Y),
            rim_radius: RIM_RADIUS,
        }
    }

    /// The two point obstacles standing in for the ring
    pub fn rim_points(&self) -> [(RimSide, Vec2); 2] {
        let y = self.center.y - RIM_ANCHOR_OFFSET;
        [
            (
                RimSide::Left,
                Vec2::new(self.center.x - self.rim_radius - RIM_ANCHOR_OFFSET, y),
            ),
            (
                RimSide::Right,
                Vec2::new(self.center.x + self.rim_radius - RIM_ANCHOR_OFFSET, y),
            ),
        ]
    }

    /// Whether an x coordinate lies strictly inside the rim's horizontal span
    pub fn spans(&self, x: f32) -> bool {
        (x - self.center.x).abs() < self.rim_radius
    }
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallState {
    /// Top-left corner of the ball's bounding square
    pub pos: Vec2,
    /// Pixels per frame
    pub vel: Vec2,
    /// Degrees
    pub rotation: f32,
    /// Degrees per frame
    pub angular_vel: f32,
    /// Ball center has been seen above the rim, inside its span, falling
    pub was_above_rim: bool,
    pub dragging: bool,
}

impl BallState {
    /// A motionless ball at `pos`
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            rotation: 0.0,
            angular_vel: 0.0,
            was_above_rim: false,
            dragging: false,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(BALL_RADIUS)
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Whether a screen point falls on the ball
    pub fn contains(&self, point: Vec2) -> bool {
        point.distance_squared(self.center()) <= BALL_RADIUS * BALL_RADIUS
    }

    /// Kill all motion, keeping rotation
    pub fn stop(&mut self) {
        self.vel = Vec2::ZERO;
        self.angular_vel = 0.0;
    }
}

/// Notifications produced by a simulation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    FloorBounce,
    WallHit,
    CeilingHit,
    RimHit { side: RimSide },
    /// Floor contact slowed the ball below rest speed
    CameToRest,
    /// A basket; carries the new total
    Scored { score: u32 },
}

/// Everything a running session simulates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub ball: BallState,
    pub hoop: HoopGeometry,
    pub viewport: Viewport,
    pub score: u32,
    /// Simulation frame counter
    pub frames: u64,
}

impl GameState {
    /// Fresh state with the ball resting at its idle spot
    pub fn new(viewport: Viewport) -> Self {
        Self {
            ball: BallState::at(viewport.rest_position()),
            hoop: HoopGeometry::for_viewport(&viewport),
            viewport,
            score: 0,
            frames: 0,
        }
    }

    /// Put the ball back at its idle spot, motionless
    pub fn reset_ball(&mut self) {
        self.ball = BallState::at(self.viewport.rest_position());
    }

    /// Adopt a new viewport and rebuild the hoop geometry
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.hoop = HoopGeometry::for_viewport(&viewport);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hoop_follows_viewport_width() {
        let hoop = HoopGeometry::for_viewport(&Viewport::new(1280.0, 720.0));
        assert_eq!(hoop.center, Vec2::new(1180.0, 250.0));
        assert_eq!(hoop.rim_radius, 45.0);
    }

    #[test]
    fn test_rim_points_straddle_hoop() {
        let hoop = HoopGeometry::for_viewport(&Viewport::new(1000.0, 800.0));
        let [(left_side, left), (right_side, right)] = hoop.rim_points();
        assert_eq!(left_side, RimSide::Left);
        assert_eq!(right_side, RimSide::Right);
        assert_eq!(left, Vec2::new(900.0 - 45.0 - 20.0, 230.0));
        assert_eq!(right, Vec2::new(900.0 + 45.0 - 20.0, 230.0));
    }

    #[test]
    fn test_rest_position() {
        let vp = Viewport::new(1000.0, 800.0);
        assert_eq!(vp.rest_position(), Vec2::new(460.0, 700.0));
    }

    #[test]
    fn test_clamp_handles_tiny_viewport() {
        let vp = Viewport::new(50.0, 30.0);
        assert_eq!(vp.clamp(Vec2::new(10.0, -5.0)), Vec2::ZERO);
    }

    #[test]
    fn test_ball_contains() {
        let ball = BallState::at(Vec2::new(100.0, 100.0));
        assert!(ball.contains(Vec2::new(140.0, 140.0)));
        assert!(ball.contains(Vec2::new(179.0, 140.0)));
        // Corner of the bounding square is off the ball
        assert!(!ball.contains(Vec2::new(101.0, 101.0)));
    }
}

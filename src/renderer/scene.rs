//! Scene assembly: court, hoop, ball and the optional debug overlay
//!
//! Output is in screen pixels; the pipeline maps to clip space.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::BALL_RADIUS;
use crate::settings::Settings;
use crate::sim::GameState;

const BALL_SEGMENTS: u32 = 32;
const SEAM_WIDTH: f32 = 3.0;
const RIM_WIDTH: f32 = 6.0;
const NET_DEPTH: f32 = 50.0;

/// Build the full frame
pub fn build(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(1024);

    court(state, &mut vertices);
    hoop(state, &mut vertices);
    ball(state, &mut vertices);
    if settings.debug_overlay {
        debug_overlay(state, &mut vertices);
    }

    vertices
}

fn court(state: &GameState, out: &mut Vec<Vertex>) {
    let vp = state.viewport;
    out.extend(shapes::rect(
        Vec2::new(0.0, vp.height - 4.0),
        Vec2::new(vp.width, vp.height),
        colors::FLOOR_LINE,
    ));
}

/// Rim, net and backboard, drawn where the rim points actually are
fn hoop(state: &GameState, out: &mut Vec<Vertex>) {
    let [(_, left), (_, right)] = state.hoop.rim_points();

    let board_x = right.x + RIM_WIDTH;
    out.extend(shapes::rect(
        Vec2::new(board_x, right.y - 90.0),
        Vec2::new(board_x + 8.0, right.y + 20.0),
        colors::BACKBOARD,
    ));

    let net_inset = (right.x - left.x) * 0.2;
    out.extend(shapes::line(
        left,
        left + Vec2::new(net_inset, NET_DEPTH),
        2.0,
        colors::NET,
    ));
    out.extend(shapes::line(
        right,
        right + Vec2::new(-net_inset, NET_DEPTH),
        2.0,
        colors::NET,
    ));

    out.extend(shapes::line(left, right, RIM_WIDTH, colors::RIM));
}

/// Ball with a cross seam turned by its rotation
fn ball(state: &GameState, out: &mut Vec<Vertex>) {
    let ball = &state.ball;
    let center = ball.center();
    out.extend(shapes::circle(center, BALL_RADIUS, colors::BALL, BALL_SEGMENTS));
    out.extend(shapes::ring(
        center,
        BALL_RADIUS - SEAM_WIDTH,
        BALL_RADIUS,
        colors::BALL_SEAM,
        BALL_SEGMENTS,
    ));

    let angle = ball.rotation.to_radians();
    let along = Vec2::from_angle(angle) * BALL_RADIUS;
    let across = along.perp();
    out.extend(shapes::line(center - along, center + along, SEAM_WIDTH, colors::BALL_SEAM));
    out.extend(shapes::line(center - across, center + across, SEAM_WIDTH, colors::BALL_SEAM));
}

/// Hitboxes as the simulation sees them
fn debug_overlay(state: &GameState, out: &mut Vec<Vertex>) {
    for (_, point) in state.hoop.rim_points() {
        out.extend(shapes::circle(point, 5.0, colors::DEBUG_RIM_POINT, 12));
    }
    out.extend(shapes::circle(
        state.hoop.center,
        2.0,
        colors::DEBUG_HOOP_CENTER,
        8,
    ));
    out.extend(shapes::circle(
        state.ball.center(),
        BALL_RADIUS,
        colors::DEBUG_HITBOX,
        BALL_SEGMENTS,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Viewport;

    fn state() -> GameState {
        GameState::new(Viewport::new(1000.0, 800.0))
    }

    #[test]
    fn test_scene_is_triangle_list() {
        let vertices = build(&state(), &Settings::default());
        assert!(!vertices.is_empty());
        assert_eq!(vertices.len() % 3, 0);
    }

    #[test]
    fn test_debug_overlay_adds_hitboxes() {
        let state = state();
        let plain = build(&state, &Settings::default());
        let debug = build(
            &state,
            &Settings {
                debug_overlay: true,
                ..Default::default()
            },
        );
        assert!(debug.len() > plain.len());
        assert!(debug.iter().any(|v| v.color == colors::DEBUG_HITBOX));
        assert!(!plain.iter().any(|v| v.color == colors::DEBUG_HITBOX));
    }

    #[test]
    fn test_ball_seam_follows_rotation() {
        let mut state = state();
        let before = build(&state, &Settings::default());
        state.ball.rotation = 45.0;
        let after = build(&state, &Settings::default());

        assert_eq!(before.len(), after.len());
        assert_ne!(before, after);
    }

    #[test]
    fn test_ball_drawn_at_center() {
        let state = state();
        let center = state.ball.center();
        let vertices = build(&state, &Settings::default());
        assert!(
            vertices
                .iter()
                .any(|v| v.color == colors::BALL && Vec2::from(v.position) == center)
        );
    }
}

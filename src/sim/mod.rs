//! Ball simulation module
//!
//! All gameplay logic lives here. This module stays free of rendering and
//! platform dependencies:
//! - One step per animation frame
//! - Per-frame constants from `Tuning`
//! - Pointer input arrives as timestamped samples

pub mod collision;
pub mod drag;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, ball_rim_point_collision, resolve_collisions};
pub use drag::{DragTracker, PointerSample};
pub use state::{BallState, GameEvent, GameState, HoopGeometry, RimSide, Viewport};
pub use tick::{detect_score, tick};

//! Hoop Toss - A drag-and-fling basketball mini-game
//!
//! Core modules:
//! - `sim`: Per-frame simulation (physics, collisions, scoring)
//! - `session`: Session object driven by the frame loop and pointer input
//! - `renderer`: WebGPU rendering pipeline
//! - `tuning`: Data-driven physics constants
//! - `settings`: Player preferences

pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use session::{FrameReport, Session};
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Fixed court geometry (screen pixels, y grows downward)
pub mod consts {
    /// Ball bounding square edge
    pub const BALL_SIZE: f32 = 80.0;
    pub const BALL_RADIUS: f32 = BALL_SIZE / 2.0;

    /// Hoop center sits this far in from the right edge of the viewport
    pub const HOOP_MARGIN_X: f32 = 100.0;
    /// Hoop center height from the top of the viewport
    pub const HOOP_Y: f32 = 250.0;
    /// Half the distance between the two rim points
    pub const RIM_RADIUS: f32 = 45.0;
    /// Rim anchors are shifted up-left to line up with the hoop artwork
    pub const RIM_ANCHOR_OFFSET: f32 = 20.0;

    /// Idle ball rests this far above the bottom of the viewport
    pub const REST_MARGIN_Y: f32 = 100.0;
}

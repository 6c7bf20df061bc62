//! Data-driven physics tuning
//!
//! Every constant here is a game-feel value applied once per animation frame.
//! A tuning document is plain JSON; missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a tuning document
#[derive(Debug, Error)]
pub enum TuningError {
    /// Document is not valid JSON for `Tuning`
    #[error("tuning parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds a value the simulation cannot use
    #[error("invalid tuning value for {field}: {value}")]
    Invalid { field: &'static str, value: f32 },
}

/// Physics constants for one simulation step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Added to vy every frame
    pub gravity: f32,
    /// Restitution for floor, wall and ceiling bounces
    pub bounce: f32,
    /// Velocity and spin retained on each floor contact
    pub friction: f32,
    /// Velocity retained per frame in flight
    pub air_resistance: f32,
    /// Angular velocity retained per frame
    pub spin_decay: f32,
    /// Spin retained (and reversed) on a wall hit
    pub wall_spin_damping: f32,
    /// Below this speed on both axes a floor contact brings the ball to rest
    pub rest_speed: f32,
    /// Pointer speed (px/ms) to launch velocity (px/frame)
    pub throw_power: f32,
    /// Shortest pointer interval (ms) used to measure throw velocity
    pub min_drag_interval_ms: f32,
    /// Angular velocity per unit of horizontal launch velocity
    pub release_spin_factor: f32,
    /// Extra collision radius around each rim point
    pub rim_thickness: f32,
    /// Fraction of current speed added as outward impulse on a rim hit
    pub rim_push_factor: f32,
    /// Constant outward impulse on a rim hit
    pub rim_push_base: f32,
    /// Angular velocity added on a rim hit
    pub rim_spin_impulse: f32,
    /// vy retained after a score
    pub swish_damping: f32,
    /// Distance below the rim at which an unfinished arc is abandoned
    pub score_reset_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.25,
            bounce: 0.7,
            friction: 0.995,
            air_resistance: 0.998,
            spin_decay: 0.99,
            wall_spin_damping: 0.5,
            rest_speed: 1.0,
            throw_power: 15.0,
            min_drag_interval_ms: 1.0,
            release_spin_factor: 2.0,
            rim_thickness: 5.0,
            rim_push_factor: 0.5,
            rim_push_base: 2.0,
            rim_spin_impulse: 5.0,
            swish_damping: 0.8,
            score_reset_margin: 50.0,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would make the simulation diverge or go NaN
    pub fn validate(&self) -> Result<(), TuningError> {
        let unit = [
            ("bounce", self.bounce),
            ("friction", self.friction),
            ("air_resistance", self.air_resistance),
            ("spin_decay", self.spin_decay),
            ("wall_spin_damping", self.wall_spin_damping),
            ("swish_damping", self.swish_damping),
        ];
        for (field, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(TuningError::Invalid { field, value });
            }
        }

        let non_negative = [
            ("rest_speed", self.rest_speed),
            ("throw_power", self.throw_power),
            ("rim_thickness", self.rim_thickness),
            ("rim_push_factor", self.rim_push_factor),
            ("rim_push_base", self.rim_push_base),
            ("rim_spin_impulse", self.rim_spin_impulse),
            ("score_reset_margin", self.score_reset_margin),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(TuningError::Invalid { field, value });
            }
        }

        let value = self.min_drag_interval_ms;
        if !value.is_finite() || value <= 0.0 {
            return Err(TuningError::Invalid {
                field: "min_drag_interval_ms",
                value,
            });
        }

        let finite = [
            ("gravity", self.gravity),
            ("release_spin_factor", self.release_spin_factor),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(TuningError::Invalid { field, value });
            }
        }

        Ok(())
    }
}

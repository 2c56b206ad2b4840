//! Exercise configuration
//!
//! Parameters a therapist tunes per prescription. Deserializable so the
//! browser bridge and saved prescriptions can override catalog defaults
//! field by field.

use serde::{Deserialize, Serialize};

use crate::pose::Side;

/// Configuration parameters for one exercise prescription
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExerciseConfig {
    /// Angle the movement should reach, in degrees
    pub target_angle: f32,
    /// Acceptable deviation from target, in degrees
    #[serde(default = "default_tolerance")]
    pub tolerance: f32,
    /// Lower bound for range-based evaluation
    #[serde(default)]
    pub min_angle: Option<f32>,
    /// Upper bound for range-based evaluation
    #[serde(default)]
    pub max_angle: Option<f32>,
    /// Required hold time at the target, in seconds
    #[serde(default)]
    pub hold_duration: f32,
    /// Target number of repetitions
    #[serde(default = "default_repetitions")]
    pub repetitions: u32,
    /// Which side of the body performs the movement
    #[serde(default)]
    pub side: Side,
    /// Use 3D coordinates for angle extraction
    #[serde(default)]
    pub use_3d: bool,
}

fn default_tolerance() -> f32 {
    15.0
}

fn default_repetitions() -> u32 {
    1
}

impl ExerciseConfig {
    /// Config with the given target and default everything else
    pub fn new(target_angle: f32) -> Self {
        Self {
            target_angle,
            tolerance: default_tolerance(),
            min_angle: None,
            max_angle: None,
            hold_duration: 0.0,
            repetitions: default_repetitions(),
            side: Side::default(),
            use_3d: false,
        }
    }

    /// Whether both range bounds are set, selecting range-based scoring
    pub fn has_range(&self) -> bool {
        self.min_angle.is_some() && self.max_angle.is_some()
    }
}

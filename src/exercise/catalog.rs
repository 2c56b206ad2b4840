//! Exercise catalog
//!
//! Six standard rehabilitation exercises as a closed set of data-driven
//! variants. A variant contributes its landmark-triple extraction and
//! default configuration; the evaluation algorithm is shared. Adding an
//! exercise means adding a table entry, not a new type.

use crate::error::{EngineError, Result};
use crate::pose::{angles, LandmarkSet};

use super::buffer::AngleBuffer;
use super::config::ExerciseConfig;
use super::feedback::{FeedbackGenerator, FeedbackResult};

/// Frames of angle history kept per exercise
pub const ANGLE_HISTORY_CAPACITY: usize = 30;

// ============================================================================
// EXERCISE KINDS
// ============================================================================

/// The shipped exercise variants
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExerciseKind {
    ShoulderFlexion,
    ShoulderAbduction,
    ElbowFlexion,
    KneeFlexion,
    HipFlexion,
    HipAbduction,
}

/// Every catalog entry, in lookup order
pub const EXERCISE_KINDS: [ExerciseKind; 6] = [
    ExerciseKind::ShoulderFlexion,
    ExerciseKind::ShoulderAbduction,
    ExerciseKind::ElbowFlexion,
    ExerciseKind::KneeFlexion,
    ExerciseKind::HipFlexion,
    ExerciseKind::HipAbduction,
];

impl ExerciseKind {
    /// Registry key used for lookup
    pub fn key(self) -> &'static str {
        match self {
            ExerciseKind::ShoulderFlexion => "shoulder_flexion",
            ExerciseKind::ShoulderAbduction => "shoulder_abduction",
            ExerciseKind::ElbowFlexion => "elbow_flexion",
            ExerciseKind::KneeFlexion => "knee_flexion",
            ExerciseKind::HipFlexion => "hip_flexion",
            ExerciseKind::HipAbduction => "hip_abduction",
        }
    }

    pub fn from_key(key: &str) -> Option<ExerciseKind> {
        EXERCISE_KINDS.iter().copied().find(|k| k.key() == key)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ExerciseKind::ShoulderFlexion => "Shoulder Flexion",
            ExerciseKind::ShoulderAbduction => "Shoulder Abduction",
            ExerciseKind::ElbowFlexion => "Elbow Flexion",
            ExerciseKind::KneeFlexion => "Knee Flexion",
            ExerciseKind::HipFlexion => "Hip Flexion",
            ExerciseKind::HipAbduction => "Hip Abduction",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ExerciseKind::ShoulderFlexion => {
                "Raise your arm forward and upward, keeping your elbow straight. \
                 This exercise improves the range of motion in your shoulder joint."
            }
            ExerciseKind::ShoulderAbduction => {
                "Raise your arm out to the side, keeping your elbow straight. \
                 This exercise improves shoulder mobility in the frontal plane."
            }
            ExerciseKind::ElbowFlexion => {
                "Bend your elbow, bringing your hand toward your shoulder. \
                 This exercise improves elbow mobility and forearm strength."
            }
            ExerciseKind::KneeFlexion => {
                "Bend your knee, bringing your heel toward your buttocks. \
                 This exercise improves knee mobility and hamstring strength."
            }
            ExerciseKind::HipFlexion => {
                "Raise your thigh forward and upward while standing. \
                 This exercise improves hip mobility and core stability."
            }
            ExerciseKind::HipAbduction => {
                "Move your leg outward, away from your body. \
                 This exercise improves hip stability and lateral movement."
            }
        }
    }

    /// Catalog default configuration for this variant
    pub fn default_config(self) -> ExerciseConfig {
        let mut config = ExerciseConfig::new(90.0);
        match self {
            ExerciseKind::ShoulderFlexion | ExerciseKind::ShoulderAbduction => {
                config.min_angle = Some(0.0);
                config.max_angle = Some(180.0);
            }
            ExerciseKind::ElbowFlexion => {
                config.target_angle = 140.0;
                config.min_angle = Some(0.0);
                config.max_angle = Some(150.0);
            }
            ExerciseKind::KneeFlexion => {
                config.min_angle = Some(0.0);
                config.max_angle = Some(135.0);
            }
            ExerciseKind::HipFlexion => {
                config.min_angle = Some(0.0);
                config.max_angle = Some(120.0);
            }
            ExerciseKind::HipAbduction => {
                // Hip abduction range is smaller
                config.target_angle = 30.0;
                config.tolerance = 10.0;
                config.min_angle = Some(0.0);
                config.max_angle = Some(45.0);
            }
        }
        config
    }

    /// Extract the variant's primary angle from a landmark set
    pub fn extract_angle(self, landmarks: &LandmarkSet, config: &ExerciseConfig) -> Option<f32> {
        let (side, use_3d) = (config.side, config.use_3d);
        match self {
            ExerciseKind::ShoulderFlexion => angles::shoulder_flexion(landmarks, side, use_3d),
            ExerciseKind::ShoulderAbduction => angles::shoulder_abduction(landmarks, side, use_3d),
            ExerciseKind::ElbowFlexion => angles::elbow_flexion(landmarks, side, use_3d),
            ExerciseKind::KneeFlexion => angles::knee_flexion(landmarks, side, use_3d),
            ExerciseKind::HipFlexion => angles::hip_flexion(landmarks, side, use_3d),
            ExerciseKind::HipAbduction => angles::hip_abduction(landmarks, side, use_3d),
        }
    }

    /// Step-by-step instructions rendered against the active config
    fn instructions(self, config: &ExerciseConfig) -> Vec<String> {
        let side = config.side.as_str();
        let target = config.target_angle;
        match self {
            ExerciseKind::ShoulderFlexion => vec![
                "Stand or sit with good posture, arms at your sides.".to_string(),
                format!("Slowly raise your {side} arm forward and up."),
                "Keep your elbow straight throughout the movement.".to_string(),
                format!("Aim to raise your arm to {target:.0}° from your body."),
                "Hold the position briefly, then slowly lower your arm.".to_string(),
                "Repeat as directed by your therapist.".to_string(),
            ],
            ExerciseKind::ShoulderAbduction => vec![
                "Stand with good posture, arms at your sides.".to_string(),
                format!("Slowly raise your {side} arm out to the side."),
                "Keep your palm facing down and elbow straight.".to_string(),
                format!("Aim to raise your arm to {target:.0}° from your body."),
                "Hold briefly, then slowly lower.".to_string(),
                "Repeat as directed.".to_string(),
            ],
            ExerciseKind::ElbowFlexion => vec![
                "Stand or sit with your arm at your side.".to_string(),
                format!("Keep your {side} upper arm still."),
                "Slowly bend your elbow, bringing your hand toward your shoulder.".to_string(),
                format!("Aim for {target:.0}° of flexion."),
                "Hold briefly at the top, then slowly straighten.".to_string(),
                "Repeat as directed.".to_string(),
            ],
            ExerciseKind::KneeFlexion => vec![
                "Stand holding onto a stable surface for balance.".to_string(),
                format!("Lift your {side} foot off the ground."),
                "Slowly bend your knee, bringing your heel toward your buttocks.".to_string(),
                format!("Aim for {target:.0}° of flexion."),
                "Hold briefly, then slowly lower your foot.".to_string(),
                "Repeat as directed.".to_string(),
            ],
            ExerciseKind::HipFlexion => vec![
                "Stand with good posture, holding onto a stable surface.".to_string(),
                format!("Slowly raise your {side} knee forward and up."),
                "Keep your back straight - don't lean backward.".to_string(),
                format!("Aim to raise your thigh to {target:.0}° from vertical."),
                "Hold briefly, then slowly lower.".to_string(),
                "Repeat as directed.".to_string(),
            ],
            ExerciseKind::HipAbduction => vec![
                "Stand with good posture, holding onto a stable surface.".to_string(),
                format!("Keep your {side} leg straight."),
                "Slowly move your leg outward, away from your body.".to_string(),
                format!("Aim for {target:.0}° of abduction."),
                "Keep your toes pointing forward.".to_string(),
                "Hold briefly, then slowly return to start.".to_string(),
                "Repeat as directed.".to_string(),
            ],
        }
    }
}

// ============================================================================
// DEFINITION
// ============================================================================

/// One exercise wired to its configuration and per-session tracking state
#[derive(Debug)]
pub struct ExerciseDefinition {
    kind: ExerciseKind,
    config: ExerciseConfig,
    instructions: Vec<String>,
    feedback: FeedbackGenerator,
    history: AngleBuffer,
    rep_count: u32,
    in_position: bool,
    hold_started_at: Option<f64>,
}

impl ExerciseDefinition {
    /// Build a definition; `None` config uses the catalog default
    pub fn new(kind: ExerciseKind, config: Option<ExerciseConfig>) -> Self {
        let config = config.unwrap_or_else(|| kind.default_config());
        Self {
            kind,
            config,
            instructions: kind.instructions(&config),
            feedback: FeedbackGenerator::new(),
            history: AngleBuffer::new(ANGLE_HISTORY_CAPACITY),
            rep_count: 0,
            in_position: false,
            hold_started_at: None,
        }
    }

    /// Replace the feedback generator, e.g. with a seeded one for tests
    pub fn with_generator(mut self, feedback: FeedbackGenerator) -> Self {
        self.feedback = feedback;
        self
    }

    pub fn kind(&self) -> ExerciseKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.display_name()
    }

    pub fn description(&self) -> &'static str {
        self.kind.description()
    }

    pub fn instructions(&self) -> &[String] {
        &self.instructions
    }

    pub fn config(&self) -> &ExerciseConfig {
        &self.config
    }

    /// Evaluate one frame of landmarks at wall-clock time `now` (seconds)
    ///
    /// Shared across all variants: extract the primary angle, append it
    /// to the rolling history, then score against the configured range
    /// (when both bounds are set) or the target with tolerance.
    pub fn evaluate(&mut self, now: f64, landmarks: &LandmarkSet) -> FeedbackResult {
        let angle = match self.kind.extract_angle(landmarks, &self.config) {
            Some(angle) => angle,
            None => {
                return FeedbackResult::error(
                    "Cannot detect required body landmarks. Please ensure you're fully visible.",
                    Some("Position yourself so the camera can see your entire body."),
                );
            }
        };

        self.history.push(angle);

        let result = if let (Some(min), Some(max)) = (self.config.min_angle, self.config.max_angle)
        {
            self.feedback
                .range_feedback(angle, min, max, self.kind.display_name())
        } else {
            self.feedback.angle_feedback(
                angle,
                self.config.target_angle,
                self.config.tolerance,
                self.kind.display_name(),
            )
        };

        // Hold bookkeeping: entering the correct position stamps the
        // hold start, leaving it clears the stamp
        if result.is_correct {
            if !self.in_position {
                self.in_position = true;
                self.hold_started_at = Some(now);
            }
        } else {
            self.in_position = false;
            self.hold_started_at = None;
        }

        result
    }

    /// Read the current angle without evaluating or touching state
    pub fn current_angle(&self, landmarks: &LandmarkSet) -> Option<f32> {
        self.kind.extract_angle(landmarks, &self.config)
    }

    /// Smoothed mean over the recent angle history
    pub fn average_recent_angle(&self) -> Option<f32> {
        self.history.mean()
    }

    /// Seconds the subject has held the correct position, 0 when out
    pub fn held_for(&self, now: f64) -> f64 {
        self.hold_started_at.map(|t0| now - t0).unwrap_or(0.0)
    }

    pub fn is_in_position(&self) -> bool {
        self.in_position
    }

    /// Completed repetition count for this exercise instance
    pub fn rep_count(&self) -> u32 {
        self.rep_count
    }

    /// Record a completed repetition
    pub fn record_rep(&mut self) {
        self.rep_count += 1;
    }

    /// Clear rep count, in-position flag, hold timestamp, angle history
    pub fn reset(&mut self) {
        self.rep_count = 0;
        self.in_position = false;
        self.hold_started_at = None;
        self.history.clear();
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Look up an exercise by registry key with an optional config override
pub fn get_exercise(name: &str, config: Option<ExerciseConfig>) -> Result<ExerciseDefinition> {
    match ExerciseKind::from_key(name) {
        Some(kind) => Ok(ExerciseDefinition::new(kind, config)),
        None => Err(EngineError::UnknownExercise {
            name: name.to_string(),
            available: available_exercises().join(", "),
        }),
    }
}

/// Registry keys of every shipped exercise
pub fn available_exercises() -> Vec<&'static str> {
    EXERCISE_KINDS.iter().map(|k| k.key()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::FeedbackLevel;
    use crate::pose::{Joint, Landmark, LandmarkSet, Side};

    fn lm(x: f32, y: f32) -> Landmark {
        Landmark::new(x, y, 0.0, 1.0)
    }

    /// Left arm with the elbow bent to the given flexion angle
    fn elbow_frame(flexion_degrees: f32) -> LandmarkSet {
        let interior = (180.0 - flexion_degrees).to_radians();
        let elbow = (0.5, 0.5);
        let wrist = (
            elbow.0 + 0.3 * interior.sin(),
            elbow.1 - 0.3 * interior.cos(),
        );
        LandmarkSet::from_entries(&[
            (Joint::LeftShoulder, lm(0.5, 0.2)),
            (Joint::LeftElbow, lm(elbow.0, elbow.1)),
            (Joint::LeftWrist, lm(wrist.0, wrist.1)),
        ])
    }

    #[test]
    fn test_registry_contains_all_kinds() {
        let names = available_exercises();
        assert_eq!(names.len(), 6);
        for key in [
            "shoulder_flexion",
            "shoulder_abduction",
            "elbow_flexion",
            "knee_flexion",
            "hip_flexion",
            "hip_abduction",
        ] {
            assert!(names.contains(&key), "missing {key}");
        }
    }

    #[test]
    fn test_unknown_exercise_lists_valid_keys() {
        let err = get_exercise("not_a_real_exercise", None).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("not_a_real_exercise"));
        for key in available_exercises() {
            assert!(message.contains(key), "error message missing {key}");
        }
    }

    #[test]
    fn test_default_configs() {
        let shoulder = ExerciseDefinition::new(ExerciseKind::ShoulderFlexion, None);
        assert_eq!(shoulder.config().target_angle, 90.0);
        assert_eq!(shoulder.config().tolerance, 15.0);
        assert_eq!(shoulder.config().side, Side::Left);

        let elbow = ExerciseDefinition::new(ExerciseKind::ElbowFlexion, None);
        assert_eq!(elbow.config().target_angle, 140.0);
        assert_eq!(elbow.config().max_angle, Some(150.0));

        let hip_abduction = ExerciseDefinition::new(ExerciseKind::HipAbduction, None);
        assert_eq!(hip_abduction.config().target_angle, 30.0);
        assert_eq!(hip_abduction.config().tolerance, 10.0);
    }

    #[test]
    fn test_every_kind_has_name_description_instructions() {
        for kind in EXERCISE_KINDS {
            let exercise = ExerciseDefinition::new(kind, None);
            assert!(!exercise.name().is_empty());
            assert!(!exercise.description().is_empty());
            assert!(!exercise.instructions().is_empty());
        }
    }

    #[test]
    fn test_instructions_mention_configured_side_and_target() {
        let mut config = ExerciseKind::ElbowFlexion.default_config();
        config.side = Side::Right;
        config.target_angle = 120.0;
        let exercise = ExerciseDefinition::new(ExerciseKind::ElbowFlexion, Some(config));

        let joined = exercise.instructions().join(" ");
        assert!(joined.contains("right"));
        assert!(joined.contains("120°"));
    }

    #[test]
    fn test_missing_landmarks_yield_error_feedback() {
        let mut exercise = ExerciseDefinition::new(ExerciseKind::ShoulderFlexion, None);
        let empty = LandmarkSet::from_entries(&[]);

        let result = exercise.evaluate(0.0, &empty);
        assert_eq!(result.level, FeedbackLevel::Error);
        assert!(!result.is_correct);
        assert_eq!(result.score, 0.0);
        assert!(!result.corrections.is_empty());
    }

    #[test]
    fn test_target_path_on_exact_angle() {
        // Config without range bounds takes the target+tolerance path
        let mut config = ExerciseConfig::new(90.0);
        config.min_angle = None;
        config.max_angle = None;
        let mut exercise = ExerciseDefinition::new(ExerciseKind::ElbowFlexion, Some(config))
            .with_generator(FeedbackGenerator::with_seed(11));

        let result = exercise.evaluate(0.0, &elbow_frame(90.0));
        assert_eq!(result.level, FeedbackLevel::Excellent);
        assert!(result.is_correct);
        assert!(result.score >= 90.0);
    }

    #[test]
    fn test_default_config_takes_range_path() {
        // Elbow default range is 0-150; a 90° bend sits inside it
        let mut exercise = ExerciseDefinition::new(ExerciseKind::ElbowFlexion, None)
            .with_generator(FeedbackGenerator::with_seed(12));

        let result = exercise.evaluate(0.0, &elbow_frame(90.0));
        assert!(result.is_correct);
        // Range path reports the range midpoint as the target
        assert_eq!(result.target_angle, Some(75.0));
    }

    #[test]
    fn test_history_is_bounded() {
        let mut exercise = ExerciseDefinition::new(ExerciseKind::ElbowFlexion, None);
        for _ in 0..(ANGLE_HISTORY_CAPACITY + 20) {
            exercise.evaluate(0.0, &elbow_frame(90.0));
        }
        assert!(exercise.average_recent_angle().is_some());
        assert!((exercise.average_recent_angle().unwrap() - 90.0).abs() < 0.5);
    }

    #[test]
    fn test_hold_bookkeeping() {
        let mut config = ExerciseConfig::new(90.0);
        config.min_angle = None;
        config.max_angle = None;
        let mut exercise = ExerciseDefinition::new(ExerciseKind::ElbowFlexion, Some(config));

        exercise.evaluate(10.0, &elbow_frame(90.0));
        assert!(exercise.is_in_position());
        exercise.evaluate(12.5, &elbow_frame(90.0));
        assert!((exercise.held_for(12.5) - 2.5).abs() < 1e-9);

        // Falling out of tolerance clears the hold
        exercise.evaluate(13.0, &elbow_frame(20.0));
        assert!(!exercise.is_in_position());
        assert_eq!(exercise.held_for(14.0), 0.0);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut exercise = ExerciseDefinition::new(ExerciseKind::ElbowFlexion, None);
        exercise.evaluate(0.0, &elbow_frame(90.0));
        exercise.record_rep();
        assert_eq!(exercise.rep_count(), 1);

        exercise.reset();
        assert_eq!(exercise.rep_count(), 0);
        assert!(!exercise.is_in_position());
        assert!(exercise.average_recent_angle().is_none());
    }

    #[test]
    fn test_current_angle_probe_has_no_side_effects() {
        let exercise = ExerciseDefinition::new(ExerciseKind::ElbowFlexion, None);
        let angle = exercise.current_angle(&elbow_frame(45.0)).unwrap();
        assert!((angle - 45.0).abs() < 0.5);
        assert!(exercise.average_recent_angle().is_none());
    }
}

//! Feedback scoring and messaging
//!
//! Stateless scoring of a measured angle against a target (or range),
//! producing a leveled score plus guidance text. The encouragement line
//! is sampled from a per-level pool; the random source is owned by the
//! generator so tests can seed it.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Quality levels for exercise feedback
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackLevel {
    Excellent,
    Good,
    NeedsImprovement,
    Incorrect,
    Error,
}

impl FeedbackLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            FeedbackLevel::Excellent => "excellent",
            FeedbackLevel::Good => "good",
            FeedbackLevel::NeedsImprovement => "needs_improvement",
            FeedbackLevel::Incorrect => "incorrect",
            FeedbackLevel::Error => "error",
        }
    }

    fn default_message(self) -> &'static str {
        match self {
            FeedbackLevel::Excellent => "Excellent form! Keep it up!",
            FeedbackLevel::Good => "Good job! Minor adjustments needed.",
            FeedbackLevel::NeedsImprovement => "Keep trying! Focus on the corrections.",
            FeedbackLevel::Incorrect => "Please adjust your position.",
            FeedbackLevel::Error => "Cannot evaluate - ensure you're visible.",
        }
    }
}

/// Feedback about one evaluated frame
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FeedbackResult {
    pub is_correct: bool,
    pub level: FeedbackLevel,
    /// Numerical score, always clamped to [0, 100]
    pub score: f32,
    pub current_angle: Option<f32>,
    pub target_angle: Option<f32>,
    /// current - target, when both are defined
    pub angle_difference: Option<f32>,
    pub messages: Vec<String>,
    pub corrections: Vec<String>,
    pub encouragements: Vec<String>,
}

impl FeedbackResult {
    /// Error-level result for frames that cannot be evaluated
    pub fn error(message: impl Into<String>, correction: Option<&str>) -> Self {
        Self {
            is_correct: false,
            level: FeedbackLevel::Error,
            score: 0.0,
            current_angle: None,
            target_angle: None,
            angle_difference: None,
            messages: vec![message.into()],
            corrections: correction.map(|c| vec![c.to_string()]).unwrap_or_default(),
            encouragements: Vec::new(),
        }
    }

    /// The most important feedback line
    pub fn primary_message(&self) -> &str {
        self.messages
            .first()
            .map(String::as_str)
            .unwrap_or_else(|| self.level.default_message())
    }

    /// All feedback formatted as a multi-line report
    pub fn summary_text(&self) -> String {
        let mut parts = Vec::new();

        if !self.messages.is_empty() {
            parts.push("Feedback:".to_string());
            parts.extend(self.messages.iter().map(|m| format!("  - {m}")));
        }
        if !self.corrections.is_empty() {
            parts.push("Corrections needed:".to_string());
            parts.extend(self.corrections.iter().map(|c| format!("  - {c}")));
        }
        if !self.encouragements.is_empty() {
            parts.push("Encouragement:".to_string());
            parts.extend(self.encouragements.iter().map(|e| format!("  - {e}")));
        }
        if let Some(angle) = self.current_angle {
            parts.push(format!("Current angle: {angle:.1}°"));
        }
        if let Some(target) = self.target_angle {
            parts.push(format!("Target angle: {target:.1}°"));
        }

        parts.join("\n")
    }
}

// ============================================================================
// ENCOURAGEMENT POOLS
// ============================================================================

const ENCOURAGE_EXCELLENT: [&str; 3] = [
    "Perfect! You're doing great!",
    "Excellent form! Keep it up!",
    "Outstanding! Maintain this quality!",
];

const ENCOURAGE_GOOD: [&str; 3] = [
    "Good job! Almost there!",
    "Nice work! Small improvement needed.",
    "You're doing well! Stay focused.",
];

const ENCOURAGE_NEEDS_IMPROVEMENT: [&str; 3] = [
    "Keep trying! You're making progress.",
    "Don't give up! Focus on the corrections.",
    "Every repetition helps! Stay with it.",
];

const ENCOURAGE_INCORRECT: [&str; 3] = [
    "Let's adjust and try again.",
    "Take a moment to reset your position.",
    "Remember to move slowly and deliberately.",
];

// ============================================================================
// GENERATOR
// ============================================================================

/// Generates contextual feedback for exercises
#[derive(Debug)]
pub struct FeedbackGenerator {
    rng: SmallRng,
}

impl FeedbackGenerator {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Generator with a fixed seed, for deterministic output in tests
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Score a measured angle against a target with tolerance
    ///
    /// Tiers on the tolerance-normalized deviation `r = |d| / tolerance`:
    /// r ≤ 0.3 excellent, ≤ 0.6 good, ≤ 1.0 acceptable, ≤ 2.0 off target,
    /// beyond that incorrect. `is_correct` holds through r ≤ 1.0.
    pub fn angle_feedback(
        &mut self,
        current_angle: f32,
        target_angle: f32,
        tolerance: f32,
        exercise_name: &str,
    ) -> FeedbackResult {
        let difference = current_angle - target_angle;
        let abs_difference = difference.abs();
        let ratio = abs_difference / tolerance;

        let (level, raw_score, is_correct) = if ratio <= 0.3 {
            (FeedbackLevel::Excellent, 100.0 - ratio * 10.0, true)
        } else if ratio <= 0.6 {
            (FeedbackLevel::Good, 80.0 - ratio * 20.0, true)
        } else if ratio <= 1.0 {
            (FeedbackLevel::NeedsImprovement, 60.0 - ratio * 10.0, true)
        } else if ratio <= 2.0 {
            (FeedbackLevel::NeedsImprovement, 40.0 - ratio * 10.0, false)
        } else {
            (FeedbackLevel::Incorrect, (20.0 - ratio * 5.0).max(0.0), false)
        };
        let score = raw_score.clamp(0.0, 100.0);

        let mut messages = Vec::new();
        let mut corrections = Vec::new();

        match level {
            FeedbackLevel::Excellent => {
                messages.push(format!("Perfect {exercise_name} position!"));
            }
            FeedbackLevel::Good => {
                messages.push(format!("Good {exercise_name} - minor adjustment needed."));
                if difference > 0.0 {
                    corrections.push(format!("Decrease angle by about {abs_difference:.0}°"));
                } else {
                    corrections.push(format!("Increase angle by about {abs_difference:.0}°"));
                }
            }
            _ => {
                messages.push(format!("Adjust your {exercise_name} position."));
                if difference > 0.0 {
                    corrections.push(format!(
                        "Lower your position (currently {abs_difference:.0}° too high)"
                    ));
                } else {
                    corrections.push(format!(
                        "Raise your position (currently {abs_difference:.0}° too low)"
                    ));
                }
            }
        }

        let encouragements = self.encouragement(level).into_iter().collect();

        FeedbackResult {
            is_correct,
            level,
            score,
            current_angle: Some(current_angle),
            target_angle: Some(target_angle),
            angle_difference: Some(difference),
            messages,
            corrections,
            encouragements,
        }
    }

    /// Score a measured angle against a target range of motion
    ///
    /// Inside the range the score falls off with the normalized distance
    /// from the midpoint and the frame is always correct; outside, the
    /// deviation past the nearer bound decides between needs-improvement
    /// (within 20% of the range width) and incorrect.
    pub fn range_feedback(
        &mut self,
        current_angle: f32,
        min_angle: f32,
        max_angle: f32,
        exercise_name: &str,
    ) -> FeedbackResult {
        let target_mid = (min_angle + max_angle) / 2.0;
        let range_size = max_angle - min_angle;

        let (level, raw_score, is_correct, messages, corrections);
        if current_angle >= min_angle && current_angle <= max_angle {
            let normalized = (current_angle - target_mid).abs() / (range_size / 2.0);

            if normalized <= 0.3 {
                level = FeedbackLevel::Excellent;
                raw_score = 95.0 - normalized * 15.0;
            } else if normalized <= 0.7 {
                level = FeedbackLevel::Good;
                raw_score = 80.0 - normalized * 20.0;
            } else {
                level = FeedbackLevel::Good;
                raw_score = 70.0 - normalized * 10.0;
            }

            is_correct = true;
            messages = vec![format!("Good {exercise_name} - within target range!")];
            corrections = Vec::new();
        } else {
            let deviation;
            if current_angle < min_angle {
                deviation = min_angle - current_angle;
                corrections = vec![format!(
                    "Increase angle by {deviation:.0}° to reach minimum"
                )];
            } else {
                deviation = current_angle - max_angle;
                corrections = vec![format!("Decrease angle by {deviation:.0}° to stay in range")];
            }

            if deviation <= range_size * 0.2 {
                level = FeedbackLevel::NeedsImprovement;
                raw_score = 50.0 - deviation;
            } else {
                level = FeedbackLevel::Incorrect;
                raw_score = (30.0 - deviation).max(0.0);
            }

            is_correct = false;
            messages = vec![format!("Adjust {exercise_name} to stay within range")];
        }

        let score = raw_score.clamp(0.0, 100.0);
        let encouragements = self.encouragement(level).into_iter().collect();

        FeedbackResult {
            is_correct,
            level,
            score,
            current_angle: Some(current_angle),
            target_angle: Some(target_mid),
            angle_difference: Some(current_angle - target_mid),
            messages,
            corrections,
            encouragements,
        }
    }

    fn encouragement(&mut self, level: FeedbackLevel) -> Option<String> {
        let pool: &[&str] = match level {
            FeedbackLevel::Excellent => &ENCOURAGE_EXCELLENT,
            FeedbackLevel::Good => &ENCOURAGE_GOOD,
            FeedbackLevel::NeedsImprovement => &ENCOURAGE_NEEDS_IMPROVEMENT,
            FeedbackLevel::Incorrect => &ENCOURAGE_INCORRECT,
            FeedbackLevel::Error => return None,
        };
        let idx = self.rng.gen_range(0..pool.len());
        Some(pool[idx].to_string())
    }
}

impl Default for FeedbackGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_target_is_excellent() {
        let mut gen = FeedbackGenerator::with_seed(1);
        let result = gen.angle_feedback(90.0, 90.0, 15.0, "shoulder flexion");

        assert_eq!(result.level, FeedbackLevel::Excellent);
        assert!(result.is_correct);
        assert!(result.score >= 90.0);
        assert_eq!(result.angle_difference, Some(0.0));
    }

    #[test]
    fn test_score_always_in_bounds() {
        let mut gen = FeedbackGenerator::with_seed(2);
        for current in (-360..=360).step_by(7) {
            for tolerance in [1.0, 5.0, 15.0, 45.0] {
                let result = gen.angle_feedback(current as f32, 90.0, tolerance, "test");
                assert!(
                    (0.0..=100.0).contains(&result.score),
                    "score {} out of bounds for current={current} tolerance={tolerance}",
                    result.score
                );
            }
        }
    }

    #[test]
    fn test_correct_iff_within_tolerance() {
        let mut gen = FeedbackGenerator::with_seed(3);
        for offset in (-40..=40).step_by(1) {
            let current = 90.0 + offset as f32;
            let result = gen.angle_feedback(current, 90.0, 15.0, "test");
            let expected = (current - 90.0).abs() / 15.0 <= 1.0;
            assert_eq!(result.is_correct, expected, "offset {offset}");
        }
    }

    #[test]
    fn test_tier_progression() {
        let mut gen = FeedbackGenerator::with_seed(4);
        // r = 0.2, 0.5, 0.8, 1.5, 3.0 against tolerance 10
        assert_eq!(
            gen.angle_feedback(92.0, 90.0, 10.0, "t").level,
            FeedbackLevel::Excellent
        );
        assert_eq!(
            gen.angle_feedback(95.0, 90.0, 10.0, "t").level,
            FeedbackLevel::Good
        );
        assert_eq!(
            gen.angle_feedback(98.0, 90.0, 10.0, "t").level,
            FeedbackLevel::NeedsImprovement
        );
        let off_target = gen.angle_feedback(105.0, 90.0, 10.0, "t");
        assert_eq!(off_target.level, FeedbackLevel::NeedsImprovement);
        assert!(!off_target.is_correct);
        assert_eq!(
            gen.angle_feedback(120.0, 90.0, 10.0, "t").level,
            FeedbackLevel::Incorrect
        );
    }

    #[test]
    fn test_correction_direction_follows_sign() {
        let mut gen = FeedbackGenerator::with_seed(5);

        let too_low = gen.angle_feedback(50.0, 90.0, 15.0, "t");
        assert!(!too_low.is_correct);
        assert!(matches!(
            too_low.level,
            FeedbackLevel::NeedsImprovement | FeedbackLevel::Incorrect
        ));
        assert!(too_low.corrections[0].contains("Raise"));

        let too_high = gen.angle_feedback(130.0, 90.0, 15.0, "t");
        assert!(too_high.corrections[0].contains("Lower"));

        let slightly_high = gen.angle_feedback(96.0, 90.0, 15.0, "t");
        assert!(slightly_high.corrections[0].contains("Decrease"));
    }

    #[test]
    fn test_range_midpoint_is_excellent() {
        let mut gen = FeedbackGenerator::with_seed(6);
        let result = gen.range_feedback(90.0, 70.0, 110.0, "knee flexion");

        assert_eq!(result.level, FeedbackLevel::Excellent);
        assert!(result.is_correct);
        assert_eq!(result.target_angle, Some(90.0));
        assert!(result.corrections.is_empty());
    }

    #[test]
    fn test_range_below_minimum() {
        let mut gen = FeedbackGenerator::with_seed(7);
        let result = gen.range_feedback(60.0, 70.0, 110.0, "knee flexion");

        assert!(!result.is_correct);
        assert!(!result.corrections.is_empty());
        assert!(result.corrections[0].contains("Increase"));
        // 10° past the bound on a 40° range: beyond the 20% band
        assert_eq!(result.level, FeedbackLevel::Incorrect);
    }

    #[test]
    fn test_range_slightly_above_maximum() {
        let mut gen = FeedbackGenerator::with_seed(8);
        let result = gen.range_feedback(115.0, 70.0, 110.0, "knee flexion");

        assert!(!result.is_correct);
        assert_eq!(result.level, FeedbackLevel::NeedsImprovement);
        assert!(result.corrections[0].contains("Decrease"));
    }

    #[test]
    fn test_seeded_encouragement_is_deterministic() {
        let mut a = FeedbackGenerator::with_seed(42);
        let mut b = FeedbackGenerator::with_seed(42);

        for _ in 0..10 {
            let fa = a.angle_feedback(91.0, 90.0, 15.0, "t");
            let fb = b.angle_feedback(91.0, 90.0, 15.0, "t");
            assert_eq!(fa.encouragements, fb.encouragements);
            assert_eq!(fa.encouragements.len(), 1);
        }
    }

    #[test]
    fn test_error_result_has_no_encouragement() {
        let result = FeedbackResult::error("No person detected.", Some("Step into view."));
        assert_eq!(result.level, FeedbackLevel::Error);
        assert_eq!(result.score, 0.0);
        assert!(!result.is_correct);
        assert!(result.encouragements.is_empty());
        assert_eq!(result.primary_message(), "No person detected.");
    }

    #[test]
    fn test_summary_text_sections() {
        let mut gen = FeedbackGenerator::with_seed(9);
        let result = gen.angle_feedback(50.0, 90.0, 15.0, "t");
        let text = result.summary_text();

        assert!(text.contains("Feedback:"));
        assert!(text.contains("Corrections needed:"));
        assert!(text.contains("Current angle: 50.0°"));
        assert!(text.contains("Target angle: 90.0°"));
    }
}

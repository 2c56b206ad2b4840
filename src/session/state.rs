//! Session state and summary export
//!
//! One bounded practice attempt at a target repetition count. Counters
//! move only on repetition completion; the end time is set exactly once,
//! when the target is reached. All timestamps are caller-supplied
//! wall-clock seconds, so irregular frame pacing cannot skew durations.

use serde::Serialize;

use crate::exercise::FeedbackResult;

/// Lifecycle of a session instance
///
/// `Completed` is terminal; continuing requires a fresh session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Starting,
    InProgress,
    Completed,
}

/// Tracks the progress of one exercise session
#[derive(Clone, Debug)]
pub struct ExerciseSession {
    exercise_name: String,
    target_reps: u32,
    completed_reps: u32,
    successful_reps: u32,
    feedback_history: Vec<FeedbackResult>,
    start_time: f64,
    end_time: Option<f64>,
}

impl ExerciseSession {
    pub fn new(exercise_name: impl Into<String>, target_reps: u32, started_at: f64) -> Self {
        Self {
            exercise_name: exercise_name.into(),
            target_reps,
            completed_reps: 0,
            successful_reps: 0,
            feedback_history: Vec::new(),
            start_time: started_at,
            end_time: None,
        }
    }

    /// Append one frame's feedback to the history
    pub fn record_feedback(&mut self, feedback: FeedbackResult) {
        self.feedback_history.push(feedback);
    }

    /// Count a completed repetition; returns true when this repetition
    /// finished the session
    pub fn complete_rep(&mut self, successful: bool, now: f64) -> bool {
        self.completed_reps += 1;
        if successful {
            self.successful_reps += 1;
        }

        if self.completed_reps >= self.target_reps && self.end_time.is_none() {
            self.end_time = Some(now);
            return true;
        }
        false
    }

    pub fn exercise_name(&self) -> &str {
        &self.exercise_name
    }

    pub fn target_reps(&self) -> u32 {
        self.target_reps
    }

    pub fn completed_reps(&self) -> u32 {
        self.completed_reps
    }

    pub fn successful_reps(&self) -> u32 {
        self.successful_reps
    }

    pub fn feedback_history(&self) -> &[FeedbackResult] {
        &self.feedback_history
    }

    /// Mean score across all recorded feedback, 0 when empty
    pub fn average_score(&self) -> f32 {
        if self.feedback_history.is_empty() {
            return 0.0;
        }
        let total: f32 = self.feedback_history.iter().map(|f| f.score).sum();
        total / self.feedback_history.len() as f32
    }

    /// Session duration in seconds, running until the end time is set
    pub fn duration(&self, now: f64) -> f64 {
        self.end_time.unwrap_or(now) - self.start_time
    }

    pub fn is_complete(&self) -> bool {
        self.completed_reps >= self.target_reps
    }

    /// Read-only snapshot for rendering or export
    pub fn summary(&self, now: f64) -> SessionSummary {
        SessionSummary {
            exercise_name: self.exercise_name.clone(),
            target_reps: self.target_reps,
            completed_reps: self.completed_reps,
            successful_reps: self.successful_reps,
            average_score: self.average_score(),
            duration: self.duration(now),
            is_complete: self.is_complete(),
        }
    }
}

/// Plain structured record of a session, suitable for serialization
#[derive(Clone, Debug, Serialize)]
pub struct SessionSummary {
    pub exercise_name: String,
    pub target_reps: u32,
    pub completed_reps: u32,
    pub successful_reps: u32,
    pub average_score: f32,
    pub duration: f64,
    pub is_complete: bool,
}

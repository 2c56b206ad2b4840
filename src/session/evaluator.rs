//! Exercise evaluation orchestrator
//!
//! Wires a landmark stream to one exercise, the repetition tracker, and
//! the active session, and reports progress through named event
//! channels. Observers live on the evaluator instance, never in a
//! process-wide registry, so concurrent evaluators stay independent.

use std::collections::HashMap;

use crate::error::{EngineError, Result};
use crate::exercise::{
    get_exercise, ExerciseConfig, ExerciseDefinition, FeedbackResult, RepetitionTracker,
};
use crate::pose::LandmarkSet;

use super::state::{ExerciseSession, SessionState, SessionSummary};

/// Default repetition target for new sessions
pub const DEFAULT_TARGET_REPS: u32 = 10;

// ============================================================================
// EVENTS
// ============================================================================

/// The five event channels an observer can subscribe to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    SessionStarted,
    RepStarted,
    RepCompleted,
    SessionCompleted,
    FeedbackGenerated,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::SessionStarted => "session_started",
            EventKind::RepStarted => "rep_started",
            EventKind::RepCompleted => "rep_completed",
            EventKind::SessionCompleted => "session_completed",
            EventKind::FeedbackGenerated => "feedback_generated",
        }
    }

    pub fn from_name(name: &str) -> Option<EventKind> {
        match name {
            "session_started" => Some(EventKind::SessionStarted),
            "rep_started" => Some(EventKind::RepStarted),
            "rep_completed" => Some(EventKind::RepCompleted),
            "session_completed" => Some(EventKind::SessionCompleted),
            "feedback_generated" => Some(EventKind::FeedbackGenerated),
            _ => None,
        }
    }
}

/// Payload delivered to observers
#[derive(Clone, Debug)]
pub enum Event {
    SessionStarted(SessionSummary),
    RepStarted {
        /// Ordinal of the repetition that just began, 1-based
        rep_number: u32,
    },
    RepCompleted {
        rep_number: u32,
        was_successful: bool,
        feedback: FeedbackResult,
    },
    SessionCompleted(SessionSummary),
    FeedbackGenerated(FeedbackResult),
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::SessionStarted(_) => EventKind::SessionStarted,
            Event::RepStarted { .. } => EventKind::RepStarted,
            Event::RepCompleted { .. } => EventKind::RepCompleted,
            Event::SessionCompleted(_) => EventKind::SessionCompleted,
            Event::FeedbackGenerated(_) => EventKind::FeedbackGenerated,
        }
    }
}

/// Observer callback; a returned error is logged and delivery continues
pub type EventHandler = Box<dyn FnMut(&Event) -> std::result::Result<(), Box<dyn std::error::Error>>>;

// ============================================================================
// EVALUATOR
// ============================================================================

/// High-level frame-driven evaluator for rehabilitation exercises
///
/// Owns exactly one exercise, one repetition tracker, and at most one
/// active session. The caller paces it: one `evaluate_frame` per
/// detected frame, with wall-clock timestamps supplied from outside.
pub struct ExerciseEvaluator {
    exercise: Option<ExerciseDefinition>,
    target_reps: u32,
    tracker: RepetitionTracker,
    session: Option<ExerciseSession>,
    state: SessionState,
    last_feedback: Option<FeedbackResult>,
    handlers: HashMap<EventKind, Vec<EventHandler>>,
}

impl ExerciseEvaluator {
    pub fn new() -> Self {
        Self::with_target_reps(DEFAULT_TARGET_REPS)
    }

    pub fn with_target_reps(target_reps: u32) -> Self {
        Self {
            exercise: None,
            target_reps,
            tracker: RepetitionTracker::new(),
            session: None,
            state: SessionState::Idle,
            last_feedback: None,
            handlers: HashMap::new(),
        }
    }

    /// Attach an exercise, resetting any prior session state
    pub fn set_exercise(&mut self, exercise: ExerciseDefinition) {
        self.exercise = Some(exercise);
        self.reset();
    }

    /// Attach an exercise by registry key with an optional config override
    pub fn set_exercise_by_name(
        &mut self,
        name: &str,
        config: Option<ExerciseConfig>,
    ) -> Result<()> {
        let exercise = get_exercise(name, config)?;
        self.set_exercise(exercise);
        Ok(())
    }

    pub fn exercise(&self) -> Option<&ExerciseDefinition> {
        self.exercise.as_ref()
    }

    /// Start a new session at wall-clock time `now` (seconds)
    ///
    /// Fails fast when no exercise is attached.
    pub fn start_session(&mut self, now: f64, target_reps: Option<u32>) -> Result<()> {
        let exercise_name = match self.exercise.as_ref() {
            Some(exercise) => exercise.name(),
            None => return Err(EngineError::NoExerciseConfigured),
        };

        let reps = target_reps.unwrap_or(self.target_reps);
        let session = ExerciseSession::new(exercise_name, reps, now);
        let summary = session.summary(now);

        self.tracker.reset();
        if let Some(exercise) = self.exercise.as_mut() {
            exercise.reset();
        }
        self.session = Some(session);
        self.state = SessionState::Starting;
        self.last_feedback = None;

        tracing::debug!(exercise = exercise_name, target_reps = reps, "session started");
        self.emit(Event::SessionStarted(summary));
        Ok(())
    }

    /// Evaluate one frame of detected landmarks
    ///
    /// `landmarks` is `None` when the detector saw no person. Both that
    /// case and a missing exercise produce Error-level feedback without
    /// touching the tracker or session counts. State updates are atomic
    /// per frame: counters move only after this frame's feedback exists.
    pub fn evaluate_frame(&mut self, now: f64, landmarks: Option<&LandmarkSet>) -> FeedbackResult {
        let Some(exercise) = self.exercise.as_mut() else {
            return FeedbackResult::error("No exercise configured.", None);
        };

        let Some(landmarks) = landmarks else {
            return FeedbackResult::error(
                "No person detected in frame.",
                Some("Please ensure you're visible to the camera."),
            );
        };

        let feedback = exercise.evaluate(now, landmarks);
        self.last_feedback = Some(feedback.clone());

        let mut events = Vec::new();
        if let Some(session) = self.session.as_mut() {
            if !session.is_complete() {
                session.record_feedback(feedback.clone());

                if let Some(angle) = feedback.current_angle {
                    let (rep_started, rep_completed) = self.tracker.update(now, angle);

                    if rep_started {
                        self.state = SessionState::InProgress;
                        events.push(Event::RepStarted {
                            rep_number: session.completed_reps() + 1,
                        });
                    }

                    if rep_completed {
                        if let Some(exercise) = self.exercise.as_mut() {
                            exercise.record_rep();
                        }
                        let finished = session.complete_rep(feedback.is_correct, now);
                        events.push(Event::RepCompleted {
                            rep_number: session.completed_reps(),
                            was_successful: feedback.is_correct,
                            feedback: feedback.clone(),
                        });

                        if finished {
                            self.state = SessionState::Completed;
                            tracing::debug!(
                                completed = session.completed_reps(),
                                "session completed"
                            );
                            events.push(Event::SessionCompleted(session.summary(now)));
                        }
                    }
                }
            }
        }

        for event in events {
            self.emit(event);
        }
        self.emit(Event::FeedbackGenerated(feedback.clone()));

        feedback
    }

    /// Register an observer on one event channel
    ///
    /// Observers run in registration order; one failing never blocks
    /// the rest.
    pub fn on<F>(&mut self, kind: EventKind, handler: F)
    where
        F: FnMut(&Event) -> std::result::Result<(), Box<dyn std::error::Error>> + 'static,
    {
        self.handlers
            .entry(kind)
            .or_default()
            .push(Box::new(handler));
    }

    fn emit(&mut self, event: Event) {
        let kind = event.kind();
        if let Some(handlers) = self.handlers.get_mut(&kind) {
            for handler in handlers.iter_mut() {
                if let Err(err) = handler(&event) {
                    tracing::warn!(event = kind.as_str(), error = %err, "event handler failed");
                }
            }
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn last_feedback(&self) -> Option<&FeedbackResult> {
        self.last_feedback.as_ref()
    }

    pub fn session(&self) -> Option<&ExerciseSession> {
        self.session.as_ref()
    }

    /// Snapshot of the current session, if one exists
    pub fn session_summary(&self, now: f64) -> Option<SessionSummary> {
        self.session.as_ref().map(|s| s.summary(now))
    }

    /// Drop the session and restore the idle state; idempotent
    pub fn reset(&mut self) {
        self.tracker.reset();
        self.session = None;
        self.state = SessionState::Idle;
        self.last_feedback = None;
        if let Some(exercise) = self.exercise.as_mut() {
            exercise.reset();
        }
    }
}

impl Default for ExerciseEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

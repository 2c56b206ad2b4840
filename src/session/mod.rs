//! Session module - practice-session state and the frame-driven evaluator
//!
//! Re-exports only. All logic in submodules.

mod evaluator;
mod state;

pub use evaluator::{Event, EventHandler, EventKind, ExerciseEvaluator, DEFAULT_TARGET_REPS};
pub use state::{ExerciseSession, SessionState, SessionSummary};

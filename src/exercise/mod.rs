//! Exercise module - catalog, configuration, scoring, repetition tracking
//!
//! Re-exports only. All logic in submodules.

mod buffer;
mod catalog;
mod config;
mod feedback;
mod reps;

pub use buffer::AngleBuffer;
pub use catalog::{
    available_exercises, get_exercise, ExerciseDefinition, ExerciseKind, ANGLE_HISTORY_CAPACITY,
    EXERCISE_KINDS,
};
pub use config::ExerciseConfig;
pub use feedback::{FeedbackGenerator, FeedbackLevel, FeedbackResult};
pub use reps::RepetitionTracker;

//! Rehab exercise evaluation engine
//!
//! Scores pose-landmark streams against prescribed joint angles, tracks
//! repetitions with a noise-tolerant state machine, and reports session
//! progress through event callbacks. Pose detection itself lives outside
//! the crate: a live camera loop or a batch video analyzer feeds detected
//! landmarks in one frame at a time, with wall-clock timestamps supplied
//! by the caller.
//!
//! Native callers link the library directly; in the browser the
//! `bridge` module exposes the same engine over `wasm_bindgen`.

mod error;

pub mod exercise;
pub mod pose;
pub mod session;

#[cfg(target_arch = "wasm32")]
pub mod bridge;

pub use error::{EngineError, Result};
pub use exercise::{
    available_exercises, get_exercise, ExerciseConfig, ExerciseDefinition, ExerciseKind,
    FeedbackGenerator, FeedbackLevel, FeedbackResult, RepetitionTracker,
};
pub use pose::{Joint, Landmark, LandmarkSet, Side};
pub use session::{
    Event, EventKind, ExerciseEvaluator, ExerciseSession, SessionState, SessionSummary,
};

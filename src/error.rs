//! Engine error taxonomy
//!
//! Only caller mistakes surface as errors. A frame with missing or
//! undetected landmarks is normal operation and degrades to
//! `FeedbackLevel::Error` feedback instead.

use thiserror::Error;

/// Errors surfaced to callers of the evaluation engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// Exercise lookup failed; the message lists every valid key
    #[error("unknown exercise `{name}`; available: {available}")]
    UnknownExercise { name: String, available: String },

    /// A session was started without an exercise attached
    #[error("no exercise configured; select an exercise before starting a session")]
    NoExerciseConfigured,
}

pub type Result<T> = std::result::Result<T, EngineError>;

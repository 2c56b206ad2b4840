//! Evaluator bridge - session control and JSON feedback for JS
//!
//! One thread-local evaluator instance serves the browser session.
//! Timestamps arrive from JavaScript (`performance.now() / 1000`) so the
//! engine stays clock-free and the page controls pacing.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::exercise::{available_exercises, ExerciseConfig};
use crate::session::ExerciseEvaluator;

use super::frame;

thread_local! {
    static EVALUATOR: RefCell<ExerciseEvaluator> = RefCell::new(ExerciseEvaluator::new());
}

/// Called automatically when the WASM module loads
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Select the exercise to evaluate, with an optional JSON config override
#[wasm_bindgen]
pub fn set_exercise(name: &str, config_json: Option<String>) -> Result<(), JsValue> {
    let config = match config_json {
        Some(json) => Some(
            serde_json::from_str::<ExerciseConfig>(&json)
                .map_err(|e| JsValue::from_str(&format!("Invalid exercise config: {e}")))?,
        ),
        None => None,
    };

    EVALUATOR.with(|cell| {
        cell.borrow_mut()
            .set_exercise_by_name(name, config)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    })
}

/// Start a session at the given wall-clock time (seconds)
#[wasm_bindgen]
pub fn start_session(now_secs: f64, target_reps: Option<u32>) -> Result<(), JsValue> {
    EVALUATOR.with(|cell| {
        cell.borrow_mut()
            .start_session(now_secs, target_reps)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    })
}

/// Evaluate the most recent landmark frame, returning feedback as JSON
#[wasm_bindgen]
pub fn evaluate_frame(now_secs: f64) -> String {
    let landmarks = frame::current_landmarks();
    let feedback = EVALUATOR.with(|cell| {
        cell.borrow_mut()
            .evaluate_frame(now_secs, landmarks.as_ref())
    });

    serde_json::to_string(&feedback).unwrap_or_else(|_| "{}".to_string())
}

/// Snapshot of the current session as JSON, `None` before the first start
#[wasm_bindgen]
pub fn session_summary(now_secs: f64) -> Option<String> {
    EVALUATOR.with(|cell| {
        cell.borrow()
            .session_summary(now_secs)
            .and_then(|summary| serde_json::to_string(&summary).ok())
    })
}

/// Drop the session and return the evaluator to idle
#[wasm_bindgen]
pub fn reset_evaluator() {
    EVALUATOR.with(|cell| cell.borrow_mut().reset());
}

/// Registry keys of every shipped exercise, as a JSON array
#[wasm_bindgen]
pub fn available_exercise_names() -> String {
    serde_json::to_string(&available_exercises()).unwrap_or_else(|_| "[]".to_string())
}

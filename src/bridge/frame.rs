//! Landmark ingestion from JavaScript
//!
//! Receives MediaPipe Pose landmarks and stores the current frame for
//! the evaluator to read.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::pose::{LandmarkSet, FLAT_STRIDE, LANDMARK_COUNT};

// Thread-local storage (WASM is single-threaded)
thread_local! {
    static LANDMARKS: RefCell<Option<LandmarkSet>> = RefCell::new(None);
}

/// Called from JavaScript with a flat Float32Array of 132 values
/// (33 landmarks × x, y, z, visibility)
#[wasm_bindgen]
pub fn update_landmarks(data: &[f32]) {
    match LandmarkSet::from_flat(data) {
        Some(set) => LANDMARKS.with(|cell| *cell.borrow_mut() = Some(set)),
        None => web_sys::console::warn_1(
            &format!(
                "Invalid landmark data length: {} (expected {})",
                data.len(),
                LANDMARK_COUNT * FLAT_STRIDE
            )
            .into(),
        ),
    }
}

/// Called from JavaScript when the detector saw no person this frame
#[wasm_bindgen]
pub fn clear_landmarks() {
    LANDMARKS.with(|cell| *cell.borrow_mut() = None);
}

/// Check if we have a landmark frame to evaluate
#[wasm_bindgen]
pub fn has_landmarks() -> bool {
    LANDMARKS.with(|cell| cell.borrow().is_some())
}

/// Get the current frame (for the session bridge)
pub(crate) fn current_landmarks() -> Option<LandmarkSet> {
    LANDMARKS.with(|cell| cell.borrow().clone())
}

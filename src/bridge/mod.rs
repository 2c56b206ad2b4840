//! Browser bridge - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here. Re-exports only in
//! mod.rs, logic in submodules. The camera loop runs in JavaScript:
//! MediaPipe Pose pushes one flat landmark frame per tick, then asks
//! the engine to evaluate it and reads JSON feedback back.

mod frame;
mod session;

pub use frame::{clear_landmarks, has_landmarks, update_landmarks};
pub use session::{
    available_exercise_names, evaluate_frame, init_panic_hook, reset_evaluator, session_summary,
    set_exercise, start_session,
};

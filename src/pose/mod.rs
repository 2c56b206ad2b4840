//! Pose module - landmark vocabulary and joint angle geometry
//!
//! Re-exports only. All logic in submodules.

pub mod angles;
mod landmarks;

pub use landmarks::{Joint, Landmark, LandmarkSet, Side, FLAT_STRIDE, LANDMARK_COUNT};

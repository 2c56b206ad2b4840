//! Joint angle calculation using dot product
//!
//! Computes the interior angle at a vertex joint from two neighboring
//! joints, plus the clinical derivations (flexion/abduction) built from
//! fixed landmark triples. All angles are in degrees.

use super::landmarks::{Joint, Landmark, LandmarkSet, Side};

/// Guards the denominator against coincident points
const EPSILON: f32 = 1e-10;

/// Calculate the angle at `vertex` formed by rays to `p1` and `p3`
///
/// Uses dot product formula: cos(θ) = (v1 · v2) / (|v1| × |v2|)
///
/// Returns degrees in [0, 180]. Coincident points never produce NaN:
/// the epsilon-guarded denominator drives the cosine toward zero.
pub fn angle_at_vertex(p1: [f32; 3], vertex: [f32; 3], p3: [f32; 3]) -> f32 {
    let v1 = [p1[0] - vertex[0], p1[1] - vertex[1], p1[2] - vertex[2]];
    let v2 = [p3[0] - vertex[0], p3[1] - vertex[1], p3[2] - vertex[2]];

    let dot = v1[0] * v2[0] + v1[1] * v2[1] + v1[2] * v2[2];
    let mag1 = (v1[0] * v1[0] + v1[1] * v1[1] + v1[2] * v1[2]).sqrt();
    let mag2 = (v2[0] * v2[0] + v2[1] * v2[1] + v2[2] * v2[2]).sqrt();

    // Clamp absorbs floating-point overshoot before acos
    let cos_angle = (dot / (mag1 * mag2 + EPSILON)).clamp(-1.0, 1.0);

    cos_angle.acos().to_degrees()
}

/// Angle at the middle landmark, 2D (image plane) or 3D
pub fn angle_from_landmarks(p1: Landmark, vertex: Landmark, p3: Landmark, use_3d: bool) -> f32 {
    if use_3d {
        angle_at_vertex(p1.pos_3d(), vertex.pos_3d(), p3.pos_3d())
    } else {
        angle_at_vertex(
            [p1.x, p1.y, 0.0],
            [vertex.x, vertex.y, 0.0],
            [p3.x, p3.y, 0.0],
        )
    }
}

// ============================================================================
// CLINICAL DERIVATIONS
// ============================================================================
//
// Each derivation reads a fixed joint triple for the requested side and
// converts the raw interior angle with `180 - angle`, so the measurement
// grows as the limb moves through the exercise. Missing joints yield
// `None` - no substitution, no guessing.

/// Shoulder flexion: arm raised forward, measured hip → shoulder → elbow
pub fn shoulder_flexion(landmarks: &LandmarkSet, side: Side, use_3d: bool) -> Option<f32> {
    let hip = landmarks.get(Joint::hip(side))?;
    let shoulder = landmarks.get(Joint::shoulder(side))?;
    let elbow = landmarks.get(Joint::elbow(side))?;

    Some(180.0 - angle_from_landmarks(hip, shoulder, elbow, use_3d))
}

/// Shoulder abduction: arm raised sideways, measured against the
/// opposite shoulder as the torso reference
pub fn shoulder_abduction(landmarks: &LandmarkSet, side: Side, use_3d: bool) -> Option<f32> {
    let opposite = landmarks.get(Joint::shoulder(side.opposite()))?;
    let shoulder = landmarks.get(Joint::shoulder(side))?;
    let elbow = landmarks.get(Joint::elbow(side))?;

    Some(180.0 - angle_from_landmarks(opposite, shoulder, elbow, use_3d))
}

/// Elbow flexion: angle between upper arm and forearm
pub fn elbow_flexion(landmarks: &LandmarkSet, side: Side, use_3d: bool) -> Option<f32> {
    let shoulder = landmarks.get(Joint::shoulder(side))?;
    let elbow = landmarks.get(Joint::elbow(side))?;
    let wrist = landmarks.get(Joint::wrist(side))?;

    Some(180.0 - angle_from_landmarks(shoulder, elbow, wrist, use_3d))
}

/// Knee flexion: angle between thigh and lower leg
pub fn knee_flexion(landmarks: &LandmarkSet, side: Side, use_3d: bool) -> Option<f32> {
    let hip = landmarks.get(Joint::hip(side))?;
    let knee = landmarks.get(Joint::knee(side))?;
    let ankle = landmarks.get(Joint::ankle(side))?;

    Some(180.0 - angle_from_landmarks(hip, knee, ankle, use_3d))
}

/// Hip flexion: thigh raised forward, measured shoulder → hip → knee
pub fn hip_flexion(landmarks: &LandmarkSet, side: Side, use_3d: bool) -> Option<f32> {
    let shoulder = landmarks.get(Joint::shoulder(side))?;
    let hip = landmarks.get(Joint::hip(side))?;
    let knee = landmarks.get(Joint::knee(side))?;

    Some(180.0 - angle_from_landmarks(shoulder, hip, knee, use_3d))
}

/// Hip abduction: leg moved sideways, measured against the opposite hip
pub fn hip_abduction(landmarks: &LandmarkSet, side: Side, use_3d: bool) -> Option<f32> {
    let opposite = landmarks.get(Joint::hip(side.opposite()))?;
    let hip = landmarks.get(Joint::hip(side))?;
    let knee = landmarks.get(Joint::knee(side))?;

    Some(180.0 - angle_from_landmarks(opposite, hip, knee, use_3d))
}

/// Trunk lateral flexion: lean of the shoulder-midpoint-to-hip-midpoint
/// line from vertical, in degrees
///
/// Positive = leaning toward the subject's right in image coordinates,
/// negative = left. Unlike the other derivations this is a signed angle
/// and takes no 180-minus transform.
pub fn trunk_lateral_flexion(landmarks: &LandmarkSet) -> Option<f32> {
    let left_shoulder = landmarks.get(Joint::LeftShoulder)?;
    let right_shoulder = landmarks.get(Joint::RightShoulder)?;
    let left_hip = landmarks.get(Joint::LeftHip)?;
    let right_hip = landmarks.get(Joint::RightHip)?;

    let shoulder_mid = [
        (left_shoulder.x + right_shoulder.x) / 2.0,
        (left_shoulder.y + right_shoulder.y) / 2.0,
    ];
    let hip_mid = [
        (left_hip.x + right_hip.x) / 2.0,
        (left_hip.y + right_hip.y) / 2.0,
    ];

    let dx = shoulder_mid[0] - hip_mid[0];
    let dy = shoulder_mid[1] - hip_mid[1];

    // Image y grows downward, so -dy points up; atan2(dx, -dy) is the
    // signed deviation from vertical
    Some(dx.atan2(-dy).to_degrees())
}

//! Landmark storage and joint vocabulary
//!
//! Holds one frame of detected body landmarks. The detector (MediaPipe
//! Pose or equivalent) produces 33 named points per frame; the engine
//! reads them by joint name and never mutates a set once built.

use serde::{Deserialize, Serialize};

/// Number of landmarks in the pose topology
pub const LANDMARK_COUNT: usize = 33;

/// Floats per landmark in the flat wire format (x, y, z, visibility)
pub const FLAT_STRIDE: usize = 4;

// ============================================================================
// JOINT VOCABULARY (MediaPipe Pose - 33 total)
// ============================================================================

/// Named body joint with its landmark index
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Joint {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl Joint {
    /// Landmark index in the detector output
    pub fn index(self) -> usize {
        self as usize
    }

    /// Wire name used by the detector and config layers
    pub fn as_str(self) -> &'static str {
        match self {
            Joint::Nose => "nose",
            Joint::LeftEyeInner => "left_eye_inner",
            Joint::LeftEye => "left_eye",
            Joint::LeftEyeOuter => "left_eye_outer",
            Joint::RightEyeInner => "right_eye_inner",
            Joint::RightEye => "right_eye",
            Joint::RightEyeOuter => "right_eye_outer",
            Joint::LeftEar => "left_ear",
            Joint::RightEar => "right_ear",
            Joint::MouthLeft => "mouth_left",
            Joint::MouthRight => "mouth_right",
            Joint::LeftShoulder => "left_shoulder",
            Joint::RightShoulder => "right_shoulder",
            Joint::LeftElbow => "left_elbow",
            Joint::RightElbow => "right_elbow",
            Joint::LeftWrist => "left_wrist",
            Joint::RightWrist => "right_wrist",
            Joint::LeftPinky => "left_pinky",
            Joint::RightPinky => "right_pinky",
            Joint::LeftIndex => "left_index",
            Joint::RightIndex => "right_index",
            Joint::LeftThumb => "left_thumb",
            Joint::RightThumb => "right_thumb",
            Joint::LeftHip => "left_hip",
            Joint::RightHip => "right_hip",
            Joint::LeftKnee => "left_knee",
            Joint::RightKnee => "right_knee",
            Joint::LeftAnkle => "left_ankle",
            Joint::RightAnkle => "right_ankle",
            Joint::LeftHeel => "left_heel",
            Joint::RightHeel => "right_heel",
            Joint::LeftFootIndex => "left_foot_index",
            Joint::RightFootIndex => "right_foot_index",
        }
    }

    /// Resolve a wire name back to a joint
    pub fn from_name(name: &str) -> Option<Joint> {
        ALL_JOINTS.iter().copied().find(|j| j.as_str() == name)
    }

    pub fn shoulder(side: Side) -> Joint {
        match side {
            Side::Left => Joint::LeftShoulder,
            Side::Right => Joint::RightShoulder,
        }
    }

    pub fn elbow(side: Side) -> Joint {
        match side {
            Side::Left => Joint::LeftElbow,
            Side::Right => Joint::RightElbow,
        }
    }

    pub fn wrist(side: Side) -> Joint {
        match side {
            Side::Left => Joint::LeftWrist,
            Side::Right => Joint::RightWrist,
        }
    }

    pub fn hip(side: Side) -> Joint {
        match side {
            Side::Left => Joint::LeftHip,
            Side::Right => Joint::RightHip,
        }
    }

    pub fn knee(side: Side) -> Joint {
        match side {
            Side::Left => Joint::LeftKnee,
            Side::Right => Joint::RightKnee,
        }
    }

    pub fn ankle(side: Side) -> Joint {
        match side {
            Side::Left => Joint::LeftAnkle,
            Side::Right => Joint::RightAnkle,
        }
    }
}

/// Every joint, in landmark-index order
pub const ALL_JOINTS: [Joint; LANDMARK_COUNT] = [
    Joint::Nose,
    Joint::LeftEyeInner,
    Joint::LeftEye,
    Joint::LeftEyeOuter,
    Joint::RightEyeInner,
    Joint::RightEye,
    Joint::RightEyeOuter,
    Joint::LeftEar,
    Joint::RightEar,
    Joint::MouthLeft,
    Joint::MouthRight,
    Joint::LeftShoulder,
    Joint::RightShoulder,
    Joint::LeftElbow,
    Joint::RightElbow,
    Joint::LeftWrist,
    Joint::RightWrist,
    Joint::LeftPinky,
    Joint::RightPinky,
    Joint::LeftIndex,
    Joint::RightIndex,
    Joint::LeftThumb,
    Joint::RightThumb,
    Joint::LeftHip,
    Joint::RightHip,
    Joint::LeftKnee,
    Joint::RightKnee,
    Joint::LeftAnkle,
    Joint::RightAnkle,
    Joint::LeftHeel,
    Joint::RightHeel,
    Joint::LeftFootIndex,
    Joint::RightFootIndex,
];

/// Body side an exercise targets
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

// ============================================================================
// LANDMARK DATA
// ============================================================================

/// A single 3D landmark point with detector confidence
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Normalized horizontal position
    pub x: f32,
    /// Normalized vertical position (0 = top of frame)
    pub y: f32,
    /// Relative depth
    pub z: f32,
    /// Detector confidence in [0, 1]
    pub visibility: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32, visibility: f32) -> Self {
        Self { x, y, z, visibility }
    }

    pub fn pos_2d(&self) -> [f32; 2] {
        [self.x, self.y]
    }

    pub fn pos_3d(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

/// One frame of detected landmarks, immutable once built
///
/// Lookups return absence rather than a default when a joint was not
/// present in the detector output.
#[derive(Clone, Debug)]
pub struct LandmarkSet {
    slots: [Option<Landmark>; LANDMARK_COUNT],
}

impl LandmarkSet {
    /// Build from the flat wire format: 33 × (x, y, z, visibility)
    ///
    /// Returns `None` when the buffer length does not match; a truncated
    /// frame is dropped rather than guessed at.
    pub fn from_flat(data: &[f32]) -> Option<Self> {
        if data.len() != LANDMARK_COUNT * FLAT_STRIDE {
            return None;
        }

        let mut slots = [None; LANDMARK_COUNT];
        for (i, slot) in slots.iter_mut().enumerate() {
            let base = i * FLAT_STRIDE;
            *slot = Some(Landmark::new(
                data[base],
                data[base + 1],
                data[base + 2],
                data[base + 3],
            ));
        }
        Some(Self { slots })
    }

    /// Build a partial set from explicit joint entries
    pub fn from_entries(entries: &[(Joint, Landmark)]) -> Self {
        let mut slots = [None; LANDMARK_COUNT];
        for (joint, landmark) in entries {
            slots[joint.index()] = Some(*landmark);
        }
        Self { slots }
    }

    /// Get a landmark by joint, `None` if it was not detected
    pub fn get(&self, joint: Joint) -> Option<Landmark> {
        self.slots[joint.index()]
    }

    /// Whether a joint was detected with at least the given confidence
    pub fn is_visible(&self, joint: Joint, threshold: f32) -> bool {
        self.get(joint)
            .map(|lm| lm.visibility >= threshold)
            .unwrap_or(false)
    }

    /// Number of detected joints in this frame
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|s| s.is_none())
    }
}

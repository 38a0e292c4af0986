//! The 33-point body-model vocabulary, numbered in the detector's native order.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum LandmarkType {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    LeftMouth = 9,
    RightMouth = 10,
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

impl LandmarkType {
    pub const ALL: [LandmarkType; 33] = [
        LandmarkType::Nose,
        LandmarkType::LeftEyeInner,
        LandmarkType::LeftEye,
        LandmarkType::LeftEyeOuter,
        LandmarkType::RightEyeInner,
        LandmarkType::RightEye,
        LandmarkType::RightEyeOuter,
        LandmarkType::LeftEar,
        LandmarkType::RightEar,
        LandmarkType::LeftMouth,
        LandmarkType::RightMouth,
        LandmarkType::LeftShoulder,
        LandmarkType::RightShoulder,
        LandmarkType::LeftElbow,
        LandmarkType::RightElbow,
        LandmarkType::LeftWrist,
        LandmarkType::RightWrist,
        LandmarkType::LeftPinky,
        LandmarkType::RightPinky,
        LandmarkType::LeftIndex,
        LandmarkType::RightIndex,
        LandmarkType::LeftThumb,
        LandmarkType::RightThumb,
        LandmarkType::LeftHip,
        LandmarkType::RightHip,
        LandmarkType::LeftKnee,
        LandmarkType::RightKnee,
        LandmarkType::LeftAnkle,
        LandmarkType::RightAnkle,
        LandmarkType::LeftHeel,
        LandmarkType::RightHeel,
        LandmarkType::LeftFootIndex,
        LandmarkType::RightFootIndex,
    ];

    /// Integer id carried in the output records.
    pub fn id(self) -> i32 {
        self as i32
    }

    pub fn from_id(id: i32) -> Option<Self> {
        usize::try_from(id)
            .ok()
            .and_then(|i| Self::ALL.get(i))
            .copied()
    }

    /// Landmarks drawn as joints by the overlay (everything below the face).
    pub fn is_body_joint(self) -> bool {
        self >= LandmarkType::LeftShoulder
    }
}

/// Bone segments used to draw a skeleton between landmarks.
pub const SKELETON_CONNECTIONS: &[(LandmarkType, LandmarkType)] = &[
    (LandmarkType::RightPinky, LandmarkType::RightIndex),
    (LandmarkType::RightWrist, LandmarkType::RightIndex),
    (LandmarkType::RightWrist, LandmarkType::RightPinky),
    (LandmarkType::RightWrist, LandmarkType::RightThumb),
    (LandmarkType::RightWrist, LandmarkType::RightElbow),
    (LandmarkType::RightShoulder, LandmarkType::RightElbow),
    (LandmarkType::RightShoulder, LandmarkType::LeftShoulder),
    (LandmarkType::RightShoulder, LandmarkType::RightHip),
    (LandmarkType::LeftHip, LandmarkType::RightHip),
    (LandmarkType::RightKnee, LandmarkType::RightHip),
    (LandmarkType::RightKnee, LandmarkType::RightAnkle),
    (LandmarkType::RightFootIndex, LandmarkType::RightAnkle),
    (LandmarkType::RightFootIndex, LandmarkType::RightHeel),
    (LandmarkType::RightAnkle, LandmarkType::RightHeel),
    (LandmarkType::LeftKnee, LandmarkType::LeftHip),
    (LandmarkType::LeftKnee, LandmarkType::LeftAnkle),
    (LandmarkType::LeftHeel, LandmarkType::LeftAnkle),
    (LandmarkType::LeftHeel, LandmarkType::LeftFootIndex),
    (LandmarkType::LeftAnkle, LandmarkType::LeftFootIndex),
    (LandmarkType::LeftShoulder, LandmarkType::LeftHip),
    (LandmarkType::LeftShoulder, LandmarkType::LeftElbow),
    (LandmarkType::LeftWrist, LandmarkType::LeftElbow),
    (LandmarkType::LeftWrist, LandmarkType::LeftThumb),
    (LandmarkType::LeftWrist, LandmarkType::LeftIndex),
    (LandmarkType::LeftWrist, LandmarkType::LeftPinky),
    (LandmarkType::LeftPinky, LandmarkType::LeftIndex),
];

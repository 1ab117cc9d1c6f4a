//! Named keypoint view over a landmark frame.

use serde::{Deserialize, Serialize};

use crate::types::{Frame, Landmark, PoseLandmark};

/// Body side as seen by the estimator (the subject's own left/right)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];
}

/// Hip, knee and ankle of one leg
#[derive(Debug, Clone, Copy, Default)]
pub struct LegChain {
    pub hip: Option<Landmark>,
    pub knee: Option<Landmark>,
    pub ankle: Option<Landmark>,
}

/// Shoulder, elbow and hip of one side, the chain for shoulder elevation
#[derive(Debug, Clone, Copy, Default)]
pub struct ArmChain {
    pub shoulder: Option<Landmark>,
    pub elbow: Option<Landmark>,
    pub hip: Option<Landmark>,
}

/// The keypoints the exercise policies look at, extracted by fixed index.
///
/// No validation happens here: an absent slot in the frame stays absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct Keypoints {
    pub nose: Option<Landmark>,
    pub left_eye: Option<Landmark>,
    pub right_eye: Option<Landmark>,
    pub left_shoulder: Option<Landmark>,
    pub right_shoulder: Option<Landmark>,
    pub left_elbow: Option<Landmark>,
    pub right_elbow: Option<Landmark>,
    pub left_wrist: Option<Landmark>,
    pub right_wrist: Option<Landmark>,
    pub left_hip: Option<Landmark>,
    pub right_hip: Option<Landmark>,
    pub left_knee: Option<Landmark>,
    pub right_knee: Option<Landmark>,
    pub left_ankle: Option<Landmark>,
    pub right_ankle: Option<Landmark>,
}

impl Keypoints {
    pub fn from_frame(frame: &Frame) -> Self {
        let at = |lm: PoseLandmark| frame.get(lm).copied();

        Self {
            nose: at(PoseLandmark::Nose),
            left_eye: at(PoseLandmark::LeftEye),
            right_eye: at(PoseLandmark::RightEye),
            left_shoulder: at(PoseLandmark::LeftShoulder),
            right_shoulder: at(PoseLandmark::RightShoulder),
            left_elbow: at(PoseLandmark::LeftElbow),
            right_elbow: at(PoseLandmark::RightElbow),
            left_wrist: at(PoseLandmark::LeftWrist),
            right_wrist: at(PoseLandmark::RightWrist),
            left_hip: at(PoseLandmark::LeftHip),
            right_hip: at(PoseLandmark::RightHip),
            left_knee: at(PoseLandmark::LeftKnee),
            right_knee: at(PoseLandmark::RightKnee),
            left_ankle: at(PoseLandmark::LeftAnkle),
            right_ankle: at(PoseLandmark::RightAnkle),
        }
    }

    pub fn leg(&self, side: Side) -> LegChain {
        match side {
            Side::Left => LegChain {
                hip: self.left_hip,
                knee: self.left_knee,
                ankle: self.left_ankle,
            },
            Side::Right => LegChain {
                hip: self.right_hip,
                knee: self.right_knee,
                ankle: self.right_ankle,
            },
        }
    }

    pub fn arm(&self, side: Side) -> ArmChain {
        match side {
            Side::Left => ArmChain {
                shoulder: self.left_shoulder,
                elbow: self.left_elbow,
                hip: self.left_hip,
            },
            Side::Right => ArmChain {
                shoulder: self.right_shoulder,
                elbow: self.right_elbow,
                hip: self.right_hip,
            },
        }
    }

    /// Both shoulders and both hips, when all four are present
    pub fn torso(&self) -> Option<((Landmark, Landmark), (Landmark, Landmark))> {
        Some((
            (self.left_shoulder?, self.right_shoulder?),
            (self.left_hip?, self.right_hip?),
        ))
    }
}

impl From<&Frame> for Keypoints {
    fn from(frame: &Frame) -> Self {
        Self::from_frame(frame)
    }
}

//! Fundamental types for the formcheck engine.

use chrono::Utc;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Identifier of one analysis session (one selected exercise run)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Timestamp wrapper with nanosecond precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now().timestamp_nanos_opt().unwrap_or(0))
    }

    pub fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    pub fn from_millis(millis: i64) -> Self {
        Self(millis.saturating_mul(1_000_000))
    }
}

/// A single pose landmark.
///
/// `x` and `y` are normalized to [0, 1] with `y` growing downward; `z` is a
/// camera-relative depth that the engine never uses for angles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f32>,
}

impl Landmark {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            visibility: None,
        }
    }

    /// Landmark in the image plane (z = 0)
    pub fn planar(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0)
    }

    pub fn with_visibility(mut self, visibility: f32) -> Self {
        self.visibility = Some(visibility);
        self
    }

    pub fn to_point2(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Named subset of the 33-landmark pose topology used by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PoseLandmark {
    Nose = 0,
    LeftEye = 1,
    RightEye = 2,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
}

impl PoseLandmark {
    pub const ALL: [PoseLandmark; 15] = [
        PoseLandmark::Nose,
        PoseLandmark::LeftEye,
        PoseLandmark::RightEye,
        PoseLandmark::LeftShoulder,
        PoseLandmark::RightShoulder,
        PoseLandmark::LeftElbow,
        PoseLandmark::RightElbow,
        PoseLandmark::LeftWrist,
        PoseLandmark::RightWrist,
        PoseLandmark::LeftHip,
        PoseLandmark::RightHip,
        PoseLandmark::LeftKnee,
        PoseLandmark::RightKnee,
        PoseLandmark::LeftAnkle,
        PoseLandmark::RightAnkle,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|lm| lm.index() == idx)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftEye => "left_eye",
            Self::RightEye => "right_eye",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftElbow => "left_elbow",
            Self::RightElbow => "right_elbow",
            Self::LeftWrist => "left_wrist",
            Self::RightWrist => "right_wrist",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
            Self::LeftKnee => "left_knee",
            Self::RightKnee => "right_knee",
            Self::LeftAnkle => "left_ankle",
            Self::RightAnkle => "right_ankle",
        }
    }
}

/// Number of landmark slots in every estimator frame
pub const POSE_LANDMARK_COUNT: usize = 33;

/// One estimator output: 33 index-addressed landmark slots.
///
/// A slot is `None` when the estimator dropped that point. Slot positions
/// are stable across frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Option<Landmark>>", into = "Vec<Option<Landmark>>")]
pub struct Frame {
    landmarks: [Option<Landmark>; POSE_LANDMARK_COUNT],
}

impl Frame {
    pub const LANDMARK_COUNT: usize = POSE_LANDMARK_COUNT;

    pub fn new(landmarks: [Option<Landmark>; POSE_LANDMARK_COUNT]) -> Self {
        Self { landmarks }
    }

    /// Frame with every slot absent
    pub fn empty() -> Self {
        Self::new([None; POSE_LANDMARK_COUNT])
    }

    pub fn from_landmarks(landmarks: &[Option<Landmark>]) -> Result<Self> {
        if landmarks.len() != Self::LANDMARK_COUNT {
            return Err(Error::FrameLength {
                expected: Self::LANDMARK_COUNT,
                actual: landmarks.len(),
            });
        }

        let mut frame = Self::empty();
        frame.landmarks.copy_from_slice(landmarks);
        Ok(frame)
    }

    /// Build a frame from a flat buffer of `x, y, z` (99 values) or
    /// `x, y, z, visibility` (132 values) per landmark.
    ///
    /// Slots holding a non-finite coordinate are left absent.
    pub fn from_flat(data: &[f64]) -> Result<Self> {
        let stride = match data.len() {
            n if n == Self::LANDMARK_COUNT * 3 => 3,
            n if n == Self::LANDMARK_COUNT * 4 => 4,
            actual => {
                return Err(Error::FrameLength {
                    expected: Self::LANDMARK_COUNT * 3,
                    actual,
                })
            }
        };

        let mut frame = Self::empty();
        for (i, chunk) in data.chunks_exact(stride).enumerate() {
            let mut landmark = Landmark::new(chunk[0], chunk[1], chunk[2]);
            if stride == 4 && chunk[3].is_finite() {
                landmark.visibility = Some(chunk[3] as f32);
            }

            if landmark.is_finite() {
                frame.landmarks[i] = Some(landmark);
            } else {
                tracing::warn!(
                    slot = i,
                    landmark = PoseLandmark::from_index(i).map_or("untracked", PoseLandmark::name),
                    "dropping landmark with non-finite coordinate"
                );
            }
        }

        Ok(frame)
    }

    pub fn get(&self, landmark: PoseLandmark) -> Option<&Landmark> {
        self.landmarks[landmark.index()].as_ref()
    }

    pub fn set(&mut self, landmark: PoseLandmark, value: Option<Landmark>) {
        self.landmarks[landmark.index()] = value;
    }

    pub fn present_count(&self) -> usize {
        self.landmarks.iter().flatten().count()
    }

    /// Copy of this frame where landmarks reporting a visibility below `min`
    /// are treated as absent. Landmarks without a visibility are kept.
    pub fn with_visibility_floor(&self, min: f32) -> Self {
        let mut frame = self.clone();
        for slot in frame.landmarks.iter_mut() {
            if matches!(*slot, Some(Landmark { visibility: Some(v), .. }) if v < min) {
                *slot = None;
            }
        }
        frame
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::empty()
    }
}

impl TryFrom<Vec<Option<Landmark>>> for Frame {
    type Error = Error;

    fn try_from(landmarks: Vec<Option<Landmark>>) -> Result<Self> {
        Self::from_landmarks(&landmarks)
    }
}

impl From<Frame> for Vec<Option<Landmark>> {
    fn from(frame: Frame) -> Self {
        frame.landmarks.to_vec()
    }
}

//! Synthetic pose frames for unit tests.

use formcheck_core::{Frame, Landmark, PoseLandmark};

const LEFT_X: f64 = 0.6;
const RIGHT_X: f64 = 0.4;
const SEGMENT: f64 = 0.2;

/// Standing/squatting figure with exact knee angles
#[derive(Debug, Clone, Copy)]
pub struct SquatPose {
    left_knee: f64,
    right_knee: f64,
    left_valgus: bool,
    right_valgus: bool,
    lean: f64,
    knees: bool,
}

impl SquatPose {
    pub fn new(knee_angle: f64) -> Self {
        Self {
            left_knee: knee_angle,
            right_knee: knee_angle,
            left_valgus: false,
            right_valgus: false,
            lean: 0.0,
            knees: true,
        }
    }

    pub fn right_knee(mut self, angle: f64) -> Self {
        self.right_knee = angle;
        self
    }

    /// Pull the left ankle outward so the left knee sits inside it
    pub fn valgus(mut self) -> Self {
        self.left_valgus = true;
        self
    }

    /// Mirror of [`valgus`](Self::valgus) on the right leg
    pub fn right_valgus(mut self) -> Self {
        self.right_valgus = true;
        self
    }

    /// Shift both shoulders horizontally by `offset`
    pub fn lean(mut self, offset: f64) -> Self {
        self.lean = offset;
        self
    }

    pub fn without_knees(mut self) -> Self {
        self.knees = false;
        self
    }

    pub fn frame(&self) -> Frame {
        let mut frame = Frame::empty();

        for (x, angle, outward, shoulder, hip, knee, ankle) in [
            (
                LEFT_X,
                self.left_knee,
                1.0,
                PoseLandmark::LeftShoulder,
                PoseLandmark::LeftHip,
                PoseLandmark::LeftKnee,
                PoseLandmark::LeftAnkle,
            ),
            (
                RIGHT_X,
                self.right_knee,
                -1.0,
                PoseLandmark::RightShoulder,
                PoseLandmark::RightHip,
                PoseLandmark::RightKnee,
                PoseLandmark::RightAnkle,
            ),
        ] {
            let knee_pos = Landmark::planar(x, 0.7);
            let theta = angle.to_radians();
            let mut ankle_pos = Landmark::planar(
                x + outward * SEGMENT * theta.sin(),
                0.7 - SEGMENT * theta.cos(),
            );
            let valgus = if outward > 0.0 { self.left_valgus } else { self.right_valgus };
            if valgus {
                ankle_pos.x = knee_pos.x - outward * 0.05;
            }

            frame.set(shoulder, Some(Landmark::planar(x + self.lean, 0.25)));
            frame.set(hip, Some(Landmark::planar(x, 0.5)));
            frame.set(ankle, Some(ankle_pos));
            if self.knees {
                frame.set(knee, Some(knee_pos));
            }
        }

        frame.set(PoseLandmark::Nose, Some(Landmark::planar(0.5 + self.lean, 0.1)));
        frame
    }
}

/// Figure raising both arms sideways by exact shoulder angles
#[derive(Debug, Clone, Copy)]
pub struct AbductionPose {
    left: Option<f64>,
    right: Option<f64>,
}

impl AbductionPose {
    pub fn new(angle: f64) -> Self {
        Self {
            left: Some(angle),
            right: Some(angle),
        }
    }

    pub fn sides(left: f64, right: f64) -> Self {
        Self {
            left: Some(left),
            right: Some(right),
        }
    }

    pub fn without_right_arm(mut self) -> Self {
        self.right = None;
        self
    }

    pub fn frame(&self) -> Frame {
        let mut frame = Frame::empty();

        for (x, angle, outward, shoulder, elbow, hip) in [
            (
                LEFT_X,
                self.left,
                1.0,
                PoseLandmark::LeftShoulder,
                PoseLandmark::LeftElbow,
                PoseLandmark::LeftHip,
            ),
            (
                RIGHT_X,
                self.right,
                -1.0,
                PoseLandmark::RightShoulder,
                PoseLandmark::RightElbow,
                PoseLandmark::RightHip,
            ),
        ] {
            frame.set(shoulder, Some(Landmark::planar(x, 0.3)));
            frame.set(hip, Some(Landmark::planar(x, 0.6)));
            if let Some(angle) = angle {
                let theta = angle.to_radians();
                frame.set(
                    elbow,
                    Some(Landmark::planar(
                        x + outward * 0.15 * theta.sin(),
                        0.3 + 0.15 * theta.cos(),
                    )),
                );
            }
        }

        frame
    }
}

//! Squat policy: depth, knee valgus and forward lean.

use formcheck_core::{
    horizontal_offset, joint_angle, ExerciseConfig, ExerciseKind, Keypoints, Side, SQUAT_DEPTH,
    SQUAT_LEAN_LIMIT, SQUAT_VALGUS_LIMIT,
};
use std::collections::BTreeSet;

use crate::feedback::FeedbackMessage;
use crate::metrics::JointAngles;
use crate::policy::{ExercisePolicy, PhaseTransition, PolicyOutcome};
use crate::scoring::FormScore;
use crate::state::{AnalyzerState, Phase, RepFlag};

/// Knee angle below which the athlete is in the bottom phase (rep gate)
pub const BOTTOM_POSITION_ANGLE: f64 = 120.0;
/// Frames between "keep it controlled" reminders
pub const INFO_INTERVAL_FRAMES: u64 = 30;

const DEPTH_DEDUCTION: u32 = 15;
const VALGUS_DEDUCTION: u32 = 20;
const LEAN_DEDUCTION: u32 = 10;

const VALGUS_PRIORITY: u8 = 4;
const SHALLOW_PRIORITY: u8 = 3;
const LEAN_PRIORITY: u8 = 2;
const GOOD_DEPTH_PRIORITY: u8 = 1;
const CONTROL_PRIORITY: u8 = 0;

/// Geometric signals of one squat frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SquatSignals {
    /// Smaller of the two knee angles
    pub knee_angle: Option<f64>,
    /// Left shoulder-hip-knee angle
    pub hip_angle: Option<f64>,
    pub is_in_bottom_position: bool,
    pub has_good_depth: bool,
    pub knee_valgus: bool,
    pub excessive_lean: bool,
}

impl SquatSignals {
    pub fn measure(keypoints: &Keypoints, config: &ExerciseConfig) -> Self {
        let thresholds = &config.thresholds;
        let depth = thresholds.depth.unwrap_or(SQUAT_DEPTH);
        let valgus_limit = thresholds.valgus_limit.unwrap_or(SQUAT_VALGUS_LIMIT);
        let lean_limit = thresholds.lean_limit.unwrap_or(SQUAT_LEAN_LIMIT);

        // The deeper side governs; a side with missing points is skipped
        let knee_angle = Side::BOTH
            .into_iter()
            .filter_map(|side| {
                let leg = keypoints.leg(side);
                joint_angle(leg.hip.as_ref(), leg.knee.as_ref(), leg.ankle.as_ref())
            })
            .reduce(f64::min);

        let hip_angle = joint_angle(
            keypoints.left_shoulder.as_ref(),
            keypoints.left_hip.as_ref(),
            keypoints.left_knee.as_ref(),
        );

        let excessive_lean = keypoints
            .torso()
            .map(|((ls, rs), (lh, rh))| horizontal_offset((&ls, &rs), (&lh, &rh)) > lean_limit)
            .unwrap_or(false);

        Self {
            knee_angle,
            hip_angle,
            is_in_bottom_position: knee_angle.is_some_and(|a| a < BOTTOM_POSITION_ANGLE),
            has_good_depth: knee_angle.is_some_and(|a| a < depth),
            knee_valgus: has_knee_valgus(keypoints, valgus_limit),
            excessive_lean,
        }
    }
}

/// Knee drifting past its ankle toward the midline on either side.
///
/// Left knee must not sit right of the left ankle by more than `limit`; the
/// right knee must not sit left of the right ankle by more than `limit`.
fn has_knee_valgus(keypoints: &Keypoints, limit: f64) -> bool {
    let left = match (keypoints.left_knee, keypoints.left_ankle) {
        (Some(knee), Some(ankle)) => knee.x - ankle.x > limit,
        _ => false,
    };
    let right = match (keypoints.right_knee, keypoints.right_ankle) {
        (Some(knee), Some(ankle)) => ankle.x - knee.x > limit,
        _ => false,
    };
    left || right
}

/// Squat analysis; a rep is counted when the athlete rises out of the bottom
#[derive(Debug, Clone, Copy, Default)]
pub struct SquatPolicy;

impl ExercisePolicy for SquatPolicy {
    fn kind(&self) -> ExerciseKind {
        ExerciseKind::Squat
    }

    fn evaluate(
        &self,
        keypoints: &Keypoints,
        config: &ExerciseConfig,
        state: &AnalyzerState,
    ) -> PolicyOutcome {
        let signals = SquatSignals::measure(keypoints, config);
        let mut score = FormScore::new();
        let mut feedback = Vec::new();

        if signals.is_in_bottom_position {
            if signals.has_good_depth {
                feedback.push(FeedbackMessage::success("Great depth!", GOOD_DEPTH_PRIORITY));
            } else {
                score.deduct("shallow_depth", DEPTH_DEDUCTION);
                feedback.push(FeedbackMessage::warning(
                    "Go deeper - aim for thighs parallel to the floor",
                    SHALLOW_PRIORITY,
                ));
            }
        }

        if signals.knee_valgus {
            score.deduct("knee_valgus", VALGUS_DEDUCTION);
            feedback.push(FeedbackMessage::error(
                "Push your knees out over your toes",
                VALGUS_PRIORITY,
            ));
        }

        if signals.excessive_lean {
            score.deduct("excessive_lean", LEAN_DEDUCTION);
            feedback.push(FeedbackMessage::warning(
                "Keep your chest up and torso upright",
                LEAN_PRIORITY,
            ));
        }

        // Never true while depth feedback is emitted in the bottom
        if signals.is_in_bottom_position
            && feedback.is_empty()
            && state.frame_count() % INFO_INTERVAL_FRAMES == 0
        {
            feedback.push(FeedbackMessage::info("Keep it controlled", CONTROL_PRIORITY));
        }

        let transition = match state.last_position() {
            Phase::Up if signals.is_in_bottom_position => {
                Some(PhaseTransition::starts(Phase::Up, Phase::Down))
            }
            Phase::Down if signals.knee_angle.is_some() && !signals.is_in_bottom_position => {
                Some(PhaseTransition::completes(Phase::Down, Phase::Up))
            }
            _ => None,
        };

        let mut rep_flags = BTreeSet::new();
        let rep_extreme = match transition {
            Some(t) if t.completes_rep => {
                let depth = config.thresholds.depth.unwrap_or(SQUAT_DEPTH);
                if state.rep_extreme().is_some_and(|deepest| deepest >= depth) {
                    rep_flags.insert(RepFlag::ShallowSquat);
                }
                if signals.knee_valgus {
                    rep_flags.insert(RepFlag::KneeValgus);
                }
                if signals.excessive_lean {
                    rep_flags.insert(RepFlag::ExcessiveLean);
                }
                None
            }
            Some(_) => signals.knee_angle,
            None if state.last_position() == Phase::Down => {
                match (state.rep_extreme(), signals.knee_angle) {
                    (Some(deepest), Some(angle)) => Some(deepest.min(angle)),
                    (deepest, angle) => deepest.or(angle),
                }
            }
            None => None,
        };

        PolicyOutcome {
            angles: JointAngles {
                knee: signals.knee_angle.unwrap_or(0.0),
                hip: signals.hip_angle.unwrap_or(0.0),
                shoulder: 0.0,
            },
            score,
            feedback,
            is_in_position: signals.is_in_bottom_position,
            transition,
            rep_flags,
            rep_extreme,
        }
    }
}

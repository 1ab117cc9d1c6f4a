//! Shoulder abduction policy: range of motion, symmetry and hiking.

use formcheck_core::{
    joint_angle, ExerciseConfig, ExerciseKind, Keypoints, Side, ABDUCTION_ROM_MAX,
    ABDUCTION_ROM_MIN, ABDUCTION_SYMMETRY_LIMIT,
};
use std::collections::BTreeSet;

use crate::feedback::FeedbackMessage;
use crate::metrics::JointAngles;
use crate::policy::{ExercisePolicy, PhaseTransition, PolicyOutcome};
use crate::scoring::FormScore;
use crate::state::{AnalyzerState, Phase, RepFlag};

/// Average shoulder angle above which the arms count as raised
pub const IN_POSITION_ANGLE: f64 = 45.0;
/// Angle the arms must pass for the raise to register (down → up)
pub const RAISED_ANGLE: f64 = 75.0;
/// Angle the arms must drop below for the rep to count (up → down)
pub const LOWERED_ANGLE: f64 = 30.0;
/// Deviation from target beyond which range of motion is penalized
pub const LARGE_DEVIATION: f64 = 15.0;
/// Side-to-side difference still considered perfectly even
pub const PERFECT_SYMMETRY: f64 = 10.0;

const UNDER_RANGE_DEDUCTION: u32 = 15;
const OVER_RANGE_DEDUCTION: u32 = 10;
const ASYMMETRY_DEDUCTION: u32 = 20;
const HIKING_DEDUCTION: u32 = 10;

const ASYMMETRY_PRIORITY: u8 = 4;
const UNDER_RANGE_PRIORITY: u8 = 3;
const HIKING_PRIORITY: u8 = 3;
const OVER_RANGE_PRIORITY: u8 = 2;
const PERFECT_PRIORITY: u8 = 1;

/// Geometric signals of one abduction frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AbductionSignals {
    /// Mean of the available elbow-shoulder-hip angles
    pub average_angle: Option<f64>,
    /// Absolute left/right difference, when both sides are visible
    pub symmetry: Option<f64>,
    /// Distance of the average angle from the target
    pub deviation: Option<f64>,
    pub is_in_target_range: bool,
    pub is_in_position: bool,
    pub shoulder_hiking: bool,
}

impl AbductionSignals {
    pub fn measure(keypoints: &Keypoints, config: &ExerciseConfig) -> Self {
        let thresholds = &config.thresholds;
        let rom_min = thresholds.rom_min.unwrap_or(ABDUCTION_ROM_MIN);
        let rom_max = thresholds.rom_max.unwrap_or(ABDUCTION_ROM_MAX);
        let target = (rom_min + rom_max) / 2.0;
        let tolerance = (rom_max - rom_min) / 2.0;

        let [left, right] = Side::BOTH.map(|side| {
            let arm = keypoints.arm(side);
            joint_angle(arm.elbow.as_ref(), arm.shoulder.as_ref(), arm.hip.as_ref())
        });

        let (average_angle, symmetry) = match (left, right) {
            (Some(l), Some(r)) => (Some((l + r) / 2.0), Some((l - r).abs())),
            (Some(a), None) | (None, Some(a)) => (Some(a), None),
            (None, None) => (None, None),
        };
        let deviation = average_angle.map(|a| (a - target).abs());

        // y grows downward: an elbow above its shoulder has a smaller y
        let shoulder_hiking = Side::BOTH.into_iter().any(|side| {
            let arm = keypoints.arm(side);
            matches!((arm.elbow, arm.shoulder), (Some(e), Some(s)) if e.y < s.y)
        });

        Self {
            average_angle,
            symmetry,
            deviation,
            is_in_target_range: deviation.is_some_and(|d| d <= tolerance),
            is_in_position: average_angle.is_some_and(|a| a > IN_POSITION_ANGLE),
            shoulder_hiking,
        }
    }
}

/// Shoulder abduction analysis; a rep is counted when raised arms return
/// to the sides
#[derive(Debug, Clone, Copy, Default)]
pub struct ShoulderAbductionPolicy;

impl ExercisePolicy for ShoulderAbductionPolicy {
    fn kind(&self) -> ExerciseKind {
        ExerciseKind::ShoulderAbduction
    }

    fn evaluate(
        &self,
        keypoints: &Keypoints,
        config: &ExerciseConfig,
        state: &AnalyzerState,
    ) -> PolicyOutcome {
        let thresholds = &config.thresholds;
        let rom_min = thresholds.rom_min.unwrap_or(ABDUCTION_ROM_MIN);
        let rom_max = thresholds.rom_max.unwrap_or(ABDUCTION_ROM_MAX);
        let target = (rom_min + rom_max) / 2.0;
        let symmetry_limit = thresholds.symmetry_limit.unwrap_or(ABDUCTION_SYMMETRY_LIMIT);

        let signals = AbductionSignals::measure(keypoints, config);
        let mut score = FormScore::new();
        let mut feedback = Vec::new();

        // Range is judged on every frame, including arms at rest
        if let (Some(average), Some(deviation)) = (signals.average_angle, signals.deviation) {
            if deviation > LARGE_DEVIATION && average < target {
                score.deduct("under_range", UNDER_RANGE_DEDUCTION);
                feedback.push(FeedbackMessage::warning(
                    "Raise your arms higher - aim for shoulder height",
                    UNDER_RANGE_PRIORITY,
                ));
            } else if deviation > LARGE_DEVIATION {
                score.deduct("over_range", OVER_RANGE_DEDUCTION);
                feedback.push(FeedbackMessage::warning(
                    "Lower your arms slightly - stop at shoulder height",
                    OVER_RANGE_PRIORITY,
                ));
            }
        }

        let asymmetric = signals.symmetry.is_some_and(|s| s > symmetry_limit);
        if asymmetric {
            score.deduct("asymmetry", ASYMMETRY_DEDUCTION);
            feedback.push(FeedbackMessage::error(
                "Lift both arms evenly",
                ASYMMETRY_PRIORITY,
            ));
        }

        if signals.shoulder_hiking {
            score.deduct("shoulder_hiking", HIKING_DEDUCTION);
            feedback.push(FeedbackMessage::warning(
                "Keep your shoulders down - avoid shrugging",
                HIKING_PRIORITY,
            ));
        }

        if signals.is_in_target_range && signals.symmetry.is_some_and(|s| s <= PERFECT_SYMMETRY) {
            feedback.push(FeedbackMessage::success(
                "Perfect form! Hold at shoulder height",
                PERFECT_PRIORITY,
            ));
        }

        let transition = match (state.last_position(), signals.average_angle) {
            (Phase::Down, Some(average)) if signals.is_in_position && average > RAISED_ANGLE => {
                Some(PhaseTransition::starts(Phase::Down, Phase::Up))
            }
            (Phase::Up, Some(average)) if !signals.is_in_position && average < LOWERED_ANGLE => {
                Some(PhaseTransition::completes(Phase::Up, Phase::Down))
            }
            _ => None,
        };

        let mut rep_flags = BTreeSet::new();
        let rep_extreme = match transition {
            Some(t) if t.completes_rep => {
                if let Some(highest) = state.rep_extreme() {
                    if highest < rom_min {
                        rep_flags.insert(RepFlag::InsufficientRom);
                    } else if highest > rom_max {
                        rep_flags.insert(RepFlag::ExcessiveRom);
                    }
                }
                if asymmetric {
                    rep_flags.insert(RepFlag::Asymmetry);
                }
                if signals.shoulder_hiking {
                    rep_flags.insert(RepFlag::ShoulderHiking);
                }
                None
            }
            Some(_) => signals.average_angle,
            None if state.last_position() == Phase::Up => {
                match (state.rep_extreme(), signals.average_angle) {
                    (Some(highest), Some(angle)) => Some(highest.max(angle)),
                    (highest, angle) => highest.or(angle),
                }
            }
            None => None,
        };

        PolicyOutcome {
            angles: JointAngles {
                knee: 0.0,
                hip: 0.0,
                shoulder: signals.average_angle.unwrap_or(0.0),
            },
            score,
            feedback,
            is_in_position: signals.is_in_position,
            transition,
            rep_flags,
            rep_extreme,
        }
    }
}

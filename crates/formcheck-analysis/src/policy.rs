//! Exercise policy interface.
//!
//! A policy is a pure function of one frame's keypoints, the exercise
//! configuration and the current analyzer state. It never mutates state; the
//! rep state machine applies its [`PolicyOutcome`] afterwards.

use formcheck_core::{ExerciseConfig, ExerciseKind, Keypoints};
use std::collections::BTreeSet;

use crate::feedback::FeedbackMessage;
use crate::metrics::JointAngles;
use crate::scoring::FormScore;
use crate::shoulder::ShoulderAbductionPolicy;
use crate::squat::SquatPolicy;
use crate::state::{AnalyzerState, Phase, RepFlag};

/// Phase change requested by a policy for the current frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTransition {
    pub from: Phase,
    pub to: Phase,
    /// Whether this transition completes (counts) a repetition
    pub completes_rep: bool,
}

impl PhaseTransition {
    pub fn starts(from: Phase, to: Phase) -> Self {
        Self {
            from,
            to,
            completes_rep: false,
        }
    }

    pub fn completes(from: Phase, to: Phase) -> Self {
        Self {
            from,
            to,
            completes_rep: true,
        }
    }
}

/// Everything a policy derives from one frame
#[derive(Debug, Clone)]
pub struct PolicyOutcome {
    pub angles: JointAngles,
    pub score: FormScore,
    /// Candidate messages in generation order, not yet ranked
    pub feedback: Vec<FeedbackMessage>,
    pub is_in_position: bool,
    pub transition: Option<PhaseTransition>,
    /// Quality flags for the repetition completed on this frame, if any
    pub rep_flags: BTreeSet<RepFlag>,
    /// Most extreme tracked angle of the rep in progress after this frame
    pub rep_extreme: Option<f64>,
}

impl PolicyOutcome {
    pub fn completes_rep(&self) -> bool {
        self.transition.is_some_and(|t| t.completes_rep)
    }
}

/// Per-exercise analysis capability
pub trait ExercisePolicy {
    fn kind(&self) -> ExerciseKind;

    fn evaluate(
        &self,
        keypoints: &Keypoints,
        config: &ExerciseConfig,
        state: &AnalyzerState,
    ) -> PolicyOutcome;
}

/// Policy implementing an exercise kind
pub fn policy_for(kind: ExerciseKind) -> &'static dyn ExercisePolicy {
    match kind {
        ExerciseKind::Squat => &SquatPolicy,
        ExerciseKind::ShoulderAbduction => &ShoulderAbductionPolicy,
    }
}

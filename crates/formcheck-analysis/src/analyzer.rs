//! Analyzer facade owning one session's state.

use formcheck_core::{ExerciseConfig, Frame, Keypoints, SessionId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::feedback::{rank_feedback, FeedbackMessage, MAX_FEEDBACK};
use crate::metrics::{ExerciseMetrics, SessionSummary};
use crate::policy::policy_for;
use crate::rep;
use crate::state::{AnalyzerState, RepData};

/// Full result of analyzing one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameAnalysis {
    pub metrics: ExerciseMetrics,
    /// Ranked and truncated messages with their kind and priority, for a
    /// voice or UI layer that needs more than the text
    pub messages: Vec<FeedbackMessage>,
    /// Repetition completed on this frame, if any
    pub completed_rep: Option<RepData>,
}

/// Exercise analyzer for one session.
///
/// State is shared across exercise kinds: analyzing a different exercise
/// without calling [`reset`](Self::reset) carries the counters over.
/// Calls must be sequential; each frame is analyzed to completion before
/// the next.
#[derive(Debug, Clone, Default)]
pub struct ExerciseAnalyzer {
    session_id: SessionId,
    state: AnalyzerState,
}

impl ExerciseAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn state(&self) -> &AnalyzerState {
        &self.state
    }

    /// Analyze one frame, stamping any completed rep with the current time
    pub fn analyze(&mut self, frame: &Frame, config: &ExerciseConfig) -> ExerciseMetrics {
        self.analyze_at(frame, config, Timestamp::now())
    }

    pub fn analyze_at(
        &mut self,
        frame: &Frame,
        config: &ExerciseConfig,
        timestamp: Timestamp,
    ) -> ExerciseMetrics {
        self.analyze_detailed(frame, config, timestamp).metrics
    }

    pub fn analyze_detailed(
        &mut self,
        frame: &Frame,
        config: &ExerciseConfig,
        timestamp: Timestamp,
    ) -> FrameAnalysis {
        rep::begin_frame(&mut self.state);

        let keypoints = Keypoints::from_frame(frame);
        let outcome = policy_for(config.kind).evaluate(&keypoints, config, &self.state);
        let completed_rep = rep::apply_outcome(
            &mut self.state,
            &outcome,
            config.kind,
            timestamp,
            self.session_id,
        );

        let messages = rank_feedback(outcome.feedback, MAX_FEEDBACK);

        tracing::trace!(
            session = %self.session_id,
            exercise = %config.kind,
            frame = self.state.frame_count(),
            score = self.state.current_score(),
            deductions = ?outcome.score.deductions(),
            feedback = messages.len(),
            "frame analyzed"
        );

        let metrics = ExerciseMetrics {
            rep_count: self.state.rep_count(),
            current_score: self.state.current_score(),
            feedback: messages.iter().map(|m| m.message.clone()).collect(),
            angles: outcome.angles,
            is_in_position: outcome.is_in_position,
        };

        FrameAnalysis {
            metrics,
            messages,
            completed_rep,
        }
    }

    /// Zero all counters, clear the rep log and return to the `up` phase
    pub fn reset(&mut self) {
        tracing::info!(
            session = %self.session_id,
            reps = self.state.rep_count(),
            frames = self.state.frame_count(),
            "analyzer reset"
        );
        self.state.reset();
    }

    /// Completed repetitions in order
    pub fn rep_data(&self) -> &[RepData] {
        self.state.rep_log()
    }

    pub fn rep_count(&self) -> u32 {
        self.state.rep_count()
    }

    pub fn current_score(&self) -> u32 {
        self.state.current_score()
    }

    pub fn summary(&self, config: &ExerciseConfig) -> SessionSummary {
        SessionSummary::from_reps(self.rep_data(), config)
    }
}

//! Repetition state machine.
//!
//! Applies a policy outcome to the analyzer state: stores the frame score,
//! moves the phase, and on a completing transition increments the rep count
//! and appends one [`RepData`].

use formcheck_core::{ExerciseKind, SessionId, Timestamp};

use crate::policy::PolicyOutcome;
use crate::state::{AnalyzerState, RepData};

/// Start a new frame; the counter only ever grows until reset
pub(crate) fn begin_frame(state: &mut AnalyzerState) {
    state.frame_count += 1;
}

/// Commit one frame's outcome. Returns the rep completed on this frame.
pub(crate) fn apply_outcome(
    state: &mut AnalyzerState,
    outcome: &PolicyOutcome,
    exercise: ExerciseKind,
    timestamp: Timestamp,
    session: SessionId,
) -> Option<RepData> {
    state.current_score = outcome.score.value();
    state.rep_extreme = outcome.rep_extreme;

    let transition = outcome.transition?;
    debug_assert_eq!(transition.from, state.last_position);

    tracing::debug!(
        session = %session,
        exercise = %exercise,
        from = transition.from.as_str(),
        to = transition.to.as_str(),
        knee = outcome.angles.knee,
        shoulder = outcome.angles.shoulder,
        "phase transition"
    );
    state.last_position = transition.to;

    if !transition.completes_rep {
        return None;
    }

    state.rep_count += 1;
    let rep = RepData {
        rep_index: state.rep_count,
        angles: outcome.angles,
        flags: outcome.rep_flags.clone(),
        score: state.current_score,
        timestamp,
    };

    tracing::info!(
        session = %session,
        exercise = %exercise,
        rep = rep.rep_index,
        score = rep.score,
        flags = ?rep.flags.iter().map(|f| f.as_str()).collect::<Vec<_>>(),
        "repetition completed"
    );

    state.rep_log.push(rep.clone());
    Some(rep)
}

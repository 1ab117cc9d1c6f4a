//! Output snapshots: per-frame metrics and the session summary.

use formcheck_core::ExerciseConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::state::{RepData, RepFlag};

/// Representative joint angles of a frame, in degrees.
///
/// A joint the active exercise does not measure, or whose keypoints were
/// missing, reports 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct JointAngles {
    pub knee: f64,
    pub hip: f64,
    pub shoulder: f64,
}

/// Snapshot returned for every analyzed frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseMetrics {
    pub rep_count: u32,
    pub current_score: u32,
    /// Message text only, already ranked and truncated
    pub feedback: Vec<String>,
    pub angles: JointAngles,
    pub is_in_position: bool,
}

/// Aggregate view over the rep log of one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub total_reps: u32,
    pub target_reps: u32,
    /// Completed reps over target reps, capped at 1
    pub completion: f64,
    pub mean_score: Option<f64>,
    pub best_score: Option<u32>,
    pub worst_score: Option<u32>,
    pub clean_reps: u32,
    pub flag_counts: BTreeMap<RepFlag, u32>,
}

impl SessionSummary {
    pub fn from_reps(reps: &[RepData], config: &ExerciseConfig) -> Self {
        let total_reps = reps.len() as u32;
        let completion = if config.target_reps == 0 {
            0.0
        } else {
            (total_reps as f64 / config.target_reps as f64).min(1.0)
        };

        let mean_score = if reps.is_empty() {
            None
        } else {
            Some(reps.iter().map(|r| r.score as f64).sum::<f64>() / reps.len() as f64)
        };

        let mut flag_counts = BTreeMap::new();
        for flag in reps.iter().flat_map(|r| r.flags.iter()) {
            *flag_counts.entry(*flag).or_insert(0) += 1;
        }

        Self {
            total_reps,
            target_reps: config.target_reps,
            completion,
            mean_score,
            best_score: reps.iter().map(|r| r.score).max(),
            worst_score: reps.iter().map(|r| r.score).min(),
            clean_reps: reps.iter().filter(|r| r.is_clean()).count() as u32,
            flag_counts,
        }
    }

    pub fn is_target_reached(&self) -> bool {
        self.total_reps >= self.target_reps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcheck_core::Timestamp;
    use std::collections::BTreeSet;

    fn rep(index: u32, score: u32, flags: &[RepFlag]) -> RepData {
        RepData {
            rep_index: index,
            angles: JointAngles::default(),
            flags: flags.iter().copied().collect::<BTreeSet<_>>(),
            score,
            timestamp: Timestamp::from_millis(index as i64 * 1000),
        }
    }

    #[test]
    fn test_empty_summary() {
        let summary = SessionSummary::from_reps(&[], &ExerciseConfig::squat());
        assert_eq!(summary.total_reps, 0);
        assert_eq!(summary.completion, 0.0);
        assert_eq!(summary.mean_score, None);
        assert_eq!(summary.best_score, None);
        assert!(!summary.is_target_reached());
    }

    #[test]
    fn test_summary_aggregates() {
        let reps = vec![
            rep(1, 100, &[]),
            rep(2, 80, &[RepFlag::KneeValgus]),
            rep(3, 70, &[RepFlag::KneeValgus, RepFlag::ExcessiveLean]),
        ];
        let summary = SessionSummary::from_reps(&reps, &ExerciseConfig::squat());

        assert_eq!(summary.total_reps, 3);
        assert!((summary.completion - 0.3).abs() < 1e-10);
        assert!((summary.mean_score.unwrap() - 250.0 / 3.0).abs() < 1e-10);
        assert_eq!(summary.best_score, Some(100));
        assert_eq!(summary.worst_score, Some(70));
        assert_eq!(summary.clean_reps, 1);
        assert_eq!(summary.flag_counts[&RepFlag::KneeValgus], 2);
        assert_eq!(summary.flag_counts[&RepFlag::ExcessiveLean], 1);
    }

    #[test]
    fn test_metrics_json_is_camel_case() {
        let metrics = ExerciseMetrics {
            rep_count: 2,
            current_score: 85,
            feedback: vec!["Go deeper".to_string()],
            angles: JointAngles::default(),
            is_in_position: true,
        };
        let json = serde_json::to_value(&metrics).unwrap();
        assert_eq!(json["repCount"], 2);
        assert_eq!(json["currentScore"], 85);
        assert_eq!(json["isInPosition"], true);
    }
}

//! Mutable per-session analyzer state and repetition records.

use formcheck_core::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::metrics::JointAngles;

/// Binary movement phase used for repetition hysteresis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Up,
    Down,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Up => "up",
            Phase::Down => "down",
        }
    }
}

/// Quality fault attached to a completed repetition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepFlag {
    ShallowSquat,
    KneeValgus,
    ExcessiveLean,
    InsufficientRom,
    ExcessiveRom,
    Asymmetry,
    ShoulderHiking,
}

impl RepFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepFlag::ShallowSquat => "shallow_squat",
            RepFlag::KneeValgus => "knee_valgus",
            RepFlag::ExcessiveLean => "excessive_lean",
            RepFlag::InsufficientRom => "insufficient_rom",
            RepFlag::ExcessiveRom => "excessive_rom",
            RepFlag::Asymmetry => "asymmetry",
            RepFlag::ShoulderHiking => "shoulder_hiking",
        }
    }
}

/// Record of one completed repetition, appended once and never mutated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepData {
    /// 1-based, equal to the rep count right after this rep completed
    pub rep_index: u32,
    pub angles: JointAngles,
    pub flags: BTreeSet<RepFlag>,
    pub score: u32,
    pub timestamp: Timestamp,
}

impl RepData {
    pub fn is_clean(&self) -> bool {
        self.flags.is_empty()
    }
}

/// Session state owned by exactly one analyzer.
///
/// Only the rep state machine mutates it, once per analyzed frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzerState {
    pub(crate) rep_count: u32,
    pub(crate) current_score: u32,
    pub(crate) last_position: Phase,
    pub(crate) frame_count: u64,
    pub(crate) rep_log: Vec<RepData>,
    /// Most extreme tracked angle of the rep in progress
    pub(crate) rep_extreme: Option<f64>,
}

impl AnalyzerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rep_count(&self) -> u32 {
        self.rep_count
    }

    pub fn current_score(&self) -> u32 {
        self.current_score
    }

    pub fn last_position(&self) -> Phase {
        self.last_position
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn rep_log(&self) -> &[RepData] {
        &self.rep_log
    }

    pub fn rep_extreme(&self) -> Option<f64> {
        self.rep_extreme
    }

    /// Zero every counter, clear the rep log and return to the `up` phase
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

//! Exercise configuration and the fixed exercise registry.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Knee angle (degrees) below which a squat has good depth
pub const SQUAT_DEPTH: f64 = 90.0;
/// Normalized inward knee travel past the ankle that counts as valgus
pub const SQUAT_VALGUS_LIMIT: f64 = 0.02;
/// Normalized shoulder/hip midpoint offset that counts as forward lean
pub const SQUAT_LEAN_LIMIT: f64 = 0.05;
/// Lower bound of the abduction target range (degrees)
pub const ABDUCTION_ROM_MIN: f64 = 80.0;
/// Upper bound of the abduction target range (degrees)
pub const ABDUCTION_ROM_MAX: f64 = 100.0;
/// Left/right shoulder angle difference that counts as asymmetric (degrees)
pub const ABDUCTION_SYMMETRY_LIMIT: f64 = 15.0;

const DEFAULT_TARGET_REPS: u32 = 10;

/// Supported exercise types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExerciseKind {
    Squat,
    ShoulderAbduction,
}

impl ExerciseKind {
    pub const ALL: [ExerciseKind; 2] = [ExerciseKind::Squat, ExerciseKind::ShoulderAbduction];

    /// Registry identifier
    pub fn id(&self) -> &'static str {
        match self {
            ExerciseKind::Squat => "squat",
            ExerciseKind::ShoulderAbduction => "shoulderAbduction",
        }
    }
}

impl std::fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ExerciseKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ExerciseKind::ALL
            .into_iter()
            .find(|kind| kind.id() == s)
            .ok_or_else(|| Error::UnknownExercise(s.to_string()))
    }
}

/// Per-exercise numeric thresholds. Absent fields do not apply to the exercise.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thresholds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valgus_limit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lean_limit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rom_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rom_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symmetry_limit: Option<f64>,
}

impl Thresholds {
    fn validate(&self, kind: ExerciseKind) -> Result<()> {
        let fields = [
            ("depth", self.depth),
            ("valgusLimit", self.valgus_limit),
            ("leanLimit", self.lean_limit),
            ("romMin", self.rom_min),
            ("romMax", self.rom_max),
            ("symmetryLimit", self.symmetry_limit),
        ];

        for (name, value) in fields {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(Error::Config(format!(
                        "{kind}: threshold {name} must be a non-negative number, got {v}"
                    )));
                }
            }
        }

        if let (Some(min), Some(max)) = (self.rom_min, self.rom_max) {
            if min >= max {
                return Err(Error::Config(format!(
                    "{kind}: romMin ({min}) must be below romMax ({max})"
                )));
            }
        }

        Ok(())
    }
}

/// Configuration of one exercise, selected once per session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseConfig {
    #[serde(rename = "id")]
    pub kind: ExerciseKind,
    pub name: String,
    pub target_reps: u32,
    #[serde(default)]
    pub thresholds: Thresholds,
}

impl ExerciseConfig {
    pub fn squat() -> Self {
        Self {
            kind: ExerciseKind::Squat,
            name: "Squat".to_string(),
            target_reps: DEFAULT_TARGET_REPS,
            thresholds: Thresholds {
                depth: Some(SQUAT_DEPTH),
                valgus_limit: Some(SQUAT_VALGUS_LIMIT),
                lean_limit: Some(SQUAT_LEAN_LIMIT),
                ..Thresholds::default()
            },
        }
    }

    pub fn shoulder_abduction() -> Self {
        Self {
            kind: ExerciseKind::ShoulderAbduction,
            name: "Shoulder Abduction".to_string(),
            target_reps: DEFAULT_TARGET_REPS,
            thresholds: Thresholds {
                rom_min: Some(ABDUCTION_ROM_MIN),
                rom_max: Some(ABDUCTION_ROM_MAX),
                symmetry_limit: Some(ABDUCTION_SYMMETRY_LIMIT),
                ..Thresholds::default()
            },
        }
    }

    /// Canonical configuration for an exercise kind
    pub fn canonical(kind: ExerciseKind) -> Self {
        match kind {
            ExerciseKind::Squat => Self::squat(),
            ExerciseKind::ShoulderAbduction => Self::shoulder_abduction(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.target_reps == 0 {
            return Err(Error::Config(format!("{}: targetReps must be positive", self.kind)));
        }
        self.thresholds.validate(self.kind)
    }
}

/// Immutable mapping from exercise identifier to its configuration
#[derive(Debug, Clone)]
pub struct ExerciseRegistry {
    configs: HashMap<ExerciseKind, ExerciseConfig>,
}

impl ExerciseRegistry {
    /// Load a registry from a JSON array of exercise configurations.
    ///
    /// Every supported exercise must appear exactly once.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<ExerciseConfig> = serde_json::from_str(json)?;
        let mut configs = HashMap::with_capacity(entries.len());

        for config in entries {
            config.validate()?;
            let kind = config.kind;
            if configs.insert(kind, config).is_some() {
                return Err(Error::Config(format!("duplicate exercise entry: {kind}")));
            }
        }

        if let Some(missing) = ExerciseKind::ALL.iter().find(|k| !configs.contains_key(*k)) {
            return Err(Error::Config(format!("missing exercise entry: {missing}")));
        }

        Ok(Self { configs })
    }

    pub fn to_json(&self) -> Result<String> {
        let entries: Vec<&ExerciseConfig> = self.iter().collect();
        Ok(serde_json::to_string_pretty(&entries)?)
    }

    pub fn get(&self, kind: ExerciseKind) -> &ExerciseConfig {
        // Construction guarantees an entry for every kind
        &self.configs[&kind]
    }

    /// Look up a configuration by its registry identifier
    pub fn lookup(&self, id: &str) -> Result<&ExerciseConfig> {
        let kind: ExerciseKind = id.parse()?;
        Ok(self.get(kind))
    }

    /// Configurations in a stable order
    pub fn iter(&self) -> impl Iterator<Item = &ExerciseConfig> {
        ExerciseKind::ALL.iter().map(move |kind| self.get(*kind))
    }
}

impl Default for ExerciseRegistry {
    fn default() -> Self {
        Self {
            configs: ExerciseKind::ALL
                .into_iter()
                .map(|kind| (kind, ExerciseConfig::canonical(kind)))
                .collect(),
        }
    }
}

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::control::{DEFAULT_MIN_ACTUATION, DEFAULT_STEER_DEAD_ZONE, DEFAULT_STEER_MAGNITUDE};
use crate::experiment::Variant;
use crate::skill::DEFAULT_EPSILON;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Everything needed to build an [`crate::experiment::Experiment`].
///
/// All sections default, so `{"variant": "complete_state"}` is a full config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub variant: Variant,
    pub thresholds: Thresholds,
    pub reward: RewardConfig,
    pub collision: CollisionConfig,
    /// Number of past steps kept in the action/skill history.
    pub time_horizon: usize,
    /// The episode ends once the vehicle is closer than this to its destination.
    pub destination_threshold: f32,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Baseline,
            thresholds: Thresholds::default(),
            reward: RewardConfig::default(),
            collision: CollisionConfig::default(),
            time_horizon: 5,
            destination_threshold: 2.0,
        }
    }
}

impl ExperimentConfig {
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.thresholds;
        for (name, value) in [
            ("skill_eps", t.skill_eps),
            ("penalty_eps", t.penalty_eps),
            ("steer_dead_zone", t.steer_dead_zone),
            ("min_actuation", t.min_actuation),
        ] {
            if !(value >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        if self.time_horizon == 0 {
            return Err(ConfigError::Invalid(
                "time_horizon must be at least 1".to_string(),
            ));
        }
        if !(self.reward.normalization_multiple > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "normalization_multiple must be positive, got {}",
                self.reward.normalization_multiple
            )));
        }
        if !(self.collision.penalty >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "collision penalty must be non-negative, got {}",
                self.collision.penalty
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Dead band used when recovering a skill from a control.
    pub skill_eps: f32,
    /// Dead band used by the coordination rules.
    pub penalty_eps: f32,
    pub steer_dead_zone: f32,
    pub steer_magnitude: f32,
    pub min_actuation: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            skill_eps: DEFAULT_EPSILON,
            penalty_eps: DEFAULT_EPSILON,
            steer_dead_zone: DEFAULT_STEER_DEAD_ZONE,
            steer_magnitude: DEFAULT_STEER_MAGNITUDE,
            min_actuation: DEFAULT_MIN_ACTUATION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    pub time_cost: f32,
    /// Below this speed (km/h) the vehicle counts as dawdling.
    pub speed_dead_zone: f32,
    /// Penalty per km/h above the speed limit.
    pub speed_excess_scale: f32,
    /// Extra weight of the direction term when heading against the route.
    pub misalignment_scale: f32,
    /// Normalized rewards are clamped below at `-normalization_multiple * speed`.
    pub normalization_multiple: f32,
    pub action_penalty_weight: f32,
    /// Overrides the variant's choice of normalizing the reward.
    pub normalize: Option<bool>,
    /// Overrides the variant's choice of adding the action penalty.
    pub penalize_actions: Option<bool>,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            time_cost: -1.0,
            speed_dead_zone: 10.0,
            speed_excess_scale: 2.0,
            misalignment_scale: 2.0,
            normalization_multiple: 6.0,
            action_penalty_weight: 1.0,
            normalize: None,
            penalize_actions: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Penalty for hitting a pedestrian; vehicles cost half, anything else a tenth.
    pub penalty: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self { penalty: 1000.0 }
    }
}

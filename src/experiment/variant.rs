use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::skill::SkillTable;

/// The experiment settings that can be run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Bang-bang pedals and bucketed steering.
    Baseline,
    /// First action element picks one of 8 skills, the rest set magnitudes.
    RouteFollow,
    /// Skill slot plus free pedal/steer/reverse, scored for coordination.
    ActionPenalty,
    /// Separate 10-skill head plus free pedal/steer/reverse, normalized reward.
    CompleteState,
    /// Like `CompleteState`, but with the speed-only pretraining reward.
    Pretrain,
    /// Keyboard-style direct control.
    Play,
}

/// Where a step's skill comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillSource {
    /// Recovered from the mapped control with the classifier.
    Classified,
    /// Bucketed from the first action element.
    Bucketed(SkillTable),
    /// Rounded from the separate skill action.
    Indexed(SkillTable),
}

impl Variant {
    pub const ALL: [Variant; 6] = [
        Variant::Baseline,
        Variant::RouteFollow,
        Variant::ActionPenalty,
        Variant::CompleteState,
        Variant::Pretrain,
        Variant::Play,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Variant::Baseline => "baseline",
            Variant::RouteFollow => "route_follow",
            Variant::ActionPenalty => "action_penalty",
            Variant::CompleteState => "complete_state",
            Variant::Pretrain => "pretrain",
            Variant::Play => "play",
        }
    }

    pub fn action_len(self) -> usize {
        match self {
            Variant::ActionPenalty => 4,
            Variant::Play => 5,
            _ => 3,
        }
    }

    pub fn skill_source(self) -> SkillSource {
        match self {
            Variant::Baseline | Variant::Play => SkillSource::Classified,
            Variant::RouteFollow | Variant::ActionPenalty => {
                SkillSource::Bucketed(SkillTable::RouteFollow)
            }
            Variant::CompleteState | Variant::Pretrain => {
                SkillSource::Indexed(SkillTable::Complete)
            }
        }
    }

    pub fn normalizes(self) -> bool {
        matches!(self, Variant::CompleteState | Variant::Pretrain)
    }

    pub fn penalizes_actions(self) -> bool {
        matches!(
            self,
            Variant::ActionPenalty | Variant::CompleteState | Variant::Pretrain
        )
    }

    /// Offset of the `[pedal, steer, reverse]` tuple in the action vector.
    pub fn control_offset(self) -> usize {
        match self {
            Variant::ActionPenalty => 1,
            _ => 0,
        }
    }

    /// Action space description handed to the learning library.
    pub fn action_spec(self) -> ActionsSpec {
        let control = TensorSpec::bounded(self.action_len(), -1.0, 1.0);
        match self.skill_source() {
            SkillSource::Indexed(table) => ActionsSpec::WithSkill {
                control,
                skill: TensorSpec::bounded(1, 0.0, (table.len() - 1) as f32),
            },
            _ => ActionsSpec::Vector(control),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .into_iter()
            .find(|v| v.name() == s)
            .ok_or_else(|| ConfigError::Invalid(format!("unknown variant `{s}`")))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TensorSpec {
    #[serde(rename = "type")]
    pub kind: String,
    pub shape: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f32>,
}

impl TensorSpec {
    pub fn bounded(len: usize, min_value: f32, max_value: f32) -> Self {
        Self {
            kind: "float".to_string(),
            shape: vec![len],
            min_value: Some(min_value),
            max_value: Some(max_value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionsSpec {
    WithSkill { control: TensorSpec, skill: TensorSpec },
    Vector(TensorSpec),
}

use serde::{Deserialize, Serialize};

/// Training objectives understood by the learning library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Objective {
    #[serde(rename = "det_policy_gradient")]
    DeterministicPolicyGradient,
    Plus {
        objective1: Box<Objective>,
        objective2: Box<Objective>,
    },
    PolicyGradient {
        ratio_based: bool,
        clipping_value: f32,
        early_reduce: bool,
    },
    Value {
        value: ValueTarget,
        huber_loss: f32,
        early_reduce: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueTarget {
    State,
    Action,
}

impl Objective {
    pub fn deterministic_policy_gradient() -> Self {
        Objective::DeterministicPolicyGradient
    }

    pub fn plus(objective1: Objective, objective2: Objective) -> Self {
        Objective::Plus {
            objective1: Box::new(objective1),
            objective2: Box::new(objective2),
        }
    }

    pub fn policy_gradient() -> Self {
        Objective::PolicyGradient {
            ratio_based: false,
            clipping_value: 0.0,
            early_reduce: true,
        }
    }

    /// Ratio-based (PPO style) policy gradient with the given clipping.
    pub fn clipped_policy_gradient(clipping_value: f32) -> Self {
        Objective::PolicyGradient {
            ratio_based: true,
            clipping_value,
            early_reduce: true,
        }
    }

    pub fn value(value: ValueTarget) -> Self {
        Objective::Value {
            value,
            huber_loss: 0.0,
            early_reduce: true,
        }
    }
}

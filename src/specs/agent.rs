use serde::{Deserialize, Serialize};

use super::errors::SpecError;
use super::networks::{Block, ComplexNetwork, ConvolutionalNetwork, DenseNetwork, Network};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateUnit {
    Timesteps,
    Episodes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateSpec {
    pub unit: UpdateUnit,
    pub batch_size: u32,
    pub frequency: u32,
    pub start: u32,
}

/// Update schedule; a missing frequency or start falls back to `batch_size`.
pub fn update(
    unit: UpdateUnit,
    batch_size: u32,
    frequency: Option<u32>,
    start: Option<u32>,
) -> UpdateSpec {
    UpdateSpec {
        unit,
        batch_size,
        frequency: frequency.unwrap_or(batch_size),
        start: start.unwrap_or(batch_size),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardEstimation {
    pub horizon: u32,
    pub discount: f32,
    pub estimate_horizon: bool,
    pub estimate_actions: bool,
    pub estimate_advantage: bool,
}

pub fn reward_estimation(horizon: u32) -> RewardEstimation {
    RewardEstimation {
        horizon,
        discount: 1.0,
        estimate_horizon: false,
        estimate_actions: false,
        estimate_advantage: false,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distributions {
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "parametrized_distributions")]
pub struct PolicySpec {
    pub infer_states_value: bool,
    pub distributions: Option<Distributions>,
    pub network: Network,
    pub temperature: f32,
}

pub fn policy(
    network: Network,
    distributions: Option<&str>,
    temperature: f32,
    infer_states_value: bool,
) -> PolicySpec {
    PolicySpec {
        infer_states_value,
        distributions: distributions.map(|kind| Distributions {
            kind: kind.to_string(),
        }),
        network,
        temperature,
    }
}

/// Four-branch network over the camera image, vehicle features, road
/// features and previous actions.
pub fn agent_network() -> Result<Vec<Block>, SpecError> {
    let image = ConvolutionalNetwork {
        layers: 3,
        stride: 2,
        pool: None,
        dropout: 0.2,
        ..ConvolutionalNetwork::between("image", "image_out")
    };
    let dense = |input: &str, output: &str, units: u32| DenseNetwork {
        units,
        dropout: 0.2,
        ..DenseNetwork::between(input, output)
    };

    ComplexNetwork {
        units: 256,
        ..ComplexNetwork::new(vec![
            image.build(),
            dense("vehicle_features", "vehicle_out", 32).build(),
            dense("road_features", "road_out", 24).build(),
            dense("previous_actions", "actions_out", 16).build(),
        ])
    }
    .build()
}

/// Minimal variant of [`agent_network`] for smoke tests.
pub fn agent_light_network() -> Result<Vec<Block>, SpecError> {
    let image = ConvolutionalNetwork {
        layers: 1,
        initial_filters: 3,
        stride: 32,
        ..ConvolutionalNetwork::between("image", "image_out")
    };
    let dense = |input: &str, output: &str| DenseNetwork {
        units: 1,
        layers: 1,
        ..DenseNetwork::between(input, output)
    };

    ComplexNetwork {
        layers: 1,
        units: 1,
        ..ComplexNetwork::new(vec![
            image.build(),
            dense("vehicle_features", "vehicle_out").build(),
            dense("road_features", "road_out").build(),
            dense("previous_actions", "actions_out").build(),
        ])
    }
    .build()
}

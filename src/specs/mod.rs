//! Builders for the learning library's JSON specifications: objectives,
//! optimizers, networks and agent-level settings.

mod agent;
mod errors;
mod networks;
mod objectives;
mod optimizers;

pub use agent::{
    Distributions, PolicySpec, RewardEstimation, UpdateSpec, UpdateUnit, agent_light_network,
    agent_network, policy, reward_estimation, update,
};
pub use errors::SpecError;
pub use networks::{
    Activation, Aggregation, AutoNetwork, Block, ComplexNetwork, ConvolutionalNetwork,
    DenseNetwork, Layer, Network, Normalization, Reduction, complex,
};
pub use objectives::{Objective, ValueTarget};
pub use optimizers::{ClippingMode, LineSearchMode, Optimizer};

use serde::Serialize;
use serde_json::Value;

/// Conversion of any specification into its JSON value.
pub trait ToJson {
    fn to_json(&self) -> Result<Value, serde_json::Error>;
}

impl<T: Serialize> ToJson for T {
    fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ppo_objective_json() {
        // Arrange
        let objective = Objective::plus(
            Objective::clipped_policy_gradient(0.2),
            Objective::value(ValueTarget::State),
        );

        // Act
        let value = objective.to_json().unwrap();

        // Assert
        assert_eq!(
            value,
            json!({
                "type": "plus",
                "objective1": {"type": "policy_gradient", "ratio_based": true,
                               "clipping_value": 0.2f32, "early_reduce": true},
                "objective2": {"type": "value", "value": "state",
                               "huber_loss": 0.0, "early_reduce": true}
            })
        );
    }

    #[test]
    fn test_deterministic_policy_gradient_tag() {
        let value = Objective::deterministic_policy_gradient().to_json().unwrap();

        assert_eq!(value, json!({"type": "det_policy_gradient"}));
    }

    #[test]
    fn test_nested_optimizer_json() {
        // Arrange
        let optimizer = Optimizer::clipping_step(
            Optimizer::multi_step(Optimizer::adam(3e-4), 5),
            1.0,
        );

        // Act
        let value = optimizer.to_json().unwrap();

        // Assert
        assert_eq!(value["type"], json!("clipping_step"));
        assert_eq!(value["mode"], json!("global_norm"));
        assert_eq!(value["optimizer"]["type"], json!("multi_step"));
        assert_eq!(value["optimizer"]["unroll_loop"], json!(false));
        assert_eq!(value["optimizer"]["optimizer"]["type"], json!("adam"));
    }

    #[test]
    fn test_optimizer_defaults() {
        let value = Optimizer::optimizing_step(Optimizer::natural_gradient(1e-2))
            .to_json()
            .unwrap();

        assert_eq!(value["ls_mode"], json!("exponential"));
        assert_eq!(value["ls_max_iterations"], json!(10));
        assert_eq!(value["optimizer"]["cg_max_iterations"], json!(10));
    }

    #[test]
    fn test_optimizer_round_trips_from_json() {
        let json = r#"{
            "type": "subsampling_step",
            "fraction": 0.5,
            "optimizer": {"type": "synchronization", "sync_frequency": 4, "update_weight": 1.0}
        }"#;

        let optimizer: Optimizer = serde_json::from_str(json).unwrap();

        assert_eq!(
            optimizer,
            Optimizer::subsampling_step(Optimizer::synchronization(4, 1.0), 0.5)
        );
    }
}

use serde_json::json;
use tarmac::experiment::Variant;
use tarmac::specs::{
    AutoNetwork, Block, Layer, Network, Objective, Optimizer, ToJson, UpdateUnit, ValueTarget,
    agent_network, policy, reward_estimation, update,
};

#[test]
fn test_ppo_agent_settings_json() {
    // Arrange
    let network = Network::Complex(agent_network().unwrap());
    let baseline = policy(Network::Auto(AutoNetwork::default()), None, 0.0, true);

    // Act
    let settings = json!({
        "update": update(UpdateUnit::Timesteps, 256, Some(64), None).to_json().unwrap(),
        "reward_estimation": reward_estimation(20).to_json().unwrap(),
        "policy": policy(network, Some("gaussian"), 0.0, false).to_json().unwrap(),
        "baseline_policy": baseline.to_json().unwrap(),
        "objective": Objective::clipped_policy_gradient(0.2).to_json().unwrap(),
        "baseline_objective": Objective::value(ValueTarget::State).to_json().unwrap(),
        "optimizer": Optimizer::adam(3e-4).to_json().unwrap(),
        "actions": Variant::CompleteState.action_spec().to_json().unwrap(),
    });

    // Assert
    assert_eq!(settings["update"]["start"], json!(256));
    assert_eq!(settings["update"]["frequency"], json!(64));
    assert_eq!(settings["reward_estimation"]["horizon"], json!(20));
    assert_eq!(settings["policy"]["network"].as_array().map(Vec::len), Some(7));
    assert_eq!(settings["baseline_policy"]["network"]["type"], json!("auto"));
    assert_eq!(settings["objective"]["ratio_based"], json!(true));
    assert_eq!(settings["actions"]["skill"]["max_value"], json!(9.0));
}

#[test]
fn test_agent_network_round_trips_through_json() {
    let network = agent_network().unwrap();

    let text = serde_json::to_string(&network).unwrap();
    let parsed: Vec<Block> = serde_json::from_str(&text).unwrap();

    assert_eq!(parsed, network);
}

#[test]
fn test_branch_json_is_a_nested_list() {
    let network = agent_network().unwrap();

    let value = network.to_json().unwrap();

    let image = &value[0];
    assert_eq!(image[0], json!({"type": "retrieve", "tensors": ["image"]}));
    assert_eq!(image[1]["type"], json!("conv2d"));
    assert_eq!(image[1]["stride"], json!(2));
    assert_eq!(image[1]["dropout"], json!(0.2f32));
    assert_eq!(value[4]["aggregation"], json!("concat"));
}

#[test]
fn test_layers_network_parses_from_json() {
    let json = r#"[
        {"type": "retrieve", "tensors": ["vehicle_features"]},
        {"type": "dense", "size": 32, "activation": "leaky-relu", "dropout": 0.0},
        {"type": "exponential_normalization"},
        {"type": "register", "tensor": "vehicle_out"}
    ]"#;

    let network: Network = serde_json::from_str(json).unwrap();

    let Network::Layers(layers) = network else {
        panic!("expected a plain layer list");
    };
    assert_eq!(layers.len(), 4);
    assert_eq!(layers[3], Layer::register("vehicle_out"));
}

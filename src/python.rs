use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::control::{Actions, Control};
use crate::experiment::{Experiment, Variant};
use crate::reward::{DrivingState, RewardInput};
use crate::skill::{CoordinationRules, DEFAULT_EPSILON, Skill, SkillClassifier};
use crate::specs::{ToJson, agent_light_network, agent_network};

fn value_error(e: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn actions(control: Vec<f32>, skill: Option<f32>) -> Actions {
    Actions { control, skill }
}

/// Name of the skill a vehicle control corresponds to.
#[pyfunction]
#[pyo3(signature = (throttle, steer, brake, reverse, eps = DEFAULT_EPSILON))]
fn classify_skill(throttle: f32, steer: f32, brake: f32, reverse: bool, eps: f32) -> String {
    let control = Control::new(throttle, steer, brake, reverse);
    SkillClassifier::new(eps).classify(&control).name().to_string()
}

/// Number of coordination rules `control` breaks for `skill`.
#[pyfunction]
#[pyo3(signature = (skill, control, eps = DEFAULT_EPSILON))]
fn action_penalty(skill: &str, control: Vec<f32>, eps: f32) -> PyResult<u32> {
    let skill: Skill = skill.parse().map_err(value_error)?;
    CoordinationRules::new(eps)
        .score(skill, &control)
        .map_err(value_error)
}

/// `(throttle, steer, brake, reverse, hand_brake, skill)` for one action
/// vector of `variant`.
#[pyfunction]
#[pyo3(signature = (variant, control, skill = None))]
fn map_actions(
    variant: &str,
    control: Vec<f32>,
    skill: Option<f32>,
) -> PyResult<(f32, f32, f32, bool, bool, String)> {
    let variant: Variant = variant.parse().map_err(value_error)?;
    let experiment = Experiment::for_variant(variant).map_err(value_error)?;
    let (c, skill) = experiment
        .map_actions(&actions(control, skill))
        .map_err(value_error)?;
    Ok((
        c.throttle,
        c.steer,
        c.brake,
        c.reverse,
        c.hand_brake,
        skill.name().to_string(),
    ))
}

/// Scores one step of `variant` given the collision penalty accumulated so
/// far, and returns the reward breakdown as JSON.
#[pyfunction]
#[pyo3(signature = (variant, state_json, control, skill = None, collision_penalty = 0.0))]
fn step_reward(
    variant: &str,
    state_json: &str,
    control: Vec<f32>,
    skill: Option<f32>,
    collision_penalty: f32,
) -> PyResult<String> {
    let variant: Variant = variant.parse().map_err(value_error)?;
    let state: DrivingState = serde_json::from_str(state_json).map_err(value_error)?;
    let experiment = Experiment::for_variant(variant).map_err(value_error)?;
    let actions = actions(control, skill);
    let (_, skill) = experiment.map_actions(&actions).map_err(value_error)?;

    let breakdown = experiment
        .reward(&RewardInput {
            state: &state,
            collision_penalty: collision_penalty.abs(),
            actions: &actions,
            skill,
        })
        .map_err(value_error)?;
    serde_json::to_string(&breakdown).map_err(value_error)
}

#[pyfunction]
#[pyo3(signature = (light = false))]
fn agent_network_json(light: bool) -> PyResult<String> {
    let network = if light {
        agent_light_network()
    } else {
        agent_network()
    }
    .map_err(value_error)?;
    let value = network.to_json().map_err(value_error)?;
    Ok(value.to_string())
}

/// The name of this function must match the lib.name in Cargo.toml
#[pymodule]
fn tarmac(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(classify_skill, m)?)?;
    m.add_function(wrap_pyfunction!(action_penalty, m)?)?;
    m.add_function(wrap_pyfunction!(map_actions, m)?)?;
    m.add_function(wrap_pyfunction!(step_reward, m)?)?;
    m.add_function(wrap_pyfunction!(agent_network_json, m)?)?;
    Ok(())
}

//! Skill, control and reward layer for reinforcement-learning driving
//! experiments, plus builders for the learning library's specifications.

pub mod config;
pub mod control;
pub mod experiment;
pub mod features;
pub mod reward;
pub mod skill;
pub mod specs;

#[cfg(feature = "python")]
mod python;

pub use config::{ConfigError, ExperimentConfig};
pub use control::{Actions, Control};
pub use experiment::{Experiment, ExperimentError, StepOutcome, Variant};
pub use reward::DrivingState;
pub use skill::Skill;

use thiserror::Error;

use crate::config::ConfigError;
use crate::control::ControlError;
use crate::features::FeatureError;

#[derive(Error, Debug)]
pub enum ExperimentError {
    #[error("Control error: {0}")]
    Control(#[from] ControlError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Feature error: {0}")]
    Feature(#[from] FeatureError),
}

use crate::control::ControlError;

use super::types::{RewardBreakdown, RewardInput};

/// Scores a single simulation step.
pub trait RewardFunction: Send + Sync {
    fn reward(&self, input: &RewardInput<'_>) -> Result<RewardBreakdown, ControlError>;

    fn total(&self, input: &RewardInput<'_>) -> Result<f32, ControlError> {
        Ok(self.reward(input)?.total)
    }
}

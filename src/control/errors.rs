use thiserror::Error;

use crate::skill::SkillError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ControlError {
    #[error("expected at least {expected} action values, got {actual}")]
    ActionLength { expected: usize, actual: usize },

    #[error("skill-aware mapping requires a skill")]
    MissingSkill,

    #[error("Skill error: {0}")]
    Skill(#[from] SkillError),
}

/// Returns an error when `actions` holds fewer than `expected` values.
pub(crate) fn check_len(actions: &[f32], expected: usize) -> Result<(), ControlError> {
    if actions.len() < expected {
        return Err(ControlError::ActionLength {
            expected,
            actual: actions.len(),
        });
    }
    Ok(())
}

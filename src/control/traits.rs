use crate::skill::Skill;

use super::errors::ControlError;
use super::types::{Actions, Control};

/// Strategy turning a policy's actions into vehicle actuation.
///
/// Mappers are pure: they receive the control applied on the previous tick and
/// return the next one instead of mutating shared state.
pub trait ControlMapper: Send + Sync {
    /// Minimum number of elements in `Actions::control`.
    fn action_len(&self) -> usize;

    /// `skill` is the skill decoded for this step, if the experiment decodes
    /// one before mapping.
    fn map(
        &self,
        actions: &Actions,
        skill: Option<Skill>,
        previous: &Control,
    ) -> Result<Control, ControlError>;
}

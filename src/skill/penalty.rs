use crate::control::ControlError;
use crate::control::errors::check_len;

use super::classifier::DEFAULT_EPSILON;
use super::types::Skill;

/// Scores how well a continuous control tuple agrees with the skill it was
/// emitted together with.
///
/// The tuple is `[a0, steer, a2]` where `throttle = max(a0, 0)` and
/// `reverse = a2 > 0`. Every rule of the skill that the tuple breaks counts as
/// one mismatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinationRules {
    eps: f32,
}

impl Default for CoordinationRules {
    fn default() -> Self {
        Self::new(DEFAULT_EPSILON)
    }
}

impl CoordinationRules {
    pub fn new(eps: f32) -> Self {
        Self { eps }
    }

    /// Number of rules checked for `skill`.
    pub fn checks(skill: Skill) -> u32 {
        match skill {
            Skill::Idle | Skill::Brake => 1,
            Skill::SteerRight | Skill::SteerLeft => 2,
            _ => 3,
        }
    }

    pub fn mismatches(&self, skill: Skill, throttle: f32, steer: f32, reverse: bool) -> u32 {
        let eps = self.eps;
        let centered = (-eps..=eps).contains(&steer);
        let flag = |broken: bool| u32::from(broken);

        match skill {
            Skill::Idle | Skill::Brake => flag(throttle > eps),
            Skill::SteerRight | Skill::SteerLeft => flag(centered) + flag(throttle > eps),
            _ => {
                let direction = if skill.is_forward() { reverse } else { !reverse };
                let heading = match skill {
                    Skill::Forward | Skill::Backward => !centered,
                    Skill::ForwardLeft | Skill::BackwardLeft => steer > -eps,
                    _ => steer < eps,
                };
                flag(direction) + flag(throttle < eps) + flag(heading)
            }
        }
    }

    pub fn agreements(&self, skill: Skill, throttle: f32, steer: f32, reverse: bool) -> u32 {
        Self::checks(skill) - self.mismatches(skill, throttle, steer, reverse)
    }

    /// Mismatch count for a raw `[a0, steer, a2]` tuple.
    pub fn score(&self, skill: Skill, control: &[f32]) -> Result<u32, ControlError> {
        check_len(control, 3)?;
        let throttle = control[0].max(0.0);
        let reverse = control[2] > 0.0;
        Ok(self.mismatches(skill, throttle, control[1], reverse))
    }
}

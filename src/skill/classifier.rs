use crate::control::{Actions, Control};

use super::types::{Skill, SkillTable};

pub const DEFAULT_EPSILON: f32 = 0.05;

/// Recovers the skill a control was most likely produced by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkillClassifier {
    eps: f32,
}

impl Default for SkillClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_EPSILON)
    }
}

impl SkillClassifier {
    pub fn new(eps: f32) -> Self {
        Self { eps }
    }

    pub fn eps(&self) -> f32 {
        self.eps
    }

    pub fn classify(&self, control: &Control) -> Skill {
        let eps = self.eps;
        let Control {
            throttle: t,
            steer: s,
            brake: b,
            reverse: r,
            ..
        } = *control;

        let driving = t > eps && b <= eps;

        if r && driving {
            self.by_steer(s, Skill::BackwardRight, Skill::BackwardLeft, Skill::Backward)
        } else if !r && driving {
            self.by_steer(s, Skill::ForwardRight, Skill::ForwardLeft, Skill::Forward)
        } else if t <= eps && b <= eps {
            self.by_steer(s, Skill::SteerRight, Skill::SteerLeft, Skill::Idle)
        } else if b > eps {
            Skill::Brake
        } else {
            Skill::Idle
        }
    }

    fn by_steer(&self, steer: f32, right: Skill, left: Skill, straight: Skill) -> Skill {
        if steer > self.eps {
            right
        } else if steer < -self.eps {
            left
        } else {
            straight
        }
    }

    /// Turns a recorded control into the actions a skill-head policy would
    /// have emitted for it, together with the classified skill.
    ///
    /// The first control element is the throttle when positive, otherwise the
    /// negated brake.
    pub fn control_to_actions(&self, control: &Control) -> (Actions, Skill) {
        let skill = self.classify(control);
        let index = SkillTable::Complete.index_of(skill).unwrap_or(0);
        let reverse = if control.reverse { 1.0 } else { 0.0 };
        let pedal = if control.throttle > 0.0 {
            control.throttle
        } else {
            -control.brake
        };

        (
            Actions::with_skill(vec![pedal, control.steer, reverse], index as f32),
            skill,
        )
    }
}

use tracing::debug;

use crate::skill::Skill;

use super::errors::{ControlError, check_len};
use super::traits::ControlMapper;
use super::types::{Actions, Control};

pub const DEFAULT_STEER_DEAD_ZONE: f32 = 0.33;
pub const DEFAULT_STEER_MAGNITUDE: f32 = 0.5;
pub const DEFAULT_MIN_ACTUATION: f32 = 0.1;

/// Bang-bang pedals and three-level steering: `[pedal, steer, reverse]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaselineMapper {
    pub dead_zone: f32,
    pub steer_magnitude: f32,
}

impl Default for BaselineMapper {
    fn default() -> Self {
        Self {
            dead_zone: DEFAULT_STEER_DEAD_ZONE,
            steer_magnitude: DEFAULT_STEER_MAGNITUDE,
        }
    }
}

impl ControlMapper for BaselineMapper {
    fn action_len(&self) -> usize {
        3
    }

    fn map(
        &self,
        actions: &Actions,
        _skill: Option<Skill>,
        _previous: &Control,
    ) -> Result<Control, ControlError> {
        let a = &actions.control;
        check_len(a, self.action_len())?;

        let (throttle, brake) = if a[0] < 0.0 { (0.0, 1.0) } else { (1.0, 0.0) };
        let steer = if a[1] < -self.dead_zone {
            -self.steer_magnitude
        } else if a[1] > self.dead_zone {
            self.steer_magnitude
        } else {
            0.0
        };

        let control = Control::new(throttle, steer, brake, a[2] > 0.0);
        debug!(?control, "baseline control");
        Ok(control)
    }
}

/// Skill-driven mapping: `[skill bucket, intensity, steer]`.
///
/// The skill fixes which actuators are active and their direction, the
/// remaining elements only choose magnitudes, floored at `min_actuation`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkillMapper {
    pub min_actuation: f32,
}

impl Default for SkillMapper {
    fn default() -> Self {
        Self {
            min_actuation: DEFAULT_MIN_ACTUATION,
        }
    }
}

impl ControlMapper for SkillMapper {
    fn action_len(&self) -> usize {
        3
    }

    fn map(
        &self,
        actions: &Actions,
        skill: Option<Skill>,
        previous: &Control,
    ) -> Result<Control, ControlError> {
        let a = &actions.control;
        check_len(a, self.action_len())?;
        let skill = skill.ok_or(ControlError::MissingSkill)?;

        let floor = self.min_actuation;
        let intensity = floor.max((a[1] + 1.0) / 2.0);
        let right = floor.max(a[2].abs());
        let left = (-floor).min(-a[2].abs());

        let control = match skill {
            Skill::Brake => Control::new(0.0, a[2], intensity, previous.reverse),
            Skill::Forward => Control::new(intensity, 0.0, 0.0, false),
            Skill::ForwardRight => Control::new(intensity, right, 0.0, false),
            Skill::ForwardLeft => Control::new(intensity, left, 0.0, false),
            Skill::Backward => Control::new(intensity, 0.0, 0.0, true),
            Skill::BackwardRight => Control::new(intensity, right, 0.0, true),
            Skill::BackwardLeft => Control::new(intensity, left, 0.0, true),
            Skill::SteerRight => Control::new(0.0, right, 0.0, previous.reverse),
            Skill::SteerLeft => Control::new(0.0, left, 0.0, previous.reverse),
            Skill::Idle => Control::default(),
        };

        debug!(%skill, ?control, "skill control");
        Ok(control)
    }
}

/// One signed pedal axis, a steer axis and a reverse flag, starting at
/// `offset` in the action vector.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SignedMapper {
    pub offset: usize,
}

impl SignedMapper {
    pub fn with_offset(offset: usize) -> Self {
        Self { offset }
    }
}

impl ControlMapper for SignedMapper {
    fn action_len(&self) -> usize {
        self.offset + 3
    }

    fn map(
        &self,
        actions: &Actions,
        _skill: Option<Skill>,
        _previous: &Control,
    ) -> Result<Control, ControlError> {
        check_len(&actions.control, self.action_len())?;
        let a = &actions.control[self.offset..];

        let pedal = a[0];
        let control = Control::new(pedal.max(0.0), a[1], (-pedal).max(0.0), a[2] > 0.0);
        debug!(?control, "signed control");
        Ok(control)
    }
}

/// Hands the actions straight to the vehicle:
/// `[throttle, steer, brake, reverse, hand_brake]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DirectMapper;

impl ControlMapper for DirectMapper {
    fn action_len(&self) -> usize {
        5
    }

    fn map(
        &self,
        actions: &Actions,
        _skill: Option<Skill>,
        _previous: &Control,
    ) -> Result<Control, ControlError> {
        let a = &actions.control;
        check_len(a, self.action_len())?;

        Ok(Control {
            throttle: a[0],
            steer: a[1],
            brake: a[2],
            reverse: a[3] != 0.0,
            hand_brake: a[4] != 0.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_with(mapper: &dyn ControlMapper, control: &[f32], skill: Option<Skill>) -> Control {
        mapper
            .map(&Actions::vector(control.to_vec()), skill, &Control::default())
            .unwrap()
    }

    #[test]
    fn test_baseline_example() {
        // Arrange
        let mapper = BaselineMapper::default();

        // Act
        let control = map_with(&mapper, &[0.5, 0.2, -1.0], None);

        // Assert
        assert_eq!(control.throttle, 1.0);
        assert_eq!(control.brake, 0.0);
        assert_eq!(control.steer, 0.0);
        assert!(!control.reverse);
    }

    #[test]
    fn test_baseline_pedals_are_exclusive() {
        let mapper = BaselineMapper::default();

        for i in -20..=20 {
            let a0 = i as f32 / 20.0;
            let control = map_with(&mapper, &[a0, 0.0, 0.0], None);
            let active = [control.throttle, control.brake]
                .iter()
                .filter(|v| **v != 0.0)
                .count();
            assert_eq!(active, 1, "exactly one pedal for a0 = {a0}");
        }
    }

    #[test]
    fn test_baseline_steer_buckets() {
        let mapper = BaselineMapper::default();

        assert_eq!(map_with(&mapper, &[0.0, -0.9, 0.0], None).steer, -0.5);
        assert_eq!(map_with(&mapper, &[0.0, 0.34, 0.0], None).steer, 0.5);
        assert_eq!(map_with(&mapper, &[0.0, -0.33, 0.0], None).steer, 0.0);
        assert!(map_with(&mapper, &[-0.1, 0.0, 0.4], None).reverse);
    }

    #[test]
    fn test_skill_brake_example() {
        let mapper = SkillMapper::default();

        let control = map_with(&mapper, &[0.0, -0.6, 0.1], Some(Skill::Brake));

        assert_eq!(control.throttle, 0.0);
        assert!((control.brake - 0.2).abs() < 1e-6);
        assert!((control.steer - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_skill_brake_keeps_reverse() {
        let mapper = SkillMapper::default();
        let previous = Control::new(0.5, 0.0, 0.0, true);

        let control = mapper
            .map(&Actions::vector(vec![0.0, 0.0, 0.0]), Some(Skill::Brake), &previous)
            .unwrap();

        assert!(control.reverse);
    }

    #[test]
    fn test_skill_floors_actuation() {
        let mapper = SkillMapper::default();

        let right = map_with(&mapper, &[0.0, -1.0, 0.0], Some(Skill::ForwardRight));
        let left = map_with(&mapper, &[0.0, -1.0, 0.02], Some(Skill::BackwardLeft));

        assert_eq!(right.throttle, 0.1);
        assert_eq!(right.steer, 0.1);
        assert!(!right.reverse);
        assert_eq!(left.steer, -0.1);
        assert!(left.reverse);
    }

    #[test]
    fn test_skill_idle_and_forward() {
        let mapper = SkillMapper::default();

        let idle = map_with(&mapper, &[0.0, 1.0, 1.0], Some(Skill::Idle));
        let forward = map_with(&mapper, &[0.0, 1.0, 1.0], Some(Skill::Forward));

        assert_eq!(idle, Control::default());
        assert_eq!(forward, Control::new(1.0, 0.0, 0.0, false));
    }

    #[test]
    fn test_skill_mapper_requires_skill() {
        let mapper = SkillMapper::default();

        let result = mapper.map(&Actions::vector(vec![0.0; 3]), None, &Control::default());

        assert_eq!(result, Err(ControlError::MissingSkill));
    }

    #[test]
    fn test_signed_mapper_with_offset() {
        let mapper = SignedMapper::with_offset(1);

        let forward = map_with(&mapper, &[0.9, 0.4, -0.2, 0.3], None);
        let braking = map_with(&mapper, &[0.9, -0.7, 0.2, -0.3], None);

        assert_eq!(forward, Control::new(0.4, -0.2, 0.0, true));
        assert_eq!(braking, Control::new(0.0, 0.2, 0.7, false));
    }

    #[test]
    fn test_direct_mapper() {
        let control = map_with(&DirectMapper, &[0.3, -0.2, 0.1, 1.0, 1.0], None);

        assert_eq!(control.throttle, 0.3);
        assert_eq!(control.brake, 0.1);
        assert!(control.reverse);
        assert!(control.hand_brake);
    }

    #[test]
    fn test_short_action_vector() {
        let result = DirectMapper.map(&Actions::vector(vec![0.0; 4]), None, &Control::default());

        assert_eq!(
            result,
            Err(ControlError::ActionLength {
                expected: 5,
                actual: 4
            })
        );
    }
}

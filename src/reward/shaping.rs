use tracing::trace;

use crate::config::RewardConfig;
use crate::control::ControlError;
use crate::control::errors::check_len;
use crate::skill::CoordinationRules;

use super::traits::RewardFunction;
use super::types::{DrivingState, RewardBreakdown, RewardInput};

/// Zero inside the allowed band, -1 when crawling at or below `dead_zone`,
/// proportional to the excess above the limit.
pub fn speed_limit_term(speed: f32, speed_limit: f32, dead_zone: f32, excess_scale: f32) -> f32 {
    if speed <= speed_limit {
        if speed > dead_zone { 0.0 } else { -1.0 }
    } else {
        excess_scale * (speed_limit - speed)
    }
}

/// Alignment of the heading with the route, scaled by `speed + 1` so a
/// stopped vehicle still gets a signal. Misalignment weighs `misalignment_scale`
/// times more.
pub fn direction_term(similarity: f32, speed: f32, misalignment_scale: f32) -> f32 {
    let scaled = (speed + 1.0) * similarity;
    if similarity > 0.0 {
        scaled
    } else {
        scaled * misalignment_scale
    }
}

/// Zero until the vehicle has driven more than the route length, then the
/// overshoot plus whatever distance is still left, negated.
pub fn efficiency_term(state: &DrivingState) -> f32 {
    if state.travelled_distance <= state.route_length {
        0.0
    } else {
        -(state.travelled_distance - state.route_length) - state.distance_to_destination
    }
}

/// Divides by `max(speed, 1)` after clamping `reward` below at `-multiple * v`.
pub fn normalize(reward: f32, speed: f32, multiple: f32) -> f32 {
    let v = speed.max(1.0);
    reward.max(-multiple * v) / v
}

fn finish(mut breakdown: RewardBreakdown) -> RewardBreakdown {
    breakdown.base = breakdown.time_cost
        + breakdown.collision
        + breakdown.direction
        + breakdown.efficiency
        + breakdown.speed;
    breakdown.total = breakdown.base;
    breakdown
}

/// Route-following reward: time cost, collisions, direction, efficiency and
/// speed-limit compliance.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteReward {
    config: RewardConfig,
}

impl RouteReward {
    pub fn new(config: RewardConfig) -> Self {
        Self { config }
    }
}

impl RewardFunction for RouteReward {
    fn reward(&self, input: &RewardInput<'_>) -> Result<RewardBreakdown, ControlError> {
        let c = &self.config;
        let state = input.state;

        let mut direction = direction_term(state.similarity(), state.speed, c.misalignment_scale);
        let efficiency = efficiency_term(state);
        if state.travelled_distance > state.route_length && direction > 0.0 {
            // past the route length, heading the right way earns nothing
            direction = 0.0;
        }

        Ok(finish(RewardBreakdown {
            time_cost: c.time_cost,
            collision: -input.collision_penalty,
            direction,
            efficiency,
            speed: speed_limit_term(
                state.speed,
                state.speed_limit,
                c.speed_dead_zone,
                c.speed_excess_scale,
            ),
            ..RewardBreakdown::default()
        }))
    }
}

/// Reward used while imitating recorded driving: rewards raw speed instead of
/// route alignment and ignores efficiency.
#[derive(Debug, Clone, PartialEq)]
pub struct PretrainReward {
    config: RewardConfig,
}

impl PretrainReward {
    pub fn new(config: RewardConfig) -> Self {
        Self { config }
    }
}

impl RewardFunction for PretrainReward {
    fn reward(&self, input: &RewardInput<'_>) -> Result<RewardBreakdown, ControlError> {
        let c = &self.config;
        let state = input.state;

        Ok(finish(RewardBreakdown {
            time_cost: c.time_cost,
            collision: -input.collision_penalty,
            direction: state.speed + 1.0,
            speed: speed_limit_term(
                state.speed,
                state.speed_limit,
                c.speed_dead_zone,
                c.speed_excess_scale,
            ),
            ..RewardBreakdown::default()
        }))
    }
}

/// Rescales the wrapped reward by speed, see [`normalize`].
pub struct Normalized {
    inner: Box<dyn RewardFunction>,
    multiple: f32,
}

impl Normalized {
    pub fn new(inner: Box<dyn RewardFunction>, multiple: f32) -> Self {
        Self { inner, multiple }
    }
}

impl RewardFunction for Normalized {
    fn reward(&self, input: &RewardInput<'_>) -> Result<RewardBreakdown, ControlError> {
        let mut breakdown = self.inner.reward(input)?;
        let normalized = normalize(breakdown.total, input.state.speed, self.multiple);
        breakdown.normalized = Some(normalized);
        breakdown.total = normalized;
        Ok(breakdown)
    }
}

/// Subtracts `weight` for every coordination rule the step's control tuple
/// breaks with respect to its skill.
pub struct WithActionPenalty {
    inner: Box<dyn RewardFunction>,
    rules: CoordinationRules,
    weight: f32,
    /// Start of the `[pedal, steer, reverse]` tuple in the action vector.
    offset: usize,
}

impl WithActionPenalty {
    pub fn new(
        inner: Box<dyn RewardFunction>,
        rules: CoordinationRules,
        weight: f32,
        offset: usize,
    ) -> Self {
        Self {
            inner,
            rules,
            weight,
            offset,
        }
    }
}

impl RewardFunction for WithActionPenalty {
    fn reward(&self, input: &RewardInput<'_>) -> Result<RewardBreakdown, ControlError> {
        check_len(&input.actions.control, self.offset + 3)?;
        let mut breakdown = self.inner.reward(input)?;
        let mismatches = self.rules.score(input.skill, &input.actions.control[self.offset..])?;
        breakdown.action_penalty = -self.weight * mismatches as f32;
        breakdown.total += breakdown.action_penalty;

        trace!(skill = %input.skill, mismatches, total = breakdown.total, "action penalty");
        Ok(breakdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::Actions;
    use crate::reward::Vec3;
    use crate::skill::Skill;

    const FORWARD: Vec3 = Vec3::new(1.0, 0.0, 0.0);

    fn state(speed: f32) -> DrivingState {
        DrivingState {
            speed,
            speed_limit: 50.0,
            heading: FORWARD,
            route_forward: FORWARD,
            travelled_distance: 10.0,
            route_length: 100.0,
            distance_to_destination: 90.0,
            distance_to_next_waypoint: 2.0,
        }
    }

    fn input<'a>(state: &'a DrivingState, actions: &'a Actions, skill: Skill) -> RewardInput<'a> {
        RewardInput {
            state,
            collision_penalty: 0.0,
            actions,
            skill,
        }
    }

    #[test]
    fn test_speed_limit_term() {
        assert_eq!(speed_limit_term(30.0, 50.0, 10.0, 2.0), 0.0);
        assert_eq!(speed_limit_term(50.0, 50.0, 10.0, 2.0), 0.0);
        assert_eq!(speed_limit_term(10.0, 50.0, 10.0, 2.0), -1.0);
        assert_eq!(speed_limit_term(0.0, 50.0, 10.0, 2.0), -1.0);
        assert_eq!(speed_limit_term(60.0, 50.0, 10.0, 2.0), -20.0);
    }

    #[test]
    fn test_direction_term_is_asymmetric() {
        assert_eq!(direction_term(1.0, 9.0, 2.0), 10.0);
        assert_eq!(direction_term(-1.0, 9.0, 2.0), -20.0);
        assert_eq!(direction_term(0.5, 0.0, 2.0), 0.5);
    }

    #[test]
    fn test_normalize_example() {
        assert_eq!(normalize(-10.0, 1.0, 6.0), -6.0);
        assert_eq!(normalize(-10.0, 0.2, 6.0), -6.0);
        assert_eq!(normalize(40.0, 20.0, 6.0), 2.0);
        assert_eq!(normalize(-200.0, 20.0, 6.0), -6.0);
    }

    #[test]
    fn test_route_reward_on_track() {
        // Arrange
        let reward = RouteReward::new(RewardConfig::default());
        let state = state(30.0);
        let actions = Actions::vector(vec![0.0; 3]);

        // Act
        let breakdown = reward.reward(&input(&state, &actions, Skill::Forward)).unwrap();

        // Assert
        assert_eq!(breakdown.time_cost, -1.0);
        assert_eq!(breakdown.direction, 31.0);
        assert_eq!(breakdown.efficiency, 0.0);
        assert_eq!(breakdown.speed, 0.0);
        assert_eq!(breakdown.total, 30.0);
    }

    #[test]
    fn test_route_reward_overshoot_zeroes_positive_direction() {
        let reward = RouteReward::new(RewardConfig::default());
        let mut state = state(30.0);
        state.travelled_distance = 120.0;
        state.distance_to_destination = 5.0;
        let actions = Actions::vector(vec![0.0; 3]);

        let breakdown = reward.reward(&input(&state, &actions, Skill::Forward)).unwrap();

        assert_eq!(breakdown.direction, 0.0);
        assert_eq!(breakdown.efficiency, -25.0);
        assert_eq!(breakdown.total, -26.0);
    }

    #[test]
    fn test_route_reward_subtracts_collisions() {
        let reward = RouteReward::new(RewardConfig::default());
        let mut state = state(0.0);
        state.heading = Vec3::new(-1.0, 0.0, 0.0);
        let actions = Actions::vector(vec![0.0; 3]);
        let mut input = input(&state, &actions, Skill::Idle);
        input.collision_penalty = 500.0;

        let breakdown = reward.reward(&input).unwrap();

        assert_eq!(breakdown.collision, -500.0);
        assert_eq!(breakdown.direction, -2.0);
        assert_eq!(breakdown.speed, -1.0);
        assert_eq!(breakdown.total, -504.0);
    }

    #[test]
    fn test_pretrain_reward() {
        let reward = PretrainReward::new(RewardConfig::default());
        let state = state(20.0);
        let actions = Actions::vector(vec![0.0; 3]);

        let breakdown = reward.reward(&input(&state, &actions, Skill::Forward)).unwrap();

        assert_eq!(breakdown.direction, 21.0);
        assert_eq!(breakdown.efficiency, 0.0);
        assert_eq!(breakdown.total, 20.0);
    }

    #[test]
    fn test_normalized_decorator() {
        let reward = Normalized::new(Box::new(RouteReward::new(RewardConfig::default())), 6.0);
        let state = state(30.0);
        let actions = Actions::vector(vec![0.0; 3]);

        let breakdown = reward.reward(&input(&state, &actions, Skill::Forward)).unwrap();

        assert_eq!(breakdown.base, 30.0);
        assert_eq!(breakdown.normalized, Some(1.0));
        assert_eq!(breakdown.total, 1.0);
    }

    #[test]
    fn test_action_penalty_decorator() {
        let reward = WithActionPenalty::new(
            Box::new(RouteReward::new(RewardConfig::default())),
            CoordinationRules::default(),
            1.0,
            1,
        );
        let state = state(30.0);
        // skill slot, then a braking pedal with reverse on for a forward skill
        let actions = Actions::vector(vec![0.3, -0.5, 0.0, 1.0]);

        let breakdown = reward.reward(&input(&state, &actions, Skill::Forward)).unwrap();

        assert_eq!(breakdown.action_penalty, -2.0);
        assert_eq!(breakdown.total, 28.0);
    }

    #[test]
    fn test_action_penalty_rejects_short_tuple() {
        // Arrange
        let reward = WithActionPenalty::new(
            Box::new(RouteReward::new(RewardConfig::default())),
            CoordinationRules::default(),
            1.0,
            1,
        );
        let state = state(30.0);
        let actions = Actions::vector(vec![0.0, -1.0]);

        // Act
        let result = reward.reward(&input(&state, &actions, Skill::Forward));

        // Assert
        assert_eq!(
            result,
            Err(ControlError::ActionLength {
                expected: 4,
                actual: 2
            })
        );
    }

    #[test]
    fn test_normalized_propagates_inner_error() {
        let reward = Normalized::new(
            Box::new(WithActionPenalty::new(
                Box::new(PretrainReward::new(RewardConfig::default())),
                CoordinationRules::default(),
                1.0,
                0,
            )),
            6.0,
        );
        let state = state(30.0);
        let actions = Actions::vector(vec![0.5]);

        let result = reward.total(&input(&state, &actions, Skill::Forward));

        assert!(matches!(result, Err(ControlError::ActionLength { .. })));
    }
}

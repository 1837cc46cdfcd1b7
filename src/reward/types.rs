use serde::{Deserialize, Serialize};

use crate::control::Actions;
use crate::skill::Skill;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(&self, other: &Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn norm(&self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Cosine of the angle between the two vectors; 0 when either is zero.
    pub fn cosine_similarity(&self, other: &Vec3) -> f32 {
        let denom = self.norm() * other.norm();
        if denom == 0.0 {
            return 0.0;
        }
        self.dot(other) / denom
    }
}

/// Kinematics and route progress of the vehicle for one step, as read from
/// the simulator by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DrivingState {
    /// km/h
    pub speed: f32,
    /// km/h
    pub speed_limit: f32,
    /// Forward vector of the vehicle's transform.
    pub heading: Vec3,
    /// Forward vector of the next route waypoint.
    pub route_forward: Vec3,
    pub travelled_distance: f32,
    pub route_length: f32,
    pub distance_to_destination: f32,
    pub distance_to_next_waypoint: f32,
}

impl DrivingState {
    pub fn similarity(&self) -> f32 {
        self.heading.cosine_similarity(&self.route_forward)
    }
}

pub struct RewardInput<'a> {
    pub state: &'a DrivingState,
    /// Collision penalty accumulated so far in the episode (non-negative).
    pub collision_penalty: f32,
    pub actions: &'a Actions,
    pub skill: Skill,
}

/// Per-term view of a step's reward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RewardBreakdown {
    pub time_cost: f32,
    /// Negated accumulated collision penalty.
    pub collision: f32,
    pub direction: f32,
    pub efficiency: f32,
    pub speed: f32,
    /// Sum of the terms above.
    pub base: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized: Option<f32>,
    pub action_penalty: f32,
    pub total: f32,
}

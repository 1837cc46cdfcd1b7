use serde::{Deserialize, Serialize};

/// Low-level actuation of a vehicle at a given tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Control {
    pub throttle: f32,
    pub steer: f32,
    pub brake: f32,
    pub reverse: bool,
    pub hand_brake: bool,
}

impl Control {
    pub fn new(throttle: f32, steer: f32, brake: f32, reverse: bool) -> Self {
        Self {
            throttle,
            steer,
            brake,
            reverse,
            hand_brake: false,
        }
    }
}

/// What a policy emits each step.
///
/// `control` is the continuous action vector. `skill` is only present when the
/// policy has a separate discrete skill head; it is a float because that is
/// what the learning library hands back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Actions {
    pub control: Vec<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill: Option<f32>,
}

impl Actions {
    pub fn vector(control: impl Into<Vec<f32>>) -> Self {
        Self {
            control: control.into(),
            skill: None,
        }
    }

    pub fn with_skill(control: impl Into<Vec<f32>>, skill: f32) -> Self {
        Self {
            control: control.into(),
            skill: Some(skill),
        }
    }

    pub fn len(&self) -> usize {
        self.control.len()
    }

    pub fn is_empty(&self) -> bool {
        self.control.is_empty()
    }
}

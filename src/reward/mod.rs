mod collision;
mod shaping;
mod traits;
mod types;

pub use collision::{ActorKind, CollisionTracker};
pub use shaping::{
    Normalized, PretrainReward, RouteReward, WithActionPenalty, direction_term, efficiency_term,
    normalize, speed_limit_term,
};
pub use traits::RewardFunction;
pub use types::{DrivingState, RewardBreakdown, RewardInput, Vec3};

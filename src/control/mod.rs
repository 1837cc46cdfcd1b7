pub(crate) mod errors;
mod mappers;
mod traits;
mod types;

pub use errors::ControlError;
pub use mappers::{
    BaselineMapper, DEFAULT_MIN_ACTUATION, DEFAULT_STEER_DEAD_ZONE, DEFAULT_STEER_MAGNITUDE,
    DirectMapper, SignedMapper, SkillMapper,
};
pub use traits::ControlMapper;
pub use types::{Actions, Control};

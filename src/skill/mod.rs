mod classifier;
mod errors;
mod penalty;
mod types;

pub use classifier::{DEFAULT_EPSILON, SkillClassifier};
pub use errors::SkillError;
pub use penalty::CoordinationRules;
pub use types::{Skill, SkillTable};

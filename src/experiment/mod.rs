mod errors;
mod runner;
mod variant;

pub use errors::ExperimentError;
pub use runner::{EpisodeSummary, Experiment, StepOutcome};
pub use variant::{ActionsSpec, SkillSource, TensorSpec, Variant};

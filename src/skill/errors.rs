use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkillError {
    #[error("skill index {index} out of range for a table of {len} skills")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("unknown skill name: {0}")]
    UnknownName(String),

    #[error("invalid skill value: {0}")]
    InvalidIndex(f32),
}

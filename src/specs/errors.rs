use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpecError {
    #[error("branch {branch} does not end with a register layer")]
    MissingRegister { branch: usize },

    #[error("a complex network needs at least one branch")]
    EmptyBranches,
}

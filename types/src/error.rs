use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("unknown type: {0}")]
    UnknownType(String),

    #[error("duplicate type registration: {0}")]
    DuplicateRegistration(String),
}

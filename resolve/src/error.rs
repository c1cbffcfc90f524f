use std::fmt;

use thiserror::Error;
use types::TypeError;

/// Source location carried by compile-time errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Loc {
    pub line: u32,
    pub col: u32,
}

impl Loc {
    pub fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Compile-phase resolution errors. All of these halt compilation; none can
/// occur once a session is locked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("unknown library: {0}")]
    UnknownLibrary(String),

    #[error("duplicate registration: {0}")]
    DuplicateRegistration(String),

    #[error("{at}: call target is not a function: {found}")]
    NotCallable { at: Loc, found: String },

    #[error("{at}: arity mismatch: expected {expected} arguments, found {found}")]
    ArityMismatch {
        at: Loc,
        expected: usize,
        found: usize,
    },

    #[error("{at}: type mismatch at argument {index}: expected {expected}, found {found}")]
    TypeMismatch {
        at: Loc,
        index: usize,
        expected: String,
        found: String,
    },

    #[error(transparent)]
    Type(#[from] TypeError),
}

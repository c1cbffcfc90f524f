use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// The value store has no room left for a new call frame.
    #[error("value store overflow")]
    StackOverflow,

    /// Domain-level failure raised by a native implementation. Unwinds the
    /// current execution only, never the hosting process.
    #[error("native call failed: {0}")]
    NativeCallFailure(String),

    /// A slot held a different kind than the compiled register layout
    /// promised. Reaching this at run time indicates a compiler defect, not
    /// a user error.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),
}

use thiserror::Error;

/// Errors raised while parsing markup or resolving values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No grammar rule matched the remaining markup.
    #[error("invalid param(s): {remainder}")]
    Syntax { remainder: String },

    /// A token matched a rule's outer shape but its payload is malformed.
    #[error("malformed {what} literal: {token}")]
    Literal { token: String, what: &'static str },

    /// A variable's value was read before a context was attached.
    #[error("no context attached")]
    NoContext,

    /// A context was attached to an already-bound container or variable.
    #[error("context already attached")]
    ContextAttached,
}

//! Error types for the transform.

/// Fatal error raised while generating bindings for a module.
///
/// Any variant aborts generation for the whole module; no partial output
/// is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    /// A class selected for codec generation has a field with no declared
    /// type. There is nothing sensible to decode into, so the module is
    /// rejected outright.
    #[error("field '{field}' on class '{class}' must have an explicit type declaration")]
    MissingFieldType {
        /// Name of the offending class.
        class: String,
        /// Name of the untyped field.
        field: String,
    },
}

/// Error reported by a host collaborator (reparse, file write, type check).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct HostError {
    /// Human-readable failure description.
    pub message: String,
}

impl HostError {
    /// Create a host error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error raised by the end-to-end transform pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    /// Generation failed for a module.
    #[error(transparent)]
    Generation(#[from] TransformError),

    /// A host operation (reparse or file write) failed.
    #[error("host failed to {action} '{path}': {source}")]
    Host {
        /// What the host was asked to do ("reparse" or "write").
        action: &'static str,
        /// The path involved.
        path: String,
        /// The underlying host error.
        #[source]
        source: HostError,
    },

    /// The downstream type checker rejected the program.
    #[error("type check failed: {0}")]
    TypeCheck(#[source] HostError),
}

use crate::constants::CONLLU_MIN_FIELDS;

/// Error type returned by thai-annotate public APIs.
#[derive(Debug, thiserror::Error)]
pub enum AnnotateError {
    /// User-provided arguments were invalid.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A collaborator returned output that breaks its documented contract.
    #[error("collaborator contract violated: {0}")]
    Contract(String),
    /// A dependency-parse record had fewer columns than CoNLL-U requires.
    #[error(
        "expected at least {min} fields in dependency record, found {found}",
        min = CONLLU_MIN_FIELDS
    )]
    DependencyFields {
        /// Number of fields actually present in the record.
        found: usize,
    },
    /// A collaborator (tokenizer, tagger, parser, vector loader) failed.
    #[error("{stage} failed: {message}")]
    Collaborator {
        /// Pipeline stage that called the collaborator.
        stage: &'static str,
        /// Failure description reported by the collaborator.
        message: String,
    },
    /// Pipeline configuration could not be applied.
    #[error("configuration error: {0}")]
    Config(String),
}

impl AnnotateError {
    /// Wraps a collaborator failure for the given stage.
    pub fn collaborator(stage: &'static str, message: impl Into<String>) -> Self {
        AnnotateError::Collaborator {
            stage,
            message: message.into(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AnnotateError>;

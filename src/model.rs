use serde::{Deserialize, Serialize};

use crate::constants::{BIO_BEGIN_PREFIX, BIO_OUTSIDE};

/// Surface text paired with the BIO tag a named-entity tagger assigned to it.
///
/// Only `B-<label>` and `O` are interpreted; every other tag, including
/// `I-<label>`, continues whatever entity is currently open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BioToken {
    /// Surface text as it appears in the tagged input.
    pub text: String,
    /// BIO tag.
    pub tag: String,
}

impl BioToken {
    /// Creates a tagged token.
    pub fn new(text: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tag: tag.into(),
        }
    }

    /// Label carried by a `B-` tag, if this token begins an entity.
    pub fn begin_label(&self) -> Option<&str> {
        self.tag.strip_prefix(BIO_BEGIN_PREFIX)
    }

    /// Whether the token is tagged outside any entity.
    pub fn is_outside(&self) -> bool {
        self.tag == BIO_OUTSIDE
    }
}

impl<S, T> From<(S, T)> for BioToken
where
    S: Into<String>,
    T: Into<String>,
{
    fn from((text, tag): (S, T)) -> Self {
        Self::new(text, tag)
    }
}

/// Labeled entity over a half-open character range `[start, end)`.
///
/// Offsets use Rust `str.chars()` indexing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntitySpan {
    /// Inclusive begin offset.
    pub start: usize,
    /// Exclusive end offset.
    pub end: usize,
    /// Entity label without the BIO prefix.
    pub label: String,
}

impl EntitySpan {
    /// Creates a span.
    pub fn new(start: usize, end: usize, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }

    /// Number of characters covered.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers no characters.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

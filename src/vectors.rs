use std::collections::HashMap;

use tracing::debug;

use crate::error::{AnnotateError, Result};

/// Raw output of a word-vector loader: fixed width plus `(word, vector)` rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordVectors {
    /// Number of components in every vector.
    pub width: usize,
    /// Vectors in loader order.
    pub entries: Vec<(String, Vec<f32>)>,
}

impl WordVectors {
    /// Creates an empty set with the given width.
    pub fn new(width: usize) -> Self {
        Self {
            width,
            entries: Vec::new(),
        }
    }

    /// Appends one vector.
    pub fn push(mut self, word: impl Into<String>, vector: Vec<f32>) -> Self {
        self.entries.push((word.into(), vector));
        self
    }
}

/// Vocabulary vector table populated once from a [`WordVectors`] load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VectorTable {
    width: usize,
    vectors: HashMap<String, Vec<f32>>,
}

impl VectorTable {
    /// Builds a table, rejecting vectors whose length differs from the declared width.
    pub fn from_vectors(vectors: WordVectors) -> Result<Self> {
        if vectors.width == 0 && !vectors.entries.is_empty() {
            return Err(AnnotateError::Contract(
                "word vectors declared width 0".to_string(),
            ));
        }

        let width = vectors.width;
        let mut table = HashMap::with_capacity(vectors.entries.len());
        for (word, vector) in vectors.entries {
            if vector.len() != width {
                return Err(AnnotateError::Contract(format!(
                    "vector for {word:?} has width {}, expected {width}",
                    vector.len()
                )));
            }
            table.insert(word, vector);
        }
        debug!(width, words = table.len(), "loaded word vectors");
        Ok(Self {
            width,
            vectors: table,
        })
    }

    /// Vector width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of words with a vector.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether no vectors are loaded.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Looks up the vector for `word`.
    pub fn get(&self, word: &str) -> Option<&[f32]> {
        self.vectors.get(word).map(Vec::as_slice)
    }

    /// Whether `word` has a vector.
    pub fn contains(&self, word: &str) -> bool {
        self.vectors.contains_key(word)
    }
}

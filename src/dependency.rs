//! CoNLL-U dependency records and document reconstruction.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::constants::CONLLU_MIN_FIELDS;
use crate::error::{AnnotateError, Result};
use crate::types::{Document, Token};

/// One CoNLL-U row, keeping the first ten columns.
///
/// Columns beyond the tenth are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRecord {
    /// Token index (column 1), as written by the parser.
    pub index: String,
    /// Surface form.
    pub word: String,
    /// Lemma.
    pub lemma: String,
    /// Universal POS tag.
    pub upos: String,
    /// Language-specific POS tag.
    pub xpos: String,
    /// Morphological features.
    pub feats: String,
    /// Head index, parsed from column 7.
    pub head: usize,
    /// Dependency relation to the head.
    pub deprel: String,
    /// Enhanced dependency graph.
    pub deps: String,
    /// Miscellaneous column; `_` means the token is followed by a space.
    pub misc: String,
}

impl DependencyRecord {
    /// Builds a record from raw columns.
    ///
    /// Fails with [`AnnotateError::DependencyFields`] when fewer than ten
    /// columns are present.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<Self> {
        if fields.len() < CONLLU_MIN_FIELDS {
            return Err(AnnotateError::DependencyFields {
                found: fields.len(),
            });
        }
        let column = |index: usize| fields[index].as_ref().to_string();
        let head = fields[6].as_ref().trim().parse::<usize>().map_err(|error| {
            AnnotateError::Contract(format!(
                "dependency head {:?} is not a non-negative integer: {error}",
                fields[6].as_ref()
            ))
        })?;

        Ok(Self {
            index: column(0),
            word: column(1),
            lemma: column(2),
            upos: column(3),
            xpos: column(4),
            feats: column(5),
            head,
            deprel: column(7),
            deps: column(8),
            misc: column(9),
        })
    }

    /// Whether the token is followed by a space in the rebuilt text.
    pub fn space_after(&self) -> bool {
        self.misc == "_"
    }
}

/// Rebuilds a document from parser rows: words, spacing, POS, lemma, head and relation.
pub fn document_from_records(records: &[DependencyRecord]) -> Document {
    let tokens = records
        .iter()
        .map(|record| {
            let mut token = Token::new(record.word.as_str(), record.space_after());
            token.pos = Some(record.upos.clone());
            token.lemma = Some(record.lemma.clone());
            token.dep = Some(record.deprel.clone());
            token.head = Some(record.head);
            token
        })
        .collect();
    Document::from_tokens(tokens)
}

fn word_line_id() -> &'static Regex {
    static ID: OnceLock<Regex> = OnceLock::new();
    ID.get_or_init(|| Regex::new(r"^[1-9][0-9]*$").expect("static regex is valid"))
}

/// Splits CoNLL-U text into rows of columns.
///
/// Comment lines, blank lines, multiword ranges (`1-2`) and empty nodes
/// (`1.1`) are skipped. Rows are not validated here; pass them through
/// [`DependencyRecord::from_fields`].
pub fn parse_conllu(text: &str) -> Vec<Vec<String>> {
    let mut skipped = 0usize;
    let rows: Vec<Vec<String>> = text
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let fields: Vec<String> = line.split('\t').map(str::to_string).collect();
            if word_line_id().is_match(&fields[0]) {
                Some(fields)
            } else {
                skipped += 1;
                None
            }
        })
        .collect();
    if skipped > 0 {
        debug!(skipped, "skipped CoNLL-U multiword ranges and empty nodes");
    }
    rows
}

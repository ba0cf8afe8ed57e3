#![deny(missing_docs)]

//! Merge the output of Thai analyzers onto an existing token stream.
//!
//! Sentence segmenters, taggers and parsers each see the text their own way.
//! This crate maps their results back onto a [`Document`] whose tokens were
//! produced elsewhere:
//!
//! - sentence spans become per-token sentence-start flags
//!   ([`align_sentence_starts`]);
//! - BIO tag sequences become labeled character spans
//!   ([`build_entity_spans`]) that are then contracted onto whole tokens;
//! - CoNLL-U parses rebuild the document with POS, head and relation labels.
//!
//! ## Quick Start
//! ```
//! use thai_annotate::{build_entity_spans, BioToken, EntitySpan};
//!
//! let tagged = vec![
//!     BioToken::new("แมว", "B-ANIMAL"),
//!     BioToken::new("กิน", "O"),
//!     BioToken::new("ปลา", "B-FOOD"),
//! ];
//! let spans = build_entity_spans(&tagged);
//! assert_eq!(spans, vec![EntitySpan::new(0, 3, "ANIMAL"), EntitySpan::new(6, 9, "FOOD")]);
//! ```
//!
//! ## Pipelines
//! [`ThaiPipeline`] drives the analyzers given in [`Annotators`] according to
//! a [`PipelineConfig`], and [`SentenceSplitter`] only assigns sentence
//! starts. Both implement [`Component`], so a host can keep them in its own
//! ordered list and run them with [`process_all`].
//!
//! ## Offset Rules
//! Offsets are character indices (based on `str.chars()`), not byte indices.
//!
//! ## Environment Variables
//! [`PipelineConfig::from_env`] reads engine and model overrides from
//! `THAI_ANNOTATE_TOKENIZE_ENGINE`, `THAI_ANNOTATE_SENT_ENGINE`,
//! `THAI_ANNOTATE_POS_ENGINE`, `THAI_ANNOTATE_POS_CORPUS`,
//! `THAI_ANNOTATE_NER_ENGINE`, `THAI_ANNOTATE_DEPENDENCY_ENGINE`,
//! `THAI_ANNOTATE_DEPENDENCY_MODEL` and `THAI_ANNOTATE_WORD_VECTOR_MODEL`.

mod align;
mod annotator;
mod constants;
mod dependency;
mod entity;
mod error;
mod model;
mod offsets;
mod runtime;
mod types;
mod vectors;

pub use align::{align_sentence_starts, sentence_starts_from_stream, split_marker_tokens};
pub use annotator::{
    Annotators, DependencyParser, NerTagger, PosTagger, SentenceSegmenter, WordTokenizer,
    WordVectorSource,
};
pub use constants::*;
pub use dependency::{document_from_records, parse_conllu, DependencyRecord};
pub use entity::build_entity_spans;
pub use error::{AnnotateError, Result};
pub use model::{BioToken, EntitySpan};
pub use offsets::char_len;
pub use runtime::{process_all, Component, SentenceSplitter, ThaiPipeline};
pub use types::{Document, PipelineConfig, Token};
pub use vectors::{VectorTable, WordVectors};

#[cfg(test)]
mod test_support;
#[cfg(test)]
mod tests;

//! Contracts for the external analyzers the pipeline drives.
//!
//! Every collaborator is a synchronous black box selected by an engine name.
//! Closures with the matching signature implement the traits directly, which
//! keeps host glue code short.

use crate::error::Result;
use crate::vectors::WordVectors;

/// Splits text into word tokens.
///
/// The output must partition `text` once whitespace tokens are counted.
pub trait WordTokenizer: Send + Sync {
    /// Tokenizes `text` with the named engine.
    fn tokenize(&self, text: &str, engine: &str) -> Result<Vec<String>>;
}

/// Splits text into sentences whose concatenation equals the input.
pub trait SentenceSegmenter: Send + Sync {
    /// Segments `text` with the named engine.
    fn segment(&self, text: &str, engine: &str) -> Result<Vec<String>>;
}

/// Assigns one part-of-speech tag per input token.
pub trait PosTagger: Send + Sync {
    /// Returns `(token, tag)` pairs in input order.
    fn tag(&self, tokens: &[String], engine: &str, corpus: &str) -> Result<Vec<(String, String)>>;
}

/// Produces BIO-tagged surface substrings covering the text left to right.
pub trait NerTagger: Send + Sync {
    /// Returns `(surface, tag)` pairs in text order.
    fn tag(&self, text: &str, engine: &str) -> Result<Vec<(String, String)>>;
}

/// Produces CoNLL-U rows for a text.
pub trait DependencyParser: Send + Sync {
    /// Returns one row of columns per word.
    fn parse(&self, text: &str, engine: &str, model: Option<&str>) -> Result<Vec<Vec<String>>>;
}

/// Loads a pretrained word-vector model by name.
pub trait WordVectorSource: Send + Sync {
    /// Loads every vector of `model`.
    fn load(&self, model: &str) -> Result<WordVectors>;
}

impl<F> WordTokenizer for F
where
    F: Fn(&str, &str) -> Result<Vec<String>> + Send + Sync,
{
    fn tokenize(&self, text: &str, engine: &str) -> Result<Vec<String>> {
        self(text, engine)
    }
}

impl<F> SentenceSegmenter for F
where
    F: Fn(&str, &str) -> Result<Vec<String>> + Send + Sync,
{
    fn segment(&self, text: &str, engine: &str) -> Result<Vec<String>> {
        self(text, engine)
    }
}

impl<F> PosTagger for F
where
    F: Fn(&[String], &str, &str) -> Result<Vec<(String, String)>> + Send + Sync,
{
    fn tag(&self, tokens: &[String], engine: &str, corpus: &str) -> Result<Vec<(String, String)>> {
        self(tokens, engine, corpus)
    }
}

impl<F> NerTagger for F
where
    F: Fn(&str, &str) -> Result<Vec<(String, String)>> + Send + Sync,
{
    fn tag(&self, text: &str, engine: &str) -> Result<Vec<(String, String)>> {
        self(text, engine)
    }
}

impl<F> DependencyParser for F
where
    F: Fn(&str, &str, Option<&str>) -> Result<Vec<Vec<String>>> + Send + Sync,
{
    fn parse(&self, text: &str, engine: &str, model: Option<&str>) -> Result<Vec<Vec<String>>> {
        self(text, engine, model)
    }
}

impl<F> WordVectorSource for F
where
    F: Fn(&str) -> Result<WordVectors> + Send + Sync,
{
    fn load(&self, model: &str) -> Result<WordVectors> {
        self(model)
    }
}

/// Set of collaborators handed to a pipeline.
///
/// Only the collaborators of enabled stages are required.
#[derive(Default)]
pub struct Annotators {
    pub(crate) tokenizer: Option<Box<dyn WordTokenizer>>,
    pub(crate) segmenter: Option<Box<dyn SentenceSegmenter>>,
    pub(crate) pos_tagger: Option<Box<dyn PosTagger>>,
    pub(crate) ner_tagger: Option<Box<dyn NerTagger>>,
    pub(crate) parser: Option<Box<dyn DependencyParser>>,
    pub(crate) vectors: Option<Box<dyn WordVectorSource>>,
}

impl Annotators {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the word tokenizer.
    pub fn with_tokenizer(mut self, tokenizer: impl WordTokenizer + 'static) -> Self {
        self.tokenizer = Some(Box::new(tokenizer));
        self
    }

    /// Sets the sentence segmenter.
    pub fn with_segmenter(mut self, segmenter: impl SentenceSegmenter + 'static) -> Self {
        self.segmenter = Some(Box::new(segmenter));
        self
    }

    /// Sets the part-of-speech tagger.
    pub fn with_pos_tagger(mut self, tagger: impl PosTagger + 'static) -> Self {
        self.pos_tagger = Some(Box::new(tagger));
        self
    }

    /// Sets the named-entity tagger.
    pub fn with_ner_tagger(mut self, tagger: impl NerTagger + 'static) -> Self {
        self.ner_tagger = Some(Box::new(tagger));
        self
    }

    /// Sets the dependency parser.
    pub fn with_parser(mut self, parser: impl DependencyParser + 'static) -> Self {
        self.parser = Some(Box::new(parser));
        self
    }

    /// Sets the word-vector source.
    pub fn with_vectors(mut self, source: impl WordVectorSource + 'static) -> Self {
        self.vectors = Some(Box::new(source));
        self
    }
}

impl std::fmt::Debug for Annotators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Annotators")
            .field("tokenizer", &self.tokenizer.is_some())
            .field("segmenter", &self.segmenter.is_some())
            .field("pos_tagger", &self.pos_tagger.is_some())
            .field("ner_tagger", &self.ner_tagger.is_some())
            .field("parser", &self.parser.is_some())
            .field("vectors", &self.vectors.is_some())
            .finish()
    }
}

use std::env;
use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{
    DEFAULT_DEPENDENCY_ENGINE, DEFAULT_NER_ENGINE, DEFAULT_POS_CORPUS, DEFAULT_POS_ENGINE,
    DEFAULT_SENT_ENGINE, DEFAULT_TOKENIZE_ENGINE, DEFAULT_WORD_VECTOR_MODEL,
    ENV_DEPENDENCY_ENGINE, ENV_DEPENDENCY_MODEL, ENV_NER_ENGINE, ENV_POS_CORPUS, ENV_POS_ENGINE,
    ENV_SENT_ENGINE, ENV_TOKENIZE_ENGINE, ENV_WORD_VECTOR_MODEL,
};
use crate::error::{AnnotateError, Result};
use crate::model::EntitySpan;
use crate::offsets::{char_len, contract_to_tokens, token_char_offsets};

/// One token of a host document plus the annotations stages write onto it.
///
/// `whitespace` marks a single space following the token in the document text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Surface text.
    pub text: String,
    /// Whether one space follows the token.
    pub whitespace: bool,
    /// Sentence-start flag; `None` until a stage assigns it.
    pub is_sent_start: Option<bool>,
    /// Part-of-speech tag.
    pub pos: Option<String>,
    /// Lemma from a dependency parse.
    pub lemma: Option<String>,
    /// Dependency relation to the head.
    pub dep: Option<String>,
    /// Head index as written by the parser.
    pub head: Option<usize>,
}

impl Token {
    /// Creates an unannotated token.
    pub fn new(text: impl Into<String>, whitespace: bool) -> Self {
        Self {
            text: text.into(),
            whitespace,
            is_sent_start: None,
            pos: None,
            lemma: None,
            dep: None,
            head: None,
        }
    }

    /// Length of the text in characters.
    pub fn len(&self) -> usize {
        char_len(&self.text)
    }

    /// Whether the text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Text followed by its trailing space, if any.
    pub fn text_with_ws(&self) -> String {
        if self.whitespace {
            format!("{} ", self.text)
        } else {
            self.text.clone()
        }
    }
}

/// Ordered tokens and entity spans of one text.
///
/// The text is derived from the tokens; it is never stored separately, so
/// token offsets and text can not drift apart. Annotation methods consume the
/// document and return the updated one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    tokens: Vec<Token>,
    ents: Vec<EntitySpan>,
}

impl Document {
    /// Wraps tokens in a document with no entities.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            ents: Vec::new(),
        }
    }

    /// Builds a document from parallel word and trailing-space lists.
    pub fn from_words<S: AsRef<str>>(words: &[S], spaces: &[bool]) -> Result<Self> {
        if words.len() != spaces.len() {
            return Err(AnnotateError::InvalidArgument(format!(
                "words and spaces must have the same length ({} != {})",
                words.len(),
                spaces.len()
            )));
        }
        let tokens = words
            .iter()
            .zip(spaces)
            .map(|(word, &space)| Token::new(word.as_ref(), space))
            .collect();
        Ok(Self::from_tokens(tokens))
    }

    /// Tokens in document order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Consumes the document, returning its tokens.
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the document has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Document text rebuilt from tokens and whitespace flags.
    pub fn text(&self) -> String {
        self.tokens.iter().map(Token::text_with_ws).collect()
    }

    /// Length of [`Document::text`] in characters.
    pub fn char_len(&self) -> usize {
        self.tokens
            .iter()
            .map(|token| token.len() + usize::from(token.whitespace))
            .sum()
    }

    /// `(start, end)` character offsets of every token.
    pub fn token_offsets(&self) -> Vec<(usize, usize)> {
        token_char_offsets(
            self.tokens
                .iter()
                .map(|token| (token.text.as_str(), token.whitespace)),
        )
    }

    /// Entity spans in document order.
    pub fn ents(&self) -> &[EntitySpan] {
        &self.ents
    }

    /// Text covered by `span`.
    pub fn entity_text(&self, span: &EntitySpan) -> String {
        self.text()
            .chars()
            .skip(span.start)
            .take(span.len())
            .collect()
    }

    /// Whether any token after the first carries an explicit sentence flag.
    pub fn is_sentenced(&self) -> bool {
        if self.tokens.len() < 2 {
            return true;
        }
        self.tokens[1..]
            .iter()
            .any(|token| token.is_sent_start.is_some())
    }

    /// Token ranges of the sentences; an unsentenced document is one sentence.
    pub fn sentences(&self) -> Vec<Range<usize>> {
        let mut sentences = Vec::new();
        let mut start = 0;
        for (index, token) in self.tokens.iter().enumerate().skip(1) {
            if token.is_sent_start == Some(true) {
                sentences.push(start..index);
                start = index;
            }
        }
        if start < self.tokens.len() {
            sentences.push(start..self.tokens.len());
        }
        sentences
    }

    /// Text of each sentence, trailing whitespace included.
    pub fn sentence_texts(&self) -> Vec<String> {
        self.sentences()
            .into_iter()
            .map(|range| self.tokens[range].iter().map(Token::text_with_ws).collect())
            .collect()
    }

    /// Sets one sentence-start flag per token.
    pub fn with_sentence_starts(mut self, flags: Vec<bool>) -> Result<Self> {
        self.ensure_token_count("sentence flags", flags.len())?;
        for (token, flag) in self.tokens.iter_mut().zip(flags) {
            token.is_sent_start = Some(flag);
        }
        Ok(self)
    }

    /// Sets one POS tag per token.
    pub fn with_pos(mut self, tags: Vec<String>) -> Result<Self> {
        self.ensure_token_count("POS tags", tags.len())?;
        for (token, tag) in self.tokens.iter_mut().zip(tags) {
            token.pos = Some(tag);
        }
        Ok(self)
    }

    /// Replaces the entities; spans must be non-empty, ordered, disjoint and in bounds.
    pub fn with_ents(mut self, ents: Vec<EntitySpan>) -> Result<Self> {
        let total = self.char_len();
        let mut previous_end = 0;
        for span in &ents {
            if span.start >= span.end || span.end > total || span.start < previous_end {
                return Err(AnnotateError::InvalidArgument(format!(
                    "entity span [{}, {}) is empty, out of bounds or overlapping",
                    span.start, span.end
                )));
            }
            previous_end = span.end;
        }
        self.ents = ents;
        Ok(self)
    }

    /// Maps raw character spans onto whole tokens, shrinking each span inward.
    ///
    /// Spans that cover no complete token are dropped.
    pub fn contract_entity_spans(&self, spans: Vec<EntitySpan>) -> Vec<EntitySpan> {
        let offsets = self.token_offsets();
        let requested = spans.len();
        let contracted: Vec<EntitySpan> = spans
            .into_iter()
            .filter_map(|span| {
                let covered = contract_to_tokens(&offsets, span.start, span.end)?;
                let (start, _) = offsets[covered.start];
                let (_, end) = offsets[covered.end - 1];
                Some(EntitySpan::new(start, end, span.label))
            })
            .collect();
        if contracted.len() < requested {
            debug!(
                requested,
                kept = contracted.len(),
                "dropped entity spans that do not cover a whole token"
            );
        }
        contracted
    }

    fn ensure_token_count(&self, what: &str, count: usize) -> Result<()> {
        if count != self.tokens.len() {
            return Err(AnnotateError::Contract(format!(
                "{what} count {count} does not match token count {}",
                self.tokens.len()
            )));
        }
        Ok(())
    }
}

/// Stage toggles and engine names for [`crate::ThaiPipeline`].
///
/// Missing fields take their default when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Retokenize the document text.
    pub tokenize: bool,
    /// Tokenizer engine, also used for sentence realignment.
    pub tokenize_engine: String,
    /// Assign sentence starts.
    pub sent: bool,
    /// Sentence segmentation engine.
    pub sent_engine: String,
    /// Assign part-of-speech tags.
    pub pos: bool,
    /// POS tagging engine.
    pub pos_engine: String,
    /// POS tag set corpus.
    pub pos_corpus: String,
    /// Assign named entities.
    pub ner: bool,
    /// NER engine.
    pub ner_engine: String,
    /// Rebuild the document from a dependency parse; skips tokenize and sent.
    pub dependency_parsing: bool,
    /// Dependency parsing engine.
    pub dependency_parsing_engine: String,
    /// Optional model for the dependency engine.
    pub dependency_parsing_model: Option<String>,
    /// Load word vectors at construction.
    pub word_vector: bool,
    /// Word-vector model name.
    pub word_vector_model: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tokenize: false,
            tokenize_engine: DEFAULT_TOKENIZE_ENGINE.to_string(),
            sent: true,
            sent_engine: DEFAULT_SENT_ENGINE.to_string(),
            pos: true,
            pos_engine: DEFAULT_POS_ENGINE.to_string(),
            pos_corpus: DEFAULT_POS_CORPUS.to_string(),
            ner: true,
            ner_engine: DEFAULT_NER_ENGINE.to_string(),
            dependency_parsing: false,
            dependency_parsing_engine: DEFAULT_DEPENDENCY_ENGINE.to_string(),
            dependency_parsing_model: None,
            word_vector: true,
            word_vector_model: DEFAULT_WORD_VECTOR_MODEL.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Defaults overlaid with the `THAI_ANNOTATE_*` environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        let overrides: [(&str, &mut String); 7] = [
            (ENV_TOKENIZE_ENGINE, &mut config.tokenize_engine),
            (ENV_SENT_ENGINE, &mut config.sent_engine),
            (ENV_POS_ENGINE, &mut config.pos_engine),
            (ENV_POS_CORPUS, &mut config.pos_corpus),
            (ENV_NER_ENGINE, &mut config.ner_engine),
            (ENV_DEPENDENCY_ENGINE, &mut config.dependency_parsing_engine),
            (ENV_WORD_VECTOR_MODEL, &mut config.word_vector_model),
        ];
        for (key, slot) in overrides {
            if let Some(value) = env_value(key) {
                *slot = value;
            }
        }
        if let Some(model) = env_value(ENV_DEPENDENCY_MODEL) {
            config.dependency_parsing_model = Some(model);
        }
        config
    }

    /// Enables or disables the `tokenize` stage.
    pub fn with_tokenize(mut self, enabled: bool) -> Self {
        self.tokenize = enabled;
        self
    }

    /// Sets `tokenize_engine`.
    pub fn with_tokenize_engine(mut self, engine: impl Into<String>) -> Self {
        self.tokenize_engine = engine.into();
        self
    }

    /// Enables or disables the `sent` stage.
    pub fn with_sent(mut self, enabled: bool) -> Self {
        self.sent = enabled;
        self
    }

    /// Sets `sent_engine`.
    pub fn with_sent_engine(mut self, engine: impl Into<String>) -> Self {
        self.sent_engine = engine.into();
        self
    }

    /// Enables or disables the `pos` stage.
    pub fn with_pos(mut self, enabled: bool) -> Self {
        self.pos = enabled;
        self
    }

    /// Sets `pos_engine`.
    pub fn with_pos_engine(mut self, engine: impl Into<String>) -> Self {
        self.pos_engine = engine.into();
        self
    }

    /// Sets `pos_corpus`.
    pub fn with_pos_corpus(mut self, corpus: impl Into<String>) -> Self {
        self.pos_corpus = corpus.into();
        self
    }

    /// Enables or disables the `ner` stage.
    pub fn with_ner(mut self, enabled: bool) -> Self {
        self.ner = enabled;
        self
    }

    /// Sets `ner_engine`.
    pub fn with_ner_engine(mut self, engine: impl Into<String>) -> Self {
        self.ner_engine = engine.into();
        self
    }

    /// Enables or disables the `dependency_parsing` stage.
    pub fn with_dependency_parsing(mut self, enabled: bool) -> Self {
        self.dependency_parsing = enabled;
        self
    }

    /// Sets `dependency_parsing_engine`.
    pub fn with_dependency_parsing_engine(mut self, engine: impl Into<String>) -> Self {
        self.dependency_parsing_engine = engine.into();
        self
    }

    /// Sets `dependency_parsing_model`.
    pub fn with_dependency_parsing_model(mut self, model: impl Into<String>) -> Self {
        self.dependency_parsing_model = Some(model.into());
        self
    }

    /// Enables or disables the `word_vector` stage.
    pub fn with_word_vector(mut self, enabled: bool) -> Self {
        self.word_vector = enabled;
        self
    }

    /// Sets `word_vector_model`.
    pub fn with_word_vector_model(mut self, model: impl Into<String>) -> Self {
        self.word_vector_model = model.into();
        self
    }

    /// Disables every stage; useful as a base for enabling single stages.
    pub fn disabled() -> Self {
        Self {
            tokenize: false,
            sent: false,
            pos: false,
            ner: false,
            dependency_parsing: false,
            word_vector: false,
            ..Self::default()
        }
    }

    /// Whether the tokenize stage runs; dependency parsing switches it off.
    pub(crate) fn runs_tokenize(&self) -> bool {
        self.tokenize && !self.dependency_parsing
    }

    /// Whether the sentence stage runs; dependency parsing switches it off.
    pub(crate) fn runs_sent(&self) -> bool {
        self.sent && !self.dependency_parsing
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let engines = [
            (self.runs_tokenize(), "tokenize_engine", &self.tokenize_engine),
            (self.runs_sent(), "sent_engine", &self.sent_engine),
            (self.pos, "pos_engine", &self.pos_engine),
            (self.pos, "pos_corpus", &self.pos_corpus),
            (self.ner, "ner_engine", &self.ner_engine),
            (
                self.dependency_parsing,
                "dependency_parsing_engine",
                &self.dependency_parsing_engine,
            ),
            (self.word_vector, "word_vector_model", &self.word_vector_model),
        ];
        for (enabled, name, value) in engines {
            if enabled && value.trim().is_empty() {
                return Err(AnnotateError::Config(format!(
                    "{name} must not be empty when its stage is enabled"
                )));
            }
        }
        Ok(())
    }
}

fn env_value(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

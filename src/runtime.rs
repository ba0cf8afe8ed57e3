use tracing::debug;

use crate::align::align_sentence_starts;
use crate::annotator::{Annotators, SentenceSegmenter, WordTokenizer};
use crate::constants::{
    DEFAULT_SENT_ENGINE, DEFAULT_TOKENIZE_ENGINE, SLOT_DOC_ENTS, SLOT_TOKEN_DEP, SLOT_TOKEN_HEAD,
    SLOT_TOKEN_POS, SLOT_TOKEN_SENT_START,
};
use crate::dependency::{document_from_records, DependencyRecord};
use crate::entity::build_entity_spans;
use crate::error::{AnnotateError, Result};
use crate::model::BioToken;
use crate::types::{Document, PipelineConfig, Token};
use crate::vectors::VectorTable;

/// A document-processing step the host registers in its own pipeline.
pub trait Component: Send + Sync {
    /// Name the host registers the component under.
    fn name(&self) -> &str;

    /// Annotation slots this component writes.
    fn assigns(&self) -> &'static [&'static str];

    /// Consumes a document and returns the annotated document.
    fn process(&self, doc: Document) -> Result<Document>;
}

/// Runs `components` in order over `doc`.
pub fn process_all(components: &[&dyn Component], doc: Document) -> Result<Document> {
    components
        .iter()
        .try_fold(doc, |doc, component| component.process(doc))
}

/// Full Thai annotation component: dependency parsing, tokenization, sentence
/// boundaries, part-of-speech tags and named entities.
///
/// Stages run in that order. An enabled dependency stage rebuilds the
/// document from the parse and skips tokenization and sentence segmentation
/// for that call.
///
/// # Examples
/// ```no_run
/// use thai_annotate::{Annotators, Component, Document, PipelineConfig, ThaiPipeline};
///
/// # fn words(text: &str, _engine: &str) -> thai_annotate::Result<Vec<String>> {
/// #     Ok(text.split(' ').map(str::to_string).collect())
/// # }
/// # fn main() -> thai_annotate::Result<()> {
/// let config = PipelineConfig::disabled().with_tokenize(true);
/// let pipeline = ThaiPipeline::new(config, Annotators::new().with_tokenizer(words))?;
/// let doc = pipeline.process(Document::from_words(&["ผมกินข้าว"], &[false])?)?;
/// assert!(!doc.is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ThaiPipeline {
    config: PipelineConfig,
    annotators: Annotators,
    vectors: Option<VectorTable>,
}

impl ThaiPipeline {
    /// Validates `config` against the supplied collaborators and loads word
    /// vectors when enabled.
    pub fn new(config: PipelineConfig, annotators: Annotators) -> Result<Self> {
        config.validate()?;

        let required = [
            (
                config.runs_tokenize() || config.runs_sent(),
                annotators.tokenizer.is_some(),
                "tokenizer",
            ),
            (
                config.runs_sent(),
                annotators.segmenter.is_some(),
                "sentence segmenter",
            ),
            (config.pos, annotators.pos_tagger.is_some(), "POS tagger"),
            (config.ner, annotators.ner_tagger.is_some(), "NER tagger"),
            (
                config.dependency_parsing,
                annotators.parser.is_some(),
                "dependency parser",
            ),
            (
                config.word_vector,
                annotators.vectors.is_some(),
                "word-vector source",
            ),
        ];
        for (enabled, present, what) in required {
            if enabled && !present {
                return Err(AnnotateError::Config(format!(
                    "{what} is required by the enabled stages but was not provided"
                )));
            }
        }

        let vectors = match (&annotators.vectors, config.word_vector) {
            (Some(source), true) => {
                let loaded = source.load(&config.word_vector_model)?;
                Some(VectorTable::from_vectors(loaded)?)
            }
            _ => None,
        };

        Ok(Self {
            config,
            annotators,
            vectors,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Word vectors loaded at construction, if the stage is enabled.
    pub fn vectors(&self) -> Option<&VectorTable> {
        self.vectors.as_ref()
    }

    fn tokenizer(&self) -> Result<&dyn WordTokenizer> {
        self.annotators
            .tokenizer
            .as_deref()
            .ok_or_else(|| AnnotateError::Config("no tokenizer configured".to_string()))
    }

    fn parse_dependencies(&self, doc: Document) -> Result<Document> {
        let parser = self
            .annotators
            .parser
            .as_deref()
            .ok_or_else(|| AnnotateError::Config("no dependency parser configured".to_string()))?;
        let rows = parser.parse(
            &doc.text(),
            &self.config.dependency_parsing_engine,
            self.config.dependency_parsing_model.as_deref(),
        )?;
        let records = rows
            .iter()
            .map(|fields| DependencyRecord::from_fields(fields))
            .collect::<Result<Vec<_>>>()?;
        debug!(records = records.len(), "rebuilt document from dependency parse");
        Ok(document_from_records(&records))
    }

    fn tokenize(&self, doc: Document) -> Result<Document> {
        let words = self
            .tokenizer()?
            .tokenize(&doc.text(), &self.config.tokenize_engine)?;
        debug!(tokens = words.len(), "retokenized document");
        Ok(Document::from_tokens(
            words
                .into_iter()
                .map(|word| Token::new(word, false))
                .collect(),
        ))
    }

    fn segment_sentences(&self, doc: Document) -> Result<Document> {
        let segmenter = self
            .annotators
            .segmenter
            .as_deref()
            .ok_or_else(|| AnnotateError::Config("no sentence segmenter configured".to_string()))?;
        assign_sentence_starts(
            doc,
            segmenter,
            self.tokenizer()?,
            &self.config.sent_engine,
            &self.config.tokenize_engine,
        )
    }

    fn tag_pos(&self, doc: Document) -> Result<Document> {
        let tagger = self
            .annotators
            .pos_tagger
            .as_deref()
            .ok_or_else(|| AnnotateError::Config("no POS tagger configured".to_string()))?;

        let mut tags = Vec::with_capacity(doc.len());
        for sentence in doc.sentences() {
            let words: Vec<String> = doc.tokens()[sentence]
                .iter()
                .map(|token| token.text.clone())
                .collect();
            let tagged = tagger.tag(&words, &self.config.pos_engine, &self.config.pos_corpus)?;
            if tagged.len() != words.len() {
                return Err(AnnotateError::Contract(format!(
                    "POS tagger returned {} tags for {} tokens",
                    tagged.len(),
                    words.len()
                )));
            }
            tags.extend(tagged.into_iter().map(|(_, tag)| tag));
        }
        doc.with_pos(tags)
    }

    fn tag_entities(&self, doc: Document) -> Result<Document> {
        let tagger = self
            .annotators
            .ner_tagger
            .as_deref()
            .ok_or_else(|| AnnotateError::Config("no NER tagger configured".to_string()))?;

        let mut tagged = Vec::new();
        for text in doc.sentence_texts() {
            tagged.extend(
                tagger
                    .tag(&text, &self.config.ner_engine)?
                    .into_iter()
                    .map(BioToken::from),
            );
        }
        let spans = build_entity_spans(&tagged);
        let ents = doc.contract_entity_spans(spans);
        debug!(entities = ents.len(), "assigned entities");
        doc.with_ents(ents)
    }
}

impl Component for ThaiPipeline {
    fn name(&self) -> &str {
        "thai_annotate"
    }

    fn assigns(&self) -> &'static [&'static str] {
        &[
            SLOT_TOKEN_POS,
            SLOT_TOKEN_SENT_START,
            SLOT_DOC_ENTS,
            SLOT_TOKEN_DEP,
            SLOT_TOKEN_HEAD,
        ]
    }

    fn process(&self, doc: Document) -> Result<Document> {
        let mut doc = doc;
        if self.config.dependency_parsing {
            doc = self.parse_dependencies(doc)?;
        }
        if self.config.runs_tokenize() {
            doc = self.tokenize(doc)?;
        }
        if self.config.runs_sent() {
            doc = self.segment_sentences(doc)?;
        }
        if self.config.pos {
            doc = self.tag_pos(doc)?;
        }
        if self.config.ner {
            doc = self.tag_entities(doc)?;
        }
        Ok(doc)
    }
}

/// Sentence-only component: assigns sentence starts and nothing else.
pub struct SentenceSplitter {
    segmenter: Box<dyn SentenceSegmenter>,
    tokenizer: Box<dyn WordTokenizer>,
    engine: String,
    tokenize_engine: String,
}

impl SentenceSplitter {
    /// Creates a splitter with the default sentence and tokenizer engines.
    pub fn new(
        segmenter: impl SentenceSegmenter + 'static,
        tokenizer: impl WordTokenizer + 'static,
    ) -> Self {
        Self {
            segmenter: Box::new(segmenter),
            tokenizer: Box::new(tokenizer),
            engine: DEFAULT_SENT_ENGINE.to_string(),
            tokenize_engine: DEFAULT_TOKENIZE_ENGINE.to_string(),
        }
    }

    /// Sets the sentence segmentation engine.
    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = engine.into();
        self
    }

    /// Sets the tokenizer engine used for realignment.
    pub fn with_tokenize_engine(mut self, engine: impl Into<String>) -> Self {
        self.tokenize_engine = engine.into();
        self
    }

    /// Active sentence engine.
    pub fn engine(&self) -> &str {
        &self.engine
    }
}

impl std::fmt::Debug for SentenceSplitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceSplitter")
            .field("engine", &self.engine)
            .field("tokenize_engine", &self.tokenize_engine)
            .finish()
    }
}

impl Component for SentenceSplitter {
    fn name(&self) -> &str {
        "thai_sents"
    }

    fn assigns(&self) -> &'static [&'static str] {
        &[SLOT_TOKEN_SENT_START]
    }

    fn process(&self, doc: Document) -> Result<Document> {
        assign_sentence_starts(
            doc,
            self.segmenter.as_ref(),
            self.tokenizer.as_ref(),
            &self.engine,
            &self.tokenize_engine,
        )
    }
}

fn assign_sentence_starts(
    doc: Document,
    segmenter: &dyn SentenceSegmenter,
    tokenizer: &dyn WordTokenizer,
    sent_engine: &str,
    tokenize_engine: &str,
) -> Result<Document> {
    if doc.is_empty() {
        return Ok(doc);
    }
    let sentences = segmenter.segment(&doc.text(), sent_engine)?;
    let flags = align_sentence_starts(doc.tokens(), &sentences, |text| {
        tokenizer.tokenize(text, tokenize_engine)
    })?;
    debug!(sentences = sentences.len(), tokens = flags.len(), "assigned sentence starts");
    doc.with_sentence_starts(flags)
}

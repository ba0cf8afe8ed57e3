use crate::test_support::{
    with_env_vars, GazetteerNerTagger, LexiconTokenizer, SpaceSegmenter, TablePosTagger,
};
use crate::{
    AnnotateError, Annotators, Component, Document, EntitySpan, PipelineConfig, Result,
    SentenceSplitter, ThaiPipeline, WordVectors, DEFAULT_NER_ENGINE, DEFAULT_POS_CORPUS,
    DEFAULT_SENT_ENGINE, DEFAULT_WORD_VECTOR_MODEL, ENV_DEPENDENCY_MODEL, ENV_NER_ENGINE,
    ENV_SENT_ENGINE,
};

const LEXICON: [&str; 5] = ["ผม", "กิน", "ข้าว", "แล้ว", "นอน"];

fn lexicon() -> LexiconTokenizer {
    LexiconTokenizer::new(LEXICON)
}

fn pos_table() -> TablePosTagger {
    TablePosTagger::new(&[
        ("ผม", "PRON"),
        ("กิน", "VERB"),
        ("ข้าว", "NOUN"),
        ("แล้ว", "ADV"),
        ("นอน", "VERB"),
    ])
}

fn raw_document(text: &str) -> Document {
    Document::from_words(&[text], &[false]).expect("single word document")
}

fn failing_tokenizer(_text: &str, _engine: &str) -> Result<Vec<String>> {
    Err(AnnotateError::collaborator("tokenize", "must not be called"))
}

fn failing_segmenter(_text: &str, _engine: &str) -> Result<Vec<String>> {
    Err(AnnotateError::collaborator("sent", "must not be called"))
}

fn two_word_parse(_text: &str, engine: &str, model: Option<&str>) -> Result<Vec<Vec<String>>> {
    assert_eq!(engine, "esupar");
    assert_eq!(model, None);
    Ok(vec![
        ["1", "ฉัน", "ฉัน", "PRON", "PRON", "_", "1", "nsubj", "_", "SpaceAfter=No"]
            .iter()
            .map(|field| field.to_string())
            .collect(),
        ["2", "ชอบ", "ชอบ", "VERB", "VERB", "_", "0", "root", "_", "SpaceAfter=No", "extra"]
            .iter()
            .map(|field| field.to_string())
            .collect(),
    ])
}

fn short_parse(_text: &str, _engine: &str, _model: Option<&str>) -> Result<Vec<Vec<String>>> {
    Ok(vec![["1", "ฉัน", "ฉัน", "PRON", "PRON", "_", "2", "nsubj", "_"]
        .iter()
        .map(|field| field.to_string())
        .collect()])
}

fn cat_vectors(model: &str) -> Result<WordVectors> {
    assert_eq!(model, DEFAULT_WORD_VECTOR_MODEL);
    Ok(WordVectors::new(2)
        .push("แมว", vec![1.0, 0.0])
        .push("ปลา", vec![0.0, 1.0]))
}

fn broken_ner(_text: &str, _engine: &str) -> Result<Vec<(String, String)>> {
    Err(AnnotateError::collaborator("ner", "model not loaded"))
}

fn short_pos(tokens: &[String], _engine: &str, _corpus: &str) -> Result<Vec<(String, String)>> {
    Ok(tokens
        .iter()
        .skip(1)
        .map(|token| (token.clone(), "X".to_string()))
        .collect())
}

#[test]
fn pipeline_config_default_matches_upstream_defaults() {
    let config = PipelineConfig::default();
    assert!(!config.tokenize);
    assert!(config.sent);
    assert!(config.pos);
    assert!(config.ner);
    assert!(!config.dependency_parsing);
    assert!(config.word_vector);
    assert_eq!(config.sent_engine, DEFAULT_SENT_ENGINE);
    assert_eq!(config.pos_corpus, DEFAULT_POS_CORPUS);
    assert_eq!(config.ner_engine, DEFAULT_NER_ENGINE);
    assert_eq!(config.dependency_parsing_model, None);
}

#[test]
fn pipeline_config_from_env_overrides_engines() {
    with_env_vars(
        &[
            (ENV_SENT_ENGINE, "whitespace+newline"),
            (ENV_NER_ENGINE, "wangchanberta"),
            (ENV_DEPENDENCY_MODEL, "th_ud"),
        ],
        || {
            let config = PipelineConfig::from_env();
            assert_eq!(config.sent_engine, "whitespace+newline");
            assert_eq!(config.ner_engine, "wangchanberta");
            assert_eq!(config.dependency_parsing_model.as_deref(), Some("th_ud"));
            assert_eq!(config.pos_corpus, DEFAULT_POS_CORPUS);
        },
    );
}

#[test]
fn pipeline_config_blank_env_value_is_ignored() {
    with_env_vars(&[(ENV_NER_ENGINE, "  ")], || {
        assert_eq!(PipelineConfig::from_env().ner_engine, DEFAULT_NER_ENGINE);
    });
}

#[test]
fn pipeline_config_deserializes_partial_json() {
    let config: PipelineConfig =
        serde_json::from_str(r#"{"tokenize": true, "pos_engine": "unigram"}"#)
            .expect("partial config is valid");
    assert!(config.tokenize);
    assert_eq!(config.pos_engine, "unigram");
    assert_eq!(config.ner_engine, DEFAULT_NER_ENGINE);
}

#[test]
fn empty_engine_for_enabled_stage_is_rejected() {
    let config = PipelineConfig::disabled()
        .with_tokenize(true)
        .with_tokenize_engine(" ");
    let error = ThaiPipeline::new(config, Annotators::new().with_tokenizer(lexicon()))
        .expect_err("blank engine must fail");
    assert!(matches!(error, AnnotateError::Config(_)));
}

#[test]
fn missing_collaborator_is_a_config_error() {
    let error = ThaiPipeline::new(PipelineConfig::default(), Annotators::new())
        .expect_err("default config needs collaborators");
    assert!(matches!(error, AnnotateError::Config(_)));
    assert!(error.to_string().contains("tokenizer"));
}

#[test]
fn full_pipeline_assigns_sentences_pos_and_entities() {
    let config = PipelineConfig::default()
        .with_tokenize(true)
        .with_word_vector(false);
    let annotators = Annotators::new()
        .with_tokenizer(lexicon())
        .with_segmenter(SpaceSegmenter)
        .with_pos_tagger(pos_table())
        .with_ner_tagger(GazetteerNerTagger::new(&LEXICON, &[("ข้าว", "FOOD")]));
    let pipeline = ThaiPipeline::new(config, annotators).expect("pipeline builds");

    let doc = pipeline
        .process(raw_document("ผมกินข้าว แล้วนอน"))
        .expect("pipeline runs");

    let words: Vec<&str> = doc.tokens().iter().map(|token| token.text.as_str()).collect();
    assert_eq!(words, vec!["ผม", "กิน", "ข้าว", " ", "แล้ว", "นอน"]);
    assert_eq!(doc.text(), "ผมกินข้าว แล้วนอน");

    let starts: Vec<Option<bool>> = doc.tokens().iter().map(|token| token.is_sent_start).collect();
    assert_eq!(
        starts,
        vec![
            Some(true),
            Some(false),
            Some(false),
            Some(false),
            Some(true),
            Some(false)
        ]
    );
    assert_eq!(doc.sentences(), vec![0..4, 4..6]);

    let tags: Vec<&str> = doc
        .tokens()
        .iter()
        .map(|token| token.pos.as_deref().unwrap_or(""))
        .collect();
    assert_eq!(tags, vec!["PRON", "VERB", "NOUN", "X", "ADV", "VERB"]);

    assert_eq!(doc.ents(), &[EntitySpan::new(5, 9, "FOOD")]);
    assert_eq!(doc.entity_text(&doc.ents()[0]), "ข้าว");
}

#[test]
fn dependency_parsing_rebuilds_document_and_skips_tokenize_and_sent() {
    let config = PipelineConfig::disabled()
        .with_tokenize(true)
        .with_sent(true)
        .with_dependency_parsing(true);
    let annotators = Annotators::new()
        .with_tokenizer(failing_tokenizer)
        .with_segmenter(failing_segmenter)
        .with_parser(two_word_parse);
    let pipeline = ThaiPipeline::new(config, annotators).expect("pipeline builds");

    let doc = pipeline
        .process(raw_document("ฉันชอบ"))
        .expect("tokenize and sent stages are skipped");
    assert_eq!(doc.len(), 2);
    assert_eq!(doc.text(), "ฉันชอบ");
    assert_eq!(doc.tokens()[0].pos.as_deref(), Some("PRON"));
    assert_eq!(doc.tokens()[0].dep.as_deref(), Some("nsubj"));
    assert_eq!(doc.tokens()[1].dep.as_deref(), Some("root"));
    assert_eq!(doc.tokens()[1].head, Some(0));

    // The suppression applies per call; the configuration is untouched.
    assert!(pipeline.config().tokenize);
    assert!(pipeline.config().sent);
}

#[test]
fn dependency_parsing_pipeline_builds_without_tokenizer_or_segmenter() {
    let config = PipelineConfig::default()
        .with_dependency_parsing(true)
        .with_word_vector(false)
        .with_sent_engine("");
    assert!(config.sent);
    let annotators = Annotators::new()
        .with_parser(two_word_parse)
        .with_pos_tagger(pos_table())
        .with_ner_tagger(GazetteerNerTagger::new(&LEXICON, &[("ข้าว", "FOOD")]));
    let pipeline = ThaiPipeline::new(config, annotators).expect("parser covers tokens and sentences");

    let doc = pipeline.process(raw_document("ฉันชอบ")).expect("pipeline runs");
    assert_eq!(doc.len(), 2);
    assert_eq!(doc.tokens()[1].dep.as_deref(), Some("root"));
    assert_eq!(doc.tokens()[0].pos.as_deref(), Some("X"));
    assert!(doc.ents().is_empty());
}

#[test]
fn short_dependency_record_fails_the_call() {
    let config = PipelineConfig::disabled().with_dependency_parsing(true);
    let pipeline = ThaiPipeline::new(config, Annotators::new().with_parser(short_parse))
        .expect("pipeline builds");

    let error = pipeline
        .process(raw_document("ฉัน"))
        .expect_err("nine fields must fail");
    assert!(matches!(error, AnnotateError::DependencyFields { found: 9 }));
    assert!(error.to_string().contains("10 fields"));
}

#[test]
fn word_vectors_load_once_at_construction() {
    let config = PipelineConfig::disabled().with_word_vector(true);
    let pipeline = ThaiPipeline::new(config, Annotators::new().with_vectors(cat_vectors))
        .expect("vectors load");

    let vectors = pipeline.vectors().expect("vectors enabled");
    assert_eq!(vectors.width(), 2);
    assert_eq!(vectors.get("ปลา"), Some(&[0.0, 1.0][..]));
}

#[test]
fn collaborator_errors_propagate_unchanged() {
    let config = PipelineConfig::disabled().with_ner(true);
    let pipeline = ThaiPipeline::new(config, Annotators::new().with_ner_tagger(broken_ner))
        .expect("pipeline builds");

    let error = pipeline
        .process(raw_document("ผม"))
        .expect_err("ner failure propagates");
    assert_eq!(error.to_string(), "ner failed: model not loaded");
}

#[test]
fn pos_tag_count_mismatch_is_a_contract_error() {
    let config = PipelineConfig::disabled().with_pos(true);
    let pipeline = ThaiPipeline::new(config, Annotators::new().with_pos_tagger(short_pos))
        .expect("pipeline builds");

    let doc = Document::from_words(&["ผม", "กิน"], &[false, false]).expect("valid words");
    let error = pipeline.process(doc).expect_err("short output must fail");
    assert!(matches!(error, AnnotateError::Contract(_)));
}

#[test]
fn sentence_splitter_only_assigns_sentence_starts() {
    let splitter = SentenceSplitter::new(SpaceSegmenter, lexicon());
    assert_eq!(splitter.engine(), DEFAULT_SENT_ENGINE);
    assert_eq!(splitter.name(), "thai_sents");

    let doc = Document::from_words(
        &["ผม", "กิน", " ", "นอน"],
        &[false, false, false, false],
    )
    .expect("valid words");
    let doc = splitter.process(doc).expect("splitter runs");

    let starts: Vec<Option<bool>> = doc.tokens().iter().map(|token| token.is_sent_start).collect();
    assert_eq!(starts, vec![Some(true), Some(false), Some(false), Some(true)]);
    assert!(doc.tokens().iter().all(|token| token.pos.is_none()));
    assert!(doc.ents().is_empty());
}

#[test]
fn entity_spans_that_split_a_token_are_dropped() {
    let doc = Document::from_words(&["กรุงเทพ", "มหานคร"], &[false, false]).expect("valid words");
    let ents = doc.contract_entity_spans(vec![
        EntitySpan::new(0, 4, "LOCATION"),
        EntitySpan::new(2, 13, "LOCATION"),
    ]);
    assert_eq!(ents, vec![EntitySpan::new(7, 13, "LOCATION")]);
}

//! Default engine names, reserved markers and environment keys.

/// Sentinel inserted between sentences before retokenization.
///
/// A private-use code point, so it never collides with real Thai text.
pub const SENTENCE_MARKER: &str = "\u{E000}";

/// Minimum number of columns in a CoNLL-U dependency record.
pub const CONLLU_MIN_FIELDS: usize = 10;

/// BIO prefix opening an entity.
pub const BIO_BEGIN_PREFIX: &str = "B-";
/// BIO tag for tokens outside any entity.
pub const BIO_OUTSIDE: &str = "O";

/// Default word tokenizer engine.
pub const DEFAULT_TOKENIZE_ENGINE: &str = "newmm";
/// Default sentence segmentation engine.
pub const DEFAULT_SENT_ENGINE: &str = "crfcut";
/// Default part-of-speech engine.
pub const DEFAULT_POS_ENGINE: &str = "perceptron";
/// Default part-of-speech corpus.
pub const DEFAULT_POS_CORPUS: &str = "orchid_ud";
/// Default named-entity engine.
pub const DEFAULT_NER_ENGINE: &str = "thainer";
/// Default dependency parsing engine.
pub const DEFAULT_DEPENDENCY_ENGINE: &str = "esupar";
/// Default word-vector model.
pub const DEFAULT_WORD_VECTOR_MODEL: &str = "thai2fit_wv";

/// Environment key overriding the tokenizer engine.
pub const ENV_TOKENIZE_ENGINE: &str = "THAI_ANNOTATE_TOKENIZE_ENGINE";
/// Environment key overriding the sentence engine.
pub const ENV_SENT_ENGINE: &str = "THAI_ANNOTATE_SENT_ENGINE";
/// Environment key overriding the POS engine.
pub const ENV_POS_ENGINE: &str = "THAI_ANNOTATE_POS_ENGINE";
/// Environment key overriding the POS corpus.
pub const ENV_POS_CORPUS: &str = "THAI_ANNOTATE_POS_CORPUS";
/// Environment key overriding the NER engine.
pub const ENV_NER_ENGINE: &str = "THAI_ANNOTATE_NER_ENGINE";
/// Environment key overriding the dependency engine.
pub const ENV_DEPENDENCY_ENGINE: &str = "THAI_ANNOTATE_DEPENDENCY_ENGINE";
/// Environment key setting the dependency model.
pub const ENV_DEPENDENCY_MODEL: &str = "THAI_ANNOTATE_DEPENDENCY_MODEL";
/// Environment key overriding the word-vector model.
pub const ENV_WORD_VECTOR_MODEL: &str = "THAI_ANNOTATE_WORD_VECTOR_MODEL";

/// Slot names a component may declare as outputs.
pub const SLOT_TOKEN_POS: &str = "token.pos";
/// Sentence-start slot.
pub const SLOT_TOKEN_SENT_START: &str = "token.is_sent_start";
/// Entity slot.
pub const SLOT_DOC_ENTS: &str = "doc.ents";
/// Dependency label slot.
pub const SLOT_TOKEN_DEP: &str = "token.dep";
/// Head index slot.
pub const SLOT_TOKEN_HEAD: &str = "token.head";

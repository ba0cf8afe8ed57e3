use std::collections::HashMap;
use std::env;
use std::ffi::OsString;
use std::sync::{Mutex, OnceLock};

use crate::annotator::{NerTagger, PosTagger, SentenceSegmenter, WordTokenizer};
use crate::error::Result;

fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

fn set_env_var(key: &str, value: &str) {
    #[allow(unused_unsafe)]
    unsafe {
        env::set_var(key, value);
    }
}

fn restore_env_var(key: &str, value: Option<OsString>) {
    #[allow(unused_unsafe)]
    unsafe {
        match value {
            Some(value) => env::set_var(key, value),
            None => env::remove_var(key),
        }
    }
}

/// Runs a closure with overridden environment variables under a global lock.
pub(crate) fn with_env_vars<T>(overrides: &[(&str, &str)], f: impl FnOnce() -> T) -> T {
    let _guard = env_lock()
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let backups: Vec<(&str, Option<OsString>)> = overrides
        .iter()
        .map(|(key, _)| (*key, env::var_os(key)))
        .collect();

    for (key, value) in overrides {
        set_env_var(key, value);
    }

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));

    for (key, value) in backups.into_iter().rev() {
        restore_env_var(key, value);
    }

    match result {
        Ok(result) => result,
        Err(payload) => std::panic::resume_unwind(payload),
    }
}

/// Longest-match dictionary tokenizer; unknown characters become single tokens.
pub(crate) struct LexiconTokenizer {
    words: Vec<String>,
}

impl LexiconTokenizer {
    pub(crate) fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut words: Vec<String> = words.into_iter().map(Into::into).collect();
        words.sort_by_key(|word| std::cmp::Reverse(word.len()));
        Self { words }
    }

    pub(crate) fn split(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        let mut rest = text;
        while let Some(first) = rest.chars().next() {
            let len = self
                .words
                .iter()
                .find(|word| rest.starts_with(word.as_str()))
                .map_or(first.len_utf8(), |word| word.len());
            tokens.push(rest[..len].to_string());
            rest = &rest[len..];
        }
        tokens
    }
}

impl WordTokenizer for LexiconTokenizer {
    fn tokenize(&self, text: &str, _engine: &str) -> Result<Vec<String>> {
        Ok(self.split(text))
    }
}

/// Segments after every space.
pub(crate) struct SpaceSegmenter;

impl SentenceSegmenter for SpaceSegmenter {
    fn segment(&self, text: &str, _engine: &str) -> Result<Vec<String>> {
        Ok(text.split_inclusive(' ').map(str::to_string).collect())
    }
}

/// Tags from a fixed word table, `X` otherwise.
pub(crate) struct TablePosTagger {
    tags: HashMap<String, String>,
}

impl TablePosTagger {
    pub(crate) fn new(pairs: &[(&str, &str)]) -> Self {
        Self {
            tags: pairs
                .iter()
                .map(|(word, tag)| (word.to_string(), tag.to_string()))
                .collect(),
        }
    }
}

impl PosTagger for TablePosTagger {
    fn tag(&self, tokens: &[String], _engine: &str, _corpus: &str) -> Result<Vec<(String, String)>> {
        Ok(tokens
            .iter()
            .map(|token| {
                let tag = self.tags.get(token).cloned().unwrap_or_else(|| "X".to_string());
                (token.clone(), tag)
            })
            .collect())
    }
}

/// Tokenizes with a lexicon and tags gazetteer words `B-<label>`.
pub(crate) struct GazetteerNerTagger {
    tokenizer: LexiconTokenizer,
    labels: HashMap<String, String>,
}

impl GazetteerNerTagger {
    pub(crate) fn new(lexicon: &[&str], labels: &[(&str, &str)]) -> Self {
        Self {
            tokenizer: LexiconTokenizer::new(lexicon.iter().copied()),
            labels: labels
                .iter()
                .map(|(word, label)| (word.to_string(), label.to_string()))
                .collect(),
        }
    }
}

impl NerTagger for GazetteerNerTagger {
    fn tag(&self, text: &str, _engine: &str) -> Result<Vec<(String, String)>> {
        Ok(self
            .tokenizer
            .split(text)
            .into_iter()
            .map(|word| {
                let tag = match self.labels.get(&word) {
                    Some(label) => format!("B-{label}"),
                    None => "O".to_string(),
                };
                (word, tag)
            })
            .collect())
    }
}

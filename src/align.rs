//! Sentence-boundary realignment.
//!
//! A sentence segmenter returns text spans, but the document already has its
//! own tokens. The spans are joined with [`SENTENCE_MARKER`], retokenized, and
//! the marker positions in the new token stream are projected back onto the
//! document tokens as sentence-start flags.
//!
//! The projection assumes the retokenized stream lines up with the document
//! tokens once markers are removed, which holds when the same tokenizer built
//! both and the spans reconstruct the document text exactly. No integrity
//! check is performed; a mismatching partition desynchronizes silently.

use tracing::{debug, trace};

use crate::constants::SENTENCE_MARKER;
use crate::error::Result;
use crate::types::Token;

/// Splits markers fused onto the start or end of a token into their own elements.
///
/// A token like `"\u{E000}แล้ว"` becomes `["\u{E000}", "แล้ว"]`. A marker in the
/// middle of a token is left in place.
pub fn split_marker_tokens<I, S>(tokens: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut stream = Vec::new();
    for token in tokens {
        let mut rest = token.as_ref();

        while rest != SENTENCE_MARKER {
            match rest.strip_prefix(SENTENCE_MARKER) {
                Some(tail) => {
                    stream.push(SENTENCE_MARKER.to_string());
                    rest = tail;
                }
                None => break,
            }
        }

        let mut trailing = 0;
        while rest != SENTENCE_MARKER {
            match rest.strip_suffix(SENTENCE_MARKER) {
                Some(head) => {
                    trailing += 1;
                    rest = head;
                }
                None => break,
            }
        }

        if !rest.is_empty() {
            stream.push(rest.to_string());
        }
        stream.extend(std::iter::repeat(SENTENCE_MARKER.to_string()).take(trailing));
    }
    stream
}

/// Projects a marker-delimited stream onto `token_count` document tokens.
///
/// Element `i` maps to document token `i - markers_seen`. The first real
/// element and every element right after a marker start a sentence; all
/// other tokens are explicitly not sentence starts. Tokens the stream never
/// reaches are `false`.
pub fn sentence_starts_from_stream<S: AsRef<str>>(stream: &[S], token_count: usize) -> Vec<bool> {
    let mut flags = vec![false; token_count];
    let mut markers_seen = 0;
    let mut boundary_pending = false;
    let mut seen_first = false;
    let mut visited = 0;

    for (index, element) in stream.iter().enumerate() {
        // Only an exact marker is a boundary; an element with a marker inside
        // it is counted as an ordinary token.
        if element.as_ref() == SENTENCE_MARKER {
            boundary_pending = true;
            markers_seen += 1;
            continue;
        }

        let target = index - markers_seen;
        if target >= token_count {
            break;
        }
        if !seen_first || boundary_pending {
            flags[target] = true;
            seen_first = true;
            boundary_pending = false;
        } else {
            flags[target] = false;
        }
        visited = target + 1;
    }

    if visited < token_count {
        debug!(
            visited,
            token_count, "retokenized stream ended early; remaining tokens are not sentence starts"
        );
    }
    flags
}

/// Recomputes sentence-start flags for `tokens` from segmenter output.
///
/// `tokenize` must be the tokenizer that produced `tokens`.
pub fn align_sentence_starts<S, F>(tokens: &[Token], sentences: &[S], tokenize: F) -> Result<Vec<bool>>
where
    S: AsRef<str>,
    F: FnOnce(&str) -> Result<Vec<String>>,
{
    let joined = sentences
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(SENTENCE_MARKER);
    let retokenized = tokenize(&joined)?;
    let stream = split_marker_tokens(retokenized);
    trace!(
        sentences = sentences.len(),
        stream = stream.len(),
        tokens = tokens.len(),
        "aligning sentence boundaries"
    );
    Ok(sentence_starts_from_stream(&stream, tokens.len()))
}

//! BIO tag sequences to labeled character spans.

use tracing::trace;

use crate::model::{BioToken, EntitySpan};
use crate::offsets::char_len;

#[derive(Debug)]
struct OpenSpan {
    start: usize,
    end: Option<usize>,
    label: String,
}

/// Converts BIO-tagged tokens into entity spans over the concatenated token text.
///
/// Offsets are characters from the start of the first token. A span is closed
/// by the next `O`, the next `B-` tag, or the end of the sequence; when the
/// sequence ends with an entity open, the final token is folded into it
/// whatever its tag. A `B-` tag on the last token with nothing open yields a
/// span covering just that token.
pub fn build_entity_spans(tokens: &[BioToken]) -> Vec<EntitySpan> {
    let mut spans: Vec<OpenSpan> = Vec::new();
    let mut open_label: Option<String> = None;
    let mut cursor = 0;
    let last = tokens.len().saturating_sub(1);

    for (index, token) in tokens.iter().enumerate() {
        let len = char_len(&token.text);
        let is_last = index == last;

        match (is_last, open_label.is_some(), token.begin_label()) {
            (true, true, _) => {
                if let Some(span) = spans.last_mut() {
                    span.end = Some(cursor + len);
                }
            }
            (true, false, Some(label)) => {
                open_label = Some(label.to_string());
                spans.push(OpenSpan {
                    start: cursor,
                    end: Some(cursor + len),
                    label: label.to_string(),
                });
            }
            (false, false, Some(label)) => {
                open_label = Some(label.to_string());
                spans.push(OpenSpan {
                    start: cursor,
                    end: None,
                    label: label.to_string(),
                });
            }
            (false, true, Some(label)) => {
                if let Some(span) = spans.last_mut() {
                    span.end = Some(cursor);
                }
                open_label = Some(label.to_string());
                spans.push(OpenSpan {
                    start: cursor,
                    end: None,
                    label: label.to_string(),
                });
            }
            (false, true, None) if token.is_outside() => {
                if let Some(span) = spans.last_mut() {
                    span.end = Some(cursor);
                }
                open_label = None;
            }
            _ => {}
        }

        cursor += len;
    }

    trace!(tokens = tokens.len(), spans = spans.len(), "built entity spans");
    spans
        .into_iter()
        .filter_map(|span| {
            let end = span.end?;
            (span.start < end).then(|| EntitySpan::new(span.start, end, span.label))
        })
        .collect()
}

//! Character offset helpers shared by the aligners.
//!
//! All offsets in this crate are character indices (`str::chars()`), never
//! byte indices, matching how the upstream Thai analyzers count.

use std::ops::Range;

/// Length of `text` in characters.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Computes `(start, end)` character offsets for consecutive token texts.
///
/// `whitespace[i]` adds one trailing space after token `i`.
pub(crate) fn token_char_offsets<'a, I>(tokens: I) -> Vec<(usize, usize)>
where
    I: IntoIterator<Item = (&'a str, bool)>,
{
    let mut cursor = 0;
    tokens
        .into_iter()
        .map(|(text, whitespace)| {
            let start = cursor;
            let end = start + char_len(text);
            cursor = end + usize::from(whitespace);
            (start, end)
        })
        .collect()
}

/// Maps a character range onto the tokens lying entirely inside it.
///
/// The range is shrunk to the nearest token boundaries, never grown. Returns
/// the covered token index range, or `None` when no token fits.
pub(crate) fn contract_to_tokens(
    offsets: &[(usize, usize)],
    start: usize,
    end: usize,
) -> Option<Range<usize>> {
    if start >= end {
        return None;
    }

    let first = offsets
        .iter()
        .position(|&(token_start, _)| token_start >= start)?;
    let last = offsets
        .iter()
        .rposition(|&(_, token_end)| token_end <= end)?;

    if first > last {
        return None;
    }
    let (first_start, _) = offsets[first];
    let (_, last_end) = offsets[last];
    if first_start >= last_end {
        return None;
    }
    Some(first..last + 1)
}

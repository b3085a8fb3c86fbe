//! Quote location inside raw field text.
//!
//! Two-stage search: a cheap exact case-insensitive scan of the raw quote,
//! then a bounded window scan that compares normalized forms. The window
//! scan is quadratic over a small bounded window; quotes are short, so
//! this is acceptable and its semantics (ordered scan from the cursor,
//! normalized equality, first match wins) are fixed.

use crate::highlight::normalize::normalize;

/// Byte range of a located quote in the raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct QuoteMatch {
    pub start: usize,
    pub end: usize,
}

/// Locate `quote` in `text`, searching from byte offset `from`.
pub(crate) fn find_quote(text: &str, quote: &str, from: usize) -> Option<QuoteMatch> {
    find_case_insensitive(text, quote, from).or_else(|| bounded_scan(text, quote, from))
}

/// Exact search ignoring only letter case.
fn find_case_insensitive(text: &str, quote: &str, from: usize) -> Option<QuoteMatch> {
    if quote.is_empty() || from >= text.len() {
        return None;
    }

    let needle: Vec<char> = quote.chars().flat_map(char::to_lowercase).collect();
    let haystack: Vec<(usize, char)> = text[from..]
        .char_indices()
        .map(|(i, c)| (i + from, c))
        .collect();

    for start in 0..haystack.len() {
        let mut ni = 0;
        for &(idx, c) in &haystack[start..] {
            let mut mismatch = false;
            for lc in c.to_lowercase() {
                if ni >= needle.len() || lc != needle[ni] {
                    mismatch = true;
                    break;
                }
                ni += 1;
            }
            if mismatch {
                break;
            }
            if ni == needle.len() {
                return Some(QuoteMatch {
                    start: haystack[start].0,
                    end: idx + c.len_utf8(),
                });
            }
        }
    }

    None
}

/// Fallback: for each candidate start, try increasing window lengths up to
/// `len(normalized_quote) + 50` chars and accept the first window whose
/// normalized form equals the normalized quote.
fn bounded_scan(text: &str, quote: &str, from: usize) -> Option<QuoteMatch> {
    if from >= text.len() {
        return None;
    }

    let target = normalize(quote);
    if target.is_empty() {
        return None;
    }
    let max_window = target.chars().count() + 50;

    // Char boundaries of the searchable suffix, plus an end sentinel.
    let mut bounds: Vec<usize> = text[from..].char_indices().map(|(i, _)| i + from).collect();
    bounds.push(text.len());

    for start in 0..bounds.len() - 1 {
        // A window starting on whitespace would normalize it away and
        // silently widen the highlight; skip to the next boundary.
        if text[bounds[start]..]
            .chars()
            .next()
            .is_some_and(char::is_whitespace)
        {
            continue;
        }

        for width in 1..=max_window {
            if start + width >= bounds.len() {
                break;
            }
            let candidate = &text[bounds[start]..bounds[start + width]];
            if normalize(candidate) == target {
                return Some(QuoteMatch {
                    start: bounds[start],
                    end: bounds[start + width],
                });
            }
        }
    }

    None
}

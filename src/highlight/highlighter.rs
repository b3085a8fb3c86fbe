//! Evidence highlighting: interleave plain and highlighted segments.
//!
//! Takes a field's raw text and the result's highlighted issues and
//! produces display segments in left-to-right document order. Pure and
//! idempotent; the source text is sliced, never re-encoded.

use serde::Serialize;

use crate::domain::{HighlightIssue, Severity};
use crate::highlight::matcher::find_quote;
use crate::highlight::normalize::normalize;

/// One display segment of a moderated field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    /// Unremarkable text between evidence spans.
    Plain { text: String },
    /// An evidence span with its policy metadata.
    Highlight {
        text: String,
        policy: String,
        severity: Severity,
        reason: String,
    },
}

impl Segment {
    /// The raw text this segment covers.
    pub fn text(&self) -> &str {
        match self {
            Segment::Plain { text } => text,
            Segment::Highlight { text, .. } => text,
        }
    }
}

/// Split `text` into plain and highlighted segments for one field.
///
/// Issues are selected by tolerant field-name comparison, ordered by their
/// position in the normalized text, then located one by one with the
/// search cursor advancing past each match. Issues whose quote cannot be
/// located are silently dropped. If nothing matches, the whole text comes
/// back as a single plain segment.
pub fn highlight(text: &str, issues: &[HighlightIssue], field: &str) -> Vec<Segment> {
    let selected: Vec<&HighlightIssue> = issues
        .iter()
        .filter(|issue| field_matches(&issue.field, field))
        .collect();

    if selected.is_empty() {
        return vec![Segment::Plain {
            text: text.to_string(),
        }];
    }

    // Emit evidence in document order regardless of the order the model
    // listed it. Position is taken in the normalized text; quotes that do
    // not appear there sort last (they will be dropped below anyway).
    let normalized_text = normalize(text);
    let mut ordered: Vec<(usize, &HighlightIssue)> = selected
        .into_iter()
        .map(|issue| {
            let normalized_quote = normalize(&issue.quote);
            let position = if normalized_quote.is_empty() {
                usize::MAX
            } else {
                normalized_text.find(&normalized_quote).unwrap_or(usize::MAX)
            };
            (position, issue)
        })
        .collect();
    ordered.sort_by_key(|(position, _)| *position);

    let mut segments = Vec::new();
    let mut cursor = 0usize;

    for (_, issue) in ordered {
        let Some(m) = find_quote(text, &issue.quote, cursor) else {
            continue;
        };
        if m.start > cursor {
            segments.push(Segment::Plain {
                text: text[cursor..m.start].to_string(),
            });
        }
        segments.push(Segment::Highlight {
            text: text[m.start..m.end].to_string(),
            policy: issue.policy.clone(),
            severity: issue.severity,
            reason: issue.reason.clone(),
        });
        cursor = m.end;
    }

    if segments.is_empty() {
        return vec![Segment::Plain {
            text: text.to_string(),
        }];
    }

    if cursor < text.len() {
        segments.push(Segment::Plain {
            text: text[cursor..].to_string(),
        });
    }

    segments
}

/// Tolerant field-name comparison.
///
/// Case-insensitive bidirectional substring check after stripping
/// separators, so `plotSummary`, `plot_summary`, and `Plot Summary` all
/// refer to the same field.
fn field_matches(issue_field: &str, requested: &str) -> bool {
    let a = fold_field_name(issue_field);
    let b = fold_field_name(requested);
    if a.is_empty() || b.is_empty() {
        return a == b;
    }
    a.contains(&b) || b.contains(&a)
}

fn fold_field_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(*c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

//! Total parser for raw model responses.
//!
//! Converts an arbitrary string into a [`ParsedAiVerdict`] without ever
//! failing. Anything that cannot be understood collapses to the
//! conservative fallback: flagged for human review at neutral confidence.

use std::str::FromStr;

use serde_json::Value;

use crate::domain::{HighlightIssue, ParsedAiVerdict, PolicyCategory, Severity, Verdict};

const MISSING_REASONING: &str = "Model response did not include reasoning";

/// Parse a raw model response into a structurally valid verdict.
///
/// Extraction order:
/// 1. interior of a fenced ``` block (optionally tagged `json`), if present
/// 2. the substring from the first `{` to the last `}`
///
/// Field repair: invalid verdicts become `flagged`, non-numeric confidence
/// becomes 0.5 (numeric values are clamped into [0, 1]), comma-joined
/// categories are reduced to their first element, and missing reasoning
/// gets a placeholder. Unrecognized fields are kept in `extensions`.
pub fn parse_verdict(raw: &str) -> ParsedAiVerdict {
    let candidate = extract_fenced(raw).unwrap_or(raw);
    let candidate = match extract_braces(candidate) {
        Some(c) => c,
        None => {
            return ParsedAiVerdict::fallback(
                "Could not parse model response: no JSON object found",
            )
        }
    };

    let value: Value = match serde_json::from_str(candidate) {
        Ok(v) => v,
        Err(e) => {
            return ParsedAiVerdict::fallback(format!("Could not parse model response: {}", e))
        }
    };

    let mut map = match value {
        Value::Object(map) => map,
        _ => {
            return ParsedAiVerdict::fallback(
                "Could not parse model response: not a JSON object",
            )
        }
    };

    let verdict = map
        .remove("verdict")
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|s| Verdict::from_str(s).ok())
        .unwrap_or(Verdict::Flagged);

    let confidence = map
        .remove("confidence")
        .as_ref()
        .and_then(Value::as_f64)
        .map(|c| c.clamp(0.0, 1.0))
        .unwrap_or(0.5);

    let category = map
        .remove("category")
        .as_ref()
        .and_then(Value::as_str)
        .and_then(first_category);

    let policy_violated = map
        .remove("policyViolated")
        .or_else(|| map.remove("policy_violated"))
        .as_ref()
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string);

    let reasoning = map
        .remove("reasoning")
        .as_ref()
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| MISSING_REASONING.to_string());

    let highlighted_issues = map
        .remove("highlightedIssues")
        .or_else(|| map.remove("highlighted_issues"))
        .as_ref()
        .and_then(Value::as_array)
        .map(|entries| entries.iter().filter_map(parse_issue).collect())
        .unwrap_or_default();

    ParsedAiVerdict {
        verdict,
        category,
        confidence,
        policy_violated,
        reasoning,
        highlighted_issues,
        extensions: map,
    }
}

/// Interior of the first fenced ``` block, with an optional language tag
/// stripped from the opening line.
fn extract_fenced(raw: &str) -> Option<&str> {
    let open = raw.find("```")?;
    let after = &raw[open + 3..];
    let close = after.find("```")?;
    let inner = &after[..close];

    match inner.find('\n') {
        Some(nl) => {
            let tag = inner[..nl].trim();
            if tag.is_empty() || tag.eq_ignore_ascii_case("json") {
                Some(&inner[nl + 1..])
            } else {
                Some(inner)
            }
        }
        None => Some(inner),
    }
}

/// Substring from the first `{` to the last `}`, if both exist in order.
fn extract_braces(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end > start {
        Some(&raw[start..=end])
    } else {
        None
    }
}

/// Reduce a possibly comma-joined category list to its first recognized
/// element.
fn first_category(raw: &str) -> Option<PolicyCategory> {
    let first = raw.split(',').next()?.trim();
    PolicyCategory::from_str(first).ok()
}

/// Leniently parse one evidence entry. Entries without a field name and a
/// quote carry no usable evidence and are skipped.
fn parse_issue(value: &Value) -> Option<HighlightIssue> {
    let obj = value.as_object()?;
    let field = obj.get("field")?.as_str()?.to_string();
    let quote = obj.get("quote")?.as_str()?.to_string();

    let severity = obj
        .get("severity")
        .and_then(Value::as_str)
        .and_then(|s| Severity::from_str(s).ok())
        .unwrap_or(Severity::Medium);

    Some(HighlightIssue {
        field,
        quote,
        policy: obj
            .get("policy")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        severity,
        reason: obj
            .get("reason")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_object() {
        let parsed = parse_verdict(
            r#"{"verdict":"safe","category":null,"confidence":0.95,"policyViolated":null,"reasoning":"ok"}"#,
        );
        assert_eq!(parsed.verdict, Verdict::Safe);
        assert_eq!(parsed.confidence, 0.95);
        assert!(parsed.category.is_none());
        assert!(parsed.policy_violated.is_none());
        assert_eq!(parsed.reasoning, "ok");
    }

    #[test]
    fn test_fenced_block_extraction() {
        let raw = "Here is my answer:\n```json\n{\"verdict\":\"safe\",\"category\":null,\"confidence\":0.95,\"policyViolated\":null,\"reasoning\":\"ok\"}\n```";
        let parsed = parse_verdict(raw);
        assert_eq!(parsed.verdict, Verdict::Safe);
        assert_eq!(parsed.confidence, 0.95);
    }

    #[test]
    fn test_untagged_fence() {
        let raw = "```\n{\"verdict\":\"rejected\",\"confidence\":0.9}\n```";
        let parsed = parse_verdict(raw);
        assert_eq!(parsed.verdict, Verdict::Rejected);
        assert_eq!(parsed.confidence, 0.9);
    }

    #[test]
    fn test_prose_around_object() {
        let raw = "I looked at it carefully. {\"verdict\": \"flagged\", \"confidence\": 0.8} Hope that helps!";
        let parsed = parse_verdict(raw);
        assert_eq!(parsed.verdict, Verdict::Flagged);
        assert_eq!(parsed.confidence, 0.8);
    }

    #[test]
    fn test_plain_prose_falls_back() {
        let parsed = parse_verdict("I think this is fine.");
        assert_eq!(parsed.verdict, Verdict::Flagged);
        assert_eq!(parsed.confidence, 0.5);
        assert!(parsed.reasoning.contains("Could not parse"));
    }

    #[test]
    fn test_empty_string_falls_back() {
        let parsed = parse_verdict("");
        assert_eq!(parsed.verdict, Verdict::Flagged);
        assert_eq!(parsed.confidence, 0.5);
    }

    #[test]
    fn test_truncated_json_falls_back() {
        let parsed = parse_verdict("{\"verdict\": \"safe\", \"confi");
        assert_eq!(parsed.verdict, Verdict::Flagged);
        assert!(parsed.reasoning.contains("Could not parse"));
    }

    #[test]
    fn test_object_recovered_from_array_wrapper() {
        // Brace extraction digs the object out of surrounding brackets
        let parsed = parse_verdict("[{\"verdict\": \"safe\"}]");
        assert_eq!(parsed.verdict, Verdict::Safe);
    }

    #[test]
    fn test_invalid_verdict_defaults_to_flagged() {
        let parsed = parse_verdict("{\"verdict\": \"probably fine\", \"confidence\": 0.9}");
        assert_eq!(parsed.verdict, Verdict::Flagged);
    }

    #[test]
    fn test_wrong_typed_confidence_defaults() {
        let parsed = parse_verdict("{\"verdict\": \"safe\", \"confidence\": \"high\"}");
        assert_eq!(parsed.confidence, 0.5);
    }

    #[test]
    fn test_out_of_range_confidence_clamps() {
        let parsed = parse_verdict("{\"verdict\": \"rejected\", \"confidence\": 1.7}");
        assert_eq!(parsed.confidence, 1.0);

        let parsed = parse_verdict("{\"verdict\": \"rejected\", \"confidence\": -3}");
        assert_eq!(parsed.confidence, 0.0);
    }

    #[test]
    fn test_category_comma_list_reduced_to_first() {
        let parsed = parse_verdict("{\"verdict\": \"rejected\", \"category\": \"nsfw, illegal\"}");
        assert_eq!(parsed.category, Some(PolicyCategory::Nsfw));
    }

    #[test]
    fn test_unknown_category_becomes_none() {
        let parsed = parse_verdict("{\"verdict\": \"rejected\", \"category\": \"rudeness\"}");
        assert!(parsed.category.is_none());
    }

    #[test]
    fn test_missing_reasoning_gets_placeholder() {
        let parsed = parse_verdict("{\"verdict\": \"safe\"}");
        assert_eq!(parsed.reasoning, MISSING_REASONING);
    }

    #[test]
    fn test_highlighted_issues_parsed_leniently() {
        let raw = r#"{
            "verdict": "flagged",
            "confidence": 0.8,
            "highlightedIssues": [
                {"field": "body", "quote": "bad span", "policy": "No spam", "severity": "low", "reason": "promo"},
                {"field": "body"},
                {"quote": "orphan"},
                {"field": "title", "quote": "other", "severity": "not-a-severity"}
            ]
        }"#;
        let parsed = parse_verdict(raw);
        assert_eq!(parsed.highlighted_issues.len(), 2);
        assert_eq!(parsed.highlighted_issues[0].quote, "bad span");
        assert_eq!(parsed.highlighted_issues[0].severity, Severity::Low);
        // Unknown severity falls back to medium rather than dropping evidence
        assert_eq!(parsed.highlighted_issues[1].severity, Severity::Medium);
    }

    #[test]
    fn test_unrecognized_fields_kept_as_extensions() {
        let parsed =
            parse_verdict("{\"verdict\": \"safe\", \"confidence\": 1, \"modelNotes\": \"extra\"}");
        assert_eq!(
            parsed.extensions.get("modelNotes").and_then(|v| v.as_str()),
            Some("extra")
        );
    }

    #[test]
    fn test_totality_over_awkward_inputs() {
        for raw in [
            "}{",
            "{}",
            "null",
            "```json\n```",
            "``` incomplete fence {\"verdict\":\"safe\"}",
            "{\"verdict\": 3, \"confidence\": [0.5]}",
            "プレーンテキストの応答",
        ] {
            let parsed = parse_verdict(raw);
            assert!((0.0..=1.0).contains(&parsed.confidence), "input: {raw}");
        }
    }
}

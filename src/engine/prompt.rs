//! Prompt construction for the moderation model.
//!
//! Pure and deterministic: the same policy snapshot and content always
//! produce byte-identical prompts. Policies are enumerated in catalog
//! order, never re-sorted.

use crate::domain::{Content, Policy};

/// Markers delimiting the untrusted content inside the user prompt.
const CONTENT_BEGIN: &str = "<<<CONTENT>>>";
const CONTENT_END: &str = "<<<END CONTENT>>>";

/// A fully constructed prompt pair for one moderation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerationPrompt {
    /// System prompt: policy enumeration plus the response-format contract.
    pub system: String,
    /// User prompt: the content to judge, delimited by markers.
    pub user: String,
}

/// Build the prompt pair from a policy snapshot and content.
pub fn build_prompt(policies: &[Policy], content: &Content, context: Option<&str>) -> ModerationPrompt {
    ModerationPrompt {
        system: build_system_prompt(policies),
        user: build_user_prompt(content, context),
    }
}

fn build_system_prompt(policies: &[Policy]) -> String {
    let mut out = String::from(
        "You are a content moderation engine. Judge the submitted content \
         against the following policies and respond with your verdict.\n\n\
         POLICIES:\n",
    );

    for policy in policies {
        out.push_str(&format!(
            "- id: {}\n  title: {}\n  category: {}\n  severity: {}\n  description: {}\n",
            policy.id, policy.title, policy.category, policy.severity, policy.description
        ));
        if !policy.examples.is_empty() {
            out.push_str("  example violations:\n");
            for example in &policy.examples {
                out.push_str(&format!("    - {}\n", example));
            }
        }
    }

    out.push_str(
        "\nRESPONSE FORMAT:\n\
         Respond with strict JSON containing exactly these fields:\n\
         {\n\
         \x20 \"verdict\": \"safe\" | \"flagged\" | \"rejected\",\n\
         \x20 \"category\": <violated category name or null>,\n\
         \x20 \"confidence\": <number between 0 and 1>,\n\
         \x20 \"policyViolated\": <id of the violated policy or null>,\n\
         \x20 \"reasoning\": <short explanation>\n\
         }\n\
         You may additionally include a \"highlightedIssues\" array; each entry \
         quotes a problematic span verbatim from the content as \
         {\"field\", \"quote\", \"policy\", \"severity\", \"reason\"}.\n\
         Do not include any text outside the JSON object.\n",
    );

    out
}

fn build_user_prompt(content: &Content, context: Option<&str>) -> String {
    let mut out = String::new();

    if let Some(context) = context {
        out.push_str("Context: ");
        out.push_str(context);
        out.push_str("\n\n");
    }

    out.push_str("Moderate the following content:\n");
    out.push_str(CONTENT_BEGIN);
    out.push('\n');
    out.push_str(&content.as_prompt_text());
    out.push('\n');
    out.push_str(CONTENT_END);

    out
}

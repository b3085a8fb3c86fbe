//! Request-related domain types.
//!
//! Represents one piece of user-generated content submitted for moderation.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of content being moderated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Comment,
    Post,
    Review,
    Profile,
    Message,
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentType::Comment => write!(f, "comment"),
            ContentType::Post => write!(f, "post"),
            ContentType::Review => write!(f, "review"),
            ContentType::Profile => write!(f, "profile"),
            ContentType::Message => write!(f, "message"),
        }
    }
}

/// The content payload: either free text or a map of named fields.
///
/// Field order is stable (sorted by name) so prompt construction is
/// reproducible for identical input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    Fields(BTreeMap<String, String>),
}

impl Content {
    /// Flatten the content into prompt text.
    ///
    /// Field maps render as one `name: value` line per field.
    pub fn as_prompt_text(&self) -> String {
        match self {
            Content::Text(text) => text.clone(),
            Content::Fields(fields) => {
                let mut out = String::new();
                for (name, value) in fields {
                    out.push_str(name);
                    out.push_str(": ");
                    out.push_str(value);
                    out.push('\n');
                }
                out
            }
        }
    }

    /// Look up the raw text of a named field.
    ///
    /// Plain-text content answers any field name; the whole body is the
    /// only field there is.
    pub fn field_text(&self, field: &str) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text.as_str()),
            Content::Fields(fields) => fields.get(field).map(|s| s.as_str()),
        }
    }
}

/// One piece of content submitted for a moderation decision.
///
/// Created per invocation; the request itself is not persisted, but its
/// metadata travels with the result into the persistence record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationRequest {
    /// Identifier of the content in the caller's system.
    pub content_id: String,

    /// ID of the user who authored the content.
    pub user_id: String,

    /// The content to judge.
    pub content: Content,

    /// Kind of content.
    pub content_type: ContentType,

    /// Optional free-form context for the model (e.g. the thread the
    /// comment appeared in).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// When this request was created.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl ModerationRequest {
    /// Create a new request for plain-text content.
    pub fn text(
        content_id: impl Into<String>,
        user_id: impl Into<String>,
        text: impl Into<String>,
        content_type: ContentType,
    ) -> Self {
        Self {
            content_id: content_id.into(),
            user_id: user_id.into(),
            content: Content::Text(text.into()),
            content_type,
            context: None,
            created_at: Utc::now(),
        }
    }

    /// Create a new request for structured field content.
    pub fn fields(
        content_id: impl Into<String>,
        user_id: impl Into<String>,
        fields: BTreeMap<String, String>,
        content_type: ContentType,
    ) -> Self {
        Self {
            content_id: content_id.into(),
            user_id: user_id.into(),
            content: Content::Fields(fields),
            content_type,
            context: None,
            created_at: Utc::now(),
        }
    }

    /// Attach surrounding context for the model.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_content_prompt() {
        let content = Content::Text("hello world".to_string());
        assert_eq!(content.as_prompt_text(), "hello world");
        assert_eq!(content.field_text("anything"), Some("hello world"));
    }

    #[test]
    fn test_field_content_prompt_is_ordered() {
        let mut fields = BTreeMap::new();
        fields.insert("title".to_string(), "My movie".to_string());
        fields.insert("body".to_string(), "A review".to_string());
        let content = Content::Fields(fields);

        // BTreeMap iterates sorted by key
        assert_eq!(content.as_prompt_text(), "body: A review\ntitle: My movie\n");
        assert_eq!(content.field_text("title"), Some("My movie"));
        assert_eq!(content.field_text("missing"), None);
    }

    #[test]
    fn test_content_type_serialization() {
        let json = serde_json::to_string(&ContentType::Review).unwrap();
        assert_eq!(json, "\"review\"");
    }
}

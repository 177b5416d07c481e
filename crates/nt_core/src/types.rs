use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::validation::{self, ValidationError};

/// Opaque article identifier, assigned by the storage layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(Uuid);

impl ArticleId {
    /// Mint a fresh random identifier. Only storage backends should call this.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for ArticleId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// An article payload as decoded from the wire, before any rule is checked.
///
/// Missing fields decode to their empty value so that the validator, not the
/// decoder, reports them. A client-supplied `id` is accepted and ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ArticleId>,
    pub author: String,
    pub title: String,
    pub summary: String,
    pub created_at: String,
    pub source: String,
    pub tags: Vec<String>,
}

impl ArticleDraft {
    pub fn validate(&self) -> Result<ValidArticle, ValidationError> {
        validation::check(self)
    }
}

/// Article fields that passed validation. Only [`ArticleDraft::validate`]
/// produces one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidArticle {
    author: String,
    title: String,
    summary: String,
    created_at: DateTime<FixedOffset>,
    source: String,
    tags: Vec<String>,
}

impl ValidArticle {
    pub(crate) fn new(
        author: String,
        title: String,
        summary: String,
        created_at: DateTime<FixedOffset>,
        source: String,
        tags: Vec<String>,
    ) -> Self {
        Self { author, title, summary, created_at, source, tags }
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn created_at(&self) -> DateTime<FixedOffset> {
        self.created_at
    }

    /// The source URL exactly as the client sent it
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Attach a storage-assigned id, producing the stored record.
    pub fn into_article(self, id: ArticleId) -> Article {
        Article {
            id,
            author: self.author,
            title: self.title,
            summary: self.summary,
            created_at: self.created_at,
            source: self.source,
            tags: self.tags,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub author: String,
    pub title: String,
    pub summary: String,
    pub created_at: DateTime<FixedOffset>,
    pub source: String,
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_id_text_form() {
        let id: ArticleId = "123e4567-e89b-12d3-a456-426614174000".parse().unwrap();
        assert_eq!(id.to_string(), "123e4567-e89b-12d3-a456-426614174000");
        assert!("not-a-uuid".parse::<ArticleId>().is_err());

        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"123e4567-e89b-12d3-a456-426614174000\"");
    }

    #[test]
    fn test_draft_missing_fields_default() {
        let draft: ArticleDraft = serde_json::from_str(r#"{"author": "a", "title": "t"}"#).unwrap();
        assert_eq!(draft.author, "a");
        assert!(draft.created_at.is_empty());
        assert!(draft.tags.is_empty());
        assert!(draft.id.is_none());
    }

    #[test]
    fn test_draft_rejects_malformed_json() {
        assert!(serde_json::from_str::<ArticleDraft>("invalid").is_err());
        assert!(serde_json::from_str::<ArticleDraft>(r#"{"tags": "not-a-list"}"#).is_err());
    }

    #[test]
    fn test_article_serializes_wire_field_names() {
        let draft = ArticleDraft {
            id: None,
            author: "a".to_string(),
            title: "t".to_string(),
            summary: "s".to_string(),
            created_at: "2025-07-30T15:30:45Z".to_string(),
            source: "https://example.com".to_string(),
            tags: vec!["x".to_string()],
        };
        let id = ArticleId::generate();
        let article = draft.validate().unwrap().into_article(id);

        let value = serde_json::to_value(&article).unwrap();
        assert_eq!(value["id"], id.to_string());
        assert_eq!(value["author"], "a");
        assert_eq!(value["tags"][0], "x");
        assert!(value.get("created_at").is_some());

        let back: Article = serde_json::from_value(value).unwrap();
        assert_eq!(back, article);
    }
}

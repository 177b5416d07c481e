use chrono::DateTime;
use thiserror::Error;
use url::Url;

use crate::types::{ArticleDraft, ValidArticle};

/// The first rule an article payload broke.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    /// Wire name of the offending field.
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self { field, reason: reason.into() }
    }
}

/// Check a draft without keeping the typed result.
pub fn validate_article(draft: &ArticleDraft) -> Result<(), ValidationError> {
    check(draft).map(|_| ())
}

// Rules run in a fixed order and stop at the first failure:
// author, title, summary, created_at, source, tags.
pub(crate) fn check(draft: &ArticleDraft) -> Result<ValidArticle, ValidationError> {
    require_text("author", &draft.author)?;
    require_text("title", &draft.title)?;
    require_text("summary", &draft.summary)?;

    if draft.created_at.is_empty() {
        return Err(ValidationError::new("created_at", "must not be empty"));
    }
    let created_at = DateTime::parse_from_rfc3339(&draft.created_at)
        .map_err(|e| ValidationError::new("created_at", format!("not a valid RFC 3339 timestamp ({})", e)))?;

    let source = parse_source(&draft.source)?;

    if draft.tags.is_empty() {
        return Err(ValidationError::new("tags", "at least one tag is required"));
    }

    Ok(ValidArticle::new(
        draft.author.clone(),
        draft.title.clone(),
        draft.summary.clone(),
        created_at,
        source,
        draft.tags.clone(),
    ))
}

fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    Ok(())
}

// The URL crate repairs input such as `https:/host` or padded strings, so the
// raw text must already carry a `scheme://authority` prefix before parsing.
fn parse_source(raw: &str) -> Result<String, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::new("source", "must not be empty"));
    }
    if raw.trim() != raw {
        return Err(ValidationError::new("source", "URL must not have surrounding whitespace"));
    }
    let authority = match raw.split_once("://") {
        Some((scheme, rest)) if !scheme.is_empty() => rest,
        _ => return Err(ValidationError::new("source", "URL must have a scheme and a host")),
    };
    if authority.is_empty() || authority.starts_with('/') {
        return Err(ValidationError::new("source", "URL must have a scheme and a host"));
    }

    let url = Url::parse(raw)
        .map_err(|e| ValidationError::new("source", format!("not a valid URL ({})", e)))?;
    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(raw.to_string()),
        _ => Err(ValidationError::new("source", "URL must have a scheme and a host")),
    }
}

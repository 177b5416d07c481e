use axum::{
    body::Body,
    extract::{rejection::PathRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use nt_core::{ArticleDraft, ArticleId};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};
use crate::{ApiError, AppState};

type HandlerResult<T> = std::result::Result<T, ApiError>;

/// An absent segment is a missing id; one that cannot be decoded is invalid.
fn parse_id(raw: Result<Path<String>, PathRejection>) -> HandlerResult<ArticleId> {
    match raw {
        Ok(Path(raw)) => parse_id_text(&raw),
        Err(PathRejection::MissingPathParams(_)) => Err(ApiError::MissingId),
        Err(e) => Err(ApiError::InvalidId(e.to_string())),
    }
}

fn parse_id_text(raw: &str) -> HandlerResult<ArticleId> {
    if raw.is_empty() {
        return Err(ApiError::MissingId);
    }
    raw.parse().map_err(|e| ApiError::InvalidId(format!("{}: {}", raw, e)))
}

async fn read_draft(body: Body, limit: usize) -> HandlerResult<ArticleDraft> {
    let bytes = axum::body::to_bytes(body, limit)
        .await
        .map_err(|e| ApiError::BodyRead(e.to_string()))?;
    Ok(serde_json::from_slice(&bytes)?)
}

// The status is decided before encoding; a failed encode is logged and the
// status goes out with an empty body.
fn json_response<T: Serialize>(status: StatusCode, value: &T) -> Response {
    match serde_json::to_vec(value) {
        Ok(body) => (status, [(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(e) => {
            error!(error = %e, "failed to encode response");
            status.into_response()
        }
    }
}

pub async fn create_news(
    State(state): State<Arc<AppState>>,
    body: Body,
) -> HandlerResult<StatusCode> {
    info!("request received");
    let draft = read_draft(body, state.config.max_body_bytes).await?;
    let article = draft.validate()?;

    let created = state
        .storage
        .create(article)
        .await
        .map_err(ApiError::storage("create news"))?;

    info!(id = %created.id, "📰 News created: {}", created.title);
    Ok(StatusCode::CREATED)
}

pub async fn list_news(State(state): State<Arc<AppState>>) -> HandlerResult<Response> {
    info!("request received");
    let news = state
        .storage
        .find_all()
        .await
        .map_err(ApiError::storage("get all news"))?;

    Ok(json_response(StatusCode::OK, &news))
}

pub async fn get_news(
    State(state): State<Arc<AppState>>,
    id: Result<Path<String>, PathRejection>,
) -> HandlerResult<Response> {
    info!("request received");
    let id = parse_id(id)?;
    let news = state
        .storage
        .find_by_id(id)
        .await
        .map_err(ApiError::storage("get news"))?;

    Ok(json_response(StatusCode::OK, &news))
}

pub async fn update_news(
    State(state): State<Arc<AppState>>,
    id: Result<Path<String>, PathRejection>,
    body: Body,
) -> HandlerResult<Response> {
    info!("request received");
    let id = parse_id(id)?;
    let draft = read_draft(body, state.config.max_body_bytes).await?;
    let article = draft.validate()?;

    let updated = state
        .storage
        .update(id, article)
        .await
        .map_err(ApiError::storage("update news"))?;

    info!(%id, "📝 News updated");
    Ok(json_response(StatusCode::OK, &updated))
}

pub async fn delete_news(
    State(state): State<Arc<AppState>>,
    id: Result<Path<String>, PathRejection>,
) -> HandlerResult<StatusCode> {
    info!("request received");
    let id = parse_id(id)?;
    state
        .storage
        .delete_by_id(id)
        .await
        .map_err(ApiError::storage("delete news"))?;

    info!(%id, "🗑️ News deleted");
    Ok(StatusCode::NO_CONTENT)
}

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::{AppState, WebConfig};

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/news", get(handlers::list_news).post(handlers::create_news))
        // An empty id segment still reaches the handlers so they can reject it.
        .route(
            "/news/",
            get(handlers::get_news)
                .put(handlers::update_news)
                .delete(handlers::delete_news),
        )
        .route(
            "/news/:id",
            get(handlers::get_news)
                .put(handlers::update_news)
                .delete(handlers::delete_news),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use nt_core::{Article, ArticleDraft, ArticleId, Error, Result};
    pub use crate::{create_app, ApiError, AppState, WebConfig};
}

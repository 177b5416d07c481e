use async_trait::async_trait;
use crate::types::{Article, ArticleId, ValidArticle};
use crate::Result;

/// Persistence contract for news articles.
///
/// Implementations are shared across request tasks and must be safe for
/// concurrent calls. A lookup, update or delete of an unknown id returns
/// [`crate::Error::NotFound`].
#[async_trait]
pub trait ArticleStorage: Send + Sync {
    /// Store a new article and assign its id
    async fn create(&self, article: ValidArticle) -> Result<Article>;

    /// Get a single article by id
    async fn find_by_id(&self, id: ArticleId) -> Result<Article>;

    /// Get every stored article; an empty store yields an empty list
    async fn find_all(&self) -> Result<Vec<Article>>;

    /// Remove an article
    async fn delete_by_id(&self, id: ArticleId) -> Result<()>;

    /// Replace all fields of an existing article
    async fn update(&self, id: ArticleId, article: ValidArticle) -> Result<Article>;
}

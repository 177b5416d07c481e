use async_trait::async_trait;
use nt_core::{Article, ArticleId, ArticleStorage, Error, Result, ValidArticle};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use crate::StorageBackend;

#[derive(Default)]
pub struct MemoryStore {
    articles: HashMap<ArticleId, Article>,
}

impl MemoryStore {
    pub fn insert(&mut self, article: ValidArticle) -> Article {
        let mut id = ArticleId::generate();
        while self.articles.contains_key(&id) {
            id = ArticleId::generate();
        }
        let article = article.into_article(id);
        self.articles.insert(id, article.clone());
        article
    }

    pub fn get(&self, id: ArticleId) -> Result<Article> {
        self.articles.get(&id).cloned().ok_or(Error::NotFound(id))
    }

    pub fn all(&self) -> Vec<Article> {
        let mut articles = self.articles.values().cloned().collect::<Vec<_>>();
        articles.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        articles
    }

    pub fn replace(&mut self, id: ArticleId, article: ValidArticle) -> Result<Article> {
        let slot = self.articles.get_mut(&id).ok_or(Error::NotFound(id))?;
        *slot = article.into_article(id);
        Ok(slot.clone())
    }

    pub fn remove(&mut self, id: ArticleId) -> Result<()> {
        self.articles.remove(&id).map(|_| ()).ok_or(Error::NotFound(id))
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

/// Process-local storage. Contents are lost on restart.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    store: Arc<RwLock<MemoryStore>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

#[async_trait]
impl StorageBackend for InMemoryStorage {
    fn backend_name() -> &'static str {
        "memory"
    }

    fn get_error_message() -> &'static str {
        "Memory storage should be available"
    }

    async fn connect(url: Option<&str>) -> Result<Self> {
        if let Some(url) = url {
            debug!(url, "memory storage ignores the backend URL");
        }
        Ok(Self::new())
    }
}

#[async_trait]
impl ArticleStorage for InMemoryStorage {
    async fn create(&self, article: ValidArticle) -> Result<Article> {
        let mut store = self.store.write().await;
        Ok(store.insert(article))
    }

    async fn find_by_id(&self, id: ArticleId) -> Result<Article> {
        let store = self.store.read().await;
        store.get(id)
    }

    async fn find_all(&self) -> Result<Vec<Article>> {
        let store = self.store.read().await;
        Ok(store.all())
    }

    async fn delete_by_id(&self, id: ArticleId) -> Result<()> {
        let mut store = self.store.write().await;
        store.remove(id)
    }

    async fn update(&self, id: ArticleId, article: ValidArticle) -> Result<Article> {
        let mut store = self.store.write().await;
        store.replace(id, article)
    }
}

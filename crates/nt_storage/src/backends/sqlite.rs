use async_trait::async_trait;
use nt_core::{Article, ArticleId, ArticleStorage, Error, Result, ValidArticle};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqliteRow};
use sqlx::Row;
use std::str::FromStr;
use crate::StorageBackend;

const DEFAULT_DATABASE_URL: &str = "sqlite://news.db";

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS news (
        id TEXT PRIMARY KEY,
        author TEXT NOT NULL,
        title TEXT NOT NULL,
        summary TEXT NOT NULL,
        created_at TEXT NOT NULL,
        source TEXT NOT NULL,
        tags TEXT NOT NULL
    )
    "#,
    // Add future migrations here
];

pub struct SQLiteStorage {
    pool: SqlitePool,
}

fn db_error(context: &str, e: sqlx::Error) -> Error {
    Error::Database(format!("{}: {}", context, e))
}

impl SQLiteStorage {
    pub async fn new_with_url(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| db_error("Invalid database URL", e))?
            .create_if_missing(true);

        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(|e| db_error("Failed to connect to database", e))?;

        for (i, migration) in MIGRATIONS.iter().enumerate() {
            sqlx::query(migration)
                .execute(&pool)
                .await
                .map_err(|e| db_error(&format!("Failed to run migration {}", i), e))?;
        }

        Ok(Self { pool })
    }

    fn row_to_article(row: &SqliteRow) -> Result<Article> {
        let id: String = row.get("id");
        let created_at: String = row.get("created_at");
        let tags: String = row.get("tags");

        Ok(Article {
            id: ArticleId::from_str(&id)
                .map_err(|e| Error::Database(format!("Corrupt id {}: {}", id, e)))?,
            author: row.get("author"),
            title: row.get("title"),
            summary: row.get("summary"),
            created_at: chrono::DateTime::parse_from_rfc3339(&created_at)
                .map_err(|e| Error::Database(format!("Failed to parse date: {}", e)))?,
            source: row.get("source"),
            tags: serde_json::from_str(&tags)?,
        })
    }
}

#[async_trait]
impl StorageBackend for SQLiteStorage {
    fn backend_name() -> &'static str {
        "sqlite"
    }

    fn get_error_message() -> &'static str {
        "SQLite database should be reachable at the configured URL"
    }

    async fn connect(url: Option<&str>) -> Result<Self> {
        Self::new_with_url(url.unwrap_or(DEFAULT_DATABASE_URL)).await
    }
}

#[async_trait]
impl ArticleStorage for SQLiteStorage {
    async fn create(&self, article: ValidArticle) -> Result<Article> {
        let article = article.into_article(ArticleId::generate());
        let tags = serde_json::to_string(&article.tags)?;

        sqlx::query(
            r#"
            INSERT INTO news (id, author, title, summary, created_at, source, tags)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(article.id.to_string())
        .bind(&article.author)
        .bind(&article.title)
        .bind(&article.summary)
        .bind(article.created_at.to_rfc3339())
        .bind(&article.source)
        .bind(tags)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to store article", e))?;

        Ok(article)
    }

    async fn find_by_id(&self, id: ArticleId) -> Result<Article> {
        let row = sqlx::query("SELECT * FROM news WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to get article", e))?
            .ok_or(Error::NotFound(id))?;

        Self::row_to_article(&row)
    }

    async fn find_all(&self) -> Result<Vec<Article>> {
        let rows = sqlx::query("SELECT * FROM news")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list articles", e))?;

        let mut articles = rows.iter().map(Self::row_to_article).collect::<Result<Vec<_>>>()?;
        articles.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(articles)
    }

    async fn delete_by_id(&self, id: ArticleId) -> Result<()> {
        let result = sqlx::query("DELETE FROM news WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete article", e))?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(id));
        }
        Ok(())
    }

    async fn update(&self, id: ArticleId, article: ValidArticle) -> Result<Article> {
        let article = article.into_article(id);
        let tags = serde_json::to_string(&article.tags)?;

        let result = sqlx::query(
            r#"
            UPDATE news
            SET author = ?, title = ?, summary = ?, created_at = ?, source = ?, tags = ?
            WHERE id = ?
            "#,
        )
        .bind(&article.author)
        .bind(&article.title)
        .bind(&article.summary)
        .bind(article.created_at.to_rfc3339())
        .bind(&article.source)
        .bind(tags)
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update article", e))?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(id));
        }
        Ok(article)
    }
}

use async_trait::async_trait;
use nt_core::{ArticleStorage, Error, Result};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{error, info};

pub mod backends;

pub use backends::*;

/// A storage backend that can be constructed from an optional connection URL.
#[async_trait]
pub trait StorageBackend: ArticleStorage + Sized + 'static {
    fn backend_name() -> &'static str;
    fn get_error_message() -> &'static str;
    async fn connect(url: Option<&str>) -> Result<Self>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageKind {
    #[default]
    Memory,
    Sqlite,
}

impl FromStr for StorageKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "sqlite" => Ok(Self::Sqlite),
            other => Err(format!("Unknown storage backend: {} (expected memory or sqlite)", other)),
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str("memory"),
            Self::Sqlite => f.write_str("sqlite"),
        }
    }
}

pub async fn create_storage(kind: StorageKind, url: Option<&str>) -> Result<Arc<dyn ArticleStorage>> {
    match kind {
        StorageKind::Memory => open::<InMemoryStorage>(url).await,
        #[cfg(feature = "sqlite")]
        StorageKind::Sqlite => open::<SQLiteStorage>(url).await,
        #[cfg(not(feature = "sqlite"))]
        StorageKind::Sqlite => Err(Error::Storage(
            "SQLite support is not compiled in; rebuild with --features sqlite".to_string(),
        )),
    }
}

async fn open<T: StorageBackend>(url: Option<&str>) -> Result<Arc<dyn ArticleStorage>> {
    let storage = T::connect(url).await.map_err(|e| {
        error!(backend = T::backend_name(), error = %e, "{}", T::get_error_message());
        e
    })?;
    info!("🏦 Storage backend ready (using {})", T::backend_name());
    Ok(Arc::new(storage))
}

/// Round-trip probe used at startup to confirm the backend answers.
pub async fn check_storage(storage: &Arc<dyn ArticleStorage>) -> Result<usize> {
    let articles = storage
        .find_all()
        .await
        .map_err(|e| Error::Storage(format!("Storage health check failed: {}", e)))?;
    Ok(articles.len())
}

pub mod prelude {
    pub use super::{create_storage, StorageBackend, StorageKind};
    pub use super::backends::*;
}

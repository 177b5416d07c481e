pub mod error;
pub mod storage;
pub mod types;
pub mod validation;

pub use error::Error;
pub use storage::ArticleStorage;
pub use types::{Article, ArticleDraft, ArticleId, ValidArticle};
pub use validation::{validate_article, ValidationError};

pub type Result<T> = std::result::Result<T, Error>;

pub mod files;

use std::path::PathBuf;

use crate::app::Result;
use crate::domain::{ArticleRef, FetchedContent};

pub use files::{sanitize_title, FileStore};

pub trait ArticleStore {
    /// Write the article list, replacing any list from an earlier run.
    fn save_article_list(&self, articles: &[ArticleRef]) -> Result<()>;

    /// Write one article body to a new file and return its path.
    fn save_content(&self, article: &ArticleRef, content: &FetchedContent) -> Result<PathBuf>;
}

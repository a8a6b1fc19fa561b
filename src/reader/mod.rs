//! Article content retrieval through the web reader API.
//!
//! The web reader fetches a page server-side and returns its main content as
//! Markdown-like text, so article bodies don't need a browser.
//!
//! ```text
//! article URL → RequestFormatter → GET → decode → strip_boilerplate → FetchedContent
//! ```

mod cleanup;
mod config;
mod format;
mod http_reader;

pub use cleanup::strip_boilerplate;
pub use config::ReaderConfig;
pub use format::{clean_article_url, RequestFormatter};
pub use http_reader::HttpReader;

use async_trait::async_trait;
use tracing::error;

use crate::app::Result;
use crate::domain::FetchedContent;

/// Trait for article content sources
#[async_trait]
pub trait ContentReader: Send + Sync {
    /// Fetch and clean the content of one article.
    async fn try_fetch(&self, url: &str) -> Result<FetchedContent>;

    /// Like [`try_fetch`](ContentReader::try_fetch), but any failure is
    /// logged and reported as no content. Nothing is retried.
    async fn fetch(&self, url: &str) -> Option<FetchedContent> {
        match self.try_fetch(url).await {
            Ok(content) => Some(content),
            Err(e) => {
                error!("Failed to fetch article content from {}: {}", url, e);
                None
            }
        }
    }
}

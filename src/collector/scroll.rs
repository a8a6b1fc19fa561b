use std::collections::HashSet;

use tracing::{debug, error, info, warn};

use crate::app::Result;
use crate::collector::{BrowserSession, PageElement, ScrollConfig};
use crate::config::AlbumConfig;
use crate::domain::ArticleRef;

const SCROLL_TO_BOTTOM: &str = "window.scrollTo(0, document.documentElement.scrollHeight);";

/// Why the scroll loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Too many consecutive scrolls found nothing new
    Stalled,
    /// The scroll cap was exceeded
    ScrollLimit,
}

/// Result of one collection run
#[derive(Debug, Clone)]
pub struct ScrollReport {
    /// Unique entries in the order they were discovered
    pub articles: Vec<ArticleRef>,
    /// Number of scrolls performed
    pub scrolls: u32,
    pub stop: StopReason,
}

/// Scrolls an album page and harvests its entries.
pub struct ScrollCollector {
    scroll: ScrollConfig,
    album: AlbumConfig,
}

impl ScrollCollector {
    pub fn new(scroll: ScrollConfig, album: AlbumConfig) -> Self {
        Self { scroll, album }
    }

    /// Scroll the already loaded album page in `session` until it stops yielding entries.
    ///
    /// Failing to read a single entry is logged and the entry skipped; errors
    /// from scrolling, waiting or querying the page abort the collection.
    pub async fn collect<B: BrowserSession>(&self, session: &B) -> Result<ScrollReport> {
        let mut articles: Vec<ArticleRef> = Vec::new();
        let mut seen: HashSet<ArticleRef> = HashSet::new();
        let mut scroll_count: u32 = 0;
        let mut no_new_content_count: u32 = 0;

        let stop = loop {
            scroll_count += 1;
            debug!("Scroll #{}", scroll_count);

            session.execute_script(SCROLL_TO_BOTTOM).await?;
            tokio::time::sleep(self.scroll.settle_delay()).await;

            let present = session
                .wait_until_present(&self.album.item_selector, self.scroll.wait_timeout())
                .await?;
            if !present {
                warn!(
                    "Timed out after {:?} waiting for {}",
                    self.scroll.wait_timeout(),
                    self.album.item_selector
                );
            }

            let items = session.find_elements(&self.album.item_selector).await?;
            debug!("Found {} entries on the page", items.len());

            let before = articles.len();
            for item in &items {
                match self.read_entry(item).await {
                    Ok(Some(article)) => {
                        if seen.insert(article.clone()) {
                            debug!("New article: {}", article.title);
                            articles.push(article);
                        }
                    }
                    Ok(None) => {}
                    Err(e) => error!("Failed to read album entry: {}", e),
                }
            }

            if articles.len() > before {
                info!("Found {} articles so far", articles.len());
                no_new_content_count = 0;
            } else {
                no_new_content_count += 1;
            }

            if no_new_content_count >= self.scroll.max_stalls {
                break StopReason::Stalled;
            }
            if scroll_count > self.scroll.max_scrolls {
                break StopReason::ScrollLimit;
            }
        };

        info!(
            "Collection finished after {} scrolls ({:?}): {} articles",
            scroll_count,
            stop,
            articles.len()
        );

        Ok(ScrollReport {
            articles,
            scrolls: scroll_count,
            stop,
        })
    }

    /// Title and link of one entry; `None` unless both are present and non-empty.
    async fn read_entry<E: PageElement>(&self, item: &E) -> Result<Option<ArticleRef>> {
        let title = item.attribute(&self.album.title_attr).await?;
        let link = item.attribute(&self.album.link_attr).await?;

        Ok(match (title, link) {
            (Some(title), Some(link)) if !title.is_empty() && !link.is_empty() => {
                Some(ArticleRef::new(title, link))
            }
            _ => None,
        })
    }
}

//! One download run: collect the album's article list in the browser, save
//! it, then fetch and save every article.

use std::path::PathBuf;

use tracing::{error, info};

use crate::app::{AppContext, Result};
use crate::collector::{BrowserSession, ChromeSession, ScrollCollector, ScrollReport};
use crate::config::Config;
use crate::domain::ArticleRef;
use crate::reader::ContentReader;
use crate::store::{ArticleStore, FileStore};

/// What to download and where to put it
#[derive(Debug, Clone)]
pub struct Job {
    pub album_url: String,
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadSummary {
    pub saved: usize,
    pub failed: usize,
}

/// Run `job` end to end.
///
/// The Chrome session only lives for the collection phase and is closed
/// whether or not collection succeeded.
pub async fn run(ctx: &AppContext, job: &Job) -> Result<DownloadSummary> {
    info!("=== albumdl starting ===");
    info!("Album URL: {}", job.album_url);

    let mut session = ChromeSession::launch(&ctx.config.browser).await?;
    let report = collect_and_close(&mut session, &job.album_url, &ctx.config).await?;
    let summary = save_and_download(ctx, job, &report.articles).await?;

    info!(
        "=== albumdl finished: {} saved, {} failed ===",
        summary.saved, summary.failed
    );
    Ok(summary)
}

/// Collect the album's entries, then close `session` whatever the outcome.
pub async fn collect_and_close<B: BrowserSession>(
    session: &mut B,
    album_url: &str,
    config: &Config,
) -> Result<ScrollReport> {
    let collected = collect_articles(&*session, album_url, config).await;
    session.close().await;
    collected
}

/// Open the album page in `session` and scroll it for entries.
pub async fn collect_articles<B: BrowserSession>(
    session: &B,
    album_url: &str,
    config: &Config,
) -> Result<ScrollReport> {
    info!("Opening album page...");
    session.navigate(album_url).await?;
    tokio::time::sleep(config.scroll.initial_load_delay()).await;

    info!("Collecting article list...");
    let report = ScrollCollector::new(config.scroll.clone(), config.album.clone())
        .collect(session)
        .await?;
    info!("Found {} articles", report.articles.len());
    Ok(report)
}

/// Save the article list under the job's output directory, then download
/// every article. Failing to save the list is fatal; per-article failures are not.
pub async fn save_and_download(
    ctx: &AppContext,
    job: &Job,
    articles: &[ArticleRef],
) -> Result<DownloadSummary> {
    let store = FileStore::new(&job.output_dir);
    store.save_article_list(articles)?;
    Ok(download_articles(ctx.reader.as_ref(), &store, articles).await)
}

/// Fetch and save each article in order, one at a time.
pub async fn download_articles<R, S>(reader: &R, store: &S, articles: &[ArticleRef]) -> DownloadSummary
where
    R: ContentReader + ?Sized,
    S: ArticleStore,
{
    let total = articles.len();
    let mut summary = DownloadSummary::default();

    for (idx, article) in articles.iter().enumerate() {
        info!("Processing article {}/{}: {}", idx + 1, total, article.title);

        let Some(content) = reader.fetch(&article.url).await else {
            error!("No content retrieved for: {}", article.title);
            summary.failed += 1;
            continue;
        };

        match store.save_content(article, &content) {
            Ok(path) => {
                info!("Saved to {}", path.display());
                summary.saved += 1;
            }
            Err(e) => {
                error!("Failed to save {}: {}", article.title, e);
                summary.failed += 1;
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppError;
    use crate::collector::{fast_config, FakeBrowser, FakeElement};
    use crate::domain::FetchedContent;
    use crate::reader::strip_boilerplate;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::fs;
    use std::sync::{Arc, Mutex};

    /// Serves canned bodies; URLs without one fail.
    #[derive(Default)]
    struct FakeReader {
        bodies: HashMap<String, String>,
        requested: Mutex<Vec<String>>,
    }

    impl FakeReader {
        fn with(bodies: &[(&str, &str)]) -> Self {
            Self {
                bodies: bodies
                    .iter()
                    .map(|(url, body)| (url.to_string(), body.to_string()))
                    .collect(),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl ContentReader for FakeReader {
        async fn try_fetch(&self, url: &str) -> Result<FetchedContent> {
            self.requested.lock().unwrap().push(url.to_string());
            let body = self
                .bodies
                .get(url)
                .ok_or_else(|| AppError::Fetch(format!("web reader returned 502 for {}", url)))?;
            let markers = crate::reader::ReaderConfig::default().boilerplate_markers;
            Ok(FetchedContent::new(url, strip_boilerplate(body, &markers)))
        }
    }

    fn test_config() -> Config {
        Config {
            scroll: fast_config(),
            ..Config::default()
        }
    }

    fn content_files(dir: &std::path::Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn test_collect_navigates_then_scrolls() {
        let browser = FakeBrowser::new(vec![vec![
            FakeElement::entry("One", "https://mp.weixin.qq.com/s/1"),
            FakeElement::entry("Two", "https://mp.weixin.qq.com/s/2"),
        ]]);
        let album = "https://mp.weixin.qq.com/mp/appmsgalbum?album_id=1";

        let report = collect_articles(&browser, album, &test_config()).await.unwrap();

        assert_eq!(*browser.visited.lock().unwrap(), vec![album.to_string()]);
        assert_eq!(report.articles.len(), 2);
        assert_eq!(report.scrolls, 4);
    }

    #[tokio::test]
    async fn test_session_closed_after_collection() {
        let mut browser = FakeBrowser::new(vec![vec![FakeElement::entry(
            "One",
            "https://mp.weixin.qq.com/s/1",
        )]]);
        let album = "https://mp.weixin.qq.com/mp/appmsgalbum?album_id=1";

        let report = collect_and_close(&mut browser, album, &test_config()).await.unwrap();

        assert_eq!(report.articles.len(), 1);
        assert_eq!(browser.closed, 1);
    }

    #[tokio::test]
    async fn test_session_closed_when_collection_fails() {
        let mut browser = FakeBrowser::new(vec![vec![FakeElement::entry(
            "One",
            "https://mp.weixin.qq.com/s/1",
        )]]);
        browser.fail_scroll_at = Some(2);
        let album = "https://mp.weixin.qq.com/mp/appmsgalbum?album_id=1";

        let err = collect_and_close(&mut browser, album, &test_config()).await.unwrap_err();

        assert!(matches!(err, AppError::Browser(_)));
        assert_eq!(browser.closed, 1);
    }

    #[tokio::test]
    async fn test_download_continues_past_failures() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let reader = FakeReader::with(&[
            ("https://mp.weixin.qq.com/s/1", "First body 推荐阅读 promo"),
            ("https://mp.weixin.qq.com/s/3", "Third body"),
        ]);
        let articles = vec![
            ArticleRef::new("First: one", "https://mp.weixin.qq.com/s/1"),
            ArticleRef::new("Second", "https://mp.weixin.qq.com/s/2"),
            ArticleRef::new("Third", "https://mp.weixin.qq.com/s/3"),
        ];

        let summary = download_articles(&reader, &store, &articles).await;

        assert_eq!(summary, DownloadSummary { saved: 2, failed: 1 });
        assert_eq!(reader.requested.lock().unwrap().len(), 3);

        let names = content_files(&store.content_dir());
        assert_eq!(names.len(), 2);
        assert!(names[0].starts_with("First one_"));
        assert!(names[1].starts_with("Third_"));

        let first = fs::read_to_string(store.content_dir().join(&names[0])).unwrap();
        assert_eq!(first, "Original URL: https://mp.weixin.qq.com/s/1\n\nFirst body");
    }

    #[tokio::test]
    async fn test_save_and_download_writes_list_first() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = AppContext::with_reader(test_config(), Arc::new(FakeReader::default()));
        let job = Job {
            album_url: "https://mp.weixin.qq.com/mp/appmsgalbum?album_id=1".into(),
            output_dir: dir.path().join("out"),
        };
        let articles = vec![ArticleRef::new("Only", "https://mp.weixin.qq.com/s/only")];

        let summary = save_and_download(&ctx, &job, &articles).await.unwrap();

        assert_eq!(summary, DownloadSummary { saved: 0, failed: 1 });
        assert!(job.output_dir.join("article_list.txt").exists());
        assert!(job.output_dir.join("article_list.json").exists());
    }

    #[tokio::test]
    async fn test_list_write_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "file").unwrap();

        let reader = Arc::new(FakeReader::with(&[("https://mp.weixin.qq.com/s/1", "Body")]));
        let ctx = AppContext::with_reader(test_config(), reader.clone());
        let job = Job {
            album_url: "https://mp.weixin.qq.com/mp/appmsgalbum?album_id=1".into(),
            output_dir: blocker.join("out"),
        };
        let articles = vec![ArticleRef::new("One", "https://mp.weixin.qq.com/s/1")];

        let err = save_and_download(&ctx, &job, &articles).await.unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
        assert!(reader.requested.lock().unwrap().is_empty());
    }
}

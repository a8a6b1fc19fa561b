//! # albumdl
//!
//! Downloads every article of a WeChat official-account album page.
//!
//! ## Architecture
//!
//! ```text
//! album URL → Validator → Chrome scroll loop → article list → web reader → Markdown files
//! ```
//!
//! - [`input`]: URL validation and interactive prompts
//! - [`collector`]: headless Chrome session and the scroll-and-harvest loop
//! - [`reader`]: web reader request formatting, fetching and boilerplate trimming
//! - [`store`]: article list and content files
//!
//! ## Quick Start
//!
//! ```bash
//! echo 'WEB_READER_API_KEY=...' > .env
//! albumdl --url 'https://mp.weixin.qq.com/mp/appmsgalbum?__biz=...&album_id=...' --output /tmp/album
//! ```

/// Application context, error types, logging and the download pipeline.
pub mod app;

/// Command-line interface using clap.
///
/// Every flag is optional; missing or invalid values are prompted for.
pub mod cli;

/// Browser-driven collection of the album's article list.
///
/// - [`ChromeSession`](collector::ChromeSession): chromiumoxide-backed session
/// - [`ScrollCollector`](collector::ScrollCollector): scroll loop with stall detection
/// - [`BrowserSession`](collector::BrowserSession): the seam the loop is written against
pub mod collector;

/// Configuration management.
///
/// Loads from `~/.config/albumdl/config.toml`; the API key comes from `.env`.
pub mod config;

/// Core domain models: [`ArticleRef`](domain::ArticleRef),
/// [`ArticleRecord`](domain::ArticleRecord), [`FetchedContent`](domain::FetchedContent).
pub mod domain;

/// Album URL validation and console prompts.
pub mod input;

/// Article content through the web reader API.
pub mod reader;

/// Output files.
pub mod store;

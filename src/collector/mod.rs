//! Album page collection.
//!
//! Album pages load their entries lazily as the page is scrolled, so the
//! list is harvested by driving a browser: scroll to the bottom, wait, read
//! the entries, repeat until nothing new shows up.
//!
//! # Architecture
//!
//! ```text
//! album URL → BrowserSession (ChromeSession) → ScrollCollector → Vec<ArticleRef>
//! ```
//!
//! [`ScrollCollector`] only talks to the [`BrowserSession`] trait, so the
//! stopping rules are tested against a scripted page.

mod chrome;
mod config;
mod scroll;

pub use chrome::ChromeSession;
pub use config::{BrowserOptions, ScrollConfig};
pub use scroll::{ScrollCollector, ScrollReport, StopReason};

#[cfg(test)]
pub(crate) use scroll::tests::{fast_config, FakeBrowser, FakeElement};

use std::time::Duration;

use async_trait::async_trait;

use crate::app::Result;

/// One element on the page whose attributes can be read.
#[async_trait]
pub trait PageElement: Send + Sync {
    /// Value of attribute `name`, `None` when absent.
    async fn attribute(&self, name: &str) -> Result<Option<String>>;
}

/// The browser operations the collector needs.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    type Element: PageElement;

    /// Load `url` in the session's page.
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Evaluate `script` in the page, discarding its value.
    async fn execute_script(&self, script: &str) -> Result<()>;

    /// Wait until at least one element matches `selector`.
    ///
    /// Returns `Ok(false)` when `timeout` elapses first.
    async fn wait_until_present(&self, selector: &str, timeout: Duration) -> Result<bool>;

    /// All elements currently matching `selector`, in document order.
    async fn find_elements(&self, selector: &str) -> Result<Vec<Self::Element>>;

    /// Release the browser. Safe to call more than once.
    async fn close(&mut self);
}

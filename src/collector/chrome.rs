use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::element::Element;
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::app::{AppError, Result};
use crate::collector::{BrowserOptions, BrowserSession, PageElement};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Headless Chrome driven through chromiumoxide, with a single page.
///
/// Call [`close`](ChromeSession::close) when done; dropping an open session
/// closes the browser in the background.
pub struct ChromeSession {
    browser: Option<Browser>,
    handler: Option<JoinHandle<()>>,
    page: Page,
}

impl ChromeSession {
    /// Launch Chrome and open a blank page
    pub async fn launch(options: &BrowserOptions) -> Result<Self> {
        let config = build_browser_config(options)?;

        let (mut browser, mut handler) = Browser::launch(config).await.map_err(|e| {
            AppError::Browser(format!(
                "Failed to launch browser: {}. Is Chrome or Chromium installed and in PATH?",
                e
            ))
        })?;

        let handle = tokio::spawn(async move {
            while let Some(_event) = handler.next().await {
                // Drive the CDP connection
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                shutdown(&mut browser, handle).await;
                return Err(AppError::Browser(format!("Failed to create page: {}", e)));
            }
        };

        info!("Chrome session started");
        Ok(Self {
            browser: Some(browser),
            handler: Some(handle),
            page,
        })
    }
}

async fn shutdown(browser: &mut Browser, handle: JoinHandle<()>) {
    if let Err(e) = browser.close().await {
        debug!("Non-fatal error while closing browser: {}", e);
    }
    let _ = browser.wait().await;
    let _ = handle.await;
}

fn build_browser_config(options: &BrowserOptions) -> Result<BrowserConfig> {
    let mut builder = BrowserConfig::builder()
        .arg("--no-sandbox")
        .arg("--disable-gpu")
        .arg("--disable-dev-shm-usage")
        .window_size(options.window_width, options.window_height)
        .viewport(Viewport {
            width: options.window_width,
            height: options.window_height,
            ..Viewport::default()
        });

    if !options.headless {
        builder = builder.with_head();
    }

    if let Some(ref path) = options.chrome_path {
        builder = builder.chrome_executable(path);
    }

    builder
        .build()
        .map_err(|e| AppError::Browser(format!("Failed to build browser config: {}", e)))
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        let (Some(mut browser), Some(handle)) = (self.browser.take(), self.handler.take()) else {
            return;
        };
        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            runtime.spawn(async move {
                shutdown(&mut browser, handle).await;
            });
        }
    }
}

/// A DOM element of the session's page
pub struct ChromeElement(Element);

#[async_trait]
impl PageElement for ChromeElement {
    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        self.0
            .attribute(name)
            .await
            .map_err(|e| AppError::Browser(format!("Failed to read attribute {}: {}", name, e)))
    }
}

#[async_trait]
impl BrowserSession for ChromeSession {
    type Element = ChromeElement;

    async fn navigate(&self, url: &str) -> Result<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| AppError::Browser(format!("Navigation to {} failed: {}", url, e)))?;
        Ok(())
    }

    async fn execute_script(&self, script: &str) -> Result<()> {
        self.page
            .evaluate(script.to_string())
            .await
            .map_err(|e| AppError::Browser(format!("Script execution failed: {}", e)))?;
        Ok(())
    }

    async fn wait_until_present(&self, selector: &str, timeout: Duration) -> Result<bool> {
        let poll = async {
            loop {
                match self.page.find_elements(selector).await {
                    Ok(elements) if !elements.is_empty() => return,
                    Ok(_) => {}
                    Err(e) => debug!("Waiting for {}: {}", selector, e),
                }
                tokio::time::sleep(POLL_INTERVAL).await;
            }
        };

        Ok(tokio::time::timeout(timeout, poll).await.is_ok())
    }

    async fn find_elements(&self, selector: &str) -> Result<Vec<ChromeElement>> {
        let elements = self
            .page
            .find_elements(selector)
            .await
            .map_err(|e| AppError::Browser(format!("Failed to query {}: {}", selector, e)))?;

        Ok(elements.into_iter().map(ChromeElement).collect())
    }

    async fn close(&mut self) {
        if let (Some(mut browser), Some(handle)) = (self.browser.take(), self.handler.take()) {
            shutdown(&mut browser, handle).await;
            info!("Chrome session closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_config_with_explicit_executable() {
        let options = BrowserOptions {
            headless: false,
            window_width: 1280,
            window_height: 720,
            chrome_path: Some("/usr/bin/chromium".into()),
        };
        assert!(build_browser_config(&options).is_ok());
    }
}

use async_trait::async_trait;
use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_ENCODING, CONNECTION, CONTENT_TYPE};
use reqwest::Client;
use tracing::{debug, warn};

use crate::app::{AppError, Result};
use crate::config::ApiKey;
use crate::domain::FetchedContent;
use crate::reader::{strip_boilerplate, ContentReader, ReaderConfig, RequestFormatter};

/// reqwest-based web reader client
pub struct HttpReader {
    client: Client,
    formatter: RequestFormatter,
    markers: Vec<String>,
}

impl HttpReader {
    pub fn new(config: &ReaderConfig, api_key: ApiKey) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .default_headers(default_headers())
            .build()?;

        Ok(Self {
            client,
            formatter: RequestFormatter::new(config, api_key),
            markers: config.boilerplate_markers.clone(),
        })
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/plain,text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        ),
    );
    headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate, br"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers
}

/// Encoding named by the `charset` of the Content-Type header.
fn declared_encoding(headers: &HeaderMap) -> Option<&'static Encoding> {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|content_type| {
            content_type.split(';').find_map(|param| {
                let (name, value) = param.trim().split_once('=')?;
                if name.trim().eq_ignore_ascii_case("charset") {
                    Encoding::for_label(value.trim().trim_matches('"').as_bytes())
                } else {
                    None
                }
            })
        })
}

/// Best guess for an undeclared body: UTF-8 when it decodes cleanly,
/// otherwise whatever the detector makes of the bytes.
fn sniff_encoding(body: &[u8]) -> &'static Encoding {
    if std::str::from_utf8(body).is_ok() {
        return UTF_8;
    }
    let mut detector = EncodingDetector::new();
    detector.feed(body, true);
    detector.guess(None, false)
}

#[async_trait]
impl ContentReader for HttpReader {
    async fn try_fetch(&self, url: &str) -> Result<FetchedContent> {
        let request_url = self.formatter.format(url);
        let mut response = self.client.get(&request_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Fetch(format!(
                "web reader returned {} for {}",
                status, url
            )));
        }

        let declared = declared_encoding(response.headers());

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            body.extend_from_slice(&chunk);
        }
        let encoding = declared.unwrap_or_else(|| sniff_encoding(&body));
        debug!("Read {} bytes ({}) for {}", body.len(), encoding.name(), url);

        let (text, _, had_errors) = encoding.decode(&body);
        if had_errors {
            warn!("Malformed {} sequences in content for {}", encoding.name(), url);
        }

        let markdown = strip_boilerplate(&text, &self.markers);
        Ok(FetchedContent::new(url, markdown))
    }
}

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::error;
use url::Url;

use crate::config::ApiKey;
use crate::reader::ReaderConfig;

/// Builds web reader request URLs for article URLs.
#[derive(Debug, Clone)]
pub struct RequestFormatter {
    base_url: String,
    key_param: String,
    tracking_param: String,
    api_key: ApiKey,
}

impl RequestFormatter {
    pub fn new(config: &ReaderConfig, api_key: ApiKey) -> Self {
        Self {
            base_url: config.base_url.clone(),
            key_param: config.key_param.clone(),
            tracking_param: config.tracking_param.clone(),
            api_key,
        }
    }

    /// Request URL for `article_url`. Never fails: when the article URL can't
    /// be cleaned, the raw input is encoded instead.
    pub fn format(&self, article_url: &str) -> String {
        let target = match clean_article_url(article_url, &self.tracking_param) {
            Ok(cleaned) => cleaned,
            Err(e) => {
                error!("Failed to clean article URL {:?}: {}", article_url, e);
                article_url.to_string()
            }
        };

        format!(
            "{}{}?{}={}",
            self.base_url,
            encode_component(&target),
            self.key_param,
            encode_component(self.api_key.as_str())
        )
    }
}

/// Normalize the query of an article URL.
///
/// Pairs are grouped by name in order of first appearance and blank values
/// are dropped. `tracking_param` keeps only its first value.
pub fn clean_article_url(article_url: &str, tracking_param: &str) -> Result<String, url::ParseError> {
    let mut url = Url::parse(article_url)?;

    let mut grouped: Vec<(String, Vec<String>)> = Vec::new();
    for (name, value) in url.query_pairs() {
        if value.is_empty() {
            continue;
        }
        match grouped.iter_mut().find(|(n, _)| *n == name) {
            Some((_, values)) => values.push(value.into_owned()),
            None => grouped.push((name.into_owned(), vec![value.into_owned()])),
        }
    }

    if let Some((_, values)) = grouped.iter_mut().find(|(n, _)| n == tracking_param) {
        values.truncate(1);
    }

    let query = grouped
        .iter()
        .flat_map(|(name, values)| {
            values
                .iter()
                .map(move |value| format!("{}={}", encode_component(name), encode_component(value)))
        })
        .collect::<Vec<_>>()
        .join("&");

    url.set_query(if query.is_empty() { None } else { Some(&query) });
    Ok(url.into())
}

/// Everything but `[A-Za-z0-9_.~-]` and space, which is turned into `+` afterwards
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b' ');

/// Encode a whole string as one form-style component: space becomes `+`,
/// anything outside `[A-Za-z0-9_.~-]` is percent-encoded.
fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, COMPONENT).to_string().replace(' ', "+")
}

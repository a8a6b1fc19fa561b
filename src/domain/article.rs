use serde::{Deserialize, Serialize};

/// An article entry discovered on the album page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArticleRef {
    pub title: String,
    pub url: String,
}

impl ArticleRef {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// An [`ArticleRef`] with its 1-based position, as written to `article_list.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub id: usize,
    pub title: String,
    pub url: String,
}

impl ArticleRecord {
    /// Number the articles in list order, starting at 1.
    pub fn numbered(articles: &[ArticleRef]) -> Vec<Self> {
        articles
            .iter()
            .enumerate()
            .map(|(idx, article)| Self {
                id: idx + 1,
                title: article.title.clone(),
                url: article.url.clone(),
            })
            .collect()
    }
}

/// Extracted body of one article, tagged with the URL it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedContent {
    pub source_url: String,
    pub body: String,
}

impl FetchedContent {
    pub fn new(source_url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            body: body.into(),
        }
    }

    /// The text written to disk: a header line with the source URL, then the body.
    pub fn render(&self) -> String {
        format!("Original URL: {}\n\n{}", self.source_url, self.body)
    }
}

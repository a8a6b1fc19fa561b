use serde::{Deserialize, Serialize};

/// What an album page looks like: where it is hosted and how its entries are marked up.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlbumConfig {
    /// Host the album URL must contain (default: mp.weixin.qq.com)
    pub domain: String,

    /// Path fragment the album URL must contain (default: appmsgalbum)
    pub path_marker: String,

    /// CSS selector matching one article entry
    pub item_selector: String,

    /// Attribute holding the article title
    pub title_attr: String,

    /// Attribute holding the article link
    pub link_attr: String,
}

impl Default for AlbumConfig {
    fn default() -> Self {
        Self {
            domain: "mp.weixin.qq.com".to_string(),
            path_marker: "appmsgalbum".to_string(),
            item_selector: "li.album__list-item".to_string(),
            title_attr: "data-title".to_string(),
            link_attr: "data-link".to_string(),
        }
    }
}

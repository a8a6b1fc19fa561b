use std::fmt::Write as _;
use std::fs::{self, OpenOptions};
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::info;

use crate::app::Result;
use crate::domain::{ArticleRecord, ArticleRef, FetchedContent};
use crate::store::ArticleStore;

pub const ARTICLE_LIST_TXT: &str = "article_list.txt";
pub const ARTICLE_LIST_JSON: &str = "article_list.json";
pub const CONTENT_DIR: &str = "download_content";

/// Longest file name stem derived from a title, in characters
const MAX_STEM_CHARS: usize = 50;

/// Plain-file store rooted at the user's output directory.
///
/// ```text
/// <root>/article_list.txt
/// <root>/article_list.json
/// <root>/download_content/<title>_<YYYYMMDDHHMMSS>.md
/// ```
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn content_dir(&self) -> PathBuf {
        self.root.join(CONTENT_DIR)
    }
}

impl ArticleStore for FileStore {
    fn save_article_list(&self, articles: &[ArticleRef]) -> Result<()> {
        fs::create_dir_all(&self.root)?;

        let txt_path = self.root.join(ARTICLE_LIST_TXT);
        info!("Writing article list to {}", txt_path.display());
        fs::write(&txt_path, render_text_list(articles))?;

        let json_path = self.root.join(ARTICLE_LIST_JSON);
        info!("Writing article list to {}", json_path.display());
        let json = serde_json::to_string_pretty(&ArticleRecord::numbered(articles))?;
        fs::write(&json_path, json)?;

        info!("Saved list of {} articles", articles.len());
        Ok(())
    }

    fn save_content(&self, article: &ArticleRef, content: &FetchedContent) -> Result<PathBuf> {
        let dir = self.content_dir();
        fs::create_dir_all(&dir)?;

        let (mut file, path) = create_unique(&dir, &content_file_name(&article.title, Local::now()))?;
        file.write_all(content.render().as_bytes())?;
        Ok(path)
    }
}

/// Create `dir/name`, or `<stem>_2.md`, `<stem>_3.md`, ... when taken.
/// Never opens an existing file.
fn create_unique(dir: &Path, name: &str) -> io::Result<(fs::File, PathBuf)> {
    let stem = name.strip_suffix(".md").unwrap_or(name);
    let mut attempt = 1usize;
    loop {
        let path = if attempt == 1 {
            dir.join(name)
        } else {
            dir.join(format!("{}_{}.md", stem, attempt))
        };
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((file, path)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => attempt += 1,
            Err(e) => return Err(e),
        }
    }
}

fn render_text_list(articles: &[ArticleRef]) -> String {
    let mut out = String::new();
    for (idx, article) in articles.iter().enumerate() {
        let _ = write!(
            out,
            "[{}] Title: {}\nLink: {}\n\n",
            idx + 1,
            article.title,
            article.url
        );
    }
    out
}

/// `<sanitized title>_<YYYYMMDDHHMMSS>.md`
pub fn content_file_name(title: &str, at: DateTime<Local>) -> String {
    format!("{}_{}.md", sanitize_title(title), at.format("%Y%m%d%H%M%S"))
}

/// Keep letters, digits, spaces, hyphens and underscores, at most 50 characters.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .take(MAX_STEM_CHARS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Vec<ArticleRef> {
        vec![
            ArticleRef::new("第一篇：开篇", "https://mp.weixin.qq.com/s/1"),
            ArticleRef::new("Second \"quoted\"", "https://mp.weixin.qq.com/s/2"),
        ]
    }

    #[test]
    fn test_sanitize_strips_punctuation() {
        assert_eq!(sanitize_title("A/B: Test!!"), "AB Test");
        assert_eq!(sanitize_title("snake_case - kebab"), "snake_case - kebab");
        assert_eq!(sanitize_title("第一篇：开篇"), "第一篇开篇");
        assert_eq!(sanitize_title("../../etc/passwd"), "etcpasswd");
        assert_eq!(sanitize_title("?!*"), "");
    }

    #[test]
    fn test_sanitize_caps_length_in_chars() {
        let long = "字".repeat(80);
        let stem = sanitize_title(&long);
        assert_eq!(stem.chars().count(), 50);

        let ascii = "a".repeat(49) + "!bc";
        assert_eq!(sanitize_title(&ascii), "a".repeat(49) + "b");
    }

    #[test]
    fn test_content_file_name() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(content_file_name("A/B: Test!!", at), "AB Test_20240309070501.md");
    }

    #[test]
    fn test_save_article_list_creates_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("a").join("b");
        let store = FileStore::new(&root);

        store.save_article_list(&sample()).unwrap();

        let txt = fs::read_to_string(root.join(ARTICLE_LIST_TXT)).unwrap();
        assert_eq!(
            txt,
            "[1] Title: 第一篇：开篇\nLink: https://mp.weixin.qq.com/s/1\n\n\
             [2] Title: Second \"quoted\"\nLink: https://mp.weixin.qq.com/s/2\n\n"
        );

        let json = fs::read_to_string(root.join(ARTICLE_LIST_JSON)).unwrap();
        assert!(json.contains("第一篇：开篇"), "non-ASCII should not be escaped");
        let records: Vec<ArticleRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(records, ArticleRecord::numbered(&sample()));
        assert_eq!(records[1].id, 2);
    }

    #[test]
    fn test_save_article_list_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.save_article_list(&sample()).unwrap();
        store.save_article_list(&sample()[..1]).unwrap();

        let records: Vec<ArticleRecord> =
            serde_json::from_str(&fs::read_to_string(dir.path().join(ARTICLE_LIST_JSON)).unwrap())
                .unwrap();
        assert_eq!(records.len(), 1);
        let txt = fs::read_to_string(dir.path().join(ARTICLE_LIST_TXT)).unwrap();
        assert!(!txt.contains("[2]"));
    }

    #[test]
    fn test_save_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.save_article_list(&[]).unwrap();

        assert_eq!(fs::read_to_string(dir.path().join(ARTICLE_LIST_TXT)).unwrap(), "");
        assert_eq!(fs::read_to_string(dir.path().join(ARTICLE_LIST_JSON)).unwrap(), "[]");
    }

    #[test]
    fn test_save_content() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let article = ArticleRef::new("A/B: Test!!", "https://mp.weixin.qq.com/s/ab");
        let content = FetchedContent::new(&article.url, "...end of article.");

        let path = store.save_content(&article, &content).unwrap();

        assert_eq!(path.parent().unwrap(), store.content_dir());
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("AB Test_"));
        assert!(name.ends_with(".md"));
        assert_eq!(name.len(), "AB Test_".len() + 14 + ".md".len());
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Original URL: https://mp.weixin.qq.com/s/ab\n\n...end of article."
        );
    }

    #[test]
    fn test_same_title_gets_its_own_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let a = ArticleRef::new("Same", "https://mp.weixin.qq.com/s/a");
        let b = ArticleRef::new("Same", "https://mp.weixin.qq.com/s/b");

        let pa = store.save_content(&a, &FetchedContent::new(&a.url, "body A")).unwrap();
        let pb = store.save_content(&b, &FetchedContent::new(&b.url, "body B")).unwrap();

        assert_ne!(pa, pb);
        assert_eq!(fs::read_dir(store.content_dir()).unwrap().count(), 2);
        assert_eq!(
            fs::read_to_string(&pa).unwrap(),
            "Original URL: https://mp.weixin.qq.com/s/a\n\nbody A"
        );
        assert_eq!(
            fs::read_to_string(&pb).unwrap(),
            "Original URL: https://mp.weixin.qq.com/s/b\n\nbody B"
        );
    }

    #[test]
    fn test_create_unique_adds_suffix() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("T_20240309070501.md"), "taken").unwrap();
        fs::write(dir.path().join("T_20240309070501_2.md"), "taken").unwrap();

        let (_, path) = create_unique(dir.path(), "T_20240309070501.md").unwrap();

        assert_eq!(path, dir.path().join("T_20240309070501_3.md"));
        assert_eq!(fs::read_to_string(dir.path().join("T_20240309070501.md")).unwrap(), "taken");
    }
}

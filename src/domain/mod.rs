pub mod article;

pub use article::{ArticleRecord, ArticleRef, FetchedContent};

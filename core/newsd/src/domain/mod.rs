//! ドメイン層: 記事・解析・トピック・類似度の純粋ロジック

pub mod article;
pub mod command;
pub mod parser;
pub mod settings;
pub mod similarity;
pub mod topics;

pub use article::{Article, RelatedRef, SourceRef};
pub use command::NewsdCommand;
pub use settings::{Settings, SupabaseSettings};
pub use similarity::SimilarArticle;

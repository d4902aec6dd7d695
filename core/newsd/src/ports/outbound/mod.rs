//! Outbound ポート: usecase が依存する外部境界の trait 群

pub mod article_store;
pub mod generator;
pub mod remote_articles;

pub use article_store::{ArticleLoader, ArticleSaver};
pub use generator::NewsGenerator;
pub use remote_articles::RemoteArticles;

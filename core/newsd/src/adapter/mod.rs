//! アダプタ層: ポートの具体実装

pub mod dual_store;
pub mod env_settings;
pub mod file_article_storage;
pub mod gemini_generator;
pub mod stub_generator;
pub mod supabase_articles;

pub use dual_store::DualStore;
pub use file_article_storage::FileArticleStorage;
pub use gemini_generator::GeminiGenerator;
pub use stub_generator::StubGenerator;
pub use supabase_articles::SupabaseArticles;

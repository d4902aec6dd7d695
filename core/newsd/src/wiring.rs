//! 配線: 標準アダプタで各層を組み立てる
//!
//! Settings は呼び出し側（main）が env_settings と CLI 引数から組み立てて渡す。

use std::sync::Arc;

use common::adapter::{FileJsonLog, StdClock, StdFileSystem};
use common::ports::outbound::{FileSystem, Log};

use crate::adapter::env_settings::gemini_api_key;
use crate::adapter::{
    DualStore, FileArticleStorage, GeminiGenerator, StubGenerator, SupabaseArticles,
};
use crate::domain::Settings;
use crate::ports::outbound::RemoteArticles;
use crate::usecase::IngestPipeline;

pub struct App {
    pub logger: Arc<dyn Log>,
    pub store: Arc<DualStore<FileArticleStorage>>,
    pub pipeline: IngestPipeline,
    pub generator: Arc<dyn crate::ports::outbound::NewsGenerator>,
    pub settings: Settings,
}

/// 配線: 渡された Settings と標準アダプタで App を組み立てる。
/// `use_stub` が true か API キーが無い場合は固定文面のジェネレーターを使う。
pub fn wire_newsd(settings: Settings, use_stub: bool) -> App {
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    let logger: Arc<dyn Log> = Arc::new(FileJsonLog::new(Arc::clone(&fs), &settings.log_file));

    let local = Arc::new(FileArticleStorage::new(
        Arc::clone(&fs),
        Arc::clone(&logger),
        &settings.articles_dir,
    ));
    let remote: Option<Arc<dyn RemoteArticles>> = settings
        .supabase
        .clone()
        .map(|s| Arc::new(SupabaseArticles::new(s)) as Arc<dyn RemoteArticles>);
    let store = Arc::new(DualStore::new(local, remote, Arc::clone(&logger)));

    let generator: Arc<dyn crate::ports::outbound::NewsGenerator> = match gemini_api_key() {
        Some(key) if !use_stub => Arc::new(GeminiGenerator::new(None, key)),
        _ => Arc::new(StubGenerator),
    };

    let pipeline = IngestPipeline::new(
        Arc::clone(&store) as Arc<dyn crate::ports::outbound::ArticleLoader>,
        Arc::clone(&store) as Arc<dyn crate::ports::outbound::ArticleSaver>,
        Arc::new(StdClock),
        Arc::clone(&logger),
        settings.clone(),
    );

    App {
        logger,
        store,
        pipeline,
        generator,
        settings,
    }
}

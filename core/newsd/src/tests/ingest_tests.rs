use crate::adapter::{FileArticleStorage, StubGenerator};
use crate::domain::{Article, Settings};
use crate::ports::outbound::{ArticleLoader, ArticleSaver};
use crate::usecase::IngestPipeline;
use common::adapter::{NoopLog, StdFileSystem};
use common::error::Error;
use common::ports::outbound::Clock;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// 呼ぶたびに 2 秒進む Clock（同一秒での id 衝突を避ける）
struct SteppingClock {
    now_ms: AtomicU64,
}

impl SteppingClock {
    fn starting_at(ms: u64) -> Self {
        Self {
            now_ms: AtomicU64::new(ms),
        }
    }
}

impl Clock for SteppingClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.fetch_add(2_000, Ordering::SeqCst)
    }
}

// 2026-01-01T12:00:00Z
const T0_MS: u64 = 1_767_268_800_000;

fn pipeline(dir: &Path) -> (IngestPipeline, Arc<FileArticleStorage>) {
    let storage = Arc::new(FileArticleStorage::new(
        Arc::new(StdFileSystem),
        Arc::new(NoopLog),
        dir,
    ));
    let pipeline = IngestPipeline::new(
        Arc::clone(&storage) as Arc<dyn ArticleLoader>,
        Arc::clone(&storage) as Arc<dyn ArticleSaver>,
        Arc::new(SteppingClock::starting_at(T0_MS)),
        Arc::new(NoopLog),
        Settings::default(),
    );
    (pipeline, storage)
}

#[test]
fn test_ingest_end_to_end() {
    let tmp = tempfile::tempdir().unwrap();
    let (pipeline, storage) = pipeline(tmp.path());

    let raw = "Big Event\nSome details.\nSources:\nReuters - http://reuters.com/x";
    let article = pipeline.ingest(raw).unwrap();

    assert_eq!(article.id, "20260101120000");
    assert_eq!(article.created_at, "2026-01-01T12:00:00+00:00");
    assert_eq!(article.title, "Big Event");
    assert_eq!(article.content, "Big Event\nSome details.");
    assert_eq!(article.sources.len(), 1);
    assert!(article.topics.contains(&"big".to_string()));
    assert!(article.topics.contains(&"event".to_string()));
    assert!(article.related_articles.is_empty());

    let stored = storage.load_all().unwrap();
    assert_eq!(stored, vec![article]);
}

#[test]
fn test_second_similar_article_gets_related_reference() {
    let tmp = tempfile::tempdir().unwrap();
    let (pipeline, _storage) = pipeline(tmp.path());

    let first = pipeline
        .ingest("Coastal storm floods harbor\nstorm flood harbor coast damage")
        .unwrap();
    let second = pipeline
        .ingest("Coastal storm floods harbor again\nstorm flood harbor coast damage")
        .unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(second.related_articles.len(), 1);
    assert_eq!(second.related_articles[0].id, first.id);
    assert!(second.related_articles[0].similarity >= 0.4);
    assert!(second.content.contains("[Related Article:"));
    assert!(second.content.contains("2026-01-01"));
    assert!(second.content.contains(&first.title));
}

#[test]
fn test_unrelated_articles_stay_unlinked() {
    let tmp = tempfile::tempdir().unwrap();
    let (pipeline, _storage) = pipeline(tmp.path());

    pipeline
        .ingest("Coastal storm floods harbor\nstorm flood harbor coast damage")
        .unwrap();
    let second = pipeline
        .ingest("Parliament passes budget\nparliament budget vote deficit spending")
        .unwrap();

    assert!(second.related_articles.is_empty());
    assert!(!second.content.contains("[Related Article:"));
}

#[test]
fn test_duplicate_text_is_still_persisted() {
    let tmp = tempfile::tempdir().unwrap();
    let (pipeline, storage) = pipeline(tmp.path());

    let raw = "Coastal storm floods harbor\nstorm flood harbor coast damage";
    pipeline.ingest(raw).unwrap();
    let dup = pipeline.ingest(raw).unwrap();

    // 重複は警告止まりで、保存自体は行われる
    assert_eq!(dup.related_articles.len(), 1);
    assert!(dup.related_articles[0].similarity > 0.7);
    assert_eq!(storage.load_all().unwrap().len(), 2);
}

#[test]
fn test_generate_and_ingest_with_stub() {
    let tmp = tempfile::tempdir().unwrap();
    let (pipeline, storage) = pipeline(tmp.path());

    let article = pipeline.generate_and_ingest(&StubGenerator).unwrap();
    assert!(!article.title.is_empty());
    assert!(!article.sources.is_empty());
    assert!(storage.verify(&article.id).unwrap());
}

struct FailingSaver;

impl ArticleSaver for FailingSaver {
    fn save(&self, _article: &Article) -> Result<(), Error> {
        Err(Error::io_msg("disk full"))
    }

    fn verify(&self, _id: &str) -> Result<bool, Error> {
        Ok(false)
    }
}

struct AmnesiacSaver;

impl ArticleSaver for AmnesiacSaver {
    fn save(&self, _article: &Article) -> Result<(), Error> {
        Ok(())
    }

    fn verify(&self, _id: &str) -> Result<bool, Error> {
        Ok(false)
    }
}

struct EmptyLoader;

impl ArticleLoader for EmptyLoader {
    fn load_all(&self) -> Result<Vec<Article>, Error> {
        Ok(Vec::new())
    }

    fn load_by_id(&self, _id: &str) -> Result<Option<Article>, Error> {
        Ok(None)
    }
}

struct BrokenLoader;

impl ArticleLoader for BrokenLoader {
    fn load_all(&self) -> Result<Vec<Article>, Error> {
        Err(Error::io_msg("cannot list directory"))
    }

    fn load_by_id(&self, _id: &str) -> Result<Option<Article>, Error> {
        Err(Error::io_msg("cannot list directory"))
    }
}

fn pipeline_with(
    loader: Arc<dyn ArticleLoader>,
    saver: Arc<dyn ArticleSaver>,
) -> IngestPipeline {
    IngestPipeline::new(
        loader,
        saver,
        Arc::new(SteppingClock::starting_at(T0_MS)),
        Arc::new(NoopLog),
        Settings::default(),
    )
}

#[test]
fn test_save_failure_returns_processed_article() {
    let pipeline = pipeline_with(Arc::new(EmptyLoader), Arc::new(FailingSaver));
    let failure = pipeline.ingest("Big Event\nSome details.").unwrap_err();
    assert!(failure.error.to_string().contains("disk full"));
    let article = failure.article.expect("processed article must be attached");
    assert_eq!(article.title, "Big Event");
    assert!(!article.id.is_empty());
}

#[test]
fn test_verify_failure_returns_processed_article() {
    let pipeline = pipeline_with(Arc::new(EmptyLoader), Arc::new(AmnesiacSaver));
    let failure = pipeline.ingest("Big Event\nSome details.").unwrap_err();
    assert!(failure.error.to_string().contains("not found"));
    assert!(failure.article.is_some());
}

#[test]
fn test_history_failure_degrades_to_no_similarity() {
    let tmp = tempfile::tempdir().unwrap();
    let storage = Arc::new(FileArticleStorage::new(
        Arc::new(StdFileSystem),
        Arc::new(NoopLog),
        tmp.path(),
    ));
    let pipeline = pipeline_with(Arc::new(BrokenLoader), storage);
    let article = pipeline.ingest("Big Event\nSome details.").unwrap();
    assert!(article.related_articles.is_empty());
}

//! 取り込みパイプライン
//!
//! 生テキスト 1 件を 解析 → トピック付与 → 類似照合 → 採番 → 保存 → 検証 の順で
//! 処理する。解析と照合は失敗しない（best-effort で退避する）ため、失敗しうるのは
//! 履歴読み込みと保存・検証のみ。履歴読み込みの失敗は警告して空履歴で続行し、
//! 保存・検証の失敗は処理済みの記事を添えて返す（呼び出し側が救済できるように）。

use crate::domain::parser::parse_article;
use crate::domain::similarity::find_similar;
use crate::domain::topics::extract_topics;
use crate::domain::{Article, RelatedRef, Settings};
use crate::ports::outbound::{ArticleLoader, ArticleSaver, NewsGenerator};
use common::error::Error;
use common::ports::outbound::{Clock, Log, LogLevel, LogRecord};
use std::collections::BTreeMap;
use std::sync::Arc;

/// 取り込み失敗。article が Some なら処理自体は完了しており、保存だけが失敗している。
#[derive(Debug)]
pub struct IngestFailure {
    pub error: Error,
    pub article: Option<Article>,
}

impl IngestFailure {
    fn early(error: Error) -> Self {
        Self {
            error,
            article: None,
        }
    }

    fn with_article(error: Error, article: Article) -> Self {
        Self {
            error,
            article: Some(article),
        }
    }
}

pub struct IngestPipeline {
    loader: Arc<dyn ArticleLoader>,
    saver: Arc<dyn ArticleSaver>,
    clock: Arc<dyn Clock>,
    log: Arc<dyn Log>,
    settings: Settings,
}

impl IngestPipeline {
    pub fn new(
        loader: Arc<dyn ArticleLoader>,
        saver: Arc<dyn ArticleSaver>,
        clock: Arc<dyn Clock>,
        log: Arc<dyn Log>,
        settings: Settings,
    ) -> Self {
        Self {
            loader,
            saver,
            clock,
            log,
            settings,
        }
    }

    fn trace(&self, level: LogLevel, message: &str, state: &str, article_id: &str) {
        let mut fields = BTreeMap::new();
        fields.insert("state".to_string(), serde_json::json!(state));
        if !article_id.is_empty() {
            fields.insert("article_id".to_string(), serde_json::json!(article_id));
        }
        let _ = self.log.log(&LogRecord::new(
            level,
            message,
            "usecase",
            "ingest",
            Some(fields),
        ));
    }

    /// ジェネレーターから 1 件生成して取り込む
    pub fn generate_and_ingest(
        &self,
        generator: &dyn NewsGenerator,
    ) -> Result<Article, IngestFailure> {
        let raw = generator
            .generate()
            .map_err(|e| IngestFailure::early(e))?;
        self.ingest(&raw)
    }

    /// 生テキスト 1 件を取り込み、保存済みの記事を返す
    pub fn ingest(&self, raw: &str) -> Result<Article, IngestFailure> {
        let mut article = parse_article(raw, self.settings.max_images);
        self.trace(LogLevel::Info, "Article parsed", "parsed", "");

        // 履歴が読めなくても取り込み自体は止めない
        let history = match self.loader.load_all() {
            Ok(history) => history,
            Err(e) => {
                self.trace(
                    LogLevel::Warn,
                    &format!("History unavailable, similarity check skipped: {}", e),
                    "annotated",
                    "",
                );
                Vec::new()
            }
        };

        article.topics =
            extract_topics(&article.title, &article.content, self.settings.max_topics);

        let similar = find_similar(
            &article.title,
            &article.content,
            &history,
            self.settings.similarity_threshold,
            self.settings.max_topics,
        );
        if let Some(best) = similar.first() {
            if best.similarity >= self.settings.duplicate_threshold {
                let mut fields = BTreeMap::new();
                fields.insert("state".to_string(), serde_json::json!("annotated"));
                fields.insert("related_id".to_string(), serde_json::json!(best.id));
                fields.insert("similarity".to_string(), serde_json::json!(best.similarity));
                let _ = self.log.log(&LogRecord::new(
                    LogLevel::Warn,
                    "Possible duplicate of an existing article",
                    "usecase",
                    "ingest",
                    Some(fields),
                ));
            }
            // 最も近い 1 件だけを参照として残し、参照文を本文末尾に加える
            let date = best.created_at.chars().take(10).collect::<String>();
            article.content.push_str(&format!(
                "\n\n[Related Article: This article relates to a previous article published on {}: '{}']",
                date, best.title
            ));
            article.related_articles = vec![RelatedRef {
                id: best.id.clone(),
                title: best.title.clone(),
                created_at: best.created_at.clone(),
                similarity: best.similarity,
            }];
        }
        self.trace(LogLevel::Info, "Article annotated", "annotated", "");

        let now = chrono::DateTime::from_timestamp_millis(self.clock.now_ms() as i64)
            .unwrap_or_else(chrono::Utc::now);
        article.id = now.format("%Y%m%d%H%M%S").to_string();
        article.created_at = now.to_rfc3339();

        if let Err(e) = self.saver.save(&article) {
            self.trace(
                LogLevel::Error,
                &format!("Save failed: {}", e),
                "failed",
                &article.id,
            );
            return Err(IngestFailure::with_article(e, article));
        }
        self.trace(LogLevel::Info, "Article persisted", "persisted", &article.id);

        match self.saver.verify(&article.id) {
            Ok(true) => {
                self.trace(LogLevel::Info, "Article verified", "verified", &article.id);
            }
            Ok(false) => {
                let e = Error::io_msg(format!(
                    "Article '{}' not found in local store after save",
                    article.id
                ));
                self.trace(LogLevel::Error, &e.to_string(), "failed", &article.id);
                return Err(IngestFailure::with_article(e, article));
            }
            Err(e) => {
                self.trace(
                    LogLevel::Error,
                    &format!("Verification failed: {}", e),
                    "failed",
                    &article.id,
                );
                return Err(IngestFailure::with_article(e, article));
            }
        }

        self.trace(LogLevel::Info, "Article ingested", "done", &article.id);
        Ok(article)
    }
}

//! ローカル + リモートの合成ストア
//!
//! 保存はリモート（あれば）→ ローカルの順で試み、どちらか一方でも
//! 成功すれば成功とする。片側の失敗はログに残すだけで致命にしない。
//! verify と読み出しの信頼元はローカル。読み出しはリモート優先で、
//! リモートが落ちていればローカルへ後退する。

use crate::domain::Article;
use crate::ports::outbound::{ArticleLoader, ArticleSaver, RemoteArticles};
use common::error::Error;
use common::ports::outbound::{Log, LogLevel, LogRecord};
use std::collections::BTreeMap;
use std::sync::Arc;

pub struct DualStore<S: ArticleSaver + ArticleLoader> {
    local: Arc<S>,
    remote: Option<Arc<dyn RemoteArticles>>,
    log: Arc<dyn Log>,
}

impl<S: ArticleSaver + ArticleLoader> DualStore<S> {
    pub fn new(local: Arc<S>, remote: Option<Arc<dyn RemoteArticles>>, log: Arc<dyn Log>) -> Self {
        Self { local, remote, log }
    }

    fn log_failure(&self, level: LogLevel, message: String, id: &str) {
        let mut fields = BTreeMap::new();
        fields.insert("article_id".to_string(), serde_json::json!(id));
        let _ = self
            .log
            .log(&LogRecord::new(level, message, "adapter", "store", Some(fields)));
    }
}

impl<S: ArticleSaver + ArticleLoader> ArticleSaver for DualStore<S> {
    fn save(&self, article: &Article) -> Result<(), Error> {
        let mut remote_ok = false;
        if let Some(remote) = &self.remote {
            match remote.upsert(article) {
                Ok(()) => remote_ok = true,
                Err(e) => self.log_failure(
                    LogLevel::Warn,
                    format!("Remote save failed: {}", e),
                    &article.id,
                ),
            }
        }

        let local_result = self.local.save(article);
        if let Err(e) = &local_result {
            // リモートが受理済みなら記事は失われていないので警告に留める
            let (level, message) = if remote_ok {
                (LogLevel::Warn, format!("Local backup write failed: {}", e))
            } else {
                (LogLevel::Error, format!("Local save failed: {}", e))
            };
            self.log_failure(level, message, &article.id);
        }

        match (remote_ok, local_result) {
            (_, Ok(())) => Ok(()),
            (true, Err(_)) => Ok(()),
            (false, Err(e)) => Err(e),
        }
    }

    fn verify(&self, id: &str) -> Result<bool, Error> {
        self.local.verify(id)
    }
}

impl<S: ArticleSaver + ArticleLoader> ArticleLoader for DualStore<S> {
    fn load_all(&self) -> Result<Vec<Article>, Error> {
        if let Some(remote) = &self.remote {
            match remote.fetch_all() {
                Ok(articles) => return Ok(articles),
                Err(e) => self.log_failure(
                    LogLevel::Warn,
                    format!("Remote load failed, falling back to local store: {}", e),
                    "",
                ),
            }
        }
        self.local.load_all()
    }

    fn load_by_id(&self, id: &str) -> Result<Option<Article>, Error> {
        Ok(self.load_all()?.into_iter().find(|a| a.id == id))
    }
}

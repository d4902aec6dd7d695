//! ローカルファイルストア（信頼できる唯一の保存先）
//!
//! 1 記事 = 1 ファイル `<articles_dir>/<id>.json`。書き込みは
//! `<id>.json.tmp` に全文を書いてから rename する（部分書き込みを外に見せない）。
//! 削除操作は存在せず、保存は常に追加か上書きのみ。

use crate::domain::Article;
use crate::ports::outbound::{ArticleLoader, ArticleSaver};
use common::error::Error;
use common::ports::outbound::{FileSystem, Log, LogLevel, LogRecord};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct FileArticleStorage {
    fs: Arc<dyn FileSystem>,
    log: Arc<dyn Log>,
    dir: PathBuf,
}

impl FileArticleStorage {
    pub fn new(fs: Arc<dyn FileSystem>, log: Arc<dyn Log>, dir: impl AsRef<Path>) -> Self {
        Self {
            fs,
            log,
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn article_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    fn warn(&self, message: String, path: &Path) {
        let mut fields = BTreeMap::new();
        fields.insert(
            "path".to_string(),
            serde_json::json!(path.display().to_string()),
        );
        let _ = self.log.log(&LogRecord::new(
            LogLevel::Warn,
            message,
            "adapter",
            "store",
            Some(fields),
        ));
    }
}

impl ArticleSaver for FileArticleStorage {
    fn save(&self, article: &Article) -> Result<(), Error> {
        self.fs.create_dir_all(&self.dir)?;

        let final_path = self.article_path(&article.id);
        let tmp_path = self.dir.join(format!("{}.json.tmp", article.id));

        let json = serde_json::to_string_pretty(article)
            .map_err(|e| Error::json(format!("Failed to serialize article: {}", e)))?;
        self.fs.write(&tmp_path, &json)?;

        // 一部のプラットフォームでは rename が既存ファイルを上書きしないため先に消す
        if self.fs.exists(&final_path) {
            self.fs.remove_file(&final_path)?;
        }
        if let Err(e) = self.fs.rename(&tmp_path, &final_path) {
            // 確定に失敗した一時ファイルは残さない
            let _ = self.fs.remove_file(&tmp_path);
            return Err(e);
        }
        Ok(())
    }

    fn verify(&self, id: &str) -> Result<bool, Error> {
        let path = self.article_path(id);
        match self.fs.metadata(&path) {
            Ok(meta) => Ok(meta.is_file() && !meta.is_empty()),
            Err(_) => Ok(false),
        }
    }
}

impl ArticleLoader for FileArticleStorage {
    fn load_all(&self) -> Result<Vec<Article>, Error> {
        if !self.fs.exists(&self.dir) {
            return Ok(Vec::new());
        }
        let mut articles = Vec::new();
        // ファイル名（= id）降順で走査し、created_at 同値の並びも新しい方を先にする
        let mut entries = self.fs.read_dir(&self.dir)?;
        entries.sort();
        entries.reverse();
        for path in entries {
            // 確定前の一時ファイルや無関係なファイルは読まない
            if path.extension().map(|e| e != "json").unwrap_or(true) {
                continue;
            }
            let contents = match self.fs.read_to_string(&path) {
                Ok(c) => c,
                Err(e) => {
                    self.warn(format!("Failed to read article file: {}", e), &path);
                    continue;
                }
            };
            let article: Article = match serde_json::from_str(&contents) {
                Ok(a) => a,
                Err(e) => {
                    self.warn(format!("Skipping malformed article file: {}", e), &path);
                    continue;
                }
            };
            if !article.has_required_fields() {
                self.warn("Skipping article without id/title".to_string(), &path);
                continue;
            }
            articles.push(article);
        }
        articles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(articles)
    }

    fn load_by_id(&self, id: &str) -> Result<Option<Article>, Error> {
        Ok(self.load_all()?.into_iter().find(|a| a.id == id))
    }
}

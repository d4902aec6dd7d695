//! リモート記事バックエンド（PostgREST 互換）の Outbound ポート

use crate::domain::Article;
use common::error::Error;

/// リモートテーブルへの upsert と全件取得
pub trait RemoteArticles: Send + Sync {
    /// 記事 1 件を upsert する（同一 id は上書き）
    fn upsert(&self, article: &Article) -> Result<(), Error>;

    /// 全記事を created_at の新しい順で取得する
    fn fetch_all(&self) -> Result<Vec<Article>, Error>;
}

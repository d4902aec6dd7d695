//! 記事ストアの Outbound ポート
//!
//! 保存と読み出しを分けた 2 つの trait。ローカルファイルストアが実装の本体で、
//! リモート併用時は合成実装（DualStore）が ArticleSaver を包む。

use crate::domain::Article;
use common::error::Error;

/// 記事の永続化
pub trait ArticleSaver: Send + Sync {
    /// 記事 1 件を保存する。`<id>.json` へ原子的に書き込む。
    fn save(&self, article: &Article) -> Result<(), Error>;

    /// 保存直後の検証。信頼できる側（ローカル）に記事が存在するか。
    fn verify(&self, id: &str) -> Result<bool, Error>;
}

/// 記事の読み出し
pub trait ArticleLoader: Send + Sync {
    /// 全記事を created_at の新しい順で返す。壊れた行・ファイルは読み飛ばす。
    fn load_all(&self) -> Result<Vec<Article>, Error>;

    /// id 指定で 1 件返す（無ければ None）
    fn load_by_id(&self, id: &str) -> Result<Option<Article>, Error>;
}

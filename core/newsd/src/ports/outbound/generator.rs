//! ニュース本文ジェネレーターの Outbound ポート

use common::error::Error;

/// ニュース記事の生テキストを 1 件生成する
///
/// 実装は adapter::GeminiGenerator（LLM API）や adapter::StubGenerator（固定文面）。
pub trait NewsGenerator: Send + Sync {
    fn generate(&self) -> Result<String, Error>;
}

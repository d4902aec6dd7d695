//! 時刻 Outbound ポート
//!
//! 記事 ID（秒精度タイムスタンプ）の生成に使う。テストでは固定時刻を注入する。

/// 現在時刻を返すポート
pub trait Clock: Send + Sync {
    /// UNIX epoch からのミリ秒
    fn now_ms(&self) -> u64;
}

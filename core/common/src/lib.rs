//! newsd 共通ライブラリ
//!
//! アプリ本体（`newsd`）から使う基盤を提供する:
//! エラー型、Outbound ポート（FS・時刻・ログ）、その標準アダプタ。

/// エラーハンドリング
pub mod error;

/// Outbound ポート（trait 定義）
pub mod ports;

/// 標準アダプタ（Std* 実装・JSONL ログ）
pub mod adapter;

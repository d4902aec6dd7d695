//! 標準アダプタ（外界 I/O の実装）
//!
//! usecase は ports の trait 経由でのみファイル・時刻・ログに触れる。
//! ここにはその標準実装（Std*）とテスト用の Noop 実装を置く。

pub mod file_json_log;
pub mod std_clock;
pub mod std_fs;

pub use file_json_log::{FileJsonLog, NoopLog};
pub use std_clock::StdClock;
pub use std_fs::StdFileSystem;

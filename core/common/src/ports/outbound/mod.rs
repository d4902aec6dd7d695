//! Outbound ポート: アプリが外界（FS・時刻・ログ）を使うための trait

pub mod clock;
pub mod fs;
pub mod log;

pub use clock::Clock;
pub use fs::{FileMetadata, FileSystem};
pub use log::{now_iso8601, Log, LogLevel, LogRecord};

//! ユースケース層: 取り込みパイプラインと定期実行

pub mod ingest;
pub mod schedule;

pub use ingest::{IngestFailure, IngestPipeline};
pub use schedule::Scheduler;

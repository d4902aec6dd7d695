//! 定期実行
//!
//! 一定間隔で処理を繰り返す単純なループ。1 回の失敗で止まらず次の周期を待つ。
//! 停止フラグは 1 秒刻みで確認するため、シグナル後おおむね 1 秒以内に抜ける。

use common::error::Error;
use common::ports::outbound::{Log, LogLevel, LogRecord};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub struct Scheduler {
    interval: Duration,
    stop: Arc<AtomicBool>,
    log: Arc<dyn Log>,
}

impl Scheduler {
    pub fn new(interval: Duration, stop: Arc<AtomicBool>, log: Arc<dyn Log>) -> Self {
        Self {
            interval,
            stop,
            log,
        }
    }

    fn info(&self, message: &str, fields: Option<BTreeMap<String, serde_json::Value>>) {
        let _ = self.log.log(&LogRecord::new(
            LogLevel::Info,
            message,
            "usecase",
            "schedule",
            fields,
        ));
    }

    /// 停止フラグが立つまで tick を繰り返す。tick のエラーはログに残して続行する。
    pub fn run(&self, tick: &mut dyn FnMut() -> Result<(), Error>) {
        let mut fields = BTreeMap::new();
        fields.insert(
            "interval_secs".to_string(),
            serde_json::json!(self.interval.as_secs()),
        );
        self.info("Scheduler started", Some(fields));

        while !self.stop.load(Ordering::SeqCst) {
            if let Err(e) = tick() {
                let _ = self.log.log(&LogRecord::new(
                    LogLevel::Error,
                    format!("Scheduled run failed: {}", e),
                    "usecase",
                    "schedule",
                    None,
                ));
            }
            self.sleep_until_next();
        }
        self.info("Scheduler stopped", None);
    }

    fn sleep_until_next(&self) {
        let mut remaining = self.interval;
        while !remaining.is_zero() && !self.stop.load(Ordering::SeqCst) {
            let step = remaining.min(Duration::from_secs(1));
            std::thread::sleep(step);
            remaining = remaining.saturating_sub(step);
        }
    }
}

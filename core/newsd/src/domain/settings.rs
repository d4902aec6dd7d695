//! 実行時設定
//!
//! 設定はここで一度だけ組み立てて各層へ注入する。グローバル変数は持たない。
//! 環境変数からの読み込みは adapter::env_settings が行う。

use std::path::PathBuf;

/// リモートバックエンド（PostgREST 互換）の接続設定
#[derive(Debug, Clone, PartialEq)]
pub struct SupabaseSettings {
    pub url: String,
    pub key: String,
    pub table: String,
}

/// アプリ全体の設定（注入専用）
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// ローカルストアのディレクトリ
    pub articles_dir: PathBuf,
    /// JSONL ログの出力先
    pub log_file: PathBuf,
    /// None ならリモート保存は無効（ローカルのみで動作）
    pub supabase: Option<SupabaseSettings>,
    /// 類似とみなす Jaccard 係数の下限
    pub similarity_threshold: f64,
    /// 重複警告を出す Jaccard 係数の下限
    pub duplicate_threshold: f64,
    /// 1 記事あたりの画像 URL 上限
    pub max_images: usize,
    /// 1 記事あたりのトピック上限
    pub max_topics: usize,
    /// serve モードの生成間隔（秒）
    pub interval_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            articles_dir: PathBuf::from("./articles"),
            log_file: PathBuf::from("./newsd.jsonl"),
            supabase: None,
            similarity_threshold: 0.4,
            duplicate_threshold: 0.7,
            max_images: 5,
            max_topics: 10,
            interval_secs: 1800,
        }
    }
}

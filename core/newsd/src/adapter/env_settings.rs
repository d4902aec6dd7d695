//! 環境変数から Settings を組み立てる
//!
//! 環境変数を読むのはこのモジュールだけ。組み立てた Settings を wiring が
//! 各層へ注入する。数値の解釈に失敗した場合は黙ってデフォルトにせずエラーにする。

use crate::domain::{Settings, SupabaseSettings};
use common::error::Error;
use std::env;
use std::path::PathBuf;

fn env_opt(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> Result<T, Error> {
    match env_opt(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| Error::env(format!("Invalid value for {}: '{}'", name, raw))),
        None => Ok(default),
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    match env_opt(name) {
        Some(raw) => matches!(
            raw.trim().to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        None => default,
    }
}

/// 環境変数から Settings を組み立てる。
/// リモート保存は SUPABASE_URL と SUPABASE_KEY が揃っていて、
/// かつ SUPABASE_STORAGE_ENABLED（デフォルト有効）が立っている場合のみ有効。
pub fn settings_from_env() -> Result<Settings, Error> {
    let defaults = Settings::default();

    let supabase = match (env_opt("SUPABASE_URL"), env_opt("SUPABASE_KEY")) {
        (Some(url), Some(key)) if env_flag("SUPABASE_STORAGE_ENABLED", true) => {
            Some(SupabaseSettings {
                url,
                key,
                table: env_opt("SUPABASE_TABLE").unwrap_or_else(|| "articles".to_string()),
            })
        }
        _ => None,
    };

    Ok(Settings {
        articles_dir: env_opt("NEWSD_ARTICLES_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.articles_dir),
        log_file: env_opt("NEWSD_LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.log_file),
        supabase,
        similarity_threshold: env_parse(
            "NEWSD_SIMILARITY_THRESHOLD",
            defaults.similarity_threshold,
        )?,
        duplicate_threshold: env_parse("NEWSD_DUPLICATE_THRESHOLD", defaults.duplicate_threshold)?,
        max_images: defaults.max_images,
        max_topics: defaults.max_topics,
        interval_secs: env_parse("NEWSD_INTERVAL_SECS", defaults.interval_secs)?,
    })
}

/// 生成アダプタ用の API キー（未設定なら None）
pub fn gemini_api_key() -> Option<String> {
    env_opt("GEMINI_API_KEY")
}

#[cfg(test)]
mod tests {
    use super::*;

    // 環境変数はプロセス全体で共有されるため、ここでは純粋なヘルパーのみ検証する。

    #[test]
    fn test_env_parse_default_when_missing() {
        let v: u64 = env_parse("NEWSD_TEST_UNSET_VAR_1", 1800).unwrap();
        assert_eq!(v, 1800);
    }

    #[test]
    fn test_env_flag_default_when_missing() {
        assert!(env_flag("NEWSD_TEST_UNSET_VAR_2", true));
        assert!(!env_flag("NEWSD_TEST_UNSET_VAR_3", false));
    }
}

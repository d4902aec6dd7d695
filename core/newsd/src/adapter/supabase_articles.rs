//! Supabase（PostgREST 互換）のリモート記事アダプタ
//!
//! upsert は POST + `Prefer: resolution=merge-duplicates`、
//! 取得は GET `?select=*&order=created_at.desc`。失敗の扱い（致命かどうか）は
//! 呼び出し側が決める。ここでは Error::Http として素直に返すだけ。

use crate::domain::{Article, SupabaseSettings};
use crate::ports::outbound::RemoteArticles;
use common::error::Error;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct SupabaseArticles {
    settings: SupabaseSettings,
}

impl SupabaseArticles {
    pub fn new(settings: SupabaseSettings) -> Self {
        Self { settings }
    }

    fn table_url(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.settings.url.trim_end_matches('/'),
            self.settings.table
        )
    }

    fn client(&self) -> Result<reqwest::blocking::Client, Error> {
        reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))
    }
}

impl RemoteArticles for SupabaseArticles {
    fn upsert(&self, article: &Article) -> Result<(), Error> {
        let client = self.client()?;
        let response = client
            .post(self.table_url())
            .header("apikey", &self.settings.key)
            .header("Authorization", format!("Bearer {}", self.settings.key))
            .header("Content-Type", "application/json")
            .header("Prefer", "resolution=merge-duplicates")
            .json(article)
            .send()
            .map_err(|e| Error::http(format!("Supabase upsert failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::http(format!(
                "Supabase upsert failed: HTTP {}: {}",
                status, body
            )));
        }
        Ok(())
    }

    fn fetch_all(&self) -> Result<Vec<Article>, Error> {
        let client = self.client()?;
        let response = client
            .get(format!("{}?select=*&order=created_at.desc", self.table_url()))
            .header("apikey", &self.settings.key)
            .header("Authorization", format!("Bearer {}", self.settings.key))
            .send()
            .map_err(|e| Error::http(format!("Supabase fetch failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::http(format!(
                "Supabase fetch failed: HTTP {}: {}",
                status, body
            )));
        }

        let rows: Vec<serde_json::Value> = response
            .json()
            .map_err(|e| Error::json(format!("Failed to parse Supabase response: {}", e)))?;

        // 壊れた行は読み飛ばす（1 行のためにロード全体を失敗させない）
        let articles = rows
            .into_iter()
            .filter_map(|row| serde_json::from_value::<Article>(row).ok())
            .filter(Article::has_required_fields)
            .collect();
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_url_strips_trailing_slash() {
        let adapter = SupabaseArticles::new(SupabaseSettings {
            url: "https://proj.supabase.co/".to_string(),
            key: "k".to_string(),
            table: "articles".to_string(),
        });
        assert_eq!(adapter.table_url(), "https://proj.supabase.co/rest/v1/articles");
    }

    #[test]
    fn test_unreachable_host_is_http_error() {
        let adapter = SupabaseArticles::new(SupabaseSettings {
            url: "http://127.0.0.1:1".to_string(),
            key: "k".to_string(),
            table: "articles".to_string(),
        });
        let err = adapter.fetch_all().unwrap_err();
        assert!(matches!(err, Error::Http(_)));
    }
}

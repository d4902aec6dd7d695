//! Gemini API によるニュース生成アダプタ
//!
//! generateContent を 1 回呼び、candidates[0] のテキストをそのまま返す。
//! 検索グラウンディングを有効にして実際の報道に基づくテキストを得る。

use crate::ports::outbound::NewsGenerator;
use common::error::Error;
use serde_json::{json, Value};

const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

const NEWS_PROMPT: &str = "Search for the most significant world news from the last few hours \
and write a single concise news article about the top story. \
Start with a short headline on the first line, then the article body. \
End with a 'Sources:' section listing each source as 'Name - URL' on its own line, \
and an 'Images:' section listing any relevant image URLs, one per line.";

pub struct GeminiGenerator {
    model: String,
    api_key: String,
}

impl GeminiGenerator {
    pub fn new(model: Option<String>, api_key: impl Into<String>) -> Self {
        Self {
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_key: api_key.into(),
        }
    }

    fn request_payload() -> Value {
        json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": NEWS_PROMPT }]
            }],
            "tools": [{ "googleSearch": {} }]
        })
    }

    fn extract_text(response_json: &str) -> Result<String, Error> {
        let v: Value = serde_json::from_str(response_json)
            .map_err(|e| Error::json(format!("Failed to parse response JSON: {}", e)))?;

        if let Some(error) = v.get("error") {
            let error_msg = error["message"].as_str().unwrap_or("Unknown error");
            return Err(Error::http(format!("Gemini API error: {}", error_msg)));
        }

        let text: String = v["candidates"][0]["content"]["parts"]
            .as_array()
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|part| part["text"].as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(Error::http("Gemini API returned no text"));
        }
        Ok(text)
    }
}

impl NewsGenerator for GeminiGenerator {
    fn generate(&self) -> Result<String, Error> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        );

        let client = reqwest::blocking::Client::new();
        let response = client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&Self::request_payload())
            .send()
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let response_text = response
            .text()
            .map_err(|e| Error::http(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            let error_msg = if let Ok(v) = serde_json::from_str::<Value>(&response_text) {
                v["error"]["message"]
                    .as_str()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| format!("HTTP {}: {}", status, response_text))
            } else {
                format!("HTTP {}: {}", status, response_text)
            };
            return Err(Error::http(format!("Gemini API error: {}", error_msg)));
        }

        Self::extract_text(&response_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_payload_has_grounding() {
        let payload = GeminiGenerator::request_payload();
        assert!(payload["contents"].is_array());
        assert!(payload["tools"][0]["googleSearch"].is_object());
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let response = json!({
            "candidates": [{
                "content": {
                    "parts": [{"text": "Big Event\n"}, {"text": "Some details."}]
                }
            }]
        })
        .to_string();
        assert_eq!(
            GeminiGenerator::extract_text(&response).unwrap(),
            "Big Event\nSome details."
        );
    }

    #[test]
    fn test_extract_text_surfaces_api_error() {
        let response = json!({"error": {"message": "quota exceeded"}}).to_string();
        let err = GeminiGenerator::extract_text(&response).unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));
    }

    #[test]
    fn test_extract_text_empty_candidates_is_error() {
        let response = json!({"candidates": []}).to_string();
        assert!(GeminiGenerator::extract_text(&response).is_err());
    }
}

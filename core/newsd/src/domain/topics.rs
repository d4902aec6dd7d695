//! トピックシグネチャの抽出
//!
//! タイトル + 本文から類似判定用のキーワードを取り出す純関数。
//! 同一入力に対して決定的で、出現順を保つ安定ソートで頻度順に並べる。

use regex::Regex;
use std::collections::HashMap;

/// 除外する機能語（冠詞・前置詞・助動詞・代名詞・疑問詞）
const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "is", "are", "was", "were", "been", "be", "have", "has", "had", "do", "does", "did",
    "will", "would", "could", "should", "may", "might", "must", "can", "this", "that",
    "these", "those", "i", "you", "he", "she", "it", "we", "they", "what", "which", "who",
    "when", "where", "why", "how",
];

/// タイトルと本文からトピックを抽出する。
/// 小文字の英字 3 文字以上の語を数え、機能語を除き、頻度降順（同数は初出順）で
/// 最大 max_topics 件を返す。
pub fn extract_topics(title: &str, content: &str, max_topics: usize) -> Vec<String> {
    let text = format!("{} {}", title, content).to_lowercase();
    let re = match Regex::new(r"\b[a-z]{3,}\b") {
        Ok(re) => re,
        Err(_) => return Vec::new(),
    };

    // 初出順を保った頻度表
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for m in re.find_iter(&text) {
        let word = m.as_str();
        if STOP_WORDS.contains(&word) {
            continue;
        }
        match counts.get_mut(word) {
            Some(n) => *n += 1,
            None => {
                order.push(word.to_string());
                counts.insert(word.to_string(), 1);
            }
        }
    }

    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order.truncate(max_topics);
    order
}

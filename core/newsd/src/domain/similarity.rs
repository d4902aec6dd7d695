//! トピック集合の重なりによる類似記事検出
//!
//! 新しい記事のトピックと履歴上の各記事のトピックの Jaccard 係数を取り、
//! 閾値以上のものを類似度降順で返す。履歴側のトピックは保存済みの値を使わず
//! 常に再計算する（保存形式の揺れに影響されないため）。

use crate::domain::article::Article;
use crate::domain::topics::extract_topics;
use std::collections::HashSet;

/// 類似判定の結果 1 件
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarArticle {
    pub id: String,
    pub title: String,
    pub created_at: String,
    pub similarity: f64,
    /// 両者に共通するトピック（新記事側の順）
    pub common_topics: Vec<String>,
}

/// 2 つのトピック列の Jaccard 係数。どちらかが空なら 0.0。
pub fn jaccard(a: &[String], b: &[String]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let sa: HashSet<&str> = a.iter().map(String::as_str).collect();
    let sb: HashSet<&str> = b.iter().map(String::as_str).collect();
    let intersection = sa.intersection(&sb).count();
    let union = sa.union(&sb).count();
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

/// 履歴全体と照合し、threshold 以上の記事を類似度降順で返す。
/// 同率は履歴の並び順を保つ（安定ソート）。
pub fn find_similar(
    title: &str,
    content: &str,
    history: &[Article],
    threshold: f64,
    max_topics: usize,
) -> Vec<SimilarArticle> {
    let new_topics = extract_topics(title, content, max_topics);
    if new_topics.is_empty() {
        return Vec::new();
    }

    let mut similar = Vec::new();
    for past in history {
        let past_topics = extract_topics(&past.title, &past.content, max_topics);
        let score = jaccard(&new_topics, &past_topics);
        if score >= threshold {
            let past_set: HashSet<&str> = past_topics.iter().map(String::as_str).collect();
            let common_topics = new_topics
                .iter()
                .filter(|t| past_set.contains(t.as_str()))
                .cloned()
                .collect();
            similar.push(SimilarArticle {
                id: past.id.clone(),
                title: past.title.clone(),
                created_at: past.created_at.clone(),
                similarity: score,
                common_topics,
            });
        }
    }

    similar.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    similar
}

//! 記事 1 件のドメイン型
//!
//! 永続化される JSON（<id>.json / リモートテーブルの行）と 1:1 のフィールド。
//! 欠けたフィールドは default で許容し、id / title の必須チェックは読み手側で行う。

use serde::{Deserialize, Serialize};

/// 出典 1 件（名前 + URL）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceRef {
    pub name: String,
    pub url: String,
}

impl SourceRef {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// 類似記事への参照（最も近い過去記事 1 件）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelatedRef {
    pub id: String,
    pub title: String,
    pub created_at: String,
    pub similarity: f64,
}

/// 記事 1 件（保存・読み出しで共通）
///
/// `id` は生成時に一度だけ採番され、以後変更されない。永続化後の記事は不変で、
/// このシステムに削除操作は存在しない。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Article {
    /// 秒精度タイムスタンプ（%Y%m%d%H%M%S）。ファイル名・主キーを兼ねる。
    pub id: String,
    pub title: String,
    /// 整形済み本文（出典・画像のマークアップを除去済み）
    pub content: String,
    /// 生成元の生テキスト（監査用にそのまま保持）
    pub full_text: String,
    pub created_at: String,
    pub sources: Vec<SourceRef>,
    /// 重複除去済み・最大 5 件
    pub images: Vec<String>,
    /// 類似判定専用のキーワード（最大 10 件、生成時に一度だけ算出）
    pub topics: Vec<String>,
    pub related_articles: Vec<RelatedRef>,
}

impl Article {
    /// 読み手が要求する必須フィールド（id と title）が揃っているか
    pub fn has_required_fields(&self) -> bool {
        !self.id.is_empty() && !self.title.is_empty()
    }
}

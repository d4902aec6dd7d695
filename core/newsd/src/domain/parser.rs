//! 生成テキストの構造化パーサ
//!
//! マーカー区画（タイトル行 / 本文 / "Sources:" / "Images:"）の寛容な文法として実装する。
//! 各抽出ルールは独立した純関数で、入力が不正でも失敗せずデフォルトに退避する
//! （マーカーが無ければ sources / images は空になるだけ）。

use crate::domain::article::{Article, SourceRef};
use regex::Regex;

/// タイトルが取れないときの固定タイトル
pub const DEFAULT_TITLE: &str = "Flash News: Top Global Events";

/// 先頭行をタイトルとして受理する上限（文字数）
const TITLE_MAX_CHARS: usize = 100;

/// 画像 URL らしさの手掛かり（拡張子・パス・トークン）
const IMAGE_HINTS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg", "/image", "/photo", "image", "photo",
];

/// 既知の画像ホスティングドメイン（ヒントが無い URL の救済）
const IMAGE_DOMAINS: &[&str] = &["imgur", "flickr", "unsplash", "pexels", "getty"];

/// 画像 URL を拾うパターン群。4〜6 番目はキー・バリュー形式でグループ 1 が URL。
const IMAGE_PATTERNS: &[&str] = &[
    r#"(?i)https?://[^\s<>"\)]+\.(?:jpg|jpeg|png|gif|webp|svg|bmp)(?:\?[^\s<>"\)]*)?"#,
    r#"(?i)https?://[^\s<>"\)]+image[^\s<>"\)]*(?:\.(?:jpg|jpeg|png|gif|webp))?"#,
    r#"(?i)https?://[^\s<>"\)]+photo[^\s<>"\)]*(?:\.(?:jpg|jpeg|png|gif|webp))?"#,
    r#"(?i)image_url["']?\s*[:=]\s*["']?(https?://[^\s<>"\)]+)"#,
    r#"(?i)image["']?\s*[:=]\s*["']?(https?://[^\s<>"\)]+)"#,
    r#"(?i)urlToImage["']?\s*[:=]\s*["']?(https?://[^\s<>"\)]+)"#,
    r#"(?i)https?://[^\s<>"\)]+/image[s]?/[^\s<>"\)]+"#,
    r#"(?i)https?://[^\s<>"\)]+/photo[s]?/[^\s<>"\)]+"#,
];

/// 生テキスト全体を best-effort で構造化する。
/// id / created_at / topics / related は呼び出し側（パイプライン）が埋める。
pub fn parse_article(raw: &str, max_images: usize) -> Article {
    let sources = extract_sources(raw);
    let images = extract_images(raw, max_images);
    let title = extract_title(raw);
    let content = assemble_content(raw, &sources, &images);
    Article {
        title,
        content,
        full_text: raw.to_string(),
        sources,
        images,
        ..Article::default()
    }
}

/// 先頭行をタイトルとして抽出する。改行が無い・長すぎる・空白のみの場合は固定タイトル。
pub fn extract_title(raw: &str) -> String {
    let mut title = DEFAULT_TITLE.to_string();
    if raw.contains('\n') {
        if let Some(first_line) = raw.split('\n').next() {
            if first_line.chars().count() < TITLE_MAX_CHARS && !first_line.trim().is_empty() {
                title = first_line.trim().to_string();
            }
        }
    }
    clean_title(&title)
}

/// 見出しマーカー（先頭の #）と強調記号（*）を取り除く
fn clean_title(title: &str) -> String {
    let mut t = title.to_string();
    if let Ok(re) = Regex::new(r"^#+\s*") {
        t = re.replace(&t, "").trim().to_string();
    }
    if let Ok(re) = Regex::new(r"\*+") {
        t = re.replace_all(&t, "").trim().to_string();
    }
    t
}

/// マーカーの最後の出現より後ろの区画を返す（無ければ None）
fn section_after_last<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    if !text.contains(marker) {
        return None;
    }
    text.rsplit(marker).next()
}

/// "Sources:"（優先）/ "Source:"（後退）区画から {name, url} を行単位で抽出する
pub fn extract_sources(raw: &str) -> Vec<SourceRef> {
    let mut section = section_after_last(raw, "Sources:").unwrap_or("");
    if section.is_empty() {
        section = section_after_last(raw, "Source:").unwrap_or("");
    }

    let mut sources = Vec::new();
    for line in section.split('\n') {
        let line = line.trim();
        if line.is_empty() || !(line.contains("http") || line.contains("www.")) {
            continue;
        }
        if line.contains(" - ") {
            let mut parts = line.splitn(2, " - ");
            let name = parts
                .next()
                .unwrap_or("")
                .replace("Source:", "")
                .trim()
                .to_string();
            let url = parts.next().unwrap_or("").trim().to_string();
            sources.push(SourceRef::new(name, url));
        } else if line.contains("http") {
            // "http" 以降を URL とみなす（split で落ちた接頭辞を復元）
            let mut pieces = line.split("http");
            pieces.next();
            let tail = pieces.next().unwrap_or("");
            let url = if tail.starts_with("http") {
                tail.to_string()
            } else {
                format!("http{}", tail)
            };
            sources.push(SourceRef::new("Source", url));
        }
    }
    sources
}

/// パターン群 + "Images:" 区画から画像 URL を抽出する。
/// 末尾の引用符・句読点を落とし、重複を除き、最大 max_images 件に丸める。
pub fn extract_images(raw: &str, max_images: usize) -> Vec<String> {
    let mut images: Vec<String> = Vec::new();

    for pattern in IMAGE_PATTERNS {
        let re = match Regex::new(pattern) {
            Ok(re) => re,
            // 固定パターンのため通らないが、パーサは落とさない方針で握り潰す
            Err(_) => continue,
        };
        for caps in re.captures_iter(raw) {
            let m = match caps.get(1).or_else(|| caps.get(0)) {
                Some(m) => m,
                None => continue,
            };
            let url = normalize_image_url(m.as_str());
            if url.starts_with("http") && !images.contains(&url) && looks_like_image(&url) {
                images.push(url);
            }
        }
    }

    // 構造化された "Images:" / "Image:" 区画（行単位、最初の URL トークン）
    let mut section = section_after_last(raw, "Images:").unwrap_or("");
    if section.is_empty() {
        section = section_after_last(raw, "Image:").unwrap_or("");
    }
    if let Ok(re) = Regex::new(r#"https?://[^\s<>"]+"#) {
        for line in section.split('\n') {
            let line = line.trim();
            if line.is_empty() || !line.contains("http") {
                continue;
            }
            if let Some(m) = re.find(line) {
                let url = m.as_str().to_string();
                if !images.contains(&url) {
                    images.push(url);
                }
            }
        }
    }

    images.truncate(max_images);
    images
}

fn normalize_image_url(url: &str) -> String {
    url.trim_matches(|c| matches!(c, '"' | '\'' | '.' | ',' | ';'))
        .to_string()
}

fn looks_like_image(url: &str) -> bool {
    let lower = url.to_lowercase();
    IMAGE_HINTS.iter().any(|h| lower.contains(h))
        || IMAGE_DOMAINS.iter().any(|d| lower.contains(d))
}

/// 本文を組み立てる: マーカー区画で切り詰め、抽出済み URL を取り除き、空行を整える
pub fn assemble_content(raw: &str, sources: &[SourceRef], images: &[String]) -> String {
    let mut content = raw.to_string();

    // 出典区画を落とす。"Sources:" マーカーが無く単数形で拾えた場合は
    // 抽出済み URL を含む行だけを落とす。
    if let Some(pos) = content.find("Sources:") {
        content = content[..pos].trim().to_string();
    } else if content.contains("Source:") && !sources.is_empty() {
        content = content
            .split('\n')
            .filter(|line| !sources.iter().any(|s| !s.url.is_empty() && line.contains(&s.url)))
            .collect::<Vec<_>>()
            .join("\n");
    }

    // 画像区画を落とす。"Image:" 単数形は出典マーカーとの位置関係で
    // 前にある（構造化区画である）場合のみ切り詰める。
    if let Some(pos) = content.find("Images:") {
        content = content[..pos].trim().to_string();
    } else if content.contains("Image:")
        && (content.contains("Sources:") || content.contains("Source:"))
    {
        let images_start = content.find("Image:");
        let sources_start = content
            .find("Sources:")
            .or_else(|| content.find("Source:"));
        if let (Some(i), Some(s)) = (images_start, sources_start) {
            if i < s {
                content = content[..i].trim().to_string();
            }
        }
    }

    // 本文中に残った画像 URL をリテラルに取り除く
    for url in images {
        if !url.is_empty() {
            content = content.replace(url, "").trim().to_string();
        }
    }

    // 3 連続以上の改行は 2 つに丸める
    if let Ok(re) = Regex::new(r"\n{3,}") {
        content = re.replace_all(&content, "\n\n").to_string();
    }

    // 各行の前後空白を落とす
    content = content
        .split('\n')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n");

    // 空の段落を落とす
    content
        .split("\n\n")
        .filter(|p| !p.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

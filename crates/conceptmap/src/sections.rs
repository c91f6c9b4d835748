//! Section catalogue and links back to the source text.
//!
//! Section ids appear in two spellings: bare (`3-0`, used by link records and
//! evidence) and prefixed (`sec3-0`, used as load keys). Every lookup here
//! accepts both.

use crate::domain::Evidence;
use crate::linker::normalize_section;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default base URL of the chapter pages
pub const DEFAULT_SOURCE_BASE_URL: &str = "https://www.plurality.net/v/chapters";

/// Default language path segment of the chapter pages
pub const DEFAULT_SOURCE_LANGUAGE: &str = "jpn";

const MAX_SHORT_FRAGMENT_CHARS: usize = 300;
const LONG_TEXT_CHARS: usize = 100;
const LONG_TEXT_WORDS: usize = 10;
const FRAGMENT_EDGE_WORDS: usize = 5;

const BUILTIN_SECTIONS: &[(&str, &str)] = &[
    ("0-2", "自分の道を見つける"),
    ("1-0", "多元性を見る"),
    ("2-0", "ITと民主主義 拡大する溝"),
    ("2-1", "玉山からの眺め"),
    ("2-2", "デジタル民主主義の日常"),
    ("3-0", "プルラリティ（多元性）とは？"),
    ("3-1", "⿻世界に生きる"),
    ("3-2", "つながった社会"),
    ("3-3", "失われた道"),
    ("4-0", "権利、オペレーティングシステム、的自由"),
    ("4-1", "IDと人物性"),
    ("4-2", "団体と公衆"),
    ("4-3", "商取引と信頼"),
    ("4-4", "財産と契約"),
    ("4-5", "アクセス"),
    ("5-0", "協働テクノロジーと民主主義"),
    ("5-1", "ポスト表象コミュニケーション"),
    ("5-2", "没入型共有現実（ISR）"),
    ("5-3", "クリエイティブなコラボレーション"),
    ("5-4", "拡張熟議"),
    ("5-5", "適応型管理行政"),
    ("5-6", "⿻投票"),
    ("5-7", "社会市場"),
    ("6-0", " から現実へ"),
    ("6-1", "職場"),
    ("6-2", "保健"),
    ("6-3", "メディア"),
    ("6-4", "環境"),
    ("6-5", "学習"),
    ("7-0", "政策"),
    ("7-1", "結論"),
];

/// One section of the book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionEntry {
    /// Bare section id
    pub id: String,

    /// Section title
    pub title: String,
}

/// Ordered list of known sections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionCatalogue {
    entries: Vec<SectionEntry>,
}

impl SectionCatalogue {
    /// Create a catalogue from explicit entries
    #[must_use]
    pub fn new(entries: Vec<SectionEntry>) -> Self {
        Self { entries }
    }

    /// The catalogue of the book's sections
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_SECTIONS
                .iter()
                .map(|(id, title)| SectionEntry {
                    id: (*id).to_string(),
                    title: (*title).to_string(),
                })
                .collect(),
        )
    }

    /// All entries in order
    #[must_use]
    pub fn entries(&self) -> &[SectionEntry] {
        &self.entries
    }

    /// Title of a section, if known
    #[must_use]
    pub fn title(&self, section: &str) -> Option<&str> {
        let id = normalize_section(section);
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.title.as_str())
    }

    /// Display label `"<id> <title>"`, or the key itself when unknown
    #[must_use]
    pub fn label(&self, section: &str) -> String {
        match self.title(section) {
            Some(title) => format!("{} {}", normalize_section(section), title),
            None => section.to_string(),
        }
    }
}

impl Default for SectionCatalogue {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Where the original text of each section is published
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLinks {
    /// Base URL of the chapter pages
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Language path segment appended after the chapter
    #[serde(default = "default_language")]
    pub language: String,

    /// Dedicated pages for sections outside the chapter tree (`extra-*`)
    #[serde(default)]
    pub extra_urls: BTreeMap<String, String>,
}

fn default_base_url() -> String {
    DEFAULT_SOURCE_BASE_URL.to_string()
}

fn default_language() -> String {
    DEFAULT_SOURCE_LANGUAGE.to_string()
}

impl Default for SourceLinks {
    fn default() -> Self {
        let extra_urls = [
            ("extra-1", "https://cybozushiki.cybozu.co.jp/articles/m006262.html"),
            ("extra-2", "https://cybozushiki.cybozu.co.jp/articles/m006261.html"),
            ("extra-3", "https://wired.jp/article/what-is-plurality-book/"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            base_url: default_base_url(),
            language: default_language(),
            extra_urls,
        }
    }
}

impl SourceLinks {
    /// URL of a section's original text, pointing at the evidence if given.
    ///
    /// Chapter `1-0` is published at path `1`. Sections with an entry in
    /// `extra_urls` use that page instead of the chapter tree.
    #[must_use]
    pub fn source_url(&self, section: &str, evidence: Option<&Evidence>) -> String {
        let page = match self.extra_urls.get(section) {
            Some(url) => url.clone(),
            None => {
                let id = normalize_section(section);
                let path = if id == "1-0" { "1" } else { id };
                format!(
                    "{}/{}/{}/",
                    self.base_url.trim_end_matches('/'),
                    path,
                    self.language
                )
            }
        };

        match evidence.map(|e| e.text.as_str()).filter(|t| !t.trim().is_empty()) {
            Some(text) => format!("{page}#:~:text={}", text_fragment(text)),
            None => page,
        }
    }
}

/// Build a percent-encoded text fragment for `text`.
///
/// Long passages become a `start,end` range of their first and last five
/// words; short ones are quoted whole, with regex metacharacters escaped and
/// cut to 300 characters.
#[must_use]
pub fn text_fragment(text: &str) -> String {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if normalized.chars().count() > LONG_TEXT_CHARS {
        let words: Vec<&str> = normalized.split(' ').collect();
        if words.len() > LONG_TEXT_WORDS {
            let start = words[..FRAGMENT_EDGE_WORDS].join(" ");
            let end = words[words.len() - FRAGMENT_EDGE_WORDS..].join(" ");
            return format!(
                "{},{}",
                urlencoding::encode(&start),
                urlencoding::encode(&end)
            );
        }
    }

    let mut escaped = String::with_capacity(normalized.len());
    for c in normalized.chars() {
        if ".*+?^${}()|[]\\".contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    let truncated: String = escaped.chars().take(MAX_SHORT_FRAGMENT_CHARS).collect();
    urlencoding::encode(&truncated).into_owned()
}

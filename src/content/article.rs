use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{IdentifierSet, Issue, Journal};

/// 某一语言的摘要
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Abstract {
    pub language: String,
    pub text: String,
}

/// 旧版预渲染 HTML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtmlRendition {
    pub lang: String,
    pub url: String,
}

/// PDF 版本
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfRendition {
    pub lang: String,
    pub url: String,
    pub filename: String,
}

/// 补充材料
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplementaryMaterial {
    pub filename: String,
    pub url: String,
}

/// 文章
///
/// 连同其所属的 [`Issue`] 与 [`Journal`] 一起加载。三者的可见性相互独立，
/// 文章公开并不代表期号或期刊公开。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    #[serde(flatten)]
    pub ids: IdentifierSet,
    pub issue: Issue,
    pub journal: Journal,

    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub doi: Option<String>,
    /// 文献类型，如 `research-article`
    #[serde(rename = "type")]
    pub doc_type: String,

    pub original_language: String,
    /// 额外的全文语言，不含 `original_language`
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub abstracts: Vec<Abstract>,
    #[serde(default)]
    pub htmls: Vec<HtmlRendition>,
    #[serde(default)]
    pub pdfs: Vec<PdfRendition>,
    #[serde(default)]
    pub supplementary: Vec<SupplementaryMaterial>,
    /// 规范 XML 源地址
    #[serde(default)]
    pub xml: Option<String>,

    pub order: i32,
    #[serde(default)]
    pub elocation: Option<String>,
    pub publication_date: NaiveDate,
    pub is_public: bool,
    #[serde(default)]
    pub unpublish_reason: Option<String>,
    #[serde(default)]
    pub is_aop: bool,
}

impl Article {
    pub fn id(&self) -> &str {
        &self.ids.id
    }

    pub fn reason(&self) -> &str {
        self.unpublish_reason.as_deref().unwrap_or_default()
    }

    /// 可渲染全文的语言：`original_language` 在前，其后是 `languages`
    pub fn fulltext_languages(&self) -> Vec<String> {
        let mut langs = vec![self.original_language.clone()];
        for lang in &self.languages {
            if !langs.contains(lang) {
                langs.push(lang.clone());
            }
        }
        langs
    }

    /// 拥有非空摘要的语言，按摘要列表顺序
    pub fn abstract_languages(&self) -> Vec<String> {
        let mut langs: Vec<String> = Vec::new();
        for a in self.abstracts.iter().filter(|a| !a.text.trim().is_empty()) {
            if !langs.contains(&a.language) {
                langs.push(a.language.clone());
            }
        }
        langs
    }

    /// 指定语言的非空摘要
    pub fn abstract_text(&self, lang: &str) -> Option<&str> {
        self.abstracts
            .iter()
            .find(|a| a.language == lang && !a.text.trim().is_empty())
            .map(|a| a.text.as_str())
    }

    pub fn has_abstract(&self) -> bool {
        self.abstracts.iter().any(|a| !a.text.trim().is_empty())
    }

    /// 出版日期晚于 `today` 即处于禁发期
    pub fn is_embargoed_at(&self, today: NaiveDate) -> bool {
        self.publication_date > today
    }

    pub fn has_elocation(&self) -> bool {
        self.elocation
            .as_deref()
            .is_some_and(|e| !e.trim().is_empty())
    }
}

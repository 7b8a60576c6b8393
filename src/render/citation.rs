use chrono::Datelike;
use serde::Serialize;

use crate::{content::Article, error::Result};

/// CSL-JSON 作者名
///
/// `"Family, Given"` 形式拆成姓与名，其他写法原样作为 `literal`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CslName {
    Structured { family: String, given: String },
    Literal { literal: String },
}

impl CslName {
    pub fn parse(name: &str) -> Self {
        match name.split_once(',') {
            Some((family, given)) if !family.trim().is_empty() && !given.trim().is_empty() => {
                CslName::Structured {
                    family: family.trim().to_string(),
                    given: given.trim().to_string(),
                }
            }
            _ => CslName::Literal {
                literal: name.trim().to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CslDate {
    #[serde(rename = "date-parts")]
    pub date_parts: Vec<[i32; 3]>,
}

/// 交给引文格式化器的结构化记录（CSL-JSON）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CslRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub title: String,
    pub author: Vec<CslName>,
    pub container_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
    pub issued: CslDate,
    #[serde(rename = "DOI", skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    pub language: String,
    /// 连续出版文章的 elocation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
}

impl CslRecord {
    pub fn from_article(article: &Article, lang: &str) -> Self {
        let date = article.publication_date;
        Self {
            id: article.id().to_string(),
            kind: "article-journal",
            title: article.title.clone(),
            author: article.authors.iter().map(|a| CslName::parse(a)).collect(),
            container_title: article.journal.title.clone(),
            volume: article.issue.volume.clone(),
            issue: article.issue.number.clone(),
            issued: CslDate {
                date_parts: vec![[date.year(), date.month() as i32, date.day() as i32]],
            },
            doi: article.doi.clone(),
            language: lang.to_string(),
            number: article.elocation.clone().filter(|e| !e.trim().is_empty()),
        }
    }
}

/// 引文格式化器
pub trait CitationFormatter: Clone + Send + Sync + 'static {
    /// 输出的 MIME 类型
    fn content_type(&self) -> &str;

    fn format(&self, record: &CslRecord) -> Result<Vec<u8>>;
}

/// 直接输出 CSL-JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct CslJsonFormatter;

impl CitationFormatter for CslJsonFormatter {
    fn content_type(&self) -> &str {
        "application/vnd.citationstyles.csl+json"
    }

    fn format(&self, record: &CslRecord) -> Result<Vec<u8>> {
        // 只含字符串与整数，序列化不会失败
        Ok(serde_json::to_vec(&[record]).unwrap_or_default())
    }
}

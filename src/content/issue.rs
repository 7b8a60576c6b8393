use serde::{Deserialize, Serialize};

/// 期号类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    Regular,
    Special,
    Supplement,
    VolumeIssue,
    Ahead,
    Pressrelease,
}

/// 期号（fascicle）
///
/// 归属于唯一的 [`Journal`](super::Journal)。提前出版（AOP）文章被归入
/// `number == "ahead"` 的合成期号。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    pub journal_id: String,
    #[serde(rename = "type")]
    pub kind: IssueType,
    #[serde(default)]
    pub volume: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub suppl_text: Option<String>,
    pub year: i32,
    pub order: i32,
    /// 旧站点使用的期号标签，如 `v10n2`、`2018nahead`
    pub label: String,
    pub url_segment: String,
    pub is_public: bool,
    #[serde(default)]
    pub unpublish_reason: Option<String>,
}

impl Issue {
    pub const AHEAD_NUMBER: &'static str = "ahead";

    /// 是否为提前出版的合成期号
    pub fn is_ahead(&self) -> bool {
        self.number.as_deref() == Some(Self::AHEAD_NUMBER)
    }

    pub fn reason(&self) -> &str {
        self.unpublish_reason.as_deref().unwrap_or_default()
    }
}

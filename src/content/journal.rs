use serde::{Deserialize, Serialize};

/// 期刊
///
/// 发布层级的顶层，`is_public` 为 `false` 时 `unpublish_reason` 必须非空。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    pub id: String,
    /// 期刊缩写，如 `rsp`
    pub acronym: String,
    /// URL 路径段
    pub url_segment: String,
    #[serde(default)]
    pub title: String,
    pub is_public: bool,
    #[serde(default)]
    pub unpublish_reason: Option<String>,
}

impl Journal {
    /// 下线原因，未设置时返回空串
    pub fn reason(&self) -> &str {
        self.unpublish_reason.as_deref().unwrap_or_default()
    }
}

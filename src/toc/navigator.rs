use std::{fmt, str::FromStr};

use super::list_articles;
use crate::{
    content::Article,
    error::{Error, Result},
    storage::Querier,
};

/// 翻页方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Next => "next",
            Direction::Previous => "previous",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = Error;

    /// 只接受 `"next"` 与 `"previous"`，其他值属于调用方错误
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "next" => Ok(Direction::Next),
            "previous" => Ok(Direction::Previous),
            other => Err(Error::InvalidDirection(other.to_string())),
        }
    }
}

fn position(items: &[Article], current: &Article) -> Option<usize> {
    items.iter().position(|a| a.id() == current.id())
}

/// 有序序列中 `current` 的后一篇，到达末尾时返回 `None`
pub fn next<'a>(items: &'a [Article], current: &Article) -> Option<&'a Article> {
    position(items, current).and_then(|i| items.get(i + 1))
}

/// 有序序列中 `current` 的前一篇，位于开头时返回 `None`
pub fn previous<'a>(items: &'a [Article], current: &Article) -> Option<&'a Article> {
    position(items, current)
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| items.get(i))
}

pub fn sibling<'a>(
    items: &'a [Article],
    current: &Article,
    direction: Direction,
) -> Option<&'a Article> {
    match direction {
        Direction::Next => next(items, current),
        Direction::Previous => previous(items, current),
    }
}

/// 跳转到同一期号目录中的相邻文章
///
/// 摘要模式下只在有摘要的文章之间移动。不会首尾循环，越界时返回
/// [`Error::PreviousOrNextNotFound`]。
pub async fn goto<Q: Querier>(
    querier: &Q,
    article: &Article,
    direction: Direction,
    abstract_mode: bool,
) -> Result<Article> {
    let mut items = list_articles(querier, &article.issue, true, true).await?;
    if abstract_mode {
        items.retain(|a| a.has_abstract() || a.id() == article.id());
    }

    sibling(&items, article, direction)
        .cloned()
        .ok_or(Error::PreviousOrNextNotFound(direction))
}

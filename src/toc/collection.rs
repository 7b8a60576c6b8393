use chrono::Utc;
use serde::Serialize;

use crate::{
    content::{Article, Issue},
    error::Result,
    storage::{ArticleFilter, Querier},
};

/// 期号的编排方式，决定目录的排序策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    /// 提前出版，按出版日期倒序
    Aop,
    /// 连续出版（使用 elocation），按 `order` 升序
    Continuous,
    /// 常规期号，按 `order` 升序
    Regular,
}

/// 被视为“论文类”的文献类型，用于精选列表
pub const HIGHLIGHTED_TYPES: &[&str] = &[
    "research-article",
    "review-article",
    "case-report",
    "brief-report",
    "rapid-communication",
    "article-commentary",
];

/// 判断期号的编排方式
///
/// `number == "ahead"` 时为 [`IssueKind::Aop`]；否则看第一篇文章是否有非空 elocation。
pub fn classify(issue: &Issue, first_article: Option<&Article>) -> IssueKind {
    if issue.is_ahead() {
        IssueKind::Aop
    } else if first_article.is_some_and(Article::has_elocation) {
        IssueKind::Continuous
    } else {
        IssueKind::Regular
    }
}

/// 按编排方式排序
///
/// AOP 期号完全忽略 `order`。
pub fn sort_articles(kind: IssueKind, articles: &mut [Article]) {
    match kind {
        IssueKind::Aop => articles.sort_by(|a, b| b.publication_date.cmp(&a.publication_date)),
        IssueKind::Continuous | IssueKind::Regular => articles.sort_by_key(|a| a.order),
    }
}

/// 某期号的有序文章集合
#[derive(Debug, Clone)]
pub struct IssueArticles {
    pub kind: IssueKind,
    pub articles: Vec<Article>,
}

impl IssueArticles {
    /// 加载并排序期号下的文章
    pub async fn load<Q: Querier>(
        querier: &Q,
        issue: &Issue,
        visible_only: bool,
        not_embargoed: bool,
    ) -> Result<Self> {
        let filter = ArticleFilter {
            visible_only,
            not_embargoed_at: not_embargoed.then(|| Utc::now().date_naive()),
        };
        let mut articles = querier.articles_by_issue(&issue.id, filter).await?;

        articles.sort_by_key(|a| a.order);
        let kind = classify(issue, articles.first());
        sort_articles(kind, &mut articles);

        Ok(Self { kind, articles })
    }

    /// 论文类文献，按 `order` 倒序
    pub fn highlighted(mut self) -> Vec<Article> {
        self.articles
            .retain(|a| HIGHLIGHTED_TYPES.contains(&a.doc_type.as_str()));
        self.articles.sort_by(|a, b| b.order.cmp(&a.order));
        self.articles
    }
}

/// 期号目录，顺序见 [`sort_articles`]
pub async fn list_articles<Q: Querier>(
    querier: &Q,
    issue: &Issue,
    visible_only: bool,
    not_embargoed: bool,
) -> Result<Vec<Article>> {
    Ok(IssueArticles::load(querier, issue, visible_only, not_embargoed)
        .await?
        .articles)
}

/// 精选文章：公开且未禁发的论文类文献，按 `order` 倒序
pub async fn list_highlighted<Q: Querier>(querier: &Q, issue: &Issue) -> Result<Vec<Article>> {
    Ok(IssueArticles::load(querier, issue, true, true)
        .await?
        .highlighted())
}

use chrono::NaiveDate;
use sqlx::{Postgres, QueryBuilder, types::Json};

use super::{DBPool, models::ArticleRow};
use crate::{
    content::{Article, Issue, Journal, PidKind},
    error::Result,
};

/// 按期号加载文章时的过滤条件
#[derive(Debug, Clone, Copy, Default)]
pub struct ArticleFilter {
    /// 只返回 `is_public` 的文章
    pub visible_only: bool,
    /// 只返回出版日期不晚于该日期的文章
    pub not_embargoed_at: Option<NaiveDate>,
}

/// 只读的文献仓库
///
/// 所有查询都是精确匹配，PID 修正由调用方负责。返回的 [`Article`]
/// 已连同其 [`Issue`] 和 [`Journal`] 一起加载。
pub trait Querier: Clone + Send + Sync + 'static {
    /// 按某一标识字段精确查找文章
    ///
    /// 多条记录匹配时返回 id 最小的一条。
    fn article(
        &self,
        kind: PidKind,
        value: &str,
    ) -> impl Future<Output = Result<Option<Article>>> + Send;

    /// 加载某期号下的文章，不保证顺序
    fn articles_by_issue(
        &self,
        issue_id: &str,
        filter: ArticleFilter,
    ) -> impl Future<Output = Result<Vec<Article>>> + Send;

    /// 按 id 查找期号
    fn issue(&self, issue_id: &str) -> impl Future<Output = Result<Option<Issue>>> + Send;

    /// 按旧站标签查找期号
    fn issue_by_label(
        &self,
        journal_id: &str,
        label: &str,
    ) -> impl Future<Output = Result<Option<Issue>>> + Send;

    /// 期刊的提前出版合成期号，存在多个时取年份最新的
    fn ahead_issue(&self, journal_id: &str) -> impl Future<Output = Result<Option<Issue>>> + Send;

    /// 按 id 查找期刊
    fn journal(&self, journal_id: &str) -> impl Future<Output = Result<Option<Journal>>> + Send;

    /// 按缩写查找期刊
    fn journal_by_acronym(
        &self,
        acronym: &str,
    ) -> impl Future<Output = Result<Option<Journal>>> + Send;
}

const ARTICLE_SELECT: &str = r#"
    SELECT a.id, a.pid, a.aop_pid, a.scielo_pids, a.title, a.authors, a.doi, a.type,
           a.original_language, a.languages, a.abstracts, a.htmls, a.pdfs, a.supplementary,
           a.xml, a."order", a.elocation, a.publication_date, a.is_public,
           a.unpublish_reason, a.is_aop,
           to_jsonb(i) AS issue, to_jsonb(j) AS journal
    FROM articles a
    INNER JOIN issues i ON a.issue_id = i.id
    INNER JOIN journals j ON i.journal_id = j.id
    "#;

/// 追加某一标识字段的等值条件
fn push_pid_condition(builder: &mut QueryBuilder<'_, Postgres>, kind: PidKind, value: String) {
    match kind {
        PidKind::Id => builder.push("a.id = ").push_bind(value),
        PidKind::Other => builder
            .push("jsonb_exists(a.scielo_pids -> 'other', ")
            .push_bind(value)
            .push(")"),
        PidKind::Pid => builder.push("a.pid = ").push_bind(value),
        PidKind::AopPid => builder.push("a.aop_pid = ").push_bind(value),
        PidKind::V1 => builder.push("a.scielo_pids ->> 'v1' = ").push_bind(value),
        PidKind::V2 => builder.push("a.scielo_pids ->> 'v2' = ").push_bind(value),
        PidKind::V3 => builder.push("a.scielo_pids ->> 'v3' = ").push_bind(value),
    };
}

impl Querier for DBPool {
    async fn article(&self, kind: PidKind, value: &str) -> Result<Option<Article>> {
        let mut builder = QueryBuilder::new(ARTICLE_SELECT);
        builder.push(" WHERE ");
        push_pid_condition(&mut builder, kind, value.to_string());
        builder.push(" ORDER BY a.id LIMIT 1");

        let row = builder
            .build_query_as::<ArticleRow>()
            .fetch_optional(self)
            .await?;
        Ok(row.map(Into::into))
    }

    async fn articles_by_issue(&self, issue_id: &str, filter: ArticleFilter) -> Result<Vec<Article>> {
        let mut builder = QueryBuilder::new(ARTICLE_SELECT);
        builder
            .push(" WHERE a.issue_id = ")
            .push_bind(issue_id.to_string());

        if filter.visible_only {
            builder.push(" AND a.is_public = TRUE");
        }
        if let Some(today) = filter.not_embargoed_at {
            builder.push(" AND a.publication_date <= ").push_bind(today);
        }

        let rows = builder
            .build_query_as::<ArticleRow>()
            .fetch_all(self)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn issue(&self, issue_id: &str) -> Result<Option<Issue>> {
        let issue = sqlx::query_scalar::<_, Json<Issue>>(
            r#"
            SELECT to_jsonb(i) FROM issues i
            WHERE i.id = $1
            "#,
        )
        .bind(issue_id)
        .fetch_optional(self)
        .await?;
        Ok(issue.map(|Json(i)| i))
    }

    async fn issue_by_label(&self, journal_id: &str, label: &str) -> Result<Option<Issue>> {
        let issue = sqlx::query_scalar::<_, Json<Issue>>(
            r#"
            SELECT to_jsonb(i) FROM issues i
            WHERE i.journal_id = $1
            AND i.label = $2
            ORDER BY i.id
            LIMIT 1
            "#,
        )
        .bind(journal_id)
        .bind(label)
        .fetch_optional(self)
        .await?;
        Ok(issue.map(|Json(i)| i))
    }

    async fn ahead_issue(&self, journal_id: &str) -> Result<Option<Issue>> {
        let issue = sqlx::query_scalar::<_, Json<Issue>>(
            r#"
            SELECT to_jsonb(i) FROM issues i
            WHERE i.journal_id = $1
            AND i.number = 'ahead'
            ORDER BY i.year DESC
            LIMIT 1
            "#,
        )
        .bind(journal_id)
        .fetch_optional(self)
        .await?;
        Ok(issue.map(|Json(i)| i))
    }

    async fn journal(&self, journal_id: &str) -> Result<Option<Journal>> {
        let journal = sqlx::query_scalar::<_, Json<Journal>>(
            r#"
            SELECT to_jsonb(j) FROM journals j
            WHERE j.id = $1
            "#,
        )
        .bind(journal_id)
        .fetch_optional(self)
        .await?;
        Ok(journal.map(|Json(j)| j))
    }

    async fn journal_by_acronym(&self, acronym: &str) -> Result<Option<Journal>> {
        let journal = sqlx::query_scalar::<_, Json<Journal>>(
            r#"
            SELECT to_jsonb(j) FROM journals j
            WHERE j.acronym = $1
            LIMIT 1
            "#,
        )
        .bind(acronym)
        .fetch_optional(self)
        .await?;
        Ok(journal.map(|Json(j)| j))
    }
}

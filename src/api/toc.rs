use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use axum_extra::extract::Query;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    content::Article,
    error::{Error, Result},
    state::AppState,
    storage::Querier,
    toc::{IssueArticles, IssueKind},
    visibility,
};

/// 期号目录
pub fn setup_route<Q: Querier>() -> Router<AppState<Q>> {
    Router::new().route("/issues/{issue_id}/articles", get(issue_articles::<Q>))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TocParams {
    highlighted: bool,
}

#[derive(Debug, Serialize)]
pub struct TocEntry {
    id: String,
    order: i32,
    publication_date: NaiveDate,
}

impl From<Article> for TocEntry {
    fn from(article: Article) -> Self {
        Self {
            id: article.ids.id,
            order: article.order,
            publication_date: article.publication_date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Toc {
    kind: IssueKind,
    articles: Vec<TocEntry>,
}

/// 公开且未禁发的文章目录
///
/// 期号或期刊未公开时返回对应的下线错误。
async fn issue_articles<Q: Querier>(
    State(app): State<AppState<Q>>,
    Path(issue_id): Path<String>,
    Query(params): Query<TocParams>,
) -> Result<Json<Toc>> {
    let querier = app.querier();
    let issue = querier.issue(&issue_id).await?.ok_or(Error::IssueNotFound)?;
    let journal = querier
        .journal(&issue.journal_id)
        .await?
        .ok_or(Error::JournalNotFound)?;
    visibility::validate_issue(&issue, &journal)?;

    let toc = IssueArticles::load(querier, &issue, true, true).await?;
    let kind = toc.kind;
    let articles = if params.highlighted {
        toc.highlighted()
    } else {
        toc.articles
    };

    Ok(Json(Toc {
        kind,
        articles: articles.into_iter().map(Into::into).collect(),
    }))
}

use chrono::NaiveDate;
use sqlx::types::Json;

use crate::content::{
    Abstract, Article, HtmlRendition, IdentifierSet, Issue, Journal, PdfRendition, ScieloPids,
    SupplementaryMaterial,
};

/// 文章查询行
///
/// 期号与期刊通过 `to_jsonb` 连接查询一并取出。
#[derive(Debug, sqlx::FromRow)]
pub struct ArticleRow {
    pub id: String,
    pub pid: Option<String>,
    pub aop_pid: Option<String>,
    pub scielo_pids: Json<ScieloPids>,
    pub title: String,
    pub authors: Vec<String>,
    pub doi: Option<String>,
    #[sqlx(rename = "type")]
    pub doc_type: String,
    pub original_language: String,
    pub languages: Vec<String>,
    pub abstracts: Json<Vec<Abstract>>,
    pub htmls: Json<Vec<HtmlRendition>>,
    pub pdfs: Json<Vec<PdfRendition>>,
    pub supplementary: Json<Vec<SupplementaryMaterial>>,
    pub xml: Option<String>,
    pub order: i32,
    pub elocation: Option<String>,
    pub publication_date: NaiveDate,
    pub is_public: bool,
    pub unpublish_reason: Option<String>,
    pub is_aop: bool,

    pub issue: Json<Issue>,
    pub journal: Json<Journal>,
}

impl From<ArticleRow> for Article {
    fn from(row: ArticleRow) -> Self {
        Article {
            ids: IdentifierSet {
                id: row.id,
                pid: row.pid,
                aop_pid: row.aop_pid,
                scielo_pids: row.scielo_pids.0,
            },
            issue: row.issue.0,
            journal: row.journal.0,
            title: row.title,
            authors: row.authors,
            doi: row.doi,
            doc_type: row.doc_type,
            original_language: row.original_language,
            languages: row.languages,
            abstracts: row.abstracts.0,
            htmls: row.htmls.0,
            pdfs: row.pdfs.0,
            supplementary: row.supplementary.0,
            xml: row.xml,
            order: row.order,
            elocation: row.elocation,
            publication_date: row.publication_date,
            is_public: row.is_public,
            unpublish_reason: row.unpublish_reason,
            is_aop: row.is_aop,
        }
    }
}

use std::sync::Arc;

use super::{ArticleFilter, Querier};
use crate::{
    content::{Article, Issue, Journal, PidKind},
    error::Result,
};

#[derive(Debug, Default)]
struct Records {
    journals: Vec<Journal>,
    issues: Vec<Issue>,
    articles: Vec<Article>,
}

/// 进程内的 [`Querier`] 实现
///
/// 构建后只读，克隆开销很小。文章内嵌的期号与期刊会以表中同 id 的记录为准。
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<Records>,
}

/// [`MemoryStore`] 构建器
#[derive(Debug, Default)]
pub struct MemoryStoreBuilder {
    records: Records,
}

impl MemoryStore {
    pub fn builder() -> MemoryStoreBuilder {
        MemoryStoreBuilder::default()
    }
}

impl MemoryStoreBuilder {
    pub fn journal(mut self, journal: Journal) -> Self {
        self.records.journals.push(journal);
        self
    }

    pub fn issue(mut self, issue: Issue) -> Self {
        self.records.issues.push(issue);
        self
    }

    pub fn article(mut self, article: Article) -> Self {
        self.records.articles.push(article);
        self
    }

    pub fn articles(mut self, articles: impl IntoIterator<Item = Article>) -> Self {
        self.records.articles.extend(articles);
        self
    }

    pub fn build(mut self) -> MemoryStore {
        let Records {
            journals,
            issues,
            articles,
        } = &mut self.records;

        for issue in articles.iter_mut().map(|a| &mut a.issue) {
            if let Some(stored) = issues.iter().find(|i| i.id == issue.id) {
                *issue = stored.clone();
            }
        }
        for article in articles.iter_mut() {
            if let Some(stored) = journals.iter().find(|j| j.id == article.issue.journal_id) {
                article.journal = stored.clone();
            }
        }

        MemoryStore {
            records: Arc::new(self.records),
        }
    }
}

impl Querier for MemoryStore {
    async fn article(&self, kind: PidKind, value: &str) -> Result<Option<Article>> {
        Ok(self
            .records
            .articles
            .iter()
            .filter(|a| a.ids.matches(kind, value))
            .min_by(|a, b| a.id().cmp(b.id()))
            .cloned())
    }

    async fn articles_by_issue(&self, issue_id: &str, filter: ArticleFilter) -> Result<Vec<Article>> {
        Ok(self
            .records
            .articles
            .iter()
            .filter(|a| a.issue.id == issue_id)
            .filter(|a| !filter.visible_only || a.is_public)
            .filter(|a| {
                filter
                    .not_embargoed_at
                    .is_none_or(|today| !a.is_embargoed_at(today))
            })
            .cloned()
            .collect())
    }

    async fn issue(&self, issue_id: &str) -> Result<Option<Issue>> {
        Ok(self
            .records
            .issues
            .iter()
            .find(|i| i.id == issue_id)
            .cloned())
    }

    async fn issue_by_label(&self, journal_id: &str, label: &str) -> Result<Option<Issue>> {
        Ok(self
            .records
            .issues
            .iter()
            .filter(|i| i.journal_id == journal_id && i.label == label)
            .min_by(|a, b| a.id.cmp(&b.id))
            .cloned())
    }

    async fn ahead_issue(&self, journal_id: &str) -> Result<Option<Issue>> {
        Ok(self
            .records
            .issues
            .iter()
            .filter(|i| i.journal_id == journal_id && i.is_ahead())
            .max_by_key(|i| i.year)
            .cloned())
    }

    async fn journal(&self, journal_id: &str) -> Result<Option<Journal>> {
        Ok(self
            .records
            .journals
            .iter()
            .find(|j| j.id == journal_id)
            .cloned())
    }

    async fn journal_by_acronym(&self, acronym: &str) -> Result<Option<Journal>> {
        Ok(self
            .records
            .journals
            .iter()
            .find(|j| j.acronym == acronym)
            .cloned())
    }
}

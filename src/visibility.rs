//! 发布可见性校验
//!
//! 沿 期刊 → 期号 → 文章 的层级检查，返回第一个违规项。优先级：
//! 禁发期 > 文章下线 > 期号下线 > 期刊下线，越具体的原因越先报告。

use chrono::{NaiveDate, Utc};

use crate::{
    content::{Article, Issue, Journal},
    error::{Error, Result},
};

/// 以当前 UTC 日期校验文章
pub fn validate(article: &Article) -> Result<()> {
    validate_at(article, Utc::now().date_naive())
}

/// 以给定日期校验文章
pub fn validate_at(article: &Article, today: NaiveDate) -> Result<()> {
    if article.is_embargoed_at(today) {
        return Err(Error::ArticleEmbargoed);
    }
    if !article.is_public {
        return Err(Error::ArticleUnpublished(article.reason().to_string()));
    }
    validate_issue(&article.issue, &article.journal)
}

/// 校验期号及其期刊，用于目录页
pub fn validate_issue(issue: &Issue, journal: &Journal) -> Result<()> {
    if !issue.is_public {
        return Err(Error::IssueUnpublished(issue.reason().to_string()));
    }
    if !journal.is_public {
        return Err(Error::JournalUnpublished(journal.reason().to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::testing::{article, date};

    fn today() -> NaiveDate {
        date(2020, 6, 1)
    }

    #[test]
    fn test_visible_article_passes() {
        let a = article("a1", "i1", 1);
        assert!(validate_at(&a, today()).is_ok());
    }

    #[test]
    fn test_embargo_wins_over_every_flag() {
        let mut a = article("a1", "i1", 1);
        a.publication_date = date(2020, 6, 2);
        a.is_public = false;
        a.unpublish_reason = Some("retracted".into());
        a.issue.is_public = false;
        a.journal.is_public = false;
        assert!(matches!(validate_at(&a, today()), Err(Error::ArticleEmbargoed)));
    }

    #[test]
    fn test_publication_today_is_not_embargoed() {
        let mut a = article("a1", "i1", 1);
        a.publication_date = today();
        assert!(validate_at(&a, today()).is_ok());
    }

    #[test]
    fn test_article_reason_before_issue_and_journal() {
        let mut a = article("a1", "i1", 1);
        a.is_public = false;
        a.unpublish_reason = Some("plagiarism".into());
        a.issue.is_public = false;
        a.issue.unpublish_reason = Some("issue problem".into());
        a.journal.is_public = false;
        a.journal.unpublish_reason = Some("journal ceased".into());

        match validate_at(&a, today()) {
            Err(Error::ArticleUnpublished(reason)) => assert_eq!(reason, "plagiarism"),
            other => panic!("应返回文章下线错误, 实际: {other:?}"),
        }
    }

    #[test]
    fn test_issue_reason_before_journal() {
        let mut a = article("a1", "i1", 1);
        a.issue.is_public = false;
        a.issue.unpublish_reason = Some("issue problem".into());
        a.journal.is_public = false;
        a.journal.unpublish_reason = Some("journal ceased".into());

        match validate_at(&a, today()) {
            Err(Error::IssueUnpublished(reason)) => assert_eq!(reason, "issue problem"),
            other => panic!("应返回期号下线错误, 实际: {other:?}"),
        }
    }

    #[test]
    fn test_public_article_in_hidden_journal_is_rejected() {
        let mut a = article("a1", "i1", 1);
        a.journal.is_public = false;
        a.journal.unpublish_reason = Some("journal ceased".into());

        match validate_at(&a, today()) {
            Err(Error::JournalUnpublished(reason)) => assert_eq!(reason, "journal ceased"),
            other => panic!("应返回期刊下线错误, 实际: {other:?}"),
        }
    }

    #[test]
    fn test_succeeds_iff_every_level_visible() {
        for bits in 0..16u8 {
            let mut a = article("a1", "i1", 1);
            let embargoed = bits & 1 != 0;
            a.is_public = bits & 2 == 0;
            a.issue.is_public = bits & 4 == 0;
            a.journal.is_public = bits & 8 == 0;
            if embargoed {
                a.publication_date = date(2021, 1, 1);
            }

            let expect_ok = !embargoed && a.is_public && a.issue.is_public && a.journal.is_public;
            assert_eq!(validate_at(&a, today()).is_ok(), expect_ok, "bits={bits:04b}");
        }
    }
}

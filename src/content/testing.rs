//! 单元测试共用的构造函数

use chrono::NaiveDate;

use super::{Article, IdentifierSet, Issue, IssueType, Journal};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("非法日期")
}

pub fn journal(id: &str) -> Journal {
    Journal {
        id: id.into(),
        acronym: format!("{id}-acron"),
        url_segment: format!("{id}-seg"),
        title: format!("Journal {id}"),
        is_public: true,
        unpublish_reason: None,
    }
}

pub fn issue(id: &str, journal_id: &str) -> Issue {
    Issue {
        id: id.into(),
        journal_id: journal_id.into(),
        kind: IssueType::Regular,
        volume: Some("10".into()),
        number: Some("2".into()),
        suppl_text: None,
        year: 2018,
        order: 2,
        label: "v10n2".into(),
        url_segment: "2018.v10n2".into(),
        is_public: true,
        unpublish_reason: None,
    }
}

pub fn ahead_issue(id: &str, journal_id: &str) -> Issue {
    Issue {
        kind: IssueType::Ahead,
        volume: None,
        number: Some(Issue::AHEAD_NUMBER.into()),
        label: "2018nahead".into(),
        url_segment: "2018.nahead".into(),
        ..issue(id, journal_id)
    }
}

/// 公开、已出版、原文为 `pt` 的研究论文
pub fn article(id: &str, issue_id: &str, order: i32) -> Article {
    Article {
        ids: IdentifierSet {
            id: id.into(),
            ..Default::default()
        },
        issue: issue(issue_id, "j1"),
        journal: journal("j1"),
        title: format!("Article {id}"),
        authors: vec!["Silva, J.".into()],
        doi: None,
        doc_type: "research-article".into(),
        original_language: "pt".into(),
        languages: Vec::new(),
        abstracts: Vec::new(),
        htmls: Vec::new(),
        pdfs: Vec::new(),
        supplementary: Vec::new(),
        xml: None,
        order,
        elocation: None,
        publication_date: date(2018, 1, 1),
        is_public: true,
        unpublish_reason: None,
        is_aop: false,
    }
}

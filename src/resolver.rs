//! 文章定位
//!
//! 从任意一代标识找到唯一的文章，并串联可见性校验与语言协商。

use crate::{
    content::{Article, IdentifierSet, PdfRendition, PidKind, PidNormalizer, SupplementaryMaterial},
    error::{Error, Result},
    language,
    storage::{ArticleFilter, Querier},
    toc::{self, Direction},
    visibility,
};

/// 旧版 PDF 链接对应的文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegacyRendition {
    Pdf(PdfRendition),
    Supplementary(SupplementaryMaterial),
}

impl LegacyRendition {
    pub fn url(&self) -> &str {
        match self {
            LegacyRendition::Pdf(pdf) => &pdf.url,
            LegacyRendition::Supplementary(material) => &material.url,
        }
    }
}

/// 旧版文件名，可能带有两字母语言前缀，如 `en_v10n2a03.pdf`
#[derive(Debug, PartialEq, Eq)]
struct LegacyFilename<'a> {
    raw: &'a str,
    lang: Option<&'a str>,
    bare: &'a str,
}

impl<'a> LegacyFilename<'a> {
    fn parse(raw: &'a str) -> Self {
        let bytes = raw.as_bytes();
        let prefixed = bytes.len() > 3
            && bytes[2] == b'_'
            && bytes[..2].iter().all(u8::is_ascii_lowercase);

        if prefixed {
            Self {
                raw,
                lang: Some(&raw[..2]),
                bare: &raw[3..],
            }
        } else {
            Self {
                raw,
                lang: None,
                bare: raw,
            }
        }
    }

    /// 同名文件有多个语言版本时优先原文语言，其次用语言前缀消歧
    fn match_pdf<'b>(&self, article: &'b Article) -> Option<&'b PdfRendition> {
        let exact = |p: &&PdfRendition| p.filename == self.raw;
        article
            .pdfs
            .iter()
            .filter(exact)
            .find(|p| p.lang == article.original_language)
            .or_else(|| article.pdfs.iter().find(exact))
            .or_else(|| {
                let lang = self.lang?;
                article
                    .pdfs
                    .iter()
                    .find(|p| p.filename == self.bare && p.lang == lang)
            })
    }
}

/// 文章定位器
pub struct Resolver<'q, Q> {
    querier: &'q Q,
    normalizer: &'q PidNormalizer,
}

impl<'q, Q: Querier> Resolver<'q, Q> {
    pub fn new(querier: &'q Q, normalizer: &'q PidNormalizer) -> Self {
        Self {
            querier,
            normalizer,
        }
    }

    /// 按 [`IdentifierSet::lookup_plan`] 的优先级查找，返回第一个命中
    ///
    /// 同一标识命中多条记录时取仓库返回的第一条（id 最小），不做唯一性检查。
    pub async fn resolve_by_any_pid(&self, value: &str) -> Result<Option<Article>> {
        for (kind, candidate) in IdentifierSet::lookup_plan(value, self.normalizer) {
            if let Some(article) = self.querier.article(kind, &candidate).await? {
                return Ok(Some(article));
            }
        }
        Ok(None)
    }

    /// 按主键加载，找不到时再查别名桶
    async fn load(&self, id: &str) -> Result<Article> {
        if let Some(article) = self.querier.article(PidKind::Id, id).await? {
            return Ok(article);
        }
        self.querier
            .article(PidKind::Other, id)
            .await?
            .ok_or(Error::ArticleNotFound)
    }

    /// 定位并校验文章，不涉及语言
    ///
    /// 给定 `journal_url_segment` 时，文章所属期刊必须与之一致，否则返回
    /// 携带实际期刊缩写的 [`Error::ArticleJournalNotFound`]。
    pub async fn resolve_article(
        &self,
        id: &str,
        journal_url_segment: Option<&str>,
    ) -> Result<Article> {
        let article = self.load(id).await?;
        visibility::validate(&article)?;

        if let Some(segment) = journal_url_segment {
            if article.journal.url_segment != segment {
                return Err(Error::ArticleJournalNotFound(article.journal.acronym.clone()));
            }
        }
        Ok(article)
    }

    /// 文章详情：定位、校验，然后协商语言
    pub async fn resolve_for_detail(
        &self,
        id: &str,
        journal_url_segment: Option<&str>,
        lang: Option<&str>,
        abstract_mode: bool,
    ) -> Result<(String, Article)> {
        let article = self.resolve_article(id, journal_url_segment).await?;
        let lang = language::negotiate(&article, lang, abstract_mode)?;
        Ok((lang, article))
    }

    /// 跳到相邻文章
    ///
    /// 当前文章按 [`Self::resolve_article`] 定位；相邻文章的语言使用不会失败的协商。
    pub async fn resolve_with_navigation(
        &self,
        id: &str,
        journal_url_segment: Option<&str>,
        lang: Option<&str>,
        abstract_mode: bool,
        direction: Direction,
    ) -> Result<(String, Article)> {
        let current = self.resolve_article(id, journal_url_segment).await?;
        let sibling = toc::goto(self.querier, &current, direction, abstract_mode).await?;
        let lang = language::negotiate_or_fallback(&sibling, lang, abstract_mode);
        Ok((lang, sibling))
    }

    /// 旧站 PDF 链接 `/pdf/{journal}/{issue_label}/{filename}`
    ///
    /// 以 `ahead` 结尾的标签指向期刊的提前出版期号。PDF 文件名找不到时，
    /// 再按补充材料的文件名查找。多篇文章共用文件名时优先可见的文章，
    /// 只有不可见的文章匹配时返回其不可见原因。
    pub async fn resolve_legacy_pdf(
        &self,
        journal_acronym: &str,
        issue_label: &str,
        legacy_filename: &str,
    ) -> Result<(Article, LegacyRendition)> {
        let journal = self
            .querier
            .journal_by_acronym(journal_acronym)
            .await?
            .ok_or(Error::JournalNotFound)?;

        let issue = if issue_label.ends_with("ahead") {
            self.querier.ahead_issue(&journal.id).await?
        } else {
            self.querier.issue_by_label(&journal.id, issue_label).await?
        }
        .ok_or(Error::IssueNotFound)?;

        let mut articles = self
            .querier
            .articles_by_issue(&issue.id, ArticleFilter::default())
            .await?;
        articles.sort_by_key(|a| (visibility::validate(a).is_err(), a.order));

        let name = LegacyFilename::parse(legacy_filename);
        let found = articles
            .iter()
            .find_map(|a| name.match_pdf(a).map(|p| (a, LegacyRendition::Pdf(p.clone()))))
            .or_else(|| {
                articles.iter().find_map(|a| {
                    a.supplementary
                        .iter()
                        .find(|m| m.filename == legacy_filename)
                        .map(|m| (a, LegacyRendition::Supplementary(m.clone())))
                })
            });

        let (article, rendition) = found.ok_or(Error::ArticleNotFound)?;
        visibility::validate(article)?;
        Ok((article.clone(), rendition))
    }
}

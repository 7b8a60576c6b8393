//! 语言协商
//!
//! 语言始终通过参数显式传入，这里不保存任何会话状态。

use crate::{
    content::Article,
    error::{Error, Result},
};

/// 按模式协商，全文模式见 [`negotiate_fulltext`]，摘要模式见 [`negotiate_abstract`]
pub fn negotiate(article: &Article, lang: Option<&str>, abstract_mode: bool) -> Result<String> {
    if abstract_mode {
        negotiate_abstract(article, lang)
    } else {
        negotiate_fulltext(article, lang)
    }
}

/// 全文语言
///
/// 未指定时使用 `original_language`；指定语言不在
/// `{original_language} ∪ languages` 中时返回 [`Error::ArticleLangNotFound`]。
pub fn negotiate_fulltext(article: &Article, lang: Option<&str>) -> Result<String> {
    let Some(lang) = lang else {
        return Ok(article.original_language.clone());
    };

    let valid = article.fulltext_languages();
    if valid.iter().any(|l| l == lang) {
        Ok(lang.to_string())
    } else {
        Err(Error::ArticleLangNotFound(valid))
    }
}

/// 摘要语言
///
/// 有效集合为拥有非空摘要的语言，可能不含 `original_language`。
/// 未指定时优先 `original_language`，否则取有效集合的第一个。
pub fn negotiate_abstract(article: &Article, lang: Option<&str>) -> Result<String> {
    let valid = article.abstract_languages();
    let wanted = lang.unwrap_or(&article.original_language);

    if valid.iter().any(|l| l == wanted) {
        return Ok(wanted.to_string());
    }
    match (lang, valid.first()) {
        (None, Some(first)) => Ok(first.clone()),
        _ => Err(Error::ArticleAbstractNotFound(valid)),
    }
}

/// 翻页时使用的协商，从不失败
///
/// 请求的语言不受支持时，改用有效集合的第一个语言。
pub fn negotiate_or_fallback(article: &Article, lang: Option<&str>, abstract_mode: bool) -> String {
    let valid = if abstract_mode {
        article.abstract_languages()
    } else {
        article.fulltext_languages()
    };

    match lang {
        Some(lang) if valid.iter().any(|l| l == lang) => lang.to_string(),
        _ => valid
            .into_iter()
            .next()
            .unwrap_or_else(|| article.original_language.clone()),
    }
}

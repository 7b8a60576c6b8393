//! 渲染分发
//!
//! 按请求的格式把已定位、已协商语言的文章转换为响应内容。

mod citation;
mod html;

use std::{fmt, str::FromStr};

pub use self::{
    citation::{CitationFormatter, CslDate, CslJsonFormatter, CslName, CslRecord},
    html::{HtmlGenerator, RemoteHtmlGenerator},
};
use crate::{
    content::Article,
    error::{Error, Result},
    fetch::Fetcher,
};

pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";
pub const XML_CONTENT_TYPE: &str = "application/xml";

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderFormat {
    #[default]
    Html,
    Pdf,
    Xml,
    Csl,
}

impl RenderFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderFormat::Html => "html",
            RenderFormat::Pdf => "pdf",
            RenderFormat::Xml => "xml",
            RenderFormat::Csl => "csl",
        }
    }
}

impl fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "html" => Ok(RenderFormat::Html),
            "pdf" => Ok(RenderFormat::Pdf),
            "xml" => Ok(RenderFormat::Xml),
            "csl" => Ok(RenderFormat::Csl),
            other => Err(Error::InvalidFormat(other.to_string())),
        }
    }
}

/// 渲染结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub payload: Vec<u8>,
    pub content_type: String,
    /// 同一格式下可切换的语言
    pub languages: Vec<String>,
}

/// 按 URL 扩展名推断文件的 MIME 类型
pub fn content_type_for(url: &str) -> &'static str {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    if path.to_ascii_lowercase().ends_with(".pdf") {
        "application/pdf"
    } else {
        "application/octet-stream"
    }
}

/// 渲染器
///
/// 全文 HTML 由 [`HtmlGenerator`] 从规范 XML 生成，引文由 [`CitationFormatter`] 输出。
#[derive(Debug, Clone)]
pub struct Renderer<G, C = CslJsonFormatter> {
    fetcher: Fetcher,
    generator: G,
    citation: C,
}

impl<G: HtmlGenerator> Renderer<G> {
    pub fn new(fetcher: Fetcher, generator: G) -> Self {
        Self::with_citation(fetcher, generator, CslJsonFormatter)
    }
}

impl<G: HtmlGenerator, C: CitationFormatter> Renderer<G, C> {
    pub fn with_citation(fetcher: Fetcher, generator: G, citation: C) -> Self {
        Self {
            fetcher,
            generator,
            citation,
        }
    }

    pub fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// 渲染文章
    ///
    /// `lang` 必须是已经协商过的语言。
    pub async fn render(
        &self,
        article: &Article,
        lang: &str,
        format: RenderFormat,
        abstract_mode: bool,
    ) -> Result<Rendered> {
        match format {
            RenderFormat::Html if abstract_mode => render_abstract(article, lang),
            RenderFormat::Html => self.render_html(article, lang).await,
            RenderFormat::Pdf => self.render_pdf(article, lang).await,
            RenderFormat::Xml => self.render_xml(article, lang).await,
            RenderFormat::Csl => self.render_csl(article, lang),
        }
    }

    async fn render_html(&self, article: &Article, lang: &str) -> Result<Rendered> {
        if let Some(xml_url) = &article.xml {
            let xml = self.fetcher.get(xml_url).await?;
            let html = self.generator.generate(&xml, lang).await?;
            return Ok(Rendered {
                payload: html.into_bytes(),
                content_type: HTML_CONTENT_TYPE.to_string(),
                languages: article.fulltext_languages(),
            });
        }

        // 协商结果不在旧版 HTML 列表中，按不存在处理
        let legacy = article
            .htmls
            .iter()
            .find(|h| h.lang == lang)
            .ok_or(Error::ArticleNotFound)?;
        let payload = self.fetcher.get(&legacy.url).await?;

        Ok(Rendered {
            payload,
            content_type: HTML_CONTENT_TYPE.to_string(),
            languages: article.htmls.iter().map(|h| h.lang.clone()).collect(),
        })
    }

    /// 该语言必须恰好有一个 PDF
    async fn render_pdf(&self, article: &Article, lang: &str) -> Result<Rendered> {
        let mut matching = article.pdfs.iter().filter(|p| p.lang == lang);
        let pdf = match (matching.next(), matching.next()) {
            (Some(pdf), None) => pdf,
            _ => {
                return Err(Error::RenditionNotFound {
                    format: RenderFormat::Pdf,
                    lang: lang.to_string(),
                });
            }
        };

        Ok(Rendered {
            payload: self.fetcher.get(&pdf.url).await?,
            content_type: content_type_for(&pdf.url).to_string(),
            languages: article.pdfs.iter().map(|p| p.lang.clone()).collect(),
        })
    }

    async fn render_xml(&self, article: &Article, lang: &str) -> Result<Rendered> {
        let url = article.xml.as_deref().ok_or_else(|| Error::RenditionNotFound {
            format: RenderFormat::Xml,
            lang: lang.to_string(),
        })?;

        Ok(Rendered {
            payload: self.fetcher.get(url).await?,
            content_type: XML_CONTENT_TYPE.to_string(),
            languages: article.fulltext_languages(),
        })
    }

    fn render_csl(&self, article: &Article, lang: &str) -> Result<Rendered> {
        let record = CslRecord::from_article(article, lang);
        Ok(Rendered {
            payload: self.citation.format(&record)?,
            content_type: self.citation.content_type().to_string(),
            languages: article.fulltext_languages(),
        })
    }
}

/// 摘要模式直接返回本地摘要，不发起网络请求
fn render_abstract(article: &Article, lang: &str) -> Result<Rendered> {
    let languages = article.abstract_languages();
    let text = article
        .abstract_text(lang)
        .ok_or_else(|| Error::ArticleAbstractNotFound(languages.clone()))?;

    Ok(Rendered {
        payload: text.as_bytes().to_vec(),
        content_type: HTML_CONTENT_TYPE.to_string(),
        languages,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{net::SocketAddr, time::Duration};

    use axum::{Router, http::StatusCode, routing::get};

    use super::*;
    use crate::{
        content::{Abstract, HtmlRendition, PdfRendition, testing::article},
        fetch::tests::serve,
    };

    /// 不访问网络的生成器，输出 `<lang>` 前缀加原始 XML
    #[derive(Debug, Clone, Default)]
    pub(crate) struct EchoGenerator;

    impl HtmlGenerator for EchoGenerator {
        async fn generate(&self, xml: &[u8], lang: &str) -> Result<String> {
            Ok(format!("<{lang}>{}", String::from_utf8_lossy(xml)))
        }
    }

    async fn files() -> SocketAddr {
        serve(
            Router::new()
                .route("/a1.xml", get(|| async { "<article/>" }))
                .route("/a1-pt.pdf", get(|| async { "%PDF-pt" }))
                .route("/a1-en.bin", get(|| async { "binary" }))
                .route("/a1-en.html", get(|| async { "<p>legacy en</p>" }))
                .route("/gone.pdf", get(|| async { StatusCode::NOT_FOUND })),
        )
        .await
    }

    fn renderer() -> Renderer<EchoGenerator> {
        Renderer::new(Fetcher::new(Duration::from_secs(2)), EchoGenerator)
    }

    fn abstract_of(language: &str, text: &str) -> Abstract {
        Abstract {
            language: language.into(),
            text: text.into(),
        }
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("pdf".parse::<RenderFormat>().unwrap(), RenderFormat::Pdf);
        assert_eq!("csl".parse::<RenderFormat>().unwrap(), RenderFormat::Csl);
        assert!(matches!(
            "docx".parse::<RenderFormat>(),
            Err(Error::InvalidFormat(s)) if s == "docx"
        ));
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("http://x/a.PDF"), "application/pdf");
        assert_eq!(content_type_for("http://x/a.pdf?dl=1"), "application/pdf");
        assert_eq!(content_type_for("http://x/a.bin"), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_html_from_xml() {
        let addr = files().await;
        let mut a = article("a1", "i1", 1);
        a.languages = vec!["en".into()];
        a.xml = Some(format!("http://{addr}/a1.xml"));

        let out = renderer().render(&a, "en", RenderFormat::Html, false).await.unwrap();
        assert_eq!(out.payload, b"<en><article/>");
        assert_eq!(out.content_type, HTML_CONTENT_TYPE);
        assert_eq!(out.languages, vec!["pt", "en"]);
    }

    #[tokio::test]
    async fn test_abstract_mode_uses_local_text() {
        let mut a = article("a1", "i1", 1);
        // 指向无法连接的地址，若发起网络请求则会失败
        a.xml = Some("http://127.0.0.1:9/a1.xml".into());
        a.abstracts = vec![abstract_of("en", "Results"), abstract_of("es", "Resultados")];

        let out = renderer().render(&a, "es", RenderFormat::Html, true).await.unwrap();
        assert_eq!(out.payload, "Resultados".as_bytes());
        assert_eq!(out.languages, vec!["en", "es"]);

        assert!(matches!(
            renderer().render(&a, "pt", RenderFormat::Html, true).await,
            Err(Error::ArticleAbstractNotFound(v)) if v == vec!["en", "es"]
        ));
    }

    #[tokio::test]
    async fn test_legacy_html() {
        let addr = files().await;
        let mut a = article("a1", "i1", 1);
        a.htmls = vec![HtmlRendition {
            lang: "en".into(),
            url: format!("http://{addr}/a1-en.html"),
        }];

        let out = renderer().render(&a, "en", RenderFormat::Html, false).await.unwrap();
        assert_eq!(out.payload, b"<p>legacy en</p>");
        assert_eq!(out.languages, vec!["en"]);

        assert!(matches!(
            renderer().render(&a, "pt", RenderFormat::Html, false).await,
            Err(Error::ArticleNotFound)
        ));
    }

    #[tokio::test]
    async fn test_pdf_requires_exactly_one_match() {
        let addr = files().await;
        let pdf = |lang: &str, path: &str| PdfRendition {
            lang: lang.into(),
            url: format!("http://{addr}/{path}"),
            filename: path.into(),
        };
        let mut a = article("a1", "i1", 1);
        a.pdfs = vec![pdf("pt", "a1-pt.pdf"), pdf("en", "a1-en.bin")];

        let out = renderer().render(&a, "pt", RenderFormat::Pdf, false).await.unwrap();
        assert_eq!(out.payload, b"%PDF-pt");
        assert_eq!(out.content_type, "application/pdf");

        let out = renderer().render(&a, "en", RenderFormat::Pdf, false).await.unwrap();
        assert_eq!(out.content_type, "application/octet-stream");

        assert!(matches!(
            renderer().render(&a, "es", RenderFormat::Pdf, false).await,
            Err(Error::RenditionNotFound { format: RenderFormat::Pdf, .. })
        ));

        a.pdfs.push(pdf("pt", "gone.pdf"));
        assert!(matches!(
            renderer().render(&a, "pt", RenderFormat::Pdf, false).await,
            Err(Error::RenditionNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_pdf_upstream_missing_is_not_retryable() {
        let addr = files().await;
        let mut a = article("a1", "i1", 1);
        a.pdfs = vec![PdfRendition {
            lang: "pt".into(),
            url: format!("http://{addr}/gone.pdf"),
            filename: "gone.pdf".into(),
        }];

        assert!(matches!(
            renderer().render(&a, "pt", RenderFormat::Pdf, false).await,
            Err(Error::NonRetryable { .. })
        ));
    }

    #[tokio::test]
    async fn test_xml_verbatim() {
        let addr = files().await;
        let mut a = article("a1", "i1", 1);

        assert!(matches!(
            renderer().render(&a, "pt", RenderFormat::Xml, false).await,
            Err(Error::RenditionNotFound { format: RenderFormat::Xml, .. })
        ));

        a.xml = Some(format!("http://{addr}/a1.xml"));
        let out = renderer().render(&a, "pt", RenderFormat::Xml, false).await.unwrap();
        assert_eq!(out.payload, b"<article/>");
        assert_eq!(out.content_type, XML_CONTENT_TYPE);
    }

    #[tokio::test]
    async fn test_csl_uses_formatter() {
        let out = renderer()
            .render(&article("a1", "i1", 1), "pt", RenderFormat::Csl, false)
            .await
            .unwrap();
        assert_eq!(out.content_type, "application/vnd.citationstyles.csl+json");
        let value: serde_json::Value = serde_json::from_slice(&out.payload).unwrap();
        assert_eq!(value[0]["type"], "article-journal");
    }
}

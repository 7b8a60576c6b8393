use std::time::Duration;

use reqwest::header;

use super::XML_CONTENT_TYPE;
use crate::{
    error::Result,
    fetch::{self, DEFAULT_TIMEOUT},
};

/// XML 转 HTML
pub trait HtmlGenerator: Clone + Send + Sync + 'static {
    /// 将规范 XML 转换为指定语言的 HTML
    fn generate(&self, xml: &[u8], lang: &str) -> impl Future<Output = Result<String>> + Send;
}

/// 调用远程转换服务的 [`HtmlGenerator`]
///
/// 将 XML 原样 POST 到 `endpoint?lang=..`，响应体即 HTML。
/// 失败的分类与 [`Fetcher`](crate::fetch::Fetcher) 相同。
#[derive(Debug, Clone)]
pub struct RemoteHtmlGenerator {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl RemoteHtmlGenerator {
    /// ```ignore
    /// let generator = RemoteHtmlGenerator::new("http://localhost:8080/html");
    /// ```
    pub fn new<T: Into<String>>(endpoint: T) -> Self {
        Self {
            client: fetch::client(),
            endpoint: endpoint.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl HtmlGenerator for RemoteHtmlGenerator {
    /// XML 按原始字节发送，编码由文档自身的 XML 声明决定
    async fn generate(&self, xml: &[u8], lang: &str) -> Result<String> {
        let url = fetch::parse_url(&self.endpoint)?;

        let resp = self
            .client
            .post(url)
            .timeout(self.timeout)
            .query(&[("lang", lang)])
            .header(header::CONTENT_TYPE, XML_CONTENT_TYPE)
            .body(xml.to_vec())
            .send()
            .await
            .map_err(|e| fetch::classify(&self.endpoint, e))?;
        fetch::check_status(&self.endpoint, resp.status())?;

        resp.text()
            .await
            .map_err(|e| fetch::classify(&self.endpoint, e))
    }
}

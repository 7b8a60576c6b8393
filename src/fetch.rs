//! 远程内容获取
//!
//! 只做一次请求，不重试。失败分为两类：
//!
//! - [`Error::Retryable`]：连接失败、超时、上游 5xx
//! - [`Error::NonRetryable`]：URL 无效或协议不支持、上游 4xx

use std::time::Duration;

use reqwest::{StatusCode, Url};

use crate::error::{Error, Result};

/// 默认超时
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// 内容获取器
///
/// 内部的 [`reqwest::Client`] 共享连接池，克隆开销很小。
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl Fetcher {
    /// 创建获取器，`timeout` 作为 [`Fetcher::get`] 的默认超时
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: client(),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// 使用默认超时获取
    pub async fn get(&self, url: &str) -> Result<Vec<u8>> {
        self.fetch(url, self.timeout).await
    }

    /// 获取 `url` 的完整内容
    pub async fn fetch(&self, url: &str, timeout: Duration) -> Result<Vec<u8>> {
        let parsed = parse_url(url)?;

        let resp = self
            .client
            .get(parsed)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify(url, e))?;
        check_status(url, resp.status())?;

        let bytes = resp.bytes().await.map_err(|e| classify(url, e))?;
        Ok(bytes.to_vec())
    }
}

/// 带包名与版本号 User-Agent 的客户端
pub(crate) fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .unwrap_or_default()
}

/// 只接受 http 与 https
pub(crate) fn parse_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|e| Error::NonRetryable {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(Error::NonRetryable {
            url: url.to_string(),
            reason: format!("unsupported scheme: {scheme}"),
        }),
    }
}

/// 按上游状态码分类
pub(crate) fn check_status(url: &str, status: StatusCode) -> Result<()> {
    if status.is_server_error() {
        Err(Error::Retryable {
            url: url.to_string(),
            reason: status.to_string(),
        })
    } else if status.is_client_error() {
        Err(Error::NonRetryable {
            url: url.to_string(),
            reason: status.to_string(),
        })
    } else {
        Ok(())
    }
}

/// 按传输层错误分类
///
/// 构造请求或跟随重定向失败属于永久性故障，其余（连接、超时、读取响应体）视为暂时性故障。
pub(crate) fn classify(url: &str, err: reqwest::Error) -> Error {
    let reason = err.to_string();
    let url = url.to_string();

    if err.is_builder() || err.is_redirect() {
        Error::NonRetryable { url, reason }
    } else {
        Error::Retryable { url, reason }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::net::SocketAddr;

    use axum::{Router, http::StatusCode, routing::get};
    use tokio::net::TcpListener;

    use super::*;

    /// 在随机端口启动一个本地上游服务
    pub(crate) async fn serve(router: Router) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await });
        addr
    }

    async fn upstream() -> SocketAddr {
        serve(
            Router::new()
                .route("/ok", get(|| async { "hello" }))
                .route("/missing", get(|| async { StatusCode::NOT_FOUND }))
                .route("/busy", get(|| async { StatusCode::SERVICE_UNAVAILABLE }))
                .route(
                    "/slow",
                    get(|| async {
                        tokio::time::sleep(Duration::from_secs(3)).await;
                        "late"
                    }),
                ),
        )
        .await
    }

    #[tokio::test]
    async fn test_fetch_ok() {
        let addr = upstream().await;
        let body = Fetcher::default()
            .get(&format!("http://{addr}/ok"))
            .await
            .unwrap();
        assert_eq!(body, b"hello");
    }

    #[tokio::test]
    async fn test_upstream_status_classification() {
        let addr = upstream().await;
        let fetcher = Fetcher::default();

        let missing = fetcher.get(&format!("http://{addr}/missing")).await;
        assert!(matches!(missing, Err(Error::NonRetryable { .. })), "{missing:?}");

        let busy = fetcher.get(&format!("http://{addr}/busy")).await;
        assert!(matches!(busy, Err(Error::Retryable { .. })), "{busy:?}");
    }

    #[tokio::test]
    async fn test_timeout_is_retryable() {
        let addr = upstream().await;
        let result = Fetcher::default()
            .fetch(&format!("http://{addr}/slow"), Duration::from_millis(200))
            .await;
        assert!(matches!(result, Err(Error::Retryable { .. })), "{result:?}");
    }

    #[tokio::test]
    async fn test_connection_refused_is_retryable() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };
        let result = Fetcher::default().get(&format!("http://{addr}/ok")).await;
        assert!(matches!(result, Err(Error::Retryable { .. })), "{result:?}");
    }

    #[tokio::test]
    async fn test_invalid_url_is_not_retryable() {
        let fetcher = Fetcher::default();
        for url in ["ftp://example.org/a.pdf", "not a url", "file:///etc/hosts"] {
            let result = fetcher.get(url).await;
            assert!(
                matches!(result, Err(Error::NonRetryable { .. })),
                "{url}: {result:?}"
            );
        }
    }
}

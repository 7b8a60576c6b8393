use std::io;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{render::RenderFormat, toc::Direction};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Article not found")]
    ArticleNotFound,

    #[error("Issue not found")]
    IssueNotFound,

    #[error("Journal not found")]
    JournalNotFound,

    #[error("Article is under embargo")]
    ArticleEmbargoed,

    #[error("Article unpublished: {0}")]
    ArticleUnpublished(String),

    #[error("Issue unpublished: {0}")]
    IssueUnpublished(String),

    #[error("Journal unpublished: {0}")]
    JournalUnpublished(String),

    /// 文章存在，但不属于请求的期刊；携带实际期刊缩写
    #[error("Article does not belong to this journal, see journal {0}")]
    ArticleJournalNotFound(String),

    #[error("Language not available, valid languages: {0:?}")]
    ArticleLangNotFound(Vec<String>),

    #[error("Abstract not available, valid languages: {0:?}")]
    ArticleAbstractNotFound(Vec<String>),

    #[error("There is no {0} article")]
    PreviousOrNextNotFound(Direction),

    #[error("No {format} rendition for language {lang}")]
    RenditionNotFound { format: RenderFormat, lang: String },

    /// 暂时性故障，稍后重试可能成功
    #[error("Upstream temporarily unavailable ({url}): {reason}")]
    Retryable { url: String, reason: String },

    /// 永久性故障，重试不会成功
    #[error("Upstream resource unavailable ({url}): {reason}")]
    NonRetryable { url: String, reason: String },

    #[error("Invalid direction: {0:?}, expected \"next\" or \"previous\"")]
    InvalidDirection(String),

    #[error("Invalid format: {0:?}")]
    InvalidFormat(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// 是否值得由调用方稍后重试
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Retryable { .. })
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidDirection(_) | Error::InvalidFormat(_) => StatusCode::BAD_REQUEST,
            Error::Retryable { .. } | Error::Sqlx(_) | Error::Config(_) | Error::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            Error::Sqlx(e) => {
                tracing::error!(%e, "sqlx error");
                json!({ "error": "Internal Server Error" })
            }
            Error::Io(e) => {
                tracing::error!(%e, "file io error");
                json!({ "error": "Internal Server Error" })
            }
            Error::Config(e) => {
                tracing::error!(%e, "config error");
                json!({ "error": "Internal Server Error" })
            }
            Error::Retryable { url, reason } => {
                tracing::error!(%url, %reason, "upstream fetch failed");
                json!({ "error": self.to_string() })
            }
            Error::ArticleLangNotFound(langs) | Error::ArticleAbstractNotFound(langs) => {
                json!({ "error": self.to_string(), "languages": langs })
            }
            Error::PreviousOrNextNotFound(direction) => {
                json!({ "error": self.to_string(), "direction": direction.as_str() })
            }
            Error::ArticleUnpublished(reason)
            | Error::IssueUnpublished(reason)
            | Error::JournalUnpublished(reason) => {
                json!({ "error": self.to_string(), "reason": reason })
            }
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

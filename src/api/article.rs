use std::sync::LazyLock;

use axum::{
    Router,
    extract::{Path, State},
    http::{HeaderName, StatusCode, header},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use axum_extra::extract::Query;
use reqwest::Url;
use serde::Deserialize;

use crate::{
    content::Article,
    error::{Error, Result},
    render::{RenderFormat, Rendered},
    state::AppState,
    storage::Querier,
    toc::Direction,
};

/// 可切换语言列表，逗号分隔
pub const AVAILABLE_LANGUAGES: HeaderName = HeaderName::from_static("x-available-languages");

/// 配置文章相关路由。
///
/// - `GET /j/{journal}/a/{id}`：期刊下的文章
/// - `GET /a/{id}`：不限定期刊的文章
/// - `GET /pid/{pid}`：任意一代 PID，永久重定向到文章地址
pub fn setup_route<Q: Querier>() -> Router<AppState<Q>> {
    Router::new()
        .route("/j/{journal}/a/{id}", get(journal_article::<Q>))
        .route("/a/{id}", get(article::<Q>))
        .route("/pid/{pid}", get(article_by_pid::<Q>))
}

/// 文章查询参数
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ArticleParams {
    lang: Option<String>,
    format: Option<String>,
    #[serde(rename = "abstract")]
    abstract_mode: bool,
    /// `next` 或 `previous`
    goto: Option<String>,
}

/// 拼接相对地址用的基准，只取其 path 与 query
static BASE_URL: LazyLock<Url> =
    LazyLock::new(|| Url::parse("http://localhost/").expect("Failed to parse base url"));

/// 文章的规范地址，路径段与查询参数都做百分号编码
pub fn article_url(
    article: &Article,
    lang: Option<&str>,
    format: RenderFormat,
    abstract_mode: bool,
) -> String {
    let mut url = BASE_URL.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.clear()
            .extend(["j", article.journal.url_segment.as_str(), "a", article.id()]);
    }

    let mut query = Vec::new();
    if let Some(lang) = lang {
        query.push(("lang", lang.to_string()));
    }
    if format != RenderFormat::Html {
        query.push(("format", format.to_string()));
    }
    if abstract_mode {
        query.push(("abstract", "true".to_string()));
    }
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }

    match url.query() {
        Some(query) => format!("{}?{query}", url.path()),
        None => url.path().to_string(),
    }
}

async fn journal_article<Q: Querier>(
    State(app): State<AppState<Q>>,
    Path((journal, id)): Path<(String, String)>,
    Query(params): Query<ArticleParams>,
) -> Result<Response> {
    show_article(&app, Some(&journal), &id, params).await
}

async fn article<Q: Querier>(
    State(app): State<AppState<Q>>,
    Path(id): Path<String>,
    Query(params): Query<ArticleParams>,
) -> Result<Response> {
    show_article(&app, None, &id, params).await
}

/// 定位、协商语言并渲染
///
/// 带 `goto` 时重定向到相邻文章的地址，保留格式与摘要模式。
async fn show_article<Q: Querier>(
    app: &AppState<Q>,
    journal: Option<&str>,
    id: &str,
    params: ArticleParams,
) -> Result<Response> {
    let format = params
        .format
        .as_deref()
        .map(str::parse::<RenderFormat>)
        .transpose()?
        .unwrap_or_default();
    let direction = params
        .goto
        .as_deref()
        .map(str::parse::<Direction>)
        .transpose()?;
    let lang = params.lang.as_deref();
    let resolver = app.resolver();

    if let Some(direction) = direction {
        let (lang, sibling) = resolver
            .resolve_with_navigation(id, journal, lang, params.abstract_mode, direction)
            .await?;
        let url = article_url(&sibling, Some(&lang), format, params.abstract_mode);
        return Ok(Redirect::to(&url).into_response());
    }

    let (lang, article) = resolver
        .resolve_for_detail(id, journal, lang, params.abstract_mode)
        .await?;
    let rendered = app
        .renderer()
        .render(&article, &lang, format, params.abstract_mode)
        .await?;

    Ok(rendered_response(&lang, rendered))
}

fn rendered_response(lang: &str, rendered: Rendered) -> Response {
    (
        [
            (header::CONTENT_TYPE, rendered.content_type),
            (header::CONTENT_LANGUAGE, lang.to_string()),
            (AVAILABLE_LANGUAGES, rendered.languages.join(",")),
        ],
        rendered.payload,
    )
        .into_response()
}

async fn article_by_pid<Q: Querier>(
    State(app): State<AppState<Q>>,
    Path(pid): Path<String>,
) -> Result<Response> {
    let article = app
        .resolver()
        .resolve_by_any_pid(&pid)
        .await?
        .ok_or(Error::ArticleNotFound)?;

    let url = article_url(&article, None, RenderFormat::Html, false);
    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, url)]).into_response())
}

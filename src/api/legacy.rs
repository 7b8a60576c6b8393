use axum::{
    Router,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{
    error::Result, render::content_type_for, resolver::LegacyRendition, state::AppState,
    storage::Querier,
};

/// 旧站 PDF 链接
pub fn setup_route<Q: Querier>() -> Router<AppState<Q>> {
    Router::new().route("/pdf/{journal}/{issue}/{filename}", get(legacy_pdf::<Q>))
}

/// 按期刊缩写、期号标签与文件名定位 PDF 或补充材料，并直接返回文件内容
async fn legacy_pdf<Q: Querier>(
    State(app): State<AppState<Q>>,
    Path((journal, issue, filename)): Path<(String, String, String)>,
) -> Result<Response> {
    let (_, rendition) = app
        .resolver()
        .resolve_legacy_pdf(&journal, &issue, &filename)
        .await?;

    let url = rendition.url();
    let payload = app.renderer().fetcher().get(url).await?;
    let content_type = content_type_for(url);

    Ok(match &rendition {
        LegacyRendition::Pdf(pdf) => (
            [
                (header::CONTENT_TYPE, content_type.to_string()),
                (header::CONTENT_LANGUAGE, pdf.lang.clone()),
            ],
            payload,
        )
            .into_response(),
        LegacyRendition::Supplementary(_) => {
            ([(header::CONTENT_TYPE, content_type)], payload).into_response()
        }
    })
}

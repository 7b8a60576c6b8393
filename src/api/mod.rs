mod article;
mod legacy;
mod toc;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::instrument;

use crate::{state::AppState, storage::Querier};

/// 设置应用的路由并绑定应用状态。
pub fn setup_route<Q: Querier>(app: AppState<Q>) -> Router {
    Router::new()
        .merge(article::setup_route::<Q>())
        .merge(legacy::setup_route::<Q>())
        .merge(toc::setup_route::<Q>())
        .with_state(app)
}

/// 在 `listen` 上启动 HTTP 服务。
#[instrument(name = "http server", skip(router))]
pub async fn run_server_with_router(router: Router, listen: &str) {
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind TCP listener on {listen}: {e}"));

    tracing::info!("listening on {listen}");

    axum::serve(listener, router)
        .await
        .expect("Failed to start Axum server");
}

/// 启动 HTTP 服务，自动设置路由和中间件。
pub async fn run_server<Q: Querier>(app: AppState<Q>, listen: &str) {
    let router = add_middlewares(setup_route(app));
    run_server_with_router(router, listen).await
}

/// 为路由添加请求追踪，请求失败时输出错误日志。
fn add_middlewares(router: Router) -> Router {
    fn log_failure(
        err: tower_http::classify::ServerErrorsFailureClass,
        latency: std::time::Duration,
        _span: &tracing::Span,
    ) {
        tracing::error!(error = %err, ?latency, "request failed");
    }

    router.layer(
        TraceLayer::new_for_http()
            .on_failure(log_failure)
            .on_request(|_req: &_, _span: &tracing::Span| {
                // 关闭请求日志
            }),
    )
}

use std::sync::Arc;

use crate::{
    config::Config,
    content::PidNormalizer,
    fetch::Fetcher,
    render::{RemoteHtmlGenerator, Renderer},
    resolver::Resolver,
    storage::Querier,
};

/// 应用程序上下文
///
/// [`AppState`] 封装了文献仓库、渲染器和 PID 修正表，提供统一访问入口。
#[derive(Clone)]
pub struct AppState<Q> {
    querier: Q,
    renderer: Renderer<RemoteHtmlGenerator>,
    normalizer: Arc<PidNormalizer>,
}

impl<Q: Querier> AppState<Q> {
    pub fn new(
        querier: Q,
        renderer: Renderer<RemoteHtmlGenerator>,
        normalizer: PidNormalizer,
    ) -> Self {
        Self {
            querier,
            renderer,
            normalizer: Arc::new(normalizer),
        }
    }

    /// 按配置创建渲染器与修正表
    pub fn from_config(querier: Q, config: &Config) -> Self {
        let fetcher = Fetcher::new(config.fetch_timeout());
        let generator =
            RemoteHtmlGenerator::new(&config.html_generator_url).with_timeout(fetcher.timeout());
        let renderer = Renderer::new(fetcher, generator);
        Self::new(querier, renderer, config.normalizer())
    }

    pub fn querier(&self) -> &Q {
        &self.querier
    }

    pub fn renderer(&self) -> &Renderer<RemoteHtmlGenerator> {
        &self.renderer
    }

    /// 获取绑定到当前仓库的定位器
    pub fn resolver(&self) -> Resolver<'_, Q> {
        Resolver::new(&self.querier, &self.normalizer)
    }
}

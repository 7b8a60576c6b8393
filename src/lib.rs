pub mod api;
pub mod config;
pub mod content;
pub mod error;
pub mod fetch;
pub mod language;
pub mod render;
pub mod resolver;
pub mod state;
pub mod storage;
pub mod toc;
pub mod visibility;

use tracing_subscriber::{EnvFilter, fmt::time::ChronoLocal};

use config::Config;
use state::AppState;

pub async fn run() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S%.3f".to_string()))
        .with_env_filter(EnvFilter::from_env("OPAC_LOG"))
        .init();

    let config = Config::from_env().expect("Failed to load config");
    let database_url = config
        .database_url
        .as_deref()
        .expect("DATABASE_URL not set");
    let pool = storage::new_db_pool(database_url, config.max_connections)
        .await
        .expect("Failed to connect database");

    let app = AppState::from_config(pool, &config);
    api::run_server(app, &config.listen).await
}

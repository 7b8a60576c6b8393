use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

use crate::error::Result;

/// 数据库连接池类型
pub type DBPool = sqlx::PgPool;

/// 创建数据库连接池
///
/// 空闲 60 秒回收，连接最长存活 25 分钟，获取连接超时 2 秒且获取前先测试，
/// 至少保持 2 个连接。
pub async fn new_db_pool(conn_url: &str, max_connections: u32) -> Result<DBPool> {
    let pool = PgPoolOptions::new()
        .idle_timeout(Duration::from_secs(60))
        .max_lifetime(Duration::from_secs(1500))
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(2))
        .test_before_acquire(true)
        .min_connections(2.min(max_connections))
        .connect(conn_url)
        .await?;
    Ok(pool)
}

/// 逐条执行 SQL 文件中以 `;` 分隔的语句
pub async fn migrate(db: &DBPool, file: &str) -> Result<()> {
    let content = tokio::fs::read_to_string(file).await?;

    for statement in content.split(';').map(str::trim) {
        if statement.is_empty() {
            continue;
        }
        sqlx::query(statement).execute(db).await?;
    }
    Ok(())
}

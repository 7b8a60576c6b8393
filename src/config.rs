//! 运行配置
//!
//! 从 toml 文件加载，所有字段都有默认值，文件可以只写需要覆盖的部分：
//!
//! ```toml
//! listen = "0.0.0.0:3000"
//! database_url = "postgres://opac@localhost/opac"
//! max_connections = 10
//! fetch_timeout_secs = 10
//! html_generator_url = "http://localhost:8080/html"
//! # 追加到内置表之后的 PID 前缀修正
//! pid_prefix_fixes = [["S0101-0000x", "S0101-0000X"]]
//! ```
//!
//! 环境变量 `DATABASE_URL` 与 `OPAC_LISTEN` 优先于文件中的值。

use std::{env, fs, io, path::Path, time::Duration};

use serde::Deserialize;

use crate::{content::PidNormalizer, error::Result};

/// 配置文件路径的环境变量，未设置时为 `opac.toml`
pub const CONFIG_ENV: &str = "OPAC_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "opac.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub listen: String,
    pub database_url: Option<String>,
    /// 连接池上限
    pub max_connections: u32,
    pub fetch_timeout_secs: u64,
    /// XML 转 HTML 服务地址
    pub html_generator_url: String,
    pub pid_prefix_fixes: Vec<(String, String)>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:3000".to_string(),
            database_url: None,
            max_connections: 10,
            fetch_timeout_secs: 10,
            html_generator_url: "http://localhost:8080/html".to_string(),
            pid_prefix_fixes: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// 读取配置文件，文件不存在时使用默认值
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// 按 [`CONFIG_ENV`] 加载，再应用环境变量覆盖
    pub fn from_env() -> Result<Self> {
        let path = env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Ok(Self::load(path)?.with_overrides(|key| env::var(key).ok()))
    }

    /// 用 `lookup` 返回的值覆盖 `DATABASE_URL` 与 `OPAC_LISTEN`
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup("DATABASE_URL") {
            self.database_url = Some(url);
        }
        if let Some(listen) = lookup("OPAC_LISTEN") {
            self.listen = listen;
        }
        self
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn normalizer(&self) -> PidNormalizer {
        PidNormalizer::new(self.pid_prefix_fixes.iter().cloned())
    }
}

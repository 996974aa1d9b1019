//! 客户端配置

use crate::error::Result;
use config::{Config as ConfigBuilder, Environment};
use serde::Deserialize;
use std::time::Duration;

/// 环境变量前缀：`SCHOOL_API_URL`、`SCHOOL_API_TIMEOUT`、`SCHOOL_API_VERIFY_TLS`
pub const ENV_PREFIX: &str = "SCHOOL_API";

/// 默认后端地址
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
/// 默认请求超时（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// 客户端配置
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// 后端 API 根地址，所有请求路径都拼接在它后面
    #[serde(rename = "url")]
    pub base_url: String,
    /// 请求超时（秒）
    pub timeout: u64,
    /// 是否验证 TLS 证书
    pub verify_tls: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT_SECS,
            verify_tls: true,
        }
    }
}

impl ClientConfig {
    /// 从环境变量读取配置，缺省时回落到默认值
    pub fn from_env() -> Result<Self> {
        let config = ConfigBuilder::builder()
            .set_default("url", DEFAULT_API_URL)?
            .set_default("timeout", DEFAULT_TIMEOUT_SECS)?
            .set_default("verify_tls", true)?
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true).ignore_empty(true))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// 使用指定地址，其余取默认值
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// 拼接完整 URL，容忍两侧多余的 `/`
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

//! 错误类型定义

use thiserror::Error;

/// 错误类型
#[derive(Debug, Error)]
pub enum Error {
    /// 401，会话已失效
    #[error("Unauthorized")]
    Unauthorized,

    /// 403
    #[error("Forbidden")]
    Forbidden,

    /// 404
    #[error("Resource not found")]
    NotFound,

    /// 500
    #[error("Internal server error")]
    Server,

    /// 其他非 2xx 状态码
    #[error("HTTP {status}: {}", message.as_deref().unwrap_or("no message"))]
    Http { status: u16, message: Option<String> },

    /// 业务错误（`success: false`）
    #[error("API error: {message}")]
    Api { message: String },

    /// 网络错误（未收到响应）
    #[error("Network error: {0}")]
    Network(String),

    /// 响应中缺少 data 字段
    #[error("No data in response")]
    MissingData,

    /// 编解码错误
    #[error("Encoding/Decoding error: {0}")]
    Encoding(String),

    /// 会话持久化错误
    #[error("Storage error: {0}")]
    Storage(String),

    /// 参数错误
    #[error("Invalid parameter: {0}")]
    InvalidParam(String),

    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// 由 HTTP 状态码和服务端消息构造错误
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        match status {
            401 => Error::Unauthorized,
            403 => Error::Forbidden,
            404 => Error::NotFound,
            500 => Error::Server,
            _ => Error::Http { status, message },
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Encoding(err.to_string())
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::InvalidParam(format!("Invalid configuration: {err}"))
    }
}

/// 结果类型
pub type Result<T> = std::result::Result<T, Error>;

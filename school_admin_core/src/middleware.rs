//! 请求中间件与错误提示
//!
//! 每个出站请求依次经过 [`Middleware::on_request`]；失败时按相反顺序调用
//! [`Middleware::on_error`]。默认链路为：
//!
//! 1. [`BearerAuth`]：注入 `Authorization: Bearer <token>`，401 时清空会话
//! 2. [`ErrorNotifier`]：把失败映射为 [`Notice`] 并交给 [`Notifier`]
//!
//! 因此一次 401 先提示“未授权”，再执行登出。

use crate::error::Error;
use crate::session::SessionStore;
use crate::transport::{ApiRequest, AUTHORIZATION};
use std::sync::Arc;
use tracing::warn;

/// 请求/错误钩子
pub trait Middleware: Send + Sync {
    fn on_request(&self, _request: &mut ApiRequest) {}

    fn on_error(&self, _error: &Error) {}
}

/// Bearer token 注入
pub struct BearerAuth {
    session: Arc<SessionStore>,
}

impl BearerAuth {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self { session }
    }
}

impl Middleware for BearerAuth {
    fn on_request(&self, request: &mut ApiRequest) {
        let token = self.session.token();
        if token.is_empty() {
            request.remove_header(AUTHORIZATION);
        } else {
            request.set_header(AUTHORIZATION, format!("Bearer {token}"));
        }
    }

    fn on_error(&self, error: &Error) {
        if matches!(error, Error::Unauthorized) {
            if let Err(e) = self.session.clear_user_info() {
                warn!("Failed to clear persisted session after 401: {}", e);
            }
        }
    }
}

/// 面向用户的失败提示
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Unauthorized,
    Forbidden,
    NotFound,
    ServerError,
    NetworkError,
    /// 服务端消息或通用兜底文案
    Message(String),
}

/// 服务端未给出消息时的兜底文案
pub const FALLBACK_MESSAGE: &str = "发生错误";

impl Notice {
    /// 只有传输层错误会产生提示
    pub fn from_error(error: &Error) -> Option<Self> {
        let notice = match error {
            Error::Unauthorized => Notice::Unauthorized,
            Error::Forbidden => Notice::Forbidden,
            Error::NotFound => Notice::NotFound,
            Error::Server => Notice::ServerError,
            Error::Network(_) => Notice::NetworkError,
            Error::Http { message, .. } => Notice::Message(
                message
                    .clone()
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
            ),
            Error::Api { message } => Notice::Message(message.clone()),
            _ => return None,
        };
        Some(notice)
    }

    pub fn text(&self) -> &str {
        match self {
            Notice::Unauthorized => "未授权，请重新登录",
            Notice::Forbidden => "拒绝访问",
            Notice::NotFound => "请求的资源不存在",
            Notice::ServerError => "服务器错误",
            Notice::NetworkError => "网络错误，请检查您的网络连接",
            Notice::Message(message) => message,
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

/// 提示通道
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice);
}

/// 写入日志的默认提示通道
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: &Notice) {
        warn!(notice = %notice, "Request failed");
    }
}

/// 失败提示
pub struct ErrorNotifier {
    notifier: Arc<dyn Notifier>,
}

impl ErrorNotifier {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }
}

impl Middleware for ErrorNotifier {
    fn on_error(&self, error: &Error) {
        if let Some(notice) = Notice::from_error(error) {
            self.notifier.notify(&notice);
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use parking_lot::Mutex;

    /// 记录所有提示，供断言
    #[derive(Default)]
    pub struct RecordingNotifier {
        notices: Mutex<Vec<Notice>>,
    }

    impl RecordingNotifier {
        pub fn notices(&self) -> Vec<Notice> {
            self.notices.lock().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notice: &Notice) {
            self.notices.lock().push(notice.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingNotifier;
    use super::*;
    use crate::session::SessionUpdate;
    use crate::storage::MemoryStorage;

    fn session_with_token(token: &str) -> Arc<SessionStore> {
        let store = SessionStore::load(MemoryStorage::new()).unwrap();
        store.set_user_info(SessionUpdate::token(token)).unwrap();
        Arc::new(store)
    }

    #[test]
    fn test_bearer_header_present_with_token() {
        let auth = BearerAuth::new(session_with_token("abc"));
        let mut request = ApiRequest::get("/user/profile");
        auth.on_request(&mut request);
        assert_eq!(request.header_value("authorization"), Some("Bearer abc"));
    }

    #[test]
    fn test_bearer_header_absent_without_token() {
        let session = Arc::new(SessionStore::load(MemoryStorage::new()).unwrap());
        let auth = BearerAuth::new(session);
        let mut request = ApiRequest::get("/auth/register-status").header(AUTHORIZATION, "Bearer stale");
        auth.on_request(&mut request);
        assert_eq!(request.header_value(AUTHORIZATION), None);
    }

    #[test]
    fn test_unauthorized_clears_session() {
        let session = session_with_token("abc");
        let auth = BearerAuth::new(session.clone());

        auth.on_error(&Error::Forbidden);
        assert!(session.is_logged_in());

        auth.on_error(&Error::Unauthorized);
        assert!(!session.is_logged_in());
        assert_eq!(session.token(), "");
    }

    #[test]
    fn test_notice_mapping() {
        let cases = [
            (Error::Unauthorized, "未授权，请重新登录"),
            (Error::Forbidden, "拒绝访问"),
            (Error::NotFound, "请求的资源不存在"),
            (Error::Server, "服务器错误"),
            (Error::Network("refused".into()), "网络错误，请检查您的网络连接"),
            (
                Error::Http { status: 409, message: Some("用户名已存在".into()) },
                "用户名已存在",
            ),
            (Error::Http { status: 502, message: None }, FALLBACK_MESSAGE),
        ];
        for (error, text) in cases {
            assert_eq!(Notice::from_error(&error).unwrap().text(), text);
        }
        assert_eq!(Notice::from_error(&Error::MissingData), None);
    }

    #[test]
    fn test_error_notifier_forwards_once() {
        let recorder = Arc::new(RecordingNotifier::default());
        let notifier = ErrorNotifier::new(recorder.clone());

        notifier.on_error(&Error::NotFound);
        notifier.on_error(&Error::Encoding("bad json".into()));

        assert_eq!(recorder.notices(), vec![Notice::NotFound]);
    }
}

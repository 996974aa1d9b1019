//! 带中间件链的 HTTP 客户端
//!
//! 所有领域接口都经由 [`HttpClient`] 发出请求。一次调用的流程：
//!
//! 1. 依次执行 [`Middleware::on_request`]
//! 2. [`Transport::execute`] 发送请求
//! 3. 非 2xx 按状态码分类为 [`Error`]；2xx 解包 `{success, data, message}`
//! 4. 失败时按相反顺序执行 [`Middleware::on_error`]，再把错误交回调用方
//!
//! 不做重试、缓存或合并，每次调用最多发送一次。

use crate::error::{Error, Result};
use crate::middleware::{Middleware, FALLBACK_MESSAGE};
use crate::transport::{ApiRequest, RawResponse, Transport};
use crate::types::{Ack, Envelope};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// 错误响应中可能携带的消息
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// HTTP 客户端
#[derive(Clone)]
pub struct HttpClient {
    transport: Arc<dyn Transport>,
    middleware: Vec<Arc<dyn Middleware>>,
}

impl HttpClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            middleware: Vec::new(),
        }
    }

    /// 追加中间件；请求阶段按追加顺序执行，错误阶段逆序执行
    pub fn with_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.middleware.push(middleware);
        self
    }

    /// 发送 JSON 请求并返回信封中的 `data`
    pub async fn request<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let envelope: Envelope<T> = self.dispatch(request).await?;
        envelope.data.ok_or(Error::MissingData)
    }

    /// 发送只需确认结果的请求，忽略 `data`；空响应体（如 204）视为成功
    pub async fn request_ack(&self, request: ApiRequest) -> Result<Ack> {
        let raw = self.send(request).await?;
        if raw.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Ack::default());
        }
        let envelope: Envelope<serde_json::Value> = serde_json::from_slice(&raw.body)?;
        let envelope = self.check(envelope)?;
        Ok(Ack {
            message: envelope.message,
        })
    }

    /// 同时接受 `{success, data}` 信封和直接返回的数据对象
    ///
    /// 登录、刷新 token 等接口在不同后端版本中两种形式都会出现。
    pub async fn request_either<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let raw = self.send(request).await?;
        let value: serde_json::Value = serde_json::from_slice(&raw.body)?;
        if value.get("success").is_none() {
            return Ok(serde_json::from_value(value)?);
        }
        let envelope: Envelope<T> = serde_json::from_value(value)?;
        self.check(envelope)?.data.ok_or(Error::MissingData)
    }

    /// 下载二进制内容
    pub async fn request_bytes(&self, request: ApiRequest) -> Result<Vec<u8>> {
        let raw = self.send(request.binary()).await?;
        Ok(raw.body)
    }

    async fn dispatch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<Envelope<T>> {
        let raw = self.send(request).await?;
        let envelope: Envelope<T> = serde_json::from_slice(&raw.body)?;
        self.check(envelope)
    }

    /// `success: false` 转为业务错误并提示
    fn check<T>(&self, envelope: Envelope<T>) -> Result<Envelope<T>> {
        if envelope.success {
            return Ok(envelope);
        }

        let err = Error::Api {
            message: envelope
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
        };
        self.fail(&err);
        Err(err)
    }

    /// 经过中间件链发送请求，返回 2xx 的原始响应
    pub async fn send(&self, mut request: ApiRequest) -> Result<RawResponse> {
        for middleware in &self.middleware {
            middleware.on_request(&mut request);
        }

        let method = request.method;
        let path = request.path.clone();
        debug!("{} {}", method, path);

        let result = match self.transport.execute(request).await {
            Ok(raw) if raw.is_success() => Ok(raw),
            Ok(raw) => Err(status_error(&raw)),
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            debug!("{} {} failed: {}", method, path, e);
            self.fail(e);
        }
        result
    }

    fn fail(&self, err: &Error) {
        for middleware in self.middleware.iter().rev() {
            middleware.on_error(err);
        }
    }
}

// 二进制请求失败时错误体同样是 JSON
fn status_error(raw: &RawResponse) -> Error {
    let message = serde_json::from_slice::<ErrorBody>(&raw.body)
        .ok()
        .and_then(|body| body.message);
    Error::from_status(raw.status, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::testing::RecordingNotifier;
    use crate::middleware::{BearerAuth, ErrorNotifier, Notice};
    use crate::session::{SessionStore, SessionUpdate};
    use crate::storage::MemoryStorage;
    use crate::transport::{MockTransport, ResponseType};
    use serde_json::json;

    struct Harness {
        session: Arc<SessionStore>,
        notices: Arc<RecordingNotifier>,
    }

    fn client(mock: MockTransport, token: Option<&str>) -> (HttpClient, Harness) {
        let session = Arc::new(SessionStore::load(MemoryStorage::new()).unwrap());
        if let Some(token) = token {
            session.set_user_info(SessionUpdate::token(token)).unwrap();
        }
        let notices = Arc::new(RecordingNotifier::default());
        let http = HttpClient::new(Arc::new(mock))
            .with_middleware(Arc::new(BearerAuth::new(session.clone())))
            .with_middleware(Arc::new(ErrorNotifier::new(notices.clone())));
        (http, Harness { session, notices })
    }

    #[tokio::test]
    async fn test_unwraps_envelope_data() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .withf(|req| req.path == "/stats/last-login" && req.header_value("Authorization") == Some("Bearer abc"))
            .times(1)
            .returning(|_| {
                Ok(RawResponse::json(
                    200,
                    &json!({ "success": true, "data": { "lastLoginTime": "2024-09-01 08:00" } }),
                ))
            });

        let (http, harness) = client(mock, Some("abc"));
        let data: serde_json::Value = http.request(ApiRequest::get("/stats/last-login")).await.unwrap();
        assert_eq!(data["lastLoginTime"], "2024-09-01 08:00");
        assert!(harness.notices.notices().is_empty());
    }

    #[tokio::test]
    async fn test_401_notifies_and_logs_out() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .times(1)
            .returning(|_| Ok(RawResponse::json(401, &json!({ "message": "token expired" }))));

        let (http, harness) = client(mock, Some("abc"));
        let result: Result<serde_json::Value> = http.request(ApiRequest::get("/user/profile")).await;

        assert!(matches!(result, Err(Error::Unauthorized)));
        assert_eq!(harness.session.token(), "");
        assert_eq!(harness.notices.notices(), vec![Notice::Unauthorized]);
    }

    #[tokio::test]
    async fn test_other_status_uses_server_message() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .times(1)
            .returning(|_| Ok(RawResponse::json(409, &json!({ "success": false, "message": "用户名已存在" }))));

        let (http, harness) = client(mock, Some("abc"));
        let result = http.request_ack(ApiRequest::post("/admin/teachers")).await;

        match result {
            Err(Error::Http { status, message }) => {
                assert_eq!(status, 409);
                assert_eq!(message.as_deref(), Some("用户名已存在"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(harness.notices.notices(), vec![Notice::Message("用户名已存在".into())]);
        assert!(harness.session.is_logged_in());
    }

    #[tokio::test]
    async fn test_unparseable_error_body_falls_back() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .times(1)
            .returning(|_| Ok(RawResponse::new(502, "<html>Bad Gateway</html>")));

        let (http, harness) = client(mock, None);
        let result = http.request_ack(ApiRequest::get("/todo/todos")).await;

        assert!(matches!(result, Err(Error::Http { status: 502, message: None })));
        assert_eq!(harness.notices.notices(), vec![Notice::Message(FALLBACK_MESSAGE.into())]);
    }

    #[tokio::test]
    async fn test_network_failure() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .times(1)
            .returning(|_| Err(Error::Network("connection refused".into())));

        let (http, harness) = client(mock, Some("abc"));
        let result = http.request_ack(ApiRequest::get("/todo/todos")).await;

        assert!(matches!(result, Err(Error::Network(_))));
        assert_eq!(harness.notices.notices(), vec![Notice::NetworkError]);
        assert!(harness.session.is_logged_in());
    }

    #[tokio::test]
    async fn test_success_false_is_api_error() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .times(1)
            .returning(|_| Ok(RawResponse::json(200, &json!({ "success": false, "message": "验证码错误" }))));

        let (http, harness) = client(mock, None);
        let result = http.request_ack(ApiRequest::post("/auth/register")).await;

        match result {
            Err(Error::Api { message }) => assert_eq!(message, "验证码错误"),
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(harness.notices.notices(), vec![Notice::Message("验证码错误".into())]);
    }

    #[tokio::test]
    async fn test_missing_data_is_not_notified() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .times(1)
            .returning(|_| Ok(RawResponse::json(200, &json!({ "success": true, "message": "ok" }))));

        let (http, harness) = client(mock, None);
        let result: Result<Vec<u32>> = http.request(ApiRequest::get("/todo/todos")).await;

        assert!(matches!(result, Err(Error::MissingData)));
        assert!(harness.notices.notices().is_empty());
    }

    #[tokio::test]
    async fn test_empty_body_acknowledges() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .withf(|req| req.path == "/todo/todos/3")
            .times(1)
            .returning(|_| Ok(RawResponse::new(204, Vec::new())));

        let (http, harness) = client(mock, Some("abc"));
        let ack = http.request_ack(ApiRequest::delete("/todo/todos/3")).await.unwrap();

        assert_eq!(ack, Ack::default());
        assert!(harness.notices.notices().is_empty());
    }

    #[tokio::test]
    async fn test_request_either_accepts_bare_body() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .times(1)
            .returning(|_| Ok(RawResponse::json(200, &json!({ "access_token": "new" }))));

        let (http, _harness) = client(mock, Some("abc"));
        let data: serde_json::Value = http.request_either(ApiRequest::post("/auth/refresh")).await.unwrap();
        assert_eq!(data["access_token"], "new");
    }

    #[tokio::test]
    async fn test_request_either_still_checks_envelope() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .times(1)
            .returning(|_| Ok(RawResponse::json(200, &json!({ "success": false, "message": "密码错误" }))));

        let (http, harness) = client(mock, None);
        let result: Result<serde_json::Value> = http.request_either(ApiRequest::post("/auth/login")).await;

        assert!(matches!(result, Err(Error::Api { .. })));
        assert_eq!(harness.notices.notices(), vec![Notice::Message("密码错误".into())]);
    }

    #[tokio::test]
    async fn test_binary_response_is_returned_raw() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .withf(|req| req.response_type == ResponseType::Binary)
            .times(1)
            .returning(|_| Ok(RawResponse::new(200, vec![0x50, 0x4b, 0x03, 0x04])));

        let (http, _harness) = client(mock, Some("abc"));
        let bytes = http
            .request_bytes(ApiRequest::get("/admin/teachers/template"))
            .await
            .unwrap();
        assert_eq!(bytes, vec![0x50, 0x4b, 0x03, 0x04]);
    }
}

//! 请求描述与网络传输
//!
//! [`ApiRequest`] 是一次后端调用的完整描述（方法、路径、查询参数、请求体、
//! 头部、响应类型、超时）。[`Transport`] 只负责把它发出去并带回状态码和原始
//! 响应体；信封解包、错误分类和提示都在 [`crate::http`] 中完成。

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const AUTHORIZATION: &str = "Authorization";
pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const MULTIPART_CONTENT_TYPE: &str = "multipart/form-data";

/// HTTP 方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// 期望的响应形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseType {
    /// `{success, data, message}` 信封
    #[default]
    Json,
    /// 原始字节（模板下载）
    Binary,
}

/// 上传文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFile {
    /// 表单字段名
    pub field: String,
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl FormFile {
    /// 以 `file` 字段上传内存中的内容
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime = mime_guess::from_path(&file_name).first_or_octet_stream().to_string();
        Self {
            field: "file".to_string(),
            file_name,
            mime,
            bytes,
        }
    }

    /// 读取本地文件
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::InvalidParam(format!("Not a file path: {}", path.display())))?
            .to_string();
        let bytes = tokio::fs::read(path).await?;
        Ok(Self::new(file_name, bytes))
    }
}

/// 请求体
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    /// 单字段 multipart 表单
    Multipart(FormFile),
}

/// 一次后端调用
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// 相对 `base_url` 的路径
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
    pub response_type: ResponseType,
    /// 覆盖默认超时
    pub timeout: Option<Duration>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: vec![(CONTENT_TYPE.to_string(), JSON_CONTENT_TYPE.to_string())],
            body: RequestBody::Empty,
            response_type: ResponseType::Json,
            timeout: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// 将参数对象展开为查询串；`None` 字段不出现
    pub fn query<Q: Serialize + ?Sized>(mut self, params: &Q) -> Result<Self> {
        let value = serde_json::to_value(params)?;
        let object = match value {
            serde_json::Value::Object(map) => map,
            serde_json::Value::Null => return Ok(self),
            other => {
                return Err(Error::InvalidParam(format!(
                    "Query parameters must be an object, got {other}"
                )))
            }
        };
        for (key, value) in object {
            match value {
                serde_json::Value::Null => {}
                serde_json::Value::Array(items) => {
                    for item in items {
                        self.query.push((key.clone(), scalar_to_string(&key, item)?));
                    }
                }
                scalar => {
                    let rendered = scalar_to_string(&key, scalar)?;
                    self.query.push((key, rendered));
                }
            }
        }
        Ok(self)
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn multipart(mut self, file: FormFile) -> Self {
        self.body = RequestBody::Multipart(file);
        self.header(CONTENT_TYPE, MULTIPART_CONTENT_TYPE)
    }

    /// 设置头部，同名（忽略大小写）旧值被替换
    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.remove_header(name);
        self.headers.push((name.to_string(), value.into()));
    }

    pub fn remove_header(&mut self, name: &str) {
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn binary(mut self) -> Self {
        self.response_type = ResponseType::Binary;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

fn scalar_to_string(key: &str, value: serde_json::Value) -> Result<String> {
    match value {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        other => Err(Error::InvalidParam(format!(
            "Query parameter {key} must be a scalar, got {other}"
        ))),
    }
}

/// 传输层返回的原始响应
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 以 JSON 值构造响应，测试中常用
    pub fn json(status: u16, value: &serde_json::Value) -> Self {
        Self::new(status, value.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 网络传输
///
/// 只有在没有收到任何响应时（连接失败、超时）才返回 `Err`，
/// 非 2xx 状态码作为 [`RawResponse`] 正常返回。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse>;
}

/// 基于 reqwest 的传输实现
pub struct ReqwestTransport {
    config: ClientConfig,
    http_client: Client,
}

impl ReqwestTransport {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout())
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self { config, http_client })
    }

    fn build(&self, request: ApiRequest) -> Result<reqwest::RequestBuilder> {
        let url = self.config.url(&request.path);
        let mut builder = self
            .http_client
            .request(request.method.into(), &url)
            .query(&request.query);

        let is_multipart = matches!(request.body, RequestBody::Multipart(_));
        for (name, value) in &request.headers {
            // reqwest 会为 multipart 生成带 boundary 的 Content-Type
            if is_multipart && name.eq_ignore_ascii_case(CONTENT_TYPE) {
                continue;
            }
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(file) => {
                let part = reqwest::multipart::Part::bytes(file.bytes)
                    .file_name(file.file_name)
                    .mime_str(&file.mime)
                    .map_err(|e| Error::InvalidParam(e.to_string()))?;
                builder.multipart(reqwest::multipart::Form::new().part(file.field, part))
            }
        };

        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse> {
        let url = self.config.url(&request.path);
        let builder = self.build(request)?;

        let response = builder
            .send()
            .await
            .map_err(|e| Error::Network(format!("Failed to connect to {}: {}", url, e)))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Network(format!("Failed to read response from {}: {}", url, e)))?;

        debug!("HTTP {} from {} ({} bytes)", status, url, body.len());
        Ok(RawResponse::new(status, body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Filter {
        page: u32,
        page_size: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        search: Option<String>,
        major: Option<String>,
        ids: Vec<u32>,
    }

    #[test]
    fn test_query_skips_missing_fields() {
        let request = ApiRequest::get("/admin/students")
            .query(&Filter {
                page: 1,
                page_size: 20,
                search: None,
                major: None,
                ids: vec![3, 4],
            })
            .unwrap();

        let mut query = request.query.clone();
        query.sort();
        assert_eq!(
            query,
            vec![
                ("ids".to_string(), "3".to_string()),
                ("ids".to_string(), "4".to_string()),
                ("page".to_string(), "1".to_string()),
                ("pageSize".to_string(), "20".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_rejects_non_object() {
        let result = ApiRequest::get("/x").query(&vec![1, 2]);
        assert!(matches!(result, Err(Error::InvalidParam(_))));
    }

    #[test]
    fn test_default_and_multipart_content_type() {
        let request = ApiRequest::post("/admin/teachers/import");
        assert_eq!(request.header_value("content-type"), Some(JSON_CONTENT_TYPE));

        let request = request.multipart(FormFile::new("teachers.xlsx", vec![1, 2, 3]));
        assert_eq!(request.header_value(CONTENT_TYPE), Some(MULTIPART_CONTENT_TYPE));
        assert_eq!(request.headers.len(), 1);
        match &request.body {
            RequestBody::Multipart(file) => {
                assert_eq!(file.field, "file");
                assert_eq!(
                    file.mime,
                    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
                );
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_form_file_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.csv");
        std::fs::write(&path, "name,major\n").unwrap();

        let file = FormFile::from_path(&path).await.unwrap();
        assert_eq!(file.file_name, "students.csv");
        assert_eq!(file.mime, "text/csv");
        assert_eq!(file.bytes, b"name,major\n");
    }

    #[test]
    fn test_form_file_mime_by_extension() {
        assert_eq!(FormFile::new("teachers.XLSX", vec![]).mime, "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet");
        assert_eq!(FormFile::new("students.xls", vec![]).mime, "application/vnd.ms-excel");
        assert_eq!(FormFile::new("photo.png", vec![]).mime, "image/png");
        assert_eq!(FormFile::new("noext", vec![]).mime, "application/octet-stream");
    }

    #[test]
    fn test_form_file_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let result = tokio_test::block_on(FormFile::from_path(dir.path().join("absent.xlsx")));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_build_multipart_request() {
        let transport = ReqwestTransport::new(ClientConfig::with_base_url("http://school.local/api/")).unwrap();
        let request = ApiRequest::post("/admin/teachers/import")
            .header(AUTHORIZATION, "Bearer abc")
            .multipart(FormFile::new("teachers.xlsx", vec![1, 2, 3]))
            .timeout(Duration::from_secs(60));

        let built = transport.build(request).unwrap().build().unwrap();

        assert_eq!(built.url().as_str(), "http://school.local/api/admin/teachers/import");
        assert_eq!(built.method(), &reqwest::Method::POST);
        assert_eq!(built.timeout(), Some(&Duration::from_secs(60)));
        let content_types: Vec<_> = built.headers().get_all(CONTENT_TYPE).iter().collect();
        assert_eq!(content_types.len(), 1);
        assert!(content_types[0]
            .to_str()
            .unwrap()
            .starts_with("multipart/form-data; boundary="));
        assert_eq!(built.headers().get(AUTHORIZATION).unwrap(), "Bearer abc");
    }

    #[test]
    fn test_build_encodes_query_and_keeps_json_type() {
        let transport = ReqwestTransport::new(ClientConfig::with_base_url("http://school.local/api")).unwrap();
        let filter = Filter {
            page: 1,
            page_size: 20,
            search: Some("王 同学".into()),
            major: None,
            ids: vec![],
        };
        let request = ApiRequest::get("/admin/students").query(&filter).unwrap();

        let built = transport.build(request).unwrap().build().unwrap();

        assert_eq!(
            built.url().as_str(),
            "http://school.local/api/admin/students?page=1&pageSize=20&search=%E7%8E%8B+%E5%90%8C%E5%AD%A6"
        );
        assert_eq!(built.timeout(), None);
        assert_eq!(built.headers().get(CONTENT_TYPE).unwrap(), JSON_CONTENT_TYPE);
    }

    #[test]
    fn test_reqwest_transport_creation() {
        assert!(ReqwestTransport::new(ClientConfig::default()).is_ok());
    }
}

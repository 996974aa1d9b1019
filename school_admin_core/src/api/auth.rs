//! 登录、注册与找回密码

use crate::error::Result;
use crate::http::HttpClient;
use crate::session::{SessionStore, SessionUpdate};
use crate::transport::ApiRequest;
use crate::types::*;
use serde_json::json;
use tracing::info;

pub struct AuthApi<'a> {
    http: &'a HttpClient,
    session: &'a SessionStore,
}

impl<'a> AuthApi<'a> {
    pub fn new(http: &'a HttpClient, session: &'a SessionStore) -> Self {
        Self { http, session }
    }

    /// 发送注册验证码
    pub async fn send_verification(&self, email: &str) -> Result<Ack> {
        let request = ApiRequest::post("/auth/send-verification").json(&json!({ "email": email }))?;
        self.http.request_ack(request).await
    }

    /// 用户注册
    pub async fn register(&self, data: &RegisterRequest) -> Result<Ack> {
        info!("Registering user: {}", data.username);
        let request = ApiRequest::post("/auth/register").json(data)?;
        self.http.request_ack(request).await
    }

    /// 用户登录，成功后写入会话；响应可带信封也可直接返回
    pub async fn login(&self, data: &LoginRequest) -> Result<LoginResponse> {
        info!("Logging in user: {}", data.username);

        let request = ApiRequest::post("/auth/login").json(data)?;
        let response: LoginResponse = self.http.request_either(request).await?;

        self.session.set_user_info(SessionUpdate {
            token: Some(response.access_token.clone()),
            role: Some(response.user.role),
            user_name: Some(response.user.name.clone()),
            user_id: Some(response.user.id.to_string()),
        })?;

        info!("User logged in successfully as {}", response.user.role);
        Ok(response)
    }

    /// 刷新 token
    pub async fn refresh_token(&self) -> Result<String> {
        let response: RefreshResponse = self.http.request_either(ApiRequest::post("/auth/refresh")).await?;
        self.session
            .set_user_info(SessionUpdate::token(response.access_token.clone()))?;
        Ok(response.access_token)
    }

    /// 是否开放注册
    pub async fn get_register_status(&self) -> Result<RegisterStatus> {
        self.http.request(ApiRequest::get("/auth/register-status")).await
    }

    /// 发送重置密码验证码
    pub async fn send_reset_code(&self, email: &str) -> Result<Ack> {
        let request = ApiRequest::post("/auth/send-reset-code").json(&json!({ "email": email }))?;
        self.http.request_ack(request).await
    }

    /// 重置密码
    pub async fn reset_password(&self, data: &ForgotPasswordRequest) -> Result<Ack> {
        let request = ApiRequest::post("/auth/reset-password").json(data)?;
        self.http.request_ack(request).await
    }
}

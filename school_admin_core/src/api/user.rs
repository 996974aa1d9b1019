//! 当前用户信息

use crate::error::Result;
use crate::http::HttpClient;
use crate::transport::ApiRequest;
use crate::types::*;

pub struct UserApi<'a> {
    http: &'a HttpClient,
}

impl<'a> UserApi<'a> {
    pub fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub async fn get_profile(&self) -> Result<UserProfile> {
        self.http.request(ApiRequest::get("/user/profile")).await
    }

    pub async fn update_profile(&self, data: &UpdateProfileRequest) -> Result<Ack> {
        self.http.request_ack(ApiRequest::put("/user/profile").json(data)?).await
    }

    pub async fn update_password(&self, data: &UpdatePasswordRequest) -> Result<Ack> {
        self.http.request_ack(ApiRequest::put("/user/password").json(data)?).await
    }
}

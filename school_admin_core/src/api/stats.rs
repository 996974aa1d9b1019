//! 首页统计

use crate::error::Result;
use crate::http::HttpClient;
use crate::transport::ApiRequest;
use crate::types::*;

pub struct StatsApi<'a> {
    http: &'a HttpClient,
}

impl<'a> StatsApi<'a> {
    pub fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub async fn get_overview(&self) -> Result<StatsOverview> {
        self.http.request(ApiRequest::get("/stats/overview")).await
    }

    /// 上次登录时间，首次登录时为 `None`
    pub async fn get_last_login(&self) -> Result<Option<String>> {
        let data: LastLogin = self.http.request(ApiRequest::get("/stats/last-login")).await?;
        Ok(data.last_login_time)
    }
}

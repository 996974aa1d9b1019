//! 待办事项

use crate::error::Result;
use crate::http::HttpClient;
use crate::transport::ApiRequest;
use crate::types::*;

pub struct TodoApi<'a> {
    http: &'a HttpClient,
}

impl<'a> TodoApi<'a> {
    pub fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub async fn get_todos(&self) -> Result<Vec<Todo>> {
        self.http.request(ApiRequest::get("/todo/todos")).await
    }

    pub async fn create_todo(&self, data: &TodoPatch) -> Result<Todo> {
        self.http.request(ApiRequest::post("/todo/todos").json(data)?).await
    }

    /// 状态流转（如 pending → completed）由服务端校验
    pub async fn update_todo(&self, id: i64, data: &TodoPatch) -> Result<Todo> {
        self.http
            .request(ApiRequest::put(format!("/todo/todos/{id}")).json(data)?)
            .await
    }

    pub async fn delete_todo(&self, id: i64) -> Result<Ack> {
        self.http
            .request_ack(ApiRequest::delete(format!("/todo/todos/{id}")))
            .await
    }
}

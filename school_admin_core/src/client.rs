//! 客户端入口
//!
//! [`SchoolClient`] 持有配置、会话和带中间件的 HTTP 客户端，
//! 按资源区域分发接口句柄：
//!
//! ```no_run
//! # async fn demo() -> school_admin_core::Result<()> {
//! use school_admin_core::{ClientConfig, MemoryStorage, SchoolClient, StudentListParams};
//!
//! let client = SchoolClient::new(ClientConfig::from_env()?, MemoryStorage::new())?;
//! let page = client.admin().get_student_list(&StudentListParams::page(1, 20)).await?;
//! println!("{} students", page.total);
//! # Ok(())
//! # }
//! ```

use crate::api::*;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::HttpClient;
use crate::middleware::{BearerAuth, ErrorNotifier, Notifier, TracingNotifier};
use crate::router::{RouteTable, Router};
use crate::session::SessionStore;
use crate::storage::KeyValueStorage;
use crate::transport::{ReqwestTransport, Transport};
use std::sync::Arc;
use tracing::info;

/// 学校管理系统客户端
pub struct SchoolClient {
    config: ClientConfig,
    session: Arc<SessionStore>,
    http: HttpClient,
}

impl SchoolClient {
    /// 创建新的客户端实例，会话从 `storage` 恢复
    pub fn new(config: ClientConfig, storage: impl KeyValueStorage + 'static) -> Result<Self> {
        let session = Arc::new(SessionStore::load(storage)?);
        let transport = Arc::new(ReqwestTransport::new(config.clone())?);
        Ok(Self::with_parts(config, session, transport, Arc::new(TracingNotifier)))
    }

    /// 由各部件组装客户端，测试和自定义提示通道时使用
    pub fn with_parts(
        config: ClientConfig,
        session: Arc<SessionStore>,
        transport: Arc<dyn Transport>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let http = HttpClient::new(transport)
            .with_middleware(Arc::new(BearerAuth::new(session.clone())))
            .with_middleware(Arc::new(ErrorNotifier::new(notifier)));

        Self { config, session, http }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// 当前会话
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// 绑定本客户端会话的标准路由器
    pub fn router(&self) -> Router {
        Router::new(RouteTable::standard(), self.session.clone())
    }

    /// 本地登出，清空会话
    pub fn logout(&self) -> Result<()> {
        self.session.clear_user_info()?;
        info!("User logged out successfully");
        Ok(())
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(&self.http, &self.session)
    }

    pub fn user(&self) -> UserApi<'_> {
        UserApi::new(&self.http)
    }

    pub fn student(&self) -> StudentApi<'_> {
        StudentApi::new(&self.http)
    }

    pub fn teacher(&self) -> TeacherApi<'_> {
        TeacherApi::new(&self.http)
    }

    pub fn admin(&self) -> AdminApi<'_> {
        AdminApi::new(&self.http)
    }

    pub fn dormitory(&self) -> DormitoryApi<'_> {
        DormitoryApi::new(&self.http)
    }

    pub fn stats(&self) -> StatsApi<'_> {
        StatsApi::new(&self.http)
    }

    pub fn todo(&self) -> TodoApi<'_> {
        TodoApi::new(&self.http)
    }
}

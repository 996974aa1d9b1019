//! 会话状态
//!
//! [`SessionStore`] 是当前登录身份的唯一持有者。它被 `Arc` 共享给
//! 传输层（注入 Bearer token、401 时登出）和路由守卫（读取角色），
//! 每次变更都同步写入 [`KeyValueStorage`]，启动时从中恢复。

use crate::error::Result;
use crate::storage::KeyValueStorage;
use crate::types::Role;
use parking_lot::RwLock;
use tracing::{debug, info, warn};

/// 持久化键名
pub const TOKEN_KEY: &str = "token";
pub const ROLE_KEY: &str = "userRole";
pub const USER_NAME_KEY: &str = "userName";
pub const USER_ID_KEY: &str = "userId";

const ALL_KEYS: [&str; 4] = [TOKEN_KEY, ROLE_KEY, USER_NAME_KEY, USER_ID_KEY];

/// 会话快照
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub role: Option<Role>,
    pub user_name: String,
    pub user_id: String,
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        !self.token.is_empty()
    }

    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }

    pub fn is_teacher(&self) -> bool {
        self.role == Some(Role::Teacher)
    }

    pub fn is_student(&self) -> bool {
        self.role == Some(Role::Student)
    }
}

/// 部分更新；`None` 和空字符串都表示保持原值
#[derive(Debug, Clone, Default)]
pub struct SessionUpdate {
    pub token: Option<String>,
    pub role: Option<Role>,
    pub user_name: Option<String>,
    pub user_id: Option<String>,
}

impl SessionUpdate {
    pub fn token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::default()
        }
    }
}

/// 会话存储
pub struct SessionStore {
    state: RwLock<Session>,
    storage: Box<dyn KeyValueStorage>,
}

impl SessionStore {
    /// 从持久化存储恢复会话
    pub fn load(storage: impl KeyValueStorage + 'static) -> Result<Self> {
        let role = storage.get(ROLE_KEY)?;
        let session = Session {
            token: storage.get(TOKEN_KEY)?.unwrap_or_default(),
            role: role.as_deref().and_then(Role::parse),
            user_name: storage.get(USER_NAME_KEY)?.unwrap_or_default(),
            user_id: storage.get(USER_ID_KEY)?.unwrap_or_default(),
        };
        debug!(logged_in = session.is_logged_in(), "Session rehydrated");

        Ok(Self {
            state: RwLock::new(session),
            storage: Box::new(storage),
        })
    }

    /// 当前会话快照
    pub fn snapshot(&self) -> Session {
        self.state.read().clone()
    }

    pub fn token(&self) -> String {
        self.state.read().token.clone()
    }

    pub fn role(&self) -> Option<Role> {
        self.state.read().role
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.read().is_logged_in()
    }

    pub fn is_admin(&self) -> bool {
        self.state.read().is_admin()
    }

    pub fn is_teacher(&self) -> bool {
        self.state.read().is_teacher()
    }

    pub fn is_student(&self) -> bool {
        self.state.read().is_student()
    }

    /// 合并非空字段，再逐个写入持久化存储
    ///
    /// 内存状态总是先更新；存储写入失败时其余键仍会尝试写入，返回第一个错误。
    pub fn set_user_info(&self, update: SessionUpdate) -> Result<()> {
        let token = update.token.filter(|s| !s.is_empty());
        let user_name = update.user_name.filter(|s| !s.is_empty());
        let user_id = update.user_id.filter(|s| !s.is_empty());

        {
            let mut state = self.state.write();
            if let Some(token) = &token {
                state.token = token.clone();
            }
            if let Some(role) = update.role {
                state.role = Some(role);
            }
            if let Some(name) = &user_name {
                state.user_name = name.clone();
            }
            if let Some(id) = &user_id {
                state.user_id = id.clone();
            }
        }

        let writes = [
            (TOKEN_KEY, token.as_deref()),
            (ROLE_KEY, update.role.map(|r| r.as_str())),
            (USER_NAME_KEY, user_name.as_deref()),
            (USER_ID_KEY, user_id.as_deref()),
        ];
        let mut first_err = None;
        for (key, value) in writes {
            let Some(value) = value else { continue };
            if let Err(e) = self.storage.set(key, value) {
                warn!("Failed to persist session key {}: {}", key, e);
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// 清空会话并删除全部持久化键
    ///
    /// 内存状态总是被清空；存储删除失败时返回第一个错误。
    pub fn clear_user_info(&self) -> Result<()> {
        *self.state.write() = Session::default();

        let mut first_err = None;
        for key in ALL_KEYS {
            if let Err(e) = self.storage.remove(key) {
                first_err.get_or_insert(e);
            }
        }
        info!("Session cleared");
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("SessionStore")
            .field("logged_in", &state.is_logged_in())
            .field("role", &state.role)
            .field("user_name", &state.user_name)
            .finish_non_exhaustive()
    }
}

//! 学校管理系统客户端核心库
//!
//! 提供教务/迎新后台 REST 接口的类型化封装，包括：
//! - 带 Bearer 认证、信封解包和错误提示的 HTTP 传输层
//! - 按资源划分的接口模块（认证、用户、学生、教师、管理、宿舍、统计、待办）
//! - 可持久化的会话状态
//! - 基于角色的路由守卫

pub mod api;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod http;
pub mod middleware;
pub mod router;
pub mod session;
pub mod storage;
pub mod transport;
pub mod types;

pub use client::SchoolClient;
pub use crate::config::ClientConfig;
pub use error::{Error, Result};
pub use middleware::{Notice, Notifier};
pub use router::{Navigation, RouteTable, Router};
pub use session::{Session, SessionStore, SessionUpdate};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use transport::{ApiRequest, FormFile, RawResponse, Transport};
pub use types::*;

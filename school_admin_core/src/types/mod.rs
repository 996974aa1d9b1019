//! 数据类型定义
//!
//! 与后端响应结构一一对应，客户端只负责收发，不做任何派生计算。

pub mod admin;
pub mod auth;
pub mod class;
pub mod common;
pub mod dormitory;
pub mod score;
pub mod settings;
pub mod stats;
pub mod todo;
pub mod user;

pub use admin::*;
pub use auth::*;
pub use class::*;
pub use common::*;
pub use dormitory::*;
pub use score::*;
pub use settings::*;
pub use stats::*;
pub use todo::*;
pub use user::*;

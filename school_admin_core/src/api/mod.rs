//! 按后端资源划分的接口模块
//!
//! 每个函数只做一件事：把类型化参数拼成一次 [`ApiRequest`](crate::transport::ApiRequest)，
//! 交给 [`HttpClient`](crate::http::HttpClient)，返回解包后的数据。
//! 错误不在这一层处理。

pub mod admin;
pub mod auth;
pub mod dormitory;
pub mod stats;
pub mod student;
pub mod teacher;
pub mod todo;
pub mod user;

pub use admin::AdminApi;
pub use auth::AuthApi;
pub use dormitory::DormitoryApi;
pub use stats::StatsApi;
pub use student::StudentApi;
pub use teacher::TeacherApi;
pub use todo::TodoApi;
pub use user::UserApi;

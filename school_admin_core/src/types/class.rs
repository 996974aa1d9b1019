//! 班级

use serde::{Deserialize, Serialize};

/// 创建班级
#[derive(Debug, Clone, Serialize)]
pub struct CreateClassData {
    pub name: String,
    pub major: String,
    pub department: String,
    pub year: i32,
    pub capacity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<i64>,
}

/// 班级信息；人数统计由服务端给出
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassInfo {
    pub id: i64,
    pub name: String,
    pub major: String,
    pub department: String,
    pub year: i32,
    pub capacity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<i64>,
    #[serde(default)]
    pub student_count: u32,
}

/// 院系与专业选项
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TeacherOptions {
    #[serde(default)]
    pub departments: Vec<String>,
    #[serde(default)]
    pub majors: Vec<String>,
}

/// 新生报到状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Pending,
    Reported,
    Deferred,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReportStatusUpdate {
    pub status: ReportStatus,
}

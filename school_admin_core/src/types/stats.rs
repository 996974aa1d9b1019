//! 统计与日志

use serde::{Deserialize, Serialize};

/// 首页统计概览，字段随角色不同而取舍
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsOverview {
    pub student_count: Option<u64>,
    pub teacher_count: Option<u64>,
    pub class_count: Option<u64>,
    pub today_visits: Option<u64>,
    pub managed_classes: Option<u64>,
    pub todo_count: Option<u64>,
    pub class_name: Option<String>,
    pub major: Option<String>,
    pub student_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastLogin {
    pub last_login_time: Option<String>,
}

/// 各专业报到情况
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MajorEnrollment {
    pub major: String,
    pub total: u64,
    pub reported: u64,
}

/// 新生报到统计
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentStats {
    pub total_students: u64,
    pub reported_students: u64,
    pub unreported_students: u64,
    pub report_rate: f64,
    #[serde(default)]
    pub by_major: Vec<MajorEnrollment>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EnrollmentTrendPoint {
    pub date: String,
    pub count: u64,
    pub accumulative: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendRange {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingOccupancy {
    pub building: String,
    pub total: u64,
    pub assigned: u64,
    pub available: u64,
}

/// 宿舍分配总体情况
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DormitoryStats {
    pub total_rooms: u64,
    pub assigned_rooms: u64,
    pub available_rooms: u64,
    #[serde(default)]
    pub by_building: Vec<BuildingOccupancy>,
}

/// 操作日志
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SystemLog {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(rename = "type")]
    pub log_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    pub created_at: String,
}

impl SystemLog {
    /// 日志类型的中文名称，未知类型原样返回
    pub fn type_label(&self) -> &str {
        crate::constants::LogType::parse(&self.log_type)
            .map(|t| t.label())
            .unwrap_or(self.log_type.as_str())
    }
}

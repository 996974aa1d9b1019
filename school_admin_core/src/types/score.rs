//! 成绩与排名

use serde::{Deserialize, Serialize};

/// 学生个人成绩
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentScore {
    pub total_score: f64,
    pub chinese: f64,
    pub math: f64,
    pub english: f64,
    pub physics: f64,
    pub chemistry: f64,
    pub biology: f64,
    pub province_rank: u32,
    pub major_rank: u32,
}

/// 专业排名
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MajorRanking {
    pub major_name: String,
    pub student_rank: u32,
    pub total_students: u32,
    pub average_score: f64,
    pub highest_score: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScoreBuckets {
    pub ranges: Vec<String>,
    pub counts: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GenderRatio {
    pub male: f64,
    pub female: f64,
}

/// 分数分布和性别比例
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScoreDistribution {
    pub score_distribution: ScoreBuckets,
    pub gender_ratio: GenderRatio,
}

/// 全校排名
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SchoolRanking {
    pub school_rank: u32,
    pub total_students: u32,
    pub percentile: f64,
}

/// 课程
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseInfo {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit: Option<f64>,
}

/// 某学生在某课程上的成绩，整条读写
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseScore {
    pub student_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
}

//! 用户与角色

use super::common::Gender;
use serde::{Deserialize, Serialize};

/// 用户角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }

    /// 未知字符串返回 `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Role::Admin),
            "teacher" => Some(Role::Teacher),
            "student" => Some(Role::Student),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 所有角色共有的字段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserBase {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_id: Option<i64>,
}

/// 教师档案
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherDetails {
    pub id: i64,
    pub department: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub research_area: Option<String>,
}

/// 学籍状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudentStatus {
    Active,
    Graduated,
    Suspended,
}

/// 学生档案
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentDetails {
    pub id: i64,
    pub student_id: String,
    pub major: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admission_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graduation_date: Option<String>,
    pub status: StudentStatus,
}

/// 用户信息，按 `role` 字段区分
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum UserProfile {
    Admin {
        #[serde(flatten)]
        base: UserBase,
    },
    Teacher {
        #[serde(flatten)]
        base: UserBase,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        teacher_profile: Option<TeacherDetails>,
    },
    Student {
        #[serde(flatten)]
        base: UserBase,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        student_profile: Option<StudentDetails>,
    },
}

impl UserProfile {
    pub fn role(&self) -> Role {
        match self {
            UserProfile::Admin { .. } => Role::Admin,
            UserProfile::Teacher { .. } => Role::Teacher,
            UserProfile::Student { .. } => Role::Student,
        }
    }

    pub fn base(&self) -> &UserBase {
        match self {
            UserProfile::Admin { base }
            | UserProfile::Teacher { base, .. }
            | UserProfile::Student { base, .. } => base,
        }
    }

    pub fn id(&self) -> i64 {
        self.base().id
    }

    pub fn name(&self) -> &str {
        &self.base().name
    }

    pub fn teacher_profile(&self) -> Option<&TeacherDetails> {
        match self {
            UserProfile::Teacher { teacher_profile, .. } => teacher_profile.as_ref(),
            _ => None,
        }
    }

    pub fn student_profile(&self) -> Option<&StudentDetails> {
        match self {
            UserProfile::Student { student_profile, .. } => student_profile.as_ref(),
            _ => None,
        }
    }
}

/// 更新个人信息
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
}

/// 修改密码
#[derive(Debug, Clone, Serialize)]
pub struct UpdatePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_teacher_profile_by_role_tag() {
        let profile: UserProfile = serde_json::from_value(json!({
            "id": 7,
            "username": "t_li",
            "email": "li@school.edu",
            "name": "李老师",
            "gender": "F",
            "role": "teacher",
            "teacher_profile": {
                "id": 3,
                "department": "计算机学院",
                "title": "副教授"
            }
        }))
        .unwrap();

        assert_eq!(profile.role(), Role::Teacher);
        assert_eq!(profile.name(), "李老师");
        assert_eq!(profile.base().gender, Some(Gender::Female));
        assert_eq!(profile.teacher_profile().unwrap().department, "计算机学院");
        assert!(profile.student_profile().is_none());
    }

    #[test]
    fn test_student_profile_by_role_tag() {
        let profile: UserProfile = serde_json::from_value(json!({
            "id": 42,
            "username": "s2024001",
            "email": "s@school.edu",
            "name": "王同学",
            "province": "zhejiang",
            "class_id": 5,
            "role": "student",
            "student_profile": {
                "id": 11,
                "student_id": "2024001",
                "major": "软件工程",
                "status": "active"
            }
        }))
        .unwrap();

        let details = profile.student_profile().unwrap();
        assert_eq!(details.status, StudentStatus::Active);
        assert_eq!(profile.base().class_id, Some(5));
        assert!(profile.teacher_profile().is_none());
    }

    #[test]
    fn test_role_round_trip_through_str() {
        for role in [Role::Admin, Role::Teacher, Role::Student] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse(""), None);
    }
}

//! 固定选项表

/// 操作日志类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogType {
    Login,
    Register,
    CreateTeacher,
    UpdateTeacher,
    DeleteTeacher,
    CreateClass,
    UpdateClass,
    UpdateStudent,
    UpdateProfile,
    UpdatePassword,
    UpdateSettings,
    ViewScores,
}

impl LogType {
    pub const ALL: [LogType; 12] = [
        LogType::Login,
        LogType::Register,
        LogType::CreateTeacher,
        LogType::UpdateTeacher,
        LogType::DeleteTeacher,
        LogType::CreateClass,
        LogType::UpdateClass,
        LogType::UpdateStudent,
        LogType::UpdateProfile,
        LogType::UpdatePassword,
        LogType::UpdateSettings,
        LogType::ViewScores,
    ];

    /// 线上取值
    pub fn as_str(&self) -> &'static str {
        match self {
            LogType::Login => "login",
            LogType::Register => "register",
            LogType::CreateTeacher => "create_teacher",
            LogType::UpdateTeacher => "update_teacher",
            LogType::DeleteTeacher => "delete_teacher",
            LogType::CreateClass => "create_class",
            LogType::UpdateClass => "update_class",
            LogType::UpdateStudent => "update_student",
            LogType::UpdateProfile => "update_profile",
            LogType::UpdatePassword => "update_password",
            LogType::UpdateSettings => "update_settings",
            LogType::ViewScores => "view_scores",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LogType::Login => "用户登录",
            LogType::Register => "用户注册",
            LogType::CreateTeacher => "创建教师",
            LogType::UpdateTeacher => "更新教师信息",
            LogType::DeleteTeacher => "删除教师",
            LogType::CreateClass => "创建班级",
            LogType::UpdateClass => "更新班级",
            LogType::UpdateStudent => "更新学生信息",
            LogType::UpdateProfile => "更新个人信息",
            LogType::UpdatePassword => "修改密码",
            LogType::UpdateSettings => "更新系统设置",
            LogType::ViewScores => "查看成绩",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

/// 教师职称
pub const TEACHER_TITLES: [&str; 4] = ["教授", "副教授", "讲师", "助教"];

/// 研究方向
pub const RESEARCH_AREAS: [&str; 23] = [
    "人工智能",
    "计算机视觉",
    "机器学习",
    "数据挖掘",
    "网络安全",
    "软件工程",
    "分布式系统",
    "云计算",
    "物联网",
    "嵌入式系统",
    "生物信息学",
    "计算数学",
    "应用数学",
    "统计学",
    "外语教学",
    "法学理论",
    "经济学",
    "艺术理论",
    "教育学",
    "体育学",
    "马克思主义理论",
    "国际关系",
    "科学技术史",
];

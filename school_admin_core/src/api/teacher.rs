//! 教师端：班级、报到与课程成绩

use crate::error::Result;
use crate::http::HttpClient;
use crate::transport::ApiRequest;
use crate::types::*;

pub struct TeacherApi<'a> {
    http: &'a HttpClient,
}

impl<'a> TeacherApi<'a> {
    pub fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub async fn create_class(&self, data: &CreateClassData) -> Result<Ack> {
        self.http.request_ack(ApiRequest::post("/teacher/classes").json(data)?).await
    }

    /// 院系与专业选项
    pub async fn get_options(&self) -> Result<TeacherOptions> {
        self.http.request(ApiRequest::get("/teacher/options")).await
    }

    pub async fn get_classes(&self) -> Result<Vec<ClassInfo>> {
        self.http.request(ApiRequest::get("/teacher/classes")).await
    }

    pub async fn get_class_students(&self, class_id: i64) -> Result<Vec<UserProfile>> {
        self.http
            .request(ApiRequest::get(format!("/teacher/classes/{class_id}/students")))
            .await
    }

    /// 更新学生报到状态
    pub async fn update_report_status(&self, student_id: i64, status: ReportStatus) -> Result<Ack> {
        let request = ApiRequest::put(format!("/teacher/students/{student_id}/report-status"))
            .json(&ReportStatusUpdate { status })?;
        self.http.request_ack(request).await
    }

    pub async fn get_courses(&self) -> Result<Vec<CourseInfo>> {
        self.http.request(ApiRequest::get("/teacher/courses")).await
    }

    pub async fn get_course_scores(&self, course_id: i64) -> Result<Vec<CourseScore>> {
        self.http
            .request(ApiRequest::get(format!("/teacher/courses/{course_id}/scores")))
            .await
    }

    /// 整条写入某学生的课程成绩
    pub async fn update_course_score(&self, course_id: i64, score: &CourseScore) -> Result<CourseScore> {
        let path = format!("/teacher/courses/{course_id}/scores/{}", score.student_id);
        self.http.request(ApiRequest::put(path).json(score)?).await
    }
}

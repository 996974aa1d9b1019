//! 管理端：学生、教师、班级、系统设置、日志、导入导出与迎新统计

use crate::error::Result;
use crate::http::HttpClient;
use crate::transport::{ApiRequest, FormFile};
use crate::types::*;
use std::time::Duration;
use tracing::info;

/// 报表、模板类请求的超时
pub const REPORT_TIMEOUT: Duration = Duration::from_secs(60);

pub struct AdminApi<'a> {
    http: &'a HttpClient,
}

impl<'a> AdminApi<'a> {
    pub fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    // 学生管理

    pub async fn get_student_list(&self, params: &StudentListParams) -> Result<Page<UserProfile>> {
        self.http.request(ApiRequest::get("/admin/students").query(params)?).await
    }

    pub async fn update_student(&self, id: i64, data: &UpdateStudentData) -> Result<Ack> {
        self.http
            .request_ack(ApiRequest::put(format!("/admin/students/{id}")).json(data)?)
            .await
    }

    pub async fn delete_student(&self, id: i64) -> Result<Ack> {
        info!("Deleting student {}", id);
        self.http
            .request_ack(ApiRequest::delete(format!("/admin/students/{id}")))
            .await
    }

    // 教师管理

    pub async fn get_teacher_list(&self, params: &TeacherListParams) -> Result<Page<UserProfile>> {
        self.http.request(ApiRequest::get("/admin/teachers").query(params)?).await
    }

    pub async fn create_teacher(&self, data: &CreateTeacherData) -> Result<UserProfile> {
        info!("Creating teacher account: {}", data.username);
        self.http.request(ApiRequest::post("/admin/teachers").json(data)?).await
    }

    pub async fn update_teacher(&self, id: i64, data: &UpdateTeacherData) -> Result<Ack> {
        self.http
            .request_ack(ApiRequest::put(format!("/admin/teachers/{id}")).json(data)?)
            .await
    }

    pub async fn delete_teacher(&self, id: i64) -> Result<Ack> {
        info!("Deleting teacher {}", id);
        self.http
            .request_ack(ApiRequest::delete(format!("/admin/teachers/{id}")))
            .await
    }

    /// 批量导入教师，上传单个 `file` 字段
    pub async fn import_teachers(&self, file: FormFile) -> Result<ImportResult> {
        self.import("/admin/teachers/import", file).await
    }

    pub async fn download_teacher_template(&self) -> Result<Vec<u8>> {
        self.http
            .request_bytes(ApiRequest::get("/admin/teachers/template").timeout(REPORT_TIMEOUT))
            .await
    }

    /// 批量导入学生，上传单个 `file` 字段
    pub async fn import_students(&self, file: FormFile) -> Result<ImportResult> {
        self.import("/admin/students/import", file).await
    }

    pub async fn download_student_template(&self) -> Result<Vec<u8>> {
        self.http
            .request_bytes(ApiRequest::get("/admin/students/template").timeout(REPORT_TIMEOUT))
            .await
    }

    async fn import(&self, path: &str, file: FormFile) -> Result<ImportResult> {
        info!("Importing {} ({} bytes) via {}", file.file_name, file.bytes.len(), path);
        let result: ImportResult = self
            .http
            .request(ApiRequest::post(path).multipart(file).timeout(REPORT_TIMEOUT))
            .await?;
        info!(
            "Import finished: {} total, {} succeeded, {} failed",
            result.total, result.success, result.failed
        );
        Ok(result)
    }

    // 班级

    pub async fn create_class(&self, data: &CreateClassData) -> Result<Ack> {
        self.http.request_ack(ApiRequest::post("/admin/classes").json(data)?).await
    }

    pub async fn get_classes(&self) -> Result<Vec<ClassInfo>> {
        self.http.request(ApiRequest::get("/admin/classes")).await
    }

    // 系统设置与日志

    pub async fn get_system_settings(&self) -> Result<SystemSettings> {
        self.http.request(ApiRequest::get("/admin/settings")).await
    }

    pub async fn update_system_settings(&self, patch: &SettingsPatch) -> Result<SystemSettings> {
        info!("Updating system settings");
        self.http.request(ApiRequest::put("/admin/settings").json(patch)?).await
    }

    pub async fn get_system_logs(&self, params: &SystemLogParams) -> Result<Page<SystemLog>> {
        self.http.request(ApiRequest::get("/admin/logs").query(params)?).await
    }

    // 迎新统计

    pub async fn get_enrollment_stats(&self) -> Result<EnrollmentStats> {
        self.http.request(ApiRequest::get("/admin/enrollment/stats")).await
    }

    /// 每日报到趋势，日期格式由服务端约定（`YYYY-MM-DD`）
    pub async fn get_enrollment_trend(&self, start_date: &str, end_date: &str) -> Result<Vec<EnrollmentTrendPoint>> {
        let range = TrendRange {
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
        };
        let request = ApiRequest::get("/admin/enrollment/trend")
            .query(&range)?
            .timeout(REPORT_TIMEOUT);
        self.http.request(request).await
    }

    pub async fn get_dormitory_stats(&self) -> Result<DormitoryStats> {
        self.http.request(ApiRequest::get("/admin/dormitory/stats")).await
    }

    pub async fn assign_dormitories(&self, data: &AssignDormitoriesRequest) -> Result<Ack> {
        info!("Assigning {} students to {} {}", data.student_ids.len(), data.building, data.room);
        self.http
            .request_ack(ApiRequest::post("/admin/dormitory/assign").json(data)?)
            .await
    }
}

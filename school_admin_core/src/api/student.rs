//! 学生端：个人成绩与排名

use crate::error::Result;
use crate::http::HttpClient;
use crate::transport::ApiRequest;
use crate::types::*;

pub struct StudentApi<'a> {
    http: &'a HttpClient,
}

impl<'a> StudentApi<'a> {
    pub fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub async fn get_scores(&self) -> Result<StudentScore> {
        self.http.request(ApiRequest::get("/student/scores")).await
    }

    pub async fn get_major_ranking(&self) -> Result<MajorRanking> {
        self.http.request(ApiRequest::get("/student/major-ranking")).await
    }

    pub async fn get_score_distribution(&self) -> Result<ScoreDistribution> {
        self.http.request(ApiRequest::get("/student/score-distribution")).await
    }

    pub async fn get_school_ranking(&self) -> Result<SchoolRanking> {
        self.http.request(ApiRequest::get("/student/school-ranking")).await
    }
}

//! 宿舍管理

use crate::error::Result;
use crate::http::HttpClient;
use crate::transport::ApiRequest;
use crate::types::*;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RoomLookup<'r> {
    building_id: i64,
    room_number: &'r str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BuildingFilter {
    building_id: i64,
}

pub struct DormitoryApi<'a> {
    http: &'a HttpClient,
}

impl<'a> DormitoryApi<'a> {
    pub fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    // 宿舍楼

    pub async fn get_buildings(&self) -> Result<Vec<DormitoryBuilding>> {
        self.http.request(ApiRequest::get("/dormitory/buildings")).await
    }

    pub async fn create_building(&self, data: &CreateBuildingRequest) -> Result<DormitoryBuilding> {
        self.http.request(ApiRequest::post("/dormitory/buildings").json(data)?).await
    }

    pub async fn update_building(&self, id: i64, data: &UpdateBuildingRequest) -> Result<DormitoryBuilding> {
        self.http
            .request(ApiRequest::put(format!("/dormitory/buildings/{id}")).json(data)?)
            .await
    }

    pub async fn delete_building(&self, id: i64) -> Result<Ack> {
        self.http
            .request_ack(ApiRequest::delete(format!("/dormitory/buildings/{id}")))
            .await
    }

    // 房间

    pub async fn get_rooms(&self, building_id: i64) -> Result<Vec<DormitoryRoom>> {
        self.http
            .request(ApiRequest::get(format!("/dormitory/rooms/{building_id}")))
            .await
    }

    pub async fn create_room(&self, data: &CreateRoomRequest) -> Result<DormitoryRoom> {
        self.http.request(ApiRequest::post("/dormitory/rooms").json(data)?).await
    }

    pub async fn update_room(&self, id: i64, data: &UpdateRoomRequest) -> Result<DormitoryRoom> {
        self.http
            .request(ApiRequest::put(format!("/dormitory/rooms/{id}")).json(data)?)
            .await
    }

    pub async fn delete_room(&self, id: i64) -> Result<Ack> {
        self.http
            .request_ack(ApiRequest::delete(format!("/dormitory/rooms/{id}")))
            .await
    }

    pub async fn batch_create_rooms(&self, data: &BatchCreateRoomsRequest) -> Result<Ack> {
        self.http
            .request_ack(ApiRequest::post("/dormitory/rooms/batch").json(data)?)
            .await
    }

    pub async fn get_room_details(&self, building_id: i64, room_number: &str) -> Result<RoomDetails> {
        let request = ApiRequest::get("/dormitory/room-details").query(&RoomLookup {
            building_id,
            room_number,
        })?;
        self.http.request(request).await
    }

    // 入住分配

    pub async fn assign_room(&self, data: &AssignRoomRequest) -> Result<Ack> {
        self.http.request_ack(ApiRequest::post("/dormitory/assign").json(data)?).await
    }

    /// 退宿
    pub async fn checkout(&self, assignment_id: i64) -> Result<Ack> {
        self.http
            .request_ack(ApiRequest::post(format!("/dormitory/assignments/{assignment_id}/checkout")))
            .await
    }

    /// 调宿
    pub async fn change_room(&self, assignment_id: i64, new_room_id: i64) -> Result<Ack> {
        let request = ApiRequest::post(format!("/dormitory/assignments/{assignment_id}/change"))
            .json(&ChangeRoomRequest { new_room_id })?;
        self.http.request_ack(request).await
    }

    pub async fn get_unassigned_students(&self, building_id: i64) -> Result<Vec<UnassignedStudent>> {
        let request = ApiRequest::get("/dormitory/unassigned-students").query(&BuildingFilter { building_id })?;
        self.http.request(request).await
    }
}

use axum::{
    extract::{rejection::{JsonRejection, PathRejection, QueryRejection}, Path, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

use common::types::Message;
use service::vehicle_service::{self, NewVehicle, VehicleChanges};
use service::views::{VehicleWithBrand, VehicleWithOwners};

use crate::errors::JsonApiError;
use crate::routes::{non_null, AppState, ListQuery};

#[derive(Debug, Deserialize)]
pub struct CreateVehicleInput {
    pub model: String,
    pub brand_id: i32,
    pub door_count: i32,
    pub color: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateVehicleInput {
    #[serde(default, deserialize_with = "non_null")]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub brand_id: Option<i32>,
    #[serde(default, deserialize_with = "non_null")]
    pub door_count: Option<i32>,
    #[serde(default, deserialize_with = "non_null")]
    pub color: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AssignOwnerInput {
    pub person_id: i32,
}

#[utoipa::path(
    get, path = "/vehicles", tag = "vehicles",
    params(ListQuery),
    responses(
        (status = 200, description = "List OK", body = [crate::openapi::VehicleDoc]),
        (status = 400, description = "Bad Query")
    )
)]
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<VehicleWithBrand>>, JsonApiError> {
    let Query(q) = query?;
    Ok(Json(vehicle_service::list_vehicles(&state.db, q.into()).await?))
}

#[utoipa::path(
    post, path = "/vehicles", tag = "vehicles",
    request_body = crate::openapi::CreateVehicleDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::VehicleDoc),
        (status = 400, description = "Brand Does Not Exist"),
        (status = 422, description = "Validation Error")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateVehicleInput>, JsonRejection>,
) -> Result<Json<VehicleWithBrand>, JsonApiError> {
    let Json(input) = payload?;
    info!(model = %input.model, brand_id = input.brand_id, "vehicle_create_request");
    let new = NewVehicle {
        model: input.model,
        brand_id: input.brand_id,
        door_count: input.door_count,
        color: input.color,
    };
    Ok(Json(vehicle_service::create_vehicle(&state.db, new).await?))
}

#[utoipa::path(
    get, path = "/vehicles/{id}", tag = "vehicles",
    params(("id" = i32, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::VehicleDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<VehicleWithBrand>, JsonApiError> {
    let Path(id) = id?;
    Ok(Json(vehicle_service::get_vehicle(&state.db, id).await?))
}

#[utoipa::path(
    put, path = "/vehicles/{id}", tag = "vehicles",
    params(("id" = i32, Path, description = "Vehicle ID")),
    request_body = crate::openapi::UpdateVehicleDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::VehicleDoc),
        (status = 400, description = "Brand Does Not Exist"),
        (status = 404, description = "Not Found"),
        (status = 422, description = "Validation Error")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateVehicleInput>, JsonRejection>,
) -> Result<Json<VehicleWithBrand>, JsonApiError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    let changes = VehicleChanges {
        model: input.model,
        brand_id: input.brand_id,
        door_count: input.door_count,
        color: input.color,
    };
    Ok(Json(vehicle_service::update_vehicle(&state.db, id, changes).await?))
}

#[utoipa::path(
    delete, path = "/vehicles/{id}", tag = "vehicles",
    params(("id" = i32, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Message>, JsonApiError> {
    let Path(id) = id?;
    vehicle_service::delete_vehicle(&state.db, id).await?;
    Ok(Json(Message::new("vehicle deleted")))
}

#[utoipa::path(
    get, path = "/vehicles/{id}/owners", tag = "vehicles",
    params(("id" = i32, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle with owners"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn owners(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<VehicleWithOwners>, JsonApiError> {
    let Path(id) = id?;
    Ok(Json(vehicle_service::list_owners(&state.db, id).await?))
}

#[utoipa::path(
    post, path = "/vehicles/{id}/owners", tag = "vehicles",
    params(("id" = i32, Path, description = "Vehicle ID")),
    request_body = crate::openapi::AssignOwnerDoc,
    responses(
        (status = 200, description = "Owner assigned", body = crate::openapi::MessageDoc),
        (status = 400, description = "Already Owner"),
        (status = 404, description = "Vehicle or Person Not Found")
    )
)]
pub async fn assign_owner(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<AssignOwnerInput>, JsonRejection>,
) -> Result<Json<Message>, JsonApiError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    vehicle_service::assign_owner(&state.db, id, input.person_id).await?;
    Ok(Json(Message::new(format!("person {} assigned as owner of vehicle {}", input.person_id, id))))
}

#[utoipa::path(
    delete, path = "/vehicles/{id}/owners/{person_id}", tag = "vehicles",
    params(
        ("id" = i32, Path, description = "Vehicle ID"),
        ("person_id" = i32, Path, description = "Person ID")
    ),
    responses(
        (status = 200, description = "Owner removed", body = crate::openapi::MessageDoc),
        (status = 404, description = "Vehicle, Person or Ownership Not Found")
    )
)]
pub async fn remove_owner(
    State(state): State<AppState>,
    ids: Result<Path<(i32, i32)>, PathRejection>,
) -> Result<Json<Message>, JsonApiError> {
    let Path((id, person_id)) = ids?;
    vehicle_service::remove_owner(&state.db, id, person_id).await?;
    Ok(Json(Message::new(format!("person {} removed as owner of vehicle {}", person_id, id))))
}

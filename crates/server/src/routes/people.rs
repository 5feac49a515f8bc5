use axum::{
    extract::{rejection::{JsonRejection, PathRejection, QueryRejection}, Path, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

use common::types::Message;
use models::person;
use service::person_service::{self, PersonChanges};
use service::views::PersonWithVehicles;

use crate::errors::JsonApiError;
use crate::routes::{non_null, AppState, ListQuery};

#[derive(Debug, Deserialize)]
pub struct CreatePersonInput {
    pub name: String,
    pub national_id: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePersonInput {
    #[serde(default, deserialize_with = "non_null")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub national_id: Option<String>,
}

#[utoipa::path(
    get, path = "/people", tag = "people",
    params(ListQuery),
    responses(
        (status = 200, description = "List OK", body = [crate::openapi::PersonDoc]),
        (status = 400, description = "Bad Query")
    )
)]
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<person::Model>>, JsonApiError> {
    let Query(q) = query?;
    Ok(Json(person_service::list_people(&state.db, q.into()).await?))
}

#[utoipa::path(
    post, path = "/people", tag = "people",
    request_body = crate::openapi::CreatePersonDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::PersonDoc),
        (status = 400, description = "Duplicate National ID"),
        (status = 422, description = "Validation Error")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreatePersonInput>, JsonRejection>,
) -> Result<Json<person::Model>, JsonApiError> {
    let Json(input) = payload?;
    info!("person_create_request");
    let created = person_service::create_person(&state.db, &input.name, &input.national_id).await?;
    Ok(Json(created))
}

#[utoipa::path(
    get, path = "/people/{id}", tag = "people",
    params(("id" = i32, Path, description = "Person ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::PersonDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<person::Model>, JsonApiError> {
    let Path(id) = id?;
    Ok(Json(person_service::get_person(&state.db, id).await?))
}

#[utoipa::path(
    put, path = "/people/{id}", tag = "people",
    params(("id" = i32, Path, description = "Person ID")),
    request_body = crate::openapi::UpdatePersonDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::PersonDoc),
        (status = 400, description = "Duplicate National ID"),
        (status = 404, description = "Not Found"),
        (status = 422, description = "Validation Error")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdatePersonInput>, JsonRejection>,
) -> Result<Json<person::Model>, JsonApiError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    let changes = PersonChanges { name: input.name, national_id: input.national_id };
    Ok(Json(person_service::update_person(&state.db, id, changes).await?))
}

#[utoipa::path(
    delete, path = "/people/{id}", tag = "people",
    params(("id" = i32, Path, description = "Person ID")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 400, description = "Person Owns Vehicles"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Message>, JsonApiError> {
    let Path(id) = id?;
    person_service::delete_person(&state.db, id).await?;
    Ok(Json(Message::new("person deleted")))
}

#[utoipa::path(
    get, path = "/people/{id}/vehicles", tag = "people",
    params(("id" = i32, Path, description = "Person ID")),
    responses(
        (status = 200, description = "Person with owned vehicles"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn vehicles(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<PersonWithVehicles>, JsonApiError> {
    let Path(id) = id?;
    Ok(Json(person_service::list_vehicles_of(&state.db, id).await?))
}

use axum::{
    extract::{rejection::{JsonRejection, PathRejection, QueryRejection}, Path, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

use common::types::Message;
use models::brand;
use service::brand_service::{self, BrandChanges};

use crate::errors::JsonApiError;
use crate::routes::{non_null, AppState, ListQuery};

#[derive(Debug, Deserialize)]
pub struct CreateBrandInput {
    pub name: String,
    pub country: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBrandInput {
    #[serde(default, deserialize_with = "non_null")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub country: Option<String>,
}

#[utoipa::path(
    get, path = "/brands", tag = "brands",
    params(ListQuery),
    responses(
        (status = 200, description = "List OK", body = [crate::openapi::BrandDoc]),
        (status = 400, description = "Bad Query")
    )
)]
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<brand::Model>>, JsonApiError> {
    let Query(q) = query?;
    let brands = brand_service::list_brands(&state.db, q.into()).await?;
    Ok(Json(brands))
}

#[utoipa::path(
    post, path = "/brands", tag = "brands",
    request_body = crate::openapi::CreateBrandDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::BrandDoc),
        (status = 400, description = "Duplicate Name"),
        (status = 422, description = "Validation Error")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateBrandInput>, JsonRejection>,
) -> Result<Json<brand::Model>, JsonApiError> {
    let Json(input) = payload?;
    info!(name = %input.name, "brand_create_request");
    let created = brand_service::create_brand(&state.db, &input.name, &input.country).await?;
    Ok(Json(created))
}

#[utoipa::path(
    get, path = "/brands/{id}", tag = "brands",
    params(("id" = i32, Path, description = "Brand ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::BrandDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<brand::Model>, JsonApiError> {
    let Path(id) = id?;
    Ok(Json(brand_service::get_brand(&state.db, id).await?))
}

#[utoipa::path(
    put, path = "/brands/{id}", tag = "brands",
    params(("id" = i32, Path, description = "Brand ID")),
    request_body = crate::openapi::UpdateBrandDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::BrandDoc),
        (status = 400, description = "Duplicate Name"),
        (status = 404, description = "Not Found"),
        (status = 422, description = "Validation Error")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateBrandInput>, JsonRejection>,
) -> Result<Json<brand::Model>, JsonApiError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    let changes = BrandChanges { name: input.name, country: input.country };
    Ok(Json(brand_service::update_brand(&state.db, id, changes).await?))
}

#[utoipa::path(
    delete, path = "/brands/{id}", tag = "brands",
    params(("id" = i32, Path, description = "Brand ID")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 400, description = "Brand Has Vehicles"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Message>, JsonApiError> {
    let Path(id) = id?;
    brand_service::delete_brand(&state.db, id).await?;
    Ok(Json(Message::new("brand deleted")))
}

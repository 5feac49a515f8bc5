use axum::Json;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String, pub message: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct BrandDoc { pub id: i32, pub name: String, pub country: String }

#[derive(ToSchema)]
pub struct CreateBrandDoc { pub name: String, pub country: String }

#[derive(ToSchema)]
pub struct UpdateBrandDoc { pub name: Option<String>, pub country: Option<String> }

#[derive(ToSchema)]
pub struct PersonDoc { pub id: i32, pub name: String, pub national_id: String }

#[derive(ToSchema)]
pub struct CreatePersonDoc { pub name: String, pub national_id: String }

#[derive(ToSchema)]
pub struct UpdatePersonDoc { pub name: Option<String>, pub national_id: Option<String> }

#[derive(ToSchema)]
pub struct VehicleDoc {
    pub id: i32,
    pub model: String,
    pub brand_id: i32,
    /// 2 to 5
    pub door_count: i32,
    pub color: String,
    pub brand: BrandDoc,
}

#[derive(ToSchema)]
pub struct CreateVehicleDoc { pub model: String, pub brand_id: i32, pub door_count: i32, pub color: String }

#[derive(ToSchema)]
pub struct UpdateVehicleDoc {
    pub model: Option<String>,
    pub brand_id: Option<i32>,
    pub door_count: Option<i32>,
    pub color: Option<String>,
}

#[derive(ToSchema)]
pub struct AssignOwnerDoc { pub person_id: i32 }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::welcome,
        crate::routes::health,
        crate::routes::brands::list,
        crate::routes::brands::create,
        crate::routes::brands::get,
        crate::routes::brands::update,
        crate::routes::brands::delete,
        crate::routes::people::list,
        crate::routes::people::create,
        crate::routes::people::get,
        crate::routes::people::update,
        crate::routes::people::delete,
        crate::routes::people::vehicles,
        crate::routes::vehicles::list,
        crate::routes::vehicles::create,
        crate::routes::vehicles::get,
        crate::routes::vehicles::update,
        crate::routes::vehicles::delete,
        crate::routes::vehicles::owners,
        crate::routes::vehicles::assign_owner,
        crate::routes::vehicles::remove_owner,
    ),
    components(
        schemas(
            HealthResponse,
            MessageDoc,
            BrandDoc,
            CreateBrandDoc,
            UpdateBrandDoc,
            PersonDoc,
            CreatePersonDoc,
            UpdatePersonDoc,
            VehicleDoc,
            CreateVehicleDoc,
            UpdateVehicleDoc,
            AssignOwnerDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "brands"),
        (name = "people"),
        (name = "vehicles")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

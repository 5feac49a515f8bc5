pub mod brands;
pub mod people;
pub mod vehicles;

use axum::{
    routing::{delete, get},
    Json, Router,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Deserializer};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::{Health, Welcome};
use service::pagination::Pagination;

use crate::openapi;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::healthy())
}

#[utoipa::path(get, path = "/", tag = "health", responses((status = 200, description = "Welcome document")))]
pub async fn welcome() -> Json<Welcome> {
    Json(Welcome {
        message: "Vehicle registry API",
        version: env!("CARGO_PKG_VERSION"),
        documentation: "/api-docs/openapi.json",
    })
}

/// `?skip=&limit=` on list endpoints.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// rows to skip (default 0)
    pub skip: Option<u64>,
    /// page size (default 100, at most 1000)
    pub limit: Option<u64>,
}

impl From<ListQuery> for Pagination {
    fn from(q: ListQuery) -> Self { Pagination::new(q.skip, q.limit) }
}

/// For update bodies: an absent field stays `None`, an explicit `null` is rejected.
pub(crate) fn non_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Build the application router
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/", get(welcome))
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi::openapi_json));

    let api = Router::new()
        .route("/brands", get(brands::list).post(brands::create))
        .route("/brands/:id", get(brands::get).put(brands::update).delete(brands::delete))
        .route("/people", get(people::list).post(people::create))
        .route("/people/:id", get(people::get).put(people::update).delete(people::delete))
        .route("/people/:id/vehicles", get(people::vehicles))
        .route("/vehicles", get(vehicles::list).post(vehicles::create))
        .route("/vehicles/:id", get(vehicles::get).put(vehicles::update).delete(vehicles::delete))
        .route("/vehicles/:id/owners", get(vehicles::owners).post(vehicles::assign_owner))
        .route("/vehicles/:id/owners/:person_id", delete(vehicles::remove_owner))
        .with_state(state);

    public
        .merge(api)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

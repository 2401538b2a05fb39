//! HTTP endpoint handlers
//!
//! Thin adapters between axum extractors and the gateway/user store. All
//! policy lives below this layer; handlers only pull out inputs, invoke the
//! operation, and wrap the result in the response envelope.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use super::response::{ApiError, ApiResponse};
use super::AppState;
use crate::data::Country;
use crate::gateway::SearchFilters;
use crate::users::User;

/// Mount point of the countries routes, used for pagination links
pub(crate) const COUNTRIES_PATH: &str = "/api/v1/countries";

/// Query parameters for the paginated listing
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    /// 1-based page number
    #[serde(default = "default_page")]
    pub page: u64,
    /// Page size
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    10
}

/// `GET /api/v1/countries?page=&limit=`
pub async fn list_countries(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<ApiResponse<Vec<Country>>, ApiError> {
    let (items, pagination) = state
        .gateway
        .list_paged(query.page, query.limit, COUNTRIES_PATH)
        .await?;
    Ok(ApiResponse::paged("Country data", items, pagination))
}

/// `GET /api/v1/countries/{code}`
pub async fn get_country(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<ApiResponse<Country>, ApiError> {
    let country = state.gateway.get_by_code(&code).await?;
    Ok(ApiResponse::ok("Country data", country))
}

/// `GET /api/v1/countries/region/{region}`
pub async fn list_by_region(
    State(state): State<Arc<AppState>>,
    Path(region): Path<String>,
) -> Result<ApiResponse<Vec<Country>>, ApiError> {
    let countries = state.gateway.list_by_region(&region).await?;
    Ok(ApiResponse::ok("Country data", countries))
}

/// `GET /api/v1/countries/search?name=&region=&capital=&timezone=`
pub async fn search_countries(
    State(state): State<Arc<AppState>>,
    Query(filters): Query<SearchFilters>,
) -> Result<ApiResponse<Vec<Country>>, ApiError> {
    let countries = state.gateway.search(&filters).await?;
    Ok(ApiResponse::ok("Country data", countries))
}

/// Body for user create and full update
#[derive(Debug, Deserialize)]
pub struct UserPayload {
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Contact email
    #[serde(default)]
    pub email: String,
}

/// Body for partial user update
#[derive(Debug, Deserialize)]
pub struct UserPatch {
    /// New display name, if changing
    pub name: Option<String>,
    /// New contact email, if changing
    pub email: Option<String>,
}

/// `GET /api/v1/users/{id}`
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<ApiResponse<User>, ApiError> {
    let user = state.users.get(&id)?;
    Ok(ApiResponse::ok("User data", user))
}

/// `POST /api/v1/users`
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UserPayload>,
) -> Result<ApiResponse<User>, ApiError> {
    let user = state.users.create(payload.name, payload.email)?;
    Ok(ApiResponse::created("User created", user))
}

/// `PUT /api/v1/users/{id}`
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UserPayload>,
) -> Result<ApiResponse<User>, ApiError> {
    let user = state.users.update(&id, payload.name, payload.email)?;
    Ok(ApiResponse::ok("User updated", user))
}

/// `PATCH /api/v1/users/{id}`
pub async fn patch_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UserPatch>,
) -> Result<ApiResponse<User>, ApiError> {
    let user = state.users.patch(&id, payload.name, payload.email)?;
    Ok(ApiResponse::ok("User updated", user))
}

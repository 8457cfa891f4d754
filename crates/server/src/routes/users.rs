use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use models::user;
use serde::Deserialize;
use service::pagination::Pagination;
use service::user::domain::{CreateUser, UserFilters, UserPatch};

use crate::errors::{ApiResponse, JsonApiError};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// case-insensitive substring
    pub first_name: Option<String>,
    /// case-insensitive substring
    pub last_name: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[utoipa::path(
    post, path = "/users", tag = "users",
    request_body = crate::openapi::CreateUserDoc,
    responses(
        (status = 200, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 500, description = "Store Error")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateUser>, JsonRejection>,
) -> Result<ApiResponse<user::Model>, JsonApiError> {
    let Json(input) = payload?;
    Ok(ApiResponse::ok(state.users.create(input).await?))
}

#[utoipa::path(
    get, path = "/users", tag = "users",
    params(ListQuery),
    responses(
        (status = 200, description = "Page of users with meta"),
        (status = 400, description = "Invalid Pagination"),
        (status = 500, description = "Store Error")
    )
)]
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<ApiResponse<Vec<user::Model>>, JsonApiError> {
    let Query(q) = query?;
    let filters = UserFilters { first_name: q.first_name.unwrap_or_default(), last_name: q.last_name.unwrap_or_default() };
    let total = state.users.count(&filters).await?;
    let meta = Pagination::from_query(q.page.as_deref(), q.limit.as_deref()).meta(total, state.default_limit)?;
    let rows = state.users.get_all(&filters, meta.offset(), meta.limit()).await?;
    Ok(ApiResponse::page(rows, meta))
}

#[utoipa::path(
    get, path = "/users/{id}", tag = "users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<ApiResponse<user::Model>, JsonApiError> {
    Ok(ApiResponse::ok(state.users.get(&id).await?))
}

#[utoipa::path(
    patch, path = "/users/{id}", tag = "users",
    params(("id" = String, Path, description = "User id")),
    request_body = crate::openapi::UserPatchDoc,
    responses(
        (status = 200, description = "Updated user"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UserPatch>, JsonRejection>,
) -> Result<ApiResponse<user::Model>, JsonApiError> {
    let Json(patch) = payload?;
    Ok(ApiResponse::ok(state.users.update(&id, patch).await?))
}

#[utoipa::path(
    delete, path = "/users/{id}", tag = "users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<ApiResponse<&'static str>, JsonApiError> {
    state.users.delete(&id).await?;
    Ok(ApiResponse::ok("success"))
}

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use models::course;
use serde::Deserialize;
use service::course::domain::{CourseFilters, CoursePatch, CreateCourse};
use service::pagination::Pagination;

use crate::errors::{ApiResponse, JsonApiError};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// case-insensitive substring
    pub name: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[utoipa::path(
    post, path = "/curses", tag = "courses",
    request_body = crate::openapi::CreateCourseDoc,
    responses(
        (status = 200, description = "Created"),
        (status = 400, description = "Validation or date error"),
        (status = 500, description = "Store Error")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateCourse>, JsonRejection>,
) -> Result<ApiResponse<course::Model>, JsonApiError> {
    let Json(input) = payload?;
    Ok(ApiResponse::ok(state.courses.create(input).await?))
}

#[utoipa::path(
    get, path = "/curses", tag = "courses",
    params(ListQuery),
    responses(
        (status = 200, description = "Page of courses with meta"),
        (status = 400, description = "Invalid Pagination")
    )
)]
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<ApiResponse<Vec<course::Model>>, JsonApiError> {
    let Query(q) = query?;
    let filters = CourseFilters { name: q.name.unwrap_or_default() };
    let total = state.courses.count(&filters).await?;
    let meta = Pagination::from_query(q.page.as_deref(), q.limit.as_deref()).meta(total, state.default_limit)?;
    let rows = state.courses.get_all(&filters, meta.offset(), meta.limit()).await?;
    Ok(ApiResponse::page(rows, meta))
}

#[utoipa::path(
    get, path = "/curses/{id}", tag = "courses",
    params(("id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<ApiResponse<course::Model>, JsonApiError> {
    Ok(ApiResponse::ok(state.courses.get(&id).await?))
}

#[utoipa::path(
    patch, path = "/curses/{id}", tag = "courses",
    params(("id" = String, Path, description = "Course id")),
    request_body = crate::openapi::CoursePatchDoc,
    responses(
        (status = 200, description = "Updated course"),
        (status = 400, description = "Validation or date error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CoursePatch>, JsonRejection>,
) -> Result<ApiResponse<course::Model>, JsonApiError> {
    let Json(patch) = payload?;
    Ok(ApiResponse::ok(state.courses.update(&id, patch).await?))
}

#[utoipa::path(
    delete, path = "/curses/{id}", tag = "courses",
    params(("id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<ApiResponse<&'static str>, JsonApiError> {
    state.courses.delete(&id).await?;
    Ok(ApiResponse::ok("success"))
}

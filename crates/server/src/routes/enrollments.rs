use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use models::enrollment;
use serde::Deserialize;
use service::enrollment::domain::{CreateEnrollment, EnrollmentFilters};
use service::pagination::Pagination;

use crate::errors::{ApiResponse, JsonApiError};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// exact match
    pub user_id: Option<String>,
    /// exact match
    pub course_id: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[utoipa::path(
    post, path = "/enrollments", tag = "enrollments",
    request_body = crate::openapi::CreateEnrollmentDoc,
    responses(
        (status = 200, description = "Created with status pending"),
        (status = 400, description = "Missing id or unknown user/course"),
        (status = 500, description = "Store Error")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateEnrollment>, JsonRejection>,
) -> Result<ApiResponse<enrollment::Model>, JsonApiError> {
    let Json(input) = payload?;
    Ok(ApiResponse::ok(state.enrollments.create(input).await?))
}

#[utoipa::path(
    get, path = "/enrollments", tag = "enrollments",
    params(ListQuery),
    responses(
        (status = 200, description = "Page of enrollments with meta"),
        (status = 400, description = "Invalid Pagination")
    )
)]
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<ApiResponse<Vec<enrollment::Model>>, JsonApiError> {
    let Query(q) = query?;
    let filters = EnrollmentFilters { user_id: q.user_id.unwrap_or_default(), course_id: q.course_id.unwrap_or_default() };
    let total = state.enrollments.count(&filters).await?;
    let meta = Pagination::from_query(q.page.as_deref(), q.limit.as_deref()).meta(total, state.default_limit)?;
    let rows = state.enrollments.get_all(&filters, meta.offset(), meta.limit()).await?;
    Ok(ApiResponse::page(rows, meta))
}

#[utoipa::path(
    get, path = "/enrollments/{id}", tag = "enrollments",
    params(("id" = String, Path, description = "Enrollment id")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<ApiResponse<enrollment::Model>, JsonApiError> {
    Ok(ApiResponse::ok(state.enrollments.get(&id).await?))
}

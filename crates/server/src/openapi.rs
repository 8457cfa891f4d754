use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct CreateUserDoc { pub first_name: String, pub last_name: String, pub email: String, pub phone: String }

#[derive(ToSchema)]
pub struct UserPatchDoc {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Dates use `YYYY-MM-DD`.
#[derive(ToSchema)]
pub struct CreateCourseDoc { pub name: String, pub start_date: String, pub end_date: String }

#[derive(ToSchema)]
pub struct CoursePatchDoc {
    pub name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// `curse_id` is accepted in place of `course_id`.
#[derive(ToSchema)]
pub struct CreateEnrollmentDoc { pub user_id: String, pub course_id: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::users::create,
        crate::routes::users::list,
        crate::routes::users::get,
        crate::routes::users::update,
        crate::routes::users::delete,
        crate::routes::courses::create,
        crate::routes::courses::list,
        crate::routes::courses::get,
        crate::routes::courses::update,
        crate::routes::courses::delete,
        crate::routes::enrollments::create,
        crate::routes::enrollments::list,
        crate::routes::enrollments::get,
    ),
    components(
        schemas(
            HealthResponse,
            CreateUserDoc,
            UserPatchDoc,
            CreateCourseDoc,
            CoursePatchDoc,
            CreateEnrollmentDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "users"),
        (name = "courses"),
        (name = "enrollments")
    )
)]
pub struct ApiDoc;

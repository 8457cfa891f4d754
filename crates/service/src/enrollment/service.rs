use std::sync::Arc;

use models::enrollment;
use tracing::{debug, info, instrument};

use super::domain::{CreateEnrollment, EnrollmentFilters};
use super::repository::EnrollmentRepository;
use crate::course::CourseService;
use crate::errors::{require, ServiceError};
use crate::user::UserService;

/// Enrollment service. Existence of the referenced user and course is
/// checked through their services before anything is written.
pub struct EnrollmentService {
    repo: Arc<dyn EnrollmentRepository>,
    users: Arc<UserService>,
    courses: Arc<CourseService>,
}

/// Turn a lookup miss into a reference error; other failures pass through.
fn as_reference(entity: &str, err: ServiceError) -> ServiceError {
    match err {
        ServiceError::NotFound(_) => ServiceError::reference(entity),
        other => other,
    }
}

impl EnrollmentService {
    pub fn new(repo: Arc<dyn EnrollmentRepository>, users: Arc<UserService>, courses: Arc<CourseService>) -> Self {
        Self { repo, users, courses }
    }

    /// Enroll a user in a course. The user is checked first, then the course.
    #[instrument(skip(self, input), fields(user_id = %input.user_id, course_id = %input.course_id))]
    pub async fn create(&self, input: CreateEnrollment) -> Result<enrollment::Model, ServiceError> {
        require("user id", &input.user_id)?;
        require("course id", &input.course_id)?;

        self.users.get(&input.user_id).await.map_err(|e| as_reference("user", e))?;
        self.courses.get(&input.course_id).await.map_err(|e| as_reference("course", e))?;
        debug!("references_verified");

        let created = self.repo.create(&input).await?;
        info!(enrollment_id = %created.id, "enrollment_created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<enrollment::Model, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("enrollment"))
    }

    #[instrument(skip(self, filters))]
    pub async fn get_all(&self, filters: &EnrollmentFilters, offset: u64, limit: u64) -> Result<Vec<enrollment::Model>, ServiceError> {
        self.repo.get_all(filters, offset, limit).await
    }

    pub async fn count(&self, filters: &EnrollmentFilters) -> Result<u64, ServiceError> {
        self.repo.count(filters).await
    }
}

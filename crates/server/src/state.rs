use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::course::{repo::seaorm::SeaOrmCourseRepository, repository::mock::InMemoryCourseRepository, CourseService};
use service::enrollment::{
    repo::seaorm::SeaOrmEnrollmentRepository, repository::mock::InMemoryEnrollmentRepository, EnrollmentService,
};
use service::user::{repo::seaorm::SeaOrmUserRepository, repository::mock::InMemoryUserRepository, UserService};

use crate::metrics::HttpMetrics;

/// Shared handler state. Cloning is cheap; every field is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserService>,
    pub courses: Arc<CourseService>,
    pub enrollments: Arc<EnrollmentService>,
    /// Page size used when a list request has no usable `limit`.
    pub default_limit: i64,
    pub metrics: Arc<HttpMetrics>,
}

impl AppState {
    pub fn new(users: Arc<UserService>, courses: Arc<CourseService>, enrollments: Arc<EnrollmentService>, default_limit: i64) -> anyhow::Result<Self> {
        Ok(Self { users, courses, enrollments, default_limit, metrics: Arc::new(HttpMetrics::new()?) })
    }

    /// Wire the SeaORM repositories to one shared connection pool.
    pub fn from_db(db: DatabaseConnection, default_limit: i64) -> anyhow::Result<Self> {
        let users = Arc::new(UserService::new(Arc::new(SeaOrmUserRepository { db: db.clone() })));
        let courses = Arc::new(CourseService::new(Arc::new(SeaOrmCourseRepository { db: db.clone() })));
        let enrollments = Arc::new(EnrollmentService::new(
            Arc::new(SeaOrmEnrollmentRepository { db }),
            Arc::clone(&users),
            Arc::clone(&courses),
        ));
        Self::new(users, courses, enrollments, default_limit)
    }

    /// State over the in-memory repositories; nothing survives the process.
    pub fn in_memory(default_limit: i64) -> anyhow::Result<Self> {
        let users = Arc::new(UserService::new(Arc::new(InMemoryUserRepository::default())));
        let courses = Arc::new(CourseService::new(Arc::new(InMemoryCourseRepository::default())));
        let enrollments = Arc::new(EnrollmentService::new(
            Arc::new(InMemoryEnrollmentRepository::default()),
            Arc::clone(&users),
            Arc::clone(&courses),
        ));
        Self::new(users, courses, enrollments, default_limit)
    }
}

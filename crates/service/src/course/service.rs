use std::sync::Arc;

use chrono::NaiveDate;
use models::course::{self, DATE_FORMAT};
use tracing::{info, instrument};

use super::domain::{CourseChanges, CourseFilters, CoursePatch, CreateCourse, NewCourse};
use super::repository::CourseRepository;
use crate::errors::{require, within, ServiceError};

/// Parse a `YYYY-MM-DD` date, naming the offending field on failure.
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ServiceError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| ServiceError::DateParse { field, value: value.to_string() })
}

pub struct CourseService {
    repo: Arc<dyn CourseRepository>,
}

impl CourseService {
    pub fn new(repo: Arc<dyn CourseRepository>) -> Self { Self { repo } }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: CreateCourse) -> Result<course::Model, ServiceError> {
        require("name", &input.name)?;
        within("name", &input.name, course::NAME_MAX_LEN)?;
        let new = NewCourse {
            start_date: parse_date("start_date", &input.start_date)?,
            end_date: parse_date("end_date", &input.end_date)?,
            name: input.name,
        };
        let created = self.repo.create(&new).await?;
        info!(course_id = %created.id, "course_created");
        Ok(created)
    }

    #[instrument(skip(self, filters))]
    pub async fn get_all(&self, filters: &CourseFilters, offset: u64, limit: u64) -> Result<Vec<course::Model>, ServiceError> {
        self.repo.get_all(filters, offset, limit).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<course::Model, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("course"))
    }

    /// Each present date is parsed on its own; absent fields keep their stored value.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: &str, patch: CoursePatch) -> Result<course::Model, ServiceError> {
        if let Some(name) = &patch.name {
            require("name", name)?;
            within("name", name, course::NAME_MAX_LEN)?;
        }
        let changes = CourseChanges {
            start_date: patch.start_date.as_deref().map(|v| parse_date("start_date", v)).transpose()?,
            end_date: patch.end_date.as_deref().map(|v| parse_date("end_date", v)).transpose()?,
            name: patch.name,
        };
        let updated = self.repo.update(id, &changes).await?;
        info!(course_id = %updated.id, "course_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("course"));
        }
        info!(course_id = %id, "course_deleted");
        Ok(())
    }

    pub async fn count(&self, filters: &CourseFilters) -> Result<u64, ServiceError> {
        self.repo.count(filters).await
    }
}

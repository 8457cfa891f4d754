use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateEnrollment {
    pub user_id: String,
    #[serde(alias = "curse_id")]
    pub course_id: String,
}

/// Exact-match filters; empty strings match everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrollmentFilters {
    pub user_id: String,
    pub course_id: String,
}

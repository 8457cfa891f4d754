//! Service layer for users, courses and enrollments.
//! - Owns validation, partial updates and cross-entity reference checks.
//! - Talks to storage only through the per-entity repository traits.
//! - Computes pagination windows for list endpoints.

pub mod errors;
pub mod pagination;
pub(crate) mod query;
pub mod user;
pub mod course;
pub mod enrollment;
#[cfg(test)]
pub mod test_support;

pub use errors::ServiceError;

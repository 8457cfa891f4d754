//! sea-orm entities for the `users`, `courses` and `enrollments` tables,
//! plus connection bootstrap.
pub mod db;
pub mod user;
pub mod course;
pub mod enrollment;

#[cfg(test)]
mod tests;

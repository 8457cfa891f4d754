//! Course module. Dates travel as `YYYY-MM-DD` strings and are parsed here.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::CourseService;

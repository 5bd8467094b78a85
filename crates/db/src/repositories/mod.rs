//! Relational repositories, one zero-sized struct per table.
//!
//! Each method takes the pool as its first argument and returns raw
//! `sqlx::Error`s; [`crate::backends::postgres::PgStore`] adds timeouts and
//! error classification on top.

pub mod alumni_repo;
pub mod employment_repo;
pub mod file_repo;
pub mod user_repo;

pub use alumni_repo::AlumniRepo;
pub use employment_repo::EmploymentRepo;
pub use file_repo::FileRepo;
pub use user_repo::UserRepo;

//! Domain rules for the alumni service.
//!
//! Everything in this crate is pure: no I/O, no async. The storage crate and
//! the HTTP crate both build on these types so that validation and access
//! rules cannot drift between backends.

pub mod access;
pub mod alumni;
pub mod employment;
pub mod error;
pub mod listing;
pub mod roles;
pub mod types;
pub mod uploads;

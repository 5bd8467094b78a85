//! Store implementations.

#[cfg(any(test, feature = "memory"))]
pub mod memory;
pub mod mongo;
pub mod postgres;

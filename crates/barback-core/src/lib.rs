//! BARBACK Core — domain models, error taxonomy, and the repository /
//! collaborator trait definitions shared across all crates.
//!
//! This crate has no I/O of its own: persistence lives in `barback-db`,
//! and the resolution/selection core lives in `barback-tenancy`.

pub mod error;
pub mod models;
pub mod repository;

pub use error::{BarbackError, BarbackResult};

//! Domain models for BARBACK.
//!
//! These are the core types shared across all crates: the authoritative
//! entity hierarchy (organization → brand → location), the directory
//! read-model, and the session-scoped selection/identity types.

pub mod brand;
pub mod directory;
pub mod identity;
pub mod location;
pub mod organization;
pub mod selection;

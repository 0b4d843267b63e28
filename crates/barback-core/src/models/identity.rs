//! Caller identity.
//!
//! Authentication and authorization live in an external identity layer;
//! its output is consumed here as an opaque caller descriptor and passed
//! through to the directory. This crate never produces or verifies one.

use serde::{Deserialize, Serialize};

/// The authenticated caller, as asserted by the external identity layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallerIdentity {
    /// Stable subject identifier (e.g., an OIDC `sub` claim). Also keys
    /// the caller's durable session storage.
    pub subject: String,
    /// Display name, if the identity layer provided one.
    pub display_name: Option<String>,
}

impl CallerIdentity {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            display_name: None,
        }
    }
}

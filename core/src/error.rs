//! Error types for the todo store and repository.
//!
//! # Design
//! Absence deliberately has no variant here: "the todo does not exist" is an
//! expected caller scenario and travels as `Option`/`bool` through the
//! repository, so only genuine failures become errors. `ConstraintViolation`
//! covers schema-rule rejections (empty or oversized fields) and maps to a
//! 400 at the API boundary; `Unavailable` covers connectivity loss or
//! timeouts in the backing store and maps to a 503.

use std::fmt;

/// Errors surfaced by store and repository operations.
#[derive(Debug)]
pub enum StoreError {
    /// The input violates a schema rule (empty title, oversized field).
    ConstraintViolation(String),

    /// The backing store could not be reached or failed mid-operation.
    Unavailable(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::ConstraintViolation(msg) => {
                write!(f, "constraint violation: {msg}")
            }
            StoreError::Unavailable(msg) => {
                write!(f, "store unavailable: {msg}")
            }
        }
    }
}

impl std::error::Error for StoreError {}

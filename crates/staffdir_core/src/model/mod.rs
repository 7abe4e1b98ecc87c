//! Directory domain model.
//!
//! # Responsibility
//! - Define the department and employee records persisted in the store.
//! - Validate identifiers before they are used as store keys.
//!
//! # Invariants
//! - An identifier is caller-supplied and used verbatim as the key.
//! - Identifiers are non-empty and at most [`MAX_KEY_SIZE`] bytes.
//! - Department references on employees are informational only.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod department;
pub mod employee;

/// Largest key accepted by the store, in bytes.
pub const MAX_KEY_SIZE: usize = 32 * 1024;

/// Identifier rule violations detected before any store access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyId,
    IdTooLong { len: usize, max: usize },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "id must not be empty"),
            Self::IdTooLong { len, max } => {
                write!(f, "id is {len} bytes long; at most {max} bytes are allowed")
            }
        }
    }
}

impl Error for ValidationError {}

/// Checks that `id` is usable as a store key.
pub fn validate_id(id: &str) -> Result<(), ValidationError> {
    if id.is_empty() {
        return Err(ValidationError::EmptyId);
    }
    if id.len() > MAX_KEY_SIZE {
        return Err(ValidationError::IdTooLong {
            len: id.len(),
            max: MAX_KEY_SIZE,
        });
    }
    Ok(())
}

//! Repository layer abstractions and store-backed implementations.
//!
//! # Responsibility
//! - Define entity-oriented data access capabilities.
//! - Isolate bucket layout and value encoding from services.
//!
//! # Invariants
//! - Writes validate identifiers before touching the store.
//! - Repository APIs return semantic errors (`NotFound`, `Decode`) in
//!   addition to store transport errors.

pub mod bucket_repo;
pub mod department_repo;
pub mod employee_repo;

//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the record store contract over the `students` table.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repositories enforce id uniqueness and column presence only; field
//!   content is validated before it reaches this layer.
//! - Absence is a semantic error (`NotFound`) on update/delete and a plain
//!   `None` on lookup.

pub mod store;
pub mod student_repo;

//! Domain model for the student roster.
//!
//! # Responsibility
//! - Define the one persisted entity and its mutable field set.
//!
//! # Invariants
//! - Every record is identified by a caller-supplied `StudentId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod student;

//! Student record model.
//!
//! # Responsibility
//! - Define the canonical record stored in the `students` table.
//! - Split the immutable identity from the fields an update may replace.
//!
//! # Invariants
//! - `id` never changes after creation.
//! - Values are stored exactly as entered; display casing lives in
//!   `crate::display`.

use serde::{Deserialize, Serialize};

/// Caller-supplied primary key of a student record.
pub type StudentId = i64;

/// Lowest accepted student age (inclusive).
pub const MIN_AGE: u8 = 10;
/// Highest accepted student age (inclusive).
pub const MAX_AGE: u8 = 100;

/// Every column of a record except the id.
///
/// This is the payload of an update: all five fields are overwritten together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentFields {
    pub name: String,
    /// Exactly ten decimal digits.
    pub contact: String,
    pub email: String,
    pub age: u8,
    pub course: String,
}

/// One persisted roster entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    #[serde(flatten)]
    pub fields: StudentFields,
}

impl Student {
    pub fn new(id: StudentId, fields: StudentFields) -> Self {
        Self { id, fields }
    }

    pub fn name(&self) -> &str {
        &self.fields.name
    }

    pub fn course(&self) -> &str {
        &self.fields.course
    }

    pub fn age(&self) -> u8 {
        self.fields.age
    }
}

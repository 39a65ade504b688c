//! Core domain logic for the student roster.
//! This crate owns validation rules and the single-table record store.

pub mod db;
pub mod display;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validation;

pub use display::{capitalize_words, render_table, StudentView};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::student::{Student, StudentFields, StudentId, MAX_AGE, MIN_AGE};
pub use repo::store::StudentStore;
pub use repo::student_repo::{
    RepoError, RepoResult, SqliteStudentRepository, StudentRepository,
};
pub use service::student_service::{RosterError, ServiceResult, StudentService};
pub use validation::{
    parse_student_id, valid_age, valid_contact, valid_email, valid_id, valid_required_text,
    FieldKind, FormError, StudentForm,
};

//! Student use-case service.
//!
//! # Responsibility
//! - Provide add/update/delete/search/list entry points over raw form text.
//! - Map repository outcomes to the three user-facing failure kinds.
//!
//! # Invariants
//! - Invalid input never reaches the repository.
//! - Update and delete check the id before anything else.
//! - Service layer remains storage-agnostic.

use crate::model::student::{Student, StudentId};
use crate::repo::student_repo::{RepoError, StudentRepository};
use crate::validation::{parse_student_id, FormError, StudentForm};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, RosterError>;

/// Service error for roster use-cases.
#[derive(Debug)]
pub enum RosterError {
    /// One or more fields failed validation; nothing was written.
    Invalid(FormError),
    /// Create targeted an id that is already present.
    DuplicateId(StudentId),
    /// Update or delete targeted an absent id.
    NotFound(StudentId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for RosterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => {
                write!(f, "id {id} already exists; choose a unique id")
            }
            Self::NotFound(id) => write!(f, "student with id {id} not found"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RosterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FormError> for RosterError {
    fn from(value: FormError) -> Self {
        Self::Invalid(value)
    }
}

impl From<RepoError> for RosterError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::DuplicateId(id) => Self::DuplicateId(id),
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Roster service facade over repository implementations.
pub struct StudentService<R: StudentRepository> {
    repo: R,
}

impl<R: StudentRepository> StudentService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates every field and inserts the record.
    pub fn add_student(&self, form: &StudentForm) -> ServiceResult<Student> {
        let student = form.parse_student()?;
        self.repo.create_student(&student)?;
        info!(
            "event=student_add module=service status=ok id={}",
            student.id
        );
        Ok(student)
    }

    /// Overwrites the non-id fields of the record named by `form.id`.
    ///
    /// The id is checked on its own first so a bad id is reported as such
    /// even when other fields are also wrong.
    pub fn update_student(&self, form: &StudentForm) -> ServiceResult<Student> {
        let id = form.parse_id()?;
        let fields = form.parse_fields()?;
        self.repo.update_student(id, &fields)?;
        info!("event=student_update module=service status=ok id={id}");
        Ok(Student::new(id, fields))
    }

    /// Deletes the record whose id is typed in `id_text`.
    pub fn delete_student(&self, id_text: &str) -> ServiceResult<StudentId> {
        let id = parse_student_id(id_text)?;
        self.repo.delete_student(id)?;
        info!("event=student_delete module=service status=ok id={id}");
        Ok(id)
    }

    /// Looks a record up by typed id. Absence is `Ok(None)`.
    pub fn find_student(&self, id_text: &str) -> ServiceResult<Option<Student>> {
        let id = parse_student_id(id_text)?;
        Ok(self.repo.get_student(id)?)
    }

    pub fn list_students(&self) -> ServiceResult<Vec<Student>> {
        Ok(self.repo.list_students()?)
    }
}

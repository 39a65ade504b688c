//! File-backed record store with one connection per operation.
//!
//! # Responsibility
//! - Own the database location for the roster.
//! - Open, bootstrap and close SQLite around every single call.
//!
//! # Invariants
//! - No connection or transaction outlives the call that opened it.
//! - Table creation on open is idempotent.

use crate::db::open_db;
use crate::model::student::{Student, StudentFields, StudentId};
use crate::repo::student_repo::{
    RepoError, RepoResult, SqliteStudentRepository, StudentRepository,
};
use log::{debug, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Record store rooted at one SQLite file.
#[derive(Debug, Clone)]
pub struct StudentStore {
    db_path: PathBuf,
}

impl StudentStore {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Creates the database file and table when missing.
    ///
    /// Safe to call on every startup.
    pub fn init(&self) -> RepoResult<()> {
        self.with_repo("init", |_| Ok(()))
    }

    fn with_repo<T>(
        &self,
        op: &'static str,
        f: impl FnOnce(&SqliteStudentRepository<'_>) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let started_at = Instant::now();
        let conn = open_db(&self.db_path)?;
        let result = SqliteStudentRepository::try_new(&conn).and_then(|repo| f(&repo));
        drop(conn);

        match &result {
            Ok(_) => debug!(
                "event=store_op module=repo status=ok op={} duration_ms={}",
                op,
                started_at.elapsed().as_millis()
            ),
            Err(err) => warn!(
                "event=store_op module=repo status=error op={} duration_ms={} error_code={}",
                op,
                started_at.elapsed().as_millis(),
                error_code(err)
            ),
        }
        result
    }
}

impl StudentRepository for StudentStore {
    fn create_student(&self, student: &Student) -> RepoResult<StudentId> {
        self.with_repo("create", |repo| repo.create_student(student))
    }

    fn update_student(&self, id: StudentId, fields: &StudentFields) -> RepoResult<()> {
        self.with_repo("update", |repo| repo.update_student(id, fields))
    }

    fn delete_student(&self, id: StudentId) -> RepoResult<()> {
        self.with_repo("delete", |repo| repo.delete_student(id))
    }

    fn get_student(&self, id: StudentId) -> RepoResult<Option<Student>> {
        self.with_repo("find", |repo| repo.get_student(id))
    }

    fn list_students(&self) -> RepoResult<Vec<Student>> {
        self.with_repo("list", |repo| repo.list_students())
    }
}

fn error_code(err: &RepoError) -> &'static str {
    match err {
        RepoError::Db(_) => "db_failed",
        RepoError::DuplicateId(_) => "duplicate_id",
        RepoError::NotFound(_) => "not_found",
        RepoError::InvalidData(_) => "invalid_data",
        RepoError::UninitializedConnection { .. } => "uninitialized_connection",
        RepoError::MissingRequiredTable(_) => "missing_table",
    }
}

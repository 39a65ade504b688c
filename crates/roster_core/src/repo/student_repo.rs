//! Student repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/update/delete/get/list over the `students` table.
//! - Translate SQLite constraint and row-count outcomes into semantic errors.
//!
//! # Invariants
//! - Every operation is a single SQL statement.
//! - Read paths reject corrupt persisted rows instead of masking them.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::student::{Student, StudentFields, StudentId};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const STUDENTS_TABLE: &str = "students";

const STUDENT_SELECT_SQL: &str = "SELECT
    uid,
    name,
    contact,
    email,
    age,
    course
FROM students";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for student persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Insert hit an id that is already taken.
    DuplicateId(StudentId),
    /// Update or delete matched zero rows.
    NotFound(StudentId),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "student id already exists: {id}"),
            Self::NotFound(id) => write!(f, "student not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted student data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it with open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Record store interface for student operations.
pub trait StudentRepository {
    /// Inserts a new record. Fails with `DuplicateId` when the id is taken.
    fn create_student(&self, student: &Student) -> RepoResult<StudentId>;
    /// Overwrites every non-id column. Fails with `NotFound` on zero rows.
    fn update_student(&self, id: StudentId, fields: &StudentFields) -> RepoResult<()>;
    /// Removes one record. Fails with `NotFound` on zero rows.
    fn delete_student(&self, id: StudentId) -> RepoResult<()>;
    fn get_student(&self, id: StudentId) -> RepoResult<Option<Student>>;
    /// Lists every record ordered by id.
    fn list_students(&self) -> RepoResult<Vec<Student>>;
}

/// SQLite-backed student repository bound to one open connection.
pub struct SqliteStudentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStudentRepository<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    ///
    /// Raw connections that skipped the schema bootstrap are rejected.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_user_version(conn)?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let has_table: bool = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
            );",
            [STUDENTS_TABLE],
            |row| row.get(0),
        )?;
        if !has_table {
            return Err(RepoError::MissingRequiredTable(STUDENTS_TABLE));
        }

        Ok(Self { conn })
    }
}

impl StudentRepository for SqliteStudentRepository<'_> {
    fn create_student(&self, student: &Student) -> RepoResult<StudentId> {
        let fields = &student.fields;
        let result = self.conn.execute(
            "INSERT INTO students (uid, name, contact, email, age, course)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                student.id,
                fields.name.as_str(),
                fields.contact.as_str(),
                fields.email.as_str(),
                fields.age,
                fields.course.as_str(),
            ],
        );

        match result {
            Ok(_) => Ok(student.id),
            Err(err) if is_key_conflict(&err) => Err(RepoError::DuplicateId(student.id)),
            Err(err) => Err(err.into()),
        }
    }

    fn update_student(&self, id: StudentId, fields: &StudentFields) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE students
             SET
                name = ?1,
                contact = ?2,
                email = ?3,
                age = ?4,
                course = ?5
             WHERE uid = ?6;",
            params![
                fields.name.as_str(),
                fields.contact.as_str(),
                fields.email.as_str(),
                fields.age,
                fields.course.as_str(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_student(&self, id: StudentId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM students WHERE uid = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn get_student(&self, id: StudentId) -> RepoResult<Option<Student>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STUDENT_SELECT_SQL} WHERE uid = ?1;"))?;

        let row = stmt
            .query_row([id], |row| Ok(read_student_row(row)))
            .optional()?;
        row.transpose()
    }

    fn list_students(&self) -> RepoResult<Vec<Student>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STUDENT_SELECT_SQL} ORDER BY uid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut students = Vec::new();

        while let Some(row) = rows.next()? {
            students.push(read_student_row(row)?);
        }

        Ok(students)
    }
}

fn is_key_conflict(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(inner, _) => {
            inner.code == ErrorCode::ConstraintViolation
                && matches!(
                    inner.extended_code,
                    rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                        | rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                )
        }
        _ => false,
    }
}

fn read_student_row(row: &Row<'_>) -> RepoResult<Student> {
    let id: StudentId = row.get("uid")?;
    let raw_age: i64 = row.get("age")?;
    let age = u8::try_from(raw_age).map_err(|_| {
        RepoError::InvalidData(format!("age `{raw_age}` out of range for uid {id}"))
    })?;

    Ok(Student::new(
        id,
        StudentFields {
            name: row.get("name")?,
            contact: row.get("contact")?,
            email: row.get("email")?,
            age,
            course: row.get("course")?,
        },
    ))
}

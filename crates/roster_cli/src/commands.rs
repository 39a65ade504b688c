//! Command handlers for the roster CLI.
//!
//! # Responsibility
//! - Run one user action against the store and report the outcome.
//! - Re-render the full list after every successful mutation.
//!
//! # Invariants
//! - Handlers only see state through `RosterContext`; there are no globals.
//! - A failed action never re-renders, except search misses, which fall
//!   back to the full list.

use log::warn;
use roster_core::{
    render_table, FieldKind, RepoError, RosterError, Student, StudentForm, StudentService,
    StudentStore,
};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, Write};
use std::path::PathBuf;

/// Failure of one CLI action.
#[derive(Debug)]
pub enum CommandError {
    Roster(RosterError),
    /// Search found no student with the requested id.
    NoMatch(String),
    Io(io::Error),
    Json(serde_json::Error),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Roster(err) => write!(f, "{err}"),
            Self::NoMatch(id) => write!(f, "student {id} not found"),
            Self::Io(err) => write!(f, "output failed: {err}"),
            Self::Json(err) => write!(f, "json encoding failed: {err}"),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Roster(err) => Some(err),
            Self::NoMatch(_) => None,
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<RosterError> for CommandError {
    fn from(value: RosterError) -> Self {
        Self::Roster(value)
    }
}

impl From<RepoError> for CommandError {
    fn from(value: RepoError) -> Self {
        Self::Roster(value.into())
    }
}

impl From<io::Error> for CommandError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl CommandError {
    /// Whether the handler already printed a user-facing message.
    pub fn already_reported(&self) -> bool {
        matches!(self, Self::Roster(_) | Self::NoMatch(_))
    }
}

pub type CommandResult = Result<(), CommandError>;

/// Per-invocation state handed to every handler.
pub struct RosterContext<W: Write> {
    service: StudentService<StudentStore>,
    out: W,
}

impl<W: Write> RosterContext<W> {
    /// Binds the store at `db_path`, creating the table when missing.
    pub fn open(db_path: impl Into<PathBuf>, out: W) -> Result<Self, CommandError> {
        let store = StudentStore::new(db_path);
        store.init()?;
        Ok(Self {
            service: StudentService::new(store),
            out,
        })
    }

    pub fn add(&mut self, form: &StudentForm) -> CommandResult {
        match self.service.add_student(form) {
            Ok(_) => {
                writeln!(self.out, "Student added successfully!")?;
                self.render_all()
            }
            Err(err) => Err(self.report(err, "add")),
        }
    }

    pub fn update(&mut self, form: &StudentForm) -> CommandResult {
        match self.service.update_student(form) {
            Ok(_) => {
                writeln!(self.out, "Student updated successfully!")?;
                self.render_all()
            }
            Err(err) => Err(self.report(err, "update")),
        }
    }

    pub fn delete(&mut self, id_text: &str) -> CommandResult {
        match self.service.delete_student(id_text) {
            Ok(_) => {
                writeln!(self.out, "Student deleted successfully!")?;
                self.render_all()
            }
            Err(err) => Err(self.report(err, "delete")),
        }
    }

    pub fn search(&mut self, id_text: &str) -> CommandResult {
        match self.service.find_student(id_text) {
            Ok(Some(student)) => self.render(&[student]),
            Ok(None) => {
                writeln!(self.out, "Student not found.")?;
                self.render_all()?;
                Err(CommandError::NoMatch(id_text.trim().to_string()))
            }
            Err(err) => Err(self.report(err, "search")),
        }
    }

    pub fn list(&mut self, json: bool) -> CommandResult {
        let students = self.service.list_students()?;
        if json {
            serde_json::to_writer_pretty(&mut self.out, &students)?;
            writeln!(self.out)?;
            return Ok(());
        }
        self.render(&students)
    }

    fn render_all(&mut self) -> CommandResult {
        let students = self.service.list_students()?;
        self.render(&students)
    }

    fn render(&mut self, students: &[Student]) -> CommandResult {
        self.out.write_all(render_table(students).as_bytes())?;
        Ok(())
    }

    fn report(&mut self, err: RosterError, action: &str) -> CommandError {
        let message = user_message(&err, action);
        if let Err(io_err) = writeln!(self.out, "{message}") {
            return CommandError::Io(io_err);
        }
        if matches!(err, RosterError::Repo(_)) {
            warn!("event=cli_action module=cli status=error action={action}");
        }
        CommandError::Roster(err)
    }
}

fn user_message(err: &RosterError, action: &str) -> String {
    match err {
        RosterError::Invalid(form) if form.fields() == [FieldKind::Id] => {
            format!("Enter a valid integer id to {action}.")
        }
        RosterError::Invalid(form) => {
            let rules = form
                .fields()
                .iter()
                .map(|field| format!("  - {}: {}", field.label(), field.rule()))
                .collect::<Vec<_>>()
                .join("\n");
            format!("Invalid input! Check fields:\n{rules}")
        }
        RosterError::DuplicateId(_) => "This id already exists. Choose a unique id.".to_string(),
        RosterError::NotFound(_) => "Student with this id not found.".to_string(),
        RosterError::Repo(repo) => format!("Storage error: {repo}"),
    }
}

#[cfg(test)]
mod tests {
    use super::{CommandError, RosterContext};
    use roster_core::{RosterError, StudentForm};
    use tempfile::TempDir;

    fn context(dir: &TempDir) -> RosterContext<Vec<u8>> {
        RosterContext::open(dir.path().join("students.db"), Vec::new()).unwrap()
    }

    fn output(ctx: &mut RosterContext<Vec<u8>>) -> String {
        String::from_utf8(std::mem::take(&mut ctx.out)).unwrap()
    }

    fn form(id: &str, name: &str) -> StudentForm {
        StudentForm {
            id: id.to_string(),
            name: name.to_string(),
            contact: "1234567890".to_string(),
            email: "a@b.com".to_string(),
            age: "20".to_string(),
            course: "cs".to_string(),
        }
    }

    #[test]
    fn add_reports_success_and_renders_display_values() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(&dir);

        ctx.add(&form("1", "john doe")).unwrap();
        let text = output(&mut ctx);
        assert!(text.starts_with("Student added successfully!"));
        assert!(text.contains("John Doe"));
        assert!(text.contains("CS"));
    }

    #[test]
    fn add_duplicate_reports_and_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(&dir);

        ctx.add(&form("1", "john doe")).unwrap();
        output(&mut ctx);
        let err = ctx.add(&form("1", "jane roe")).unwrap_err();
        assert!(matches!(
            err,
            CommandError::Roster(RosterError::DuplicateId(1))
        ));
        assert!(output(&mut ctx).contains("already exists"));
    }

    #[test]
    fn invalid_form_lists_failed_fields() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(&dir);

        let mut bad = form("1", "john doe");
        bad.contact = "12".to_string();
        bad.age = "200".to_string();
        ctx.add(&bad).unwrap_err();

        let text = output(&mut ctx);
        assert!(text.contains("contact: contact must be exactly 10 digits"));
        assert!(text.contains("age: age must be an integer between 10 and 100"));
        assert!(!text.contains("name:"));
    }

    #[test]
    fn update_with_bad_id_asks_for_integer_id() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(&dir);

        ctx.update(&form("abc", "john doe")).unwrap_err();
        assert_eq!(
            output(&mut ctx).trim(),
            "Enter a valid integer id to update."
        );
    }

    #[test]
    fn delete_missing_reports_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(&dir);

        let err = ctx.delete("999").unwrap_err();
        assert!(matches!(err, CommandError::Roster(RosterError::NotFound(999))));
        assert!(output(&mut ctx).contains("Student with this id not found."));
    }

    #[test]
    fn update_reports_success_and_renders_changed_row() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(&dir);

        ctx.add(&form("1", "john doe")).unwrap();
        output(&mut ctx);
        let mut changed = form("1", "jane roe");
        changed.course = "math".to_string();
        ctx.update(&changed).unwrap();

        let text = output(&mut ctx);
        assert!(text.starts_with("Student updated successfully!"));
        assert!(text.contains("Jane Roe"));
        assert!(text.contains("MATH"));
        assert!(!text.contains("John Doe"));
    }

    #[test]
    fn delete_reports_success_and_drops_row() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(&dir);

        ctx.add(&form("1", "john doe")).unwrap();
        ctx.add(&form("2", "jane roe")).unwrap();
        output(&mut ctx);
        ctx.delete("1").unwrap();

        let text = output(&mut ctx);
        assert!(text.starts_with("Student deleted successfully!"));
        assert!(!text.contains("John Doe"));
        assert!(text.contains("Jane Roe"));
    }

    #[test]
    fn search_hit_renders_single_row() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(&dir);

        ctx.add(&form("1", "john doe")).unwrap();
        ctx.add(&form("2", "jane roe")).unwrap();
        output(&mut ctx);
        ctx.search(" 2 ").unwrap();

        let text = output(&mut ctx);
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 3);
        assert!(lines[2].contains("Jane Roe"));
    }

    #[test]
    fn handled_failures_are_not_reprinted() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(&dir);

        assert!(ctx.delete("999").unwrap_err().already_reported());
        assert!(ctx.search("5").unwrap_err().already_reported());
        let io_err = CommandError::Io(std::io::Error::other("closed"));
        assert!(!io_err.already_reported());
    }

    #[test]
    fn search_miss_falls_back_to_full_list() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(&dir);

        ctx.add(&form("1", "john doe")).unwrap();
        output(&mut ctx);
        let err = ctx.search("2").unwrap_err();
        assert!(matches!(err, CommandError::NoMatch(ref id) if id == "2"));

        let text = output(&mut ctx);
        assert!(text.starts_with("Student not found."));
        assert!(text.contains("John Doe"));
    }

    #[test]
    fn list_json_emits_stored_values() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(&dir);

        ctx.add(&form("1", "john doe")).unwrap();
        output(&mut ctx);
        ctx.list(true).unwrap();

        let json: serde_json::Value = serde_json::from_str(&output(&mut ctx)).unwrap();
        assert_eq!(json[0]["id"], 1);
        assert_eq!(json[0]["name"], "john doe");
        assert_eq!(json[0]["course"], "cs");
    }
}

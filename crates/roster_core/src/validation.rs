//! Field-level input validators and raw form parsing.
//!
//! # Responsibility
//! - Provide pure predicates for every editable field.
//! - Turn raw form text into typed records, reporting every failed field.
//!
//! # Invariants
//! - Validators never panic and never return errors; they answer `bool`.
//! - A form that fails any predicate never produces a `Student`.
//! - `valid_email` only checks for `@`. It is intentionally weak.

use crate::model::student::{Student, StudentFields, StudentId, MAX_AGE, MIN_AGE};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static CONTACT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("valid contact regex"));

/// Returns whether `text` is a base-10 integer that fits a `StudentId`.
pub fn valid_id(text: &str) -> bool {
    parse_id(text).is_some()
}

/// Returns whether `text` is non-empty after trimming.
pub fn valid_required_text(text: &str) -> bool {
    !text.trim().is_empty()
}

/// Returns whether `text` is exactly ten ASCII digits and nothing else.
pub fn valid_contact(text: &str) -> bool {
    CONTACT_RE.is_match(text)
}

/// Returns whether `text` contains an `@`.
pub fn valid_email(text: &str) -> bool {
    text.contains('@')
}

/// Returns whether `text` is an integer within `MIN_AGE..=MAX_AGE`.
///
/// Non-numeric input is simply invalid.
pub fn valid_age(text: &str) -> bool {
    parse_age(text).is_some()
}

/// Parses a student id: optional `+`/`-` sign, ASCII digits, surrounding
/// whitespace ignored. Values outside `i64` are invalid.
pub fn parse_id(text: &str) -> Option<StudentId> {
    text.trim().parse::<StudentId>().ok()
}

/// Parses an age and checks the accepted range.
pub fn parse_age(text: &str) -> Option<u8> {
    let value = text.trim().parse::<i64>().ok()?;
    let age = u8::try_from(value).ok()?;
    (MIN_AGE..=MAX_AGE).contains(&age).then_some(age)
}

/// Form field categories, used to report which inputs were rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Id,
    Name,
    Contact,
    Email,
    Age,
    Course,
}

impl FieldKind {
    /// Short user-facing rule description.
    pub fn rule(self) -> &'static str {
        match self {
            Self::Id => "id must be an integer",
            Self::Name => "name must not be empty",
            Self::Contact => "contact must be exactly 10 digits",
            Self::Email => "email must contain '@'",
            Self::Age => "age must be an integer between 10 and 100",
            Self::Course => "course must not be empty",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Contact => "contact",
            Self::Email => "email",
            Self::Age => "age",
            Self::Course => "course",
        }
    }
}

/// Validation failure for one submitted form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormError {
    fields: Vec<FieldKind>,
}

impl FormError {
    fn new(fields: Vec<FieldKind>) -> Self {
        Self { fields }
    }

    /// Rejected fields in form order.
    pub fn fields(&self) -> &[FieldKind] {
        &self.fields
    }
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let rules = self
            .fields
            .iter()
            .map(|field| field.rule())
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "invalid input: {rules}")
    }
}

impl Error for FormError {}

/// Raw text captured from the add/update form.
///
/// Every field is trimmed before it is checked or stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentForm {
    pub id: String,
    pub name: String,
    pub contact: String,
    pub email: String,
    pub age: String,
    pub course: String,
}

impl StudentForm {
    /// Parses only the id field.
    ///
    /// Update and delete check the id on its own before looking at the rest.
    pub fn parse_id(&self) -> Result<StudentId, FormError> {
        parse_student_id(&self.id)
    }

    /// Validates the five non-id fields.
    pub fn parse_fields(&self) -> Result<StudentFields, FormError> {
        let mut failed = Vec::new();
        self.collect_field_failures(&mut failed);
        match self.build_fields() {
            Some(fields) if failed.is_empty() => Ok(fields),
            _ => Err(FormError::new(failed)),
        }
    }

    /// Validates all six fields and builds a full record.
    pub fn parse_student(&self) -> Result<Student, FormError> {
        let id = parse_id(&self.id);
        let mut failed = Vec::new();
        if id.is_none() {
            failed.push(FieldKind::Id);
        }
        self.collect_field_failures(&mut failed);

        match (id, self.build_fields()) {
            (Some(id), Some(fields)) if failed.is_empty() => Ok(Student::new(id, fields)),
            _ => Err(FormError::new(failed)),
        }
    }

    fn collect_field_failures(&self, failed: &mut Vec<FieldKind>) {
        let checks = [
            (FieldKind::Name, valid_required_text(&self.name)),
            (FieldKind::Contact, valid_contact(self.contact.trim())),
            (FieldKind::Email, valid_email(self.email.trim())),
            (FieldKind::Age, valid_age(&self.age)),
            (FieldKind::Course, valid_required_text(&self.course)),
        ];
        failed.extend(
            checks
                .into_iter()
                .filter(|(_, ok)| !ok)
                .map(|(field, _)| field),
        );
    }

    fn build_fields(&self) -> Option<StudentFields> {
        Some(StudentFields {
            name: self.name.trim().to_string(),
            contact: self.contact.trim().to_string(),
            email: self.email.trim().to_string(),
            age: parse_age(&self.age)?,
            course: self.course.trim().to_string(),
        })
    }
}

/// Parses an id typed into a standalone box (search, delete).
pub fn parse_student_id(text: &str) -> Result<StudentId, FormError> {
    parse_id(text).ok_or_else(|| FormError::new(vec![FieldKind::Id]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn john_form() -> StudentForm {
        StudentForm {
            id: "1".to_string(),
            name: "john doe".to_string(),
            contact: "1234567890".to_string(),
            email: "a@b.com".to_string(),
            age: "20".to_string(),
            course: "cs".to_string(),
        }
    }

    #[test]
    fn contact_requires_exactly_ten_digits() {
        assert!(valid_contact("1234567890"));
        assert!(!valid_contact("123"));
        assert!(!valid_contact("12345678901"));
        assert!(!valid_contact("12345abcde"));
        assert!(!valid_contact(""));
        assert!(!valid_contact("1234567890\n"));
    }

    #[test]
    fn contact_rejects_non_ascii_digits() {
        // Arabic-Indic digits are Unicode `\d` but not decimal ASCII.
        assert!(!valid_contact("١٢٣٤٥٦٧٨٩٠"));
    }

    #[test]
    fn age_bounds_are_inclusive() {
        assert!(valid_age("10"));
        assert!(valid_age("100"));
        assert!(valid_age(" 42 "));
        assert!(!valid_age("9"));
        assert!(!valid_age("101"));
        assert!(!valid_age("-20"));
        assert!(!valid_age("abc"));
        assert!(!valid_age(""));
        assert!(!valid_age("99999999999999999999999"));
    }

    #[test]
    fn id_accepts_signed_integers() {
        assert!(valid_id("1"));
        assert!(valid_id("007"));
        assert!(valid_id(" 42 "));
        assert_eq!(parse_id("-5"), Some(-5));
        assert_eq!(parse_id("+5"), Some(5));
        assert!(!valid_id("- 5"));
        assert!(!valid_id("--5"));
        assert!(!valid_id("1.5"));
        assert!(!valid_id(""));
        assert!(!valid_id("abc"));
        assert!(!valid_id("99999999999999999999"));
    }

    #[test]
    fn required_text_trims_whitespace() {
        assert!(valid_required_text("x"));
        assert!(!valid_required_text(""));
        assert!(!valid_required_text(" \t\n"));
    }

    #[test]
    fn email_only_checks_for_at_sign() {
        assert!(valid_email("a@b.com"));
        assert!(valid_email("@"));
        assert!(!valid_email("ab.com"));
    }

    #[test]
    fn parse_student_trims_and_builds_record() {
        let mut form = john_form();
        form.name = "  john doe ".to_string();
        form.contact = " 1234567890 ".to_string();

        let student = form.parse_student().unwrap();
        assert_eq!(student.id, 1);
        assert_eq!(student.fields.name, "john doe");
        assert_eq!(student.fields.contact, "1234567890");
        assert_eq!(student.fields.age, 20);
    }

    #[test]
    fn parse_student_reports_every_failed_field() {
        let form = StudentForm {
            id: "x".to_string(),
            name: " ".to_string(),
            contact: "123".to_string(),
            email: "nope".to_string(),
            age: "5".to_string(),
            course: String::new(),
        };

        let err = form.parse_student().unwrap_err();
        assert_eq!(
            err.fields(),
            &[
                FieldKind::Id,
                FieldKind::Name,
                FieldKind::Contact,
                FieldKind::Email,
                FieldKind::Age,
                FieldKind::Course,
            ]
        );
        assert!(err.to_string().contains("contact must be exactly 10 digits"));
    }

    #[test]
    fn parse_fields_ignores_id() {
        let mut form = john_form();
        form.id = "not a number".to_string();

        let fields = form.parse_fields().unwrap();
        assert_eq!(fields.course, "cs");
        assert!(form.parse_id().is_err());
    }
}

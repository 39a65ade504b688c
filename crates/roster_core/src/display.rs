//! Read-time formatting for the results grid.
//!
//! # Responsibility
//! - Derive display values (word-capitalized name, upper-cased course).
//! - Render records as an aligned plain-text table.
//!
//! # Invariants
//! - Nothing here is ever written back to storage.

use crate::model::student::{Student, StudentId};

const HEADERS: [&str; 6] = ["ID", "Name", "Contact", "Email", "Age", "Course"];
const COLUMN_SEPARATOR: &str = " | ";

/// Display projection of one `Student`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentView {
    pub id: StudentId,
    pub name: String,
    pub contact: String,
    pub email: String,
    pub age: u8,
    pub course: String,
}

impl From<&Student> for StudentView {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id,
            name: capitalize_words(student.name()),
            contact: student.fields.contact.clone(),
            email: student.fields.email.clone(),
            age: student.age(),
            course: student.course().to_uppercase(),
        }
    }
}

impl StudentView {
    fn cells(&self) -> [String; 6] {
        [
            self.id.to_string(),
            self.name.clone(),
            self.contact.clone(),
            self.email.clone(),
            self.age.to_string(),
            self.course.clone(),
        ]
    }
}

/// Upper-cases the first letter of each whitespace-separated word and
/// lower-cases the rest. Runs of whitespace collapse to one space.
pub fn capitalize_words(text: &str) -> String {
    text.split_whitespace()
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Renders records as a header line, a rule, and one line per record.
pub fn render_table(students: &[Student]) -> String {
    let rows = students
        .iter()
        .map(|student| StudentView::from(student).cells())
        .collect::<Vec<_>>();

    let mut widths = HEADERS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, HEADERS.iter().copied(), &widths);
    let rule = widths
        .iter()
        .map(|width| "-".repeat(*width))
        .collect::<Vec<_>>()
        .join("-+-");
    out.push_str(&rule);
    out.push('\n');
    for row in &rows {
        push_line(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize; 6]) {
    let line = cells
        .zip(widths.iter())
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(COLUMN_SEPARATOR);
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::{capitalize_words, render_table, StudentView};
    use crate::model::student::{Student, StudentFields};

    fn john() -> Student {
        Student::new(
            1,
            StudentFields {
                name: "john doe".to_string(),
                contact: "1234567890".to_string(),
                email: "a@b.com".to_string(),
                age: 20,
                course: "cs".to_string(),
            },
        )
    }

    #[test]
    fn capitalize_words_matches_title_rules() {
        assert_eq!(capitalize_words("john doe"), "John Doe");
        assert_eq!(capitalize_words("mcDONALD  o'neil"), "Mcdonald O'neil");
        assert_eq!(capitalize_words("  "), "");
        assert_eq!(capitalize_words("émile zola"), "Émile Zola");
    }

    #[test]
    fn view_transforms_name_and_course_only() {
        let student = john();
        let view = StudentView::from(&student);

        assert_eq!(view.name, "John Doe");
        assert_eq!(view.course, "CS");
        assert_eq!(view.email, "a@b.com");
        assert_eq!(student.fields.name, "john doe");
        assert_eq!(student.fields.course, "cs");
    }

    #[test]
    fn render_table_aligns_columns() {
        let table = render_table(&[john()]);
        let lines = table.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "ID | Name     | Contact    | Email   | Age | Course");
        assert_eq!(lines[2], "1  | John Doe | 1234567890 | a@b.com | 20  | CS");
    }

    #[test]
    fn render_table_without_rows_prints_header() {
        let table = render_table(&[]);
        assert_eq!(table.lines().count(), 2);
        assert!(table.starts_with("ID | Name"));
    }
}

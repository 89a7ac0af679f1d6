//! Plain-text grade report rendering.

use std::fmt::Write;

use crate::domain::model::{ClassStatistics, LetterGrade, Student};

pub const TITLE: &str = "Student Grade Report";
pub const STATISTICS_TITLE: &str = "Class Statistics";

/// Renders the banner, one line per student in the given order, then the
/// class statistics section.
pub fn render_report(students: &[Student], stats: &ClassStatistics) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "{}", TITLE);
    let _ = writeln!(output, "{}", "=".repeat(TITLE.len()));

    for student in students {
        let _ = writeln!(
            output,
            "ID: {}, Name: {}, Average Grade: {:.2}, Letter Grade: {}",
            student.id(),
            student.name(),
            student.average(),
            student.letter_grade()
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "{}", STATISTICS_TITLE);
    let _ = writeln!(output, "{}", "-".repeat(STATISTICS_TITLE.len()));
    let _ = writeln!(output, "Total Students: {}", stats.total_students);
    let _ = writeln!(output, "Class Average: {:.2}", stats.class_average);
    let _ = writeln!(output, "Grade Distribution:");

    let buckets: Vec<String> = LetterGrade::ALL
        .iter()
        .map(|&grade| format!("{}: {}", grade, stats.distribution.count(grade)))
        .collect();
    let _ = writeln!(output, "{}", buckets.join(", "));

    output
}

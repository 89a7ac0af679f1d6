//! Turns raw input lines into [`Student`] records.
//!
//! Every line yields exactly one outcome: a record or a [`RecordError`].
//! A bad line never stops the lines after it from being parsed.

use crate::domain::model::{RawLine, Student, MAX_SCORE, MIN_SCORE, SCORE_COUNT};
use crate::utils::error::RecordError;

pub const DELIMITER: char = ',';

/// id, name, then the scores.
const REQUIRED_FIELDS: usize = 2 + SCORE_COUNT;

/// Splits on the delimiter, dropping trailing empty fields.
fn split_fields(line: &str) -> Vec<&str> {
    let mut fields: Vec<&str> = line.split(DELIMITER).collect();
    while fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields
}

/// Parses one line. `line_number` is 1-based and is carried into any error.
pub fn parse_line(line_number: usize, line: &str) -> Result<Student, RecordError> {
    let fields = split_fields(line);
    if fields.len() < REQUIRED_FIELDS {
        return Err(RecordError::MalformedLine {
            line: line_number,
            fields: fields.len(),
        });
    }

    let id = fields[0].trim();
    let name = fields[1].trim();

    // Each score is range-checked as soon as it parses, left to right.
    let scores = fields[2..REQUIRED_FIELDS]
        .iter()
        .map(|raw| {
            let text = raw.trim();
            let value = text.parse::<i32>().map_err(|_| RecordError::InvalidNumber {
                line: line_number,
                text: text.to_string(),
            })?;
            if !(MIN_SCORE..=MAX_SCORE).contains(&value) {
                return Err(RecordError::GradeOutOfRange {
                    line: line_number,
                    value,
                });
            }
            Ok(value)
        })
        .collect::<Result<Vec<i32>, RecordError>>()?;

    Ok(Student::new(id, name, &scores))
}

/// Parses every line, keeping input order among the valid records.
pub fn parse_lines(lines: &[RawLine]) -> (Vec<Student>, Vec<RecordError>) {
    let mut students = Vec::with_capacity(lines.len());
    let mut diagnostics = Vec::new();

    for line in lines {
        match parse_line(line.number, &line.text) {
            Ok(student) => students.push(student),
            Err(e) => {
                tracing::warn!("Error on line {}: {}", e.line(), e);
                diagnostics.push(e);
            }
        }
    }

    tracing::debug!(
        "Parsed {} records, skipped {} lines",
        students.len(),
        diagnostics.len()
    );
    (students, diagnostics)
}

/// Numbers the lines of a decoded input file from 1.
pub fn number_lines(content: &str) -> Vec<RawLine> {
    content
        .lines()
        .enumerate()
        .map(|(i, text)| RawLine {
            number: i + 1,
            text: text.to_string(),
        })
        .collect()
}

use crate::utils::error::RecordError;
use std::fmt;

/// Number of scores every student line must carry.
pub const SCORE_COUNT: usize = 4;
pub const MIN_SCORE: i32 = 0;
pub const MAX_SCORE: i32 = 100;

/// Letter grade on the fixed A-F scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
    F,
}

impl LetterGrade {
    /// Report order of the grade buckets.
    pub const ALL: [LetterGrade; 5] = [
        LetterGrade::A,
        LetterGrade::B,
        LetterGrade::C,
        LetterGrade::D,
        LetterGrade::F,
    ];

    /// Maps an average onto the scale.
    ///
    /// | Range  | Grade |
    /// |--------|-------|
    /// | >= 90  | A     |
    /// | >= 80  | B     |
    /// | >= 70  | C     |
    /// | >= 60  | D     |
    /// | < 60   | F     |
    pub fn from_average(average: f64) -> Self {
        match average {
            a if a >= 90.0 => LetterGrade::A,
            a if a >= 80.0 => LetterGrade::B,
            a if a >= 70.0 => LetterGrade::C,
            a if a >= 60.0 => LetterGrade::D,
            _ => LetterGrade::F,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            LetterGrade::A => 'A',
            LetterGrade::B => 'B',
            LetterGrade::C => 'C',
            LetterGrade::D => 'D',
            LetterGrade::F => 'F',
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One validated student line.
///
/// The average and letter grade are derived once in [`Student::new`]; the
/// record exposes read-only accessors only, so stored scores cannot change
/// after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    id: String,
    name: String,
    scores: Vec<i32>,
    average: f64,
    letter_grade: LetterGrade,
}

impl Student {
    /// Builds a record from already range-checked scores. The scores are
    /// copied, so later changes to the caller's buffer do not reach the record.
    pub fn new(id: impl Into<String>, name: impl Into<String>, scores: &[i32]) -> Self {
        let scores = scores.to_vec();
        let average = mean(&scores);

        Self {
            id: id.into(),
            name: name.into(),
            letter_grade: LetterGrade::from_average(average),
            scores,
            average,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scores(&self) -> &[i32] {
        &self.scores
    }

    pub fn average(&self) -> f64 {
        self.average
    }

    pub fn letter_grade(&self) -> LetterGrade {
        self.letter_grade
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scores: Vec<String> = self.scores.iter().map(|s| s.to_string()).collect();
        write!(
            f,
            "ID: {}, Name: {}, Grades: {}, Average: {:.2}, Letter Grade: {}",
            self.id,
            self.name,
            scores.join(" "),
            self.average,
            self.letter_grade
        )
    }
}

fn mean(scores: &[i32]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let sum: i64 = scores.iter().map(|&s| i64::from(s)).sum();
    sum as f64 / scores.len() as f64
}

/// Per-bucket student counts, indexed by [`LetterGrade`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GradeDistribution {
    counts: [usize; 5],
}

impl GradeDistribution {
    pub fn record(&mut self, grade: LetterGrade) {
        self.counts[grade.index()] += 1;
    }

    pub fn count(&self, grade: LetterGrade) -> usize {
        self.counts[grade.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Class-wide figures computed fresh for each report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassStatistics {
    pub total_students: usize,
    pub class_average: f64,
    pub distribution: GradeDistribution,
}

/// One line of the input file, numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    pub number: usize,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub students: Vec<Student>,
    pub statistics: ClassStatistics,
    pub diagnostics: Vec<RecordError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_grade_boundaries() {
        assert_eq!(LetterGrade::from_average(100.0), LetterGrade::A);
        assert_eq!(LetterGrade::from_average(90.0), LetterGrade::A);
        assert_eq!(LetterGrade::from_average(89.99), LetterGrade::B);
        assert_eq!(LetterGrade::from_average(80.0), LetterGrade::B);
        assert_eq!(LetterGrade::from_average(79.75), LetterGrade::C);
        assert_eq!(LetterGrade::from_average(70.0), LetterGrade::C);
        assert_eq!(LetterGrade::from_average(60.0), LetterGrade::D);
        assert_eq!(LetterGrade::from_average(59.75), LetterGrade::F);
        assert_eq!(LetterGrade::from_average(0.0), LetterGrade::F);
    }

    #[test]
    fn test_student_derives_average_and_grade() {
        let student = Student::new("S1", "Alice", &[90, 85, 95, 100]);

        assert_eq!(student.id(), "S1");
        assert_eq!(student.name(), "Alice");
        assert_eq!(student.scores(), &[90, 85, 95, 100]);
        assert!((student.average() - 92.5).abs() < f64::EPSILON);
        assert_eq!(student.letter_grade(), LetterGrade::A);
    }

    #[test]
    fn test_average_keeps_fraction() {
        let student = Student::new("S2", "Bob", &[89, 90, 90, 90]);
        assert!((student.average() - 89.75).abs() < f64::EPSILON);
        assert_eq!(student.letter_grade(), LetterGrade::B);
    }

    #[test]
    fn test_empty_scores_average_zero() {
        let student = Student::new("S0", "Nobody", &[]);
        assert_eq!(student.average(), 0.0);
        assert_eq!(student.letter_grade(), LetterGrade::F);
    }

    #[test]
    fn test_scores_are_copied_from_caller() {
        let mut scores = vec![70, 70, 70, 70];
        let student = Student::new("S3", "Carl", &scores);
        scores[0] = 0;

        assert_eq!(student.scores(), &[70, 70, 70, 70]);
        assert_eq!(student.letter_grade(), LetterGrade::C);
    }

    #[test]
    fn test_student_display() {
        let student = Student::new("S1", "Alice", &[90, 90, 90, 90]);
        assert_eq!(
            student.to_string(),
            "ID: S1, Name: Alice, Grades: 90 90 90 90, Average: 90.00, Letter Grade: A"
        );
    }

    #[test]
    fn test_distribution_counts() {
        let mut distribution = GradeDistribution::default();
        distribution.record(LetterGrade::A);
        distribution.record(LetterGrade::A);
        distribution.record(LetterGrade::F);

        assert_eq!(distribution.count(LetterGrade::A), 2);
        assert_eq!(distribution.count(LetterGrade::B), 0);
        assert_eq!(distribution.count(LetterGrade::F), 1);
        assert_eq!(distribution.total(), 3);
    }
}

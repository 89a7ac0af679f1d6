use crate::domain::model::{ClassStatistics, GradeDistribution, Student};

/// Class statistics over any number of records.
///
/// The class average is the mean of the per-student averages, accumulated
/// as floating point. An empty slice gives zeroed statistics.
pub fn aggregate(students: &[Student]) -> ClassStatistics {
    let mut distribution = GradeDistribution::default();
    let mut sum_of_averages = 0.0_f64;

    for student in students {
        sum_of_averages += student.average();
        distribution.record(student.letter_grade());
    }

    let total_students = students.len();
    let class_average = if total_students == 0 {
        0.0
    } else {
        sum_of_averages / total_students as f64
    };

    ClassStatistics {
        total_students,
        class_average,
        distribution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::LetterGrade;

    #[test]
    fn test_empty_collection() {
        let stats = aggregate(&[]);
        assert_eq!(stats.total_students, 0);
        assert_eq!(stats.class_average, 0.0);
        for grade in LetterGrade::ALL {
            assert_eq!(stats.distribution.count(grade), 0);
        }
    }

    #[test]
    fn test_mean_of_means_and_distribution() {
        let students = vec![
            Student::new("S1", "Alice", &[90, 90, 90, 90]),
            Student::new("S2", "Bob", &[85, 80, 80, 80]),
            Student::new("S3", "Carl", &[40, 50, 60, 70]),
            Student::new("S4", "Dana", &[95, 95, 100, 100]),
        ];

        let stats = aggregate(&students);

        assert_eq!(stats.total_students, 4);
        let expected = (90.0 + 81.25 + 55.0 + 97.5) / 4.0;
        assert!((stats.class_average - expected).abs() < 1e-9);
        assert_eq!(stats.distribution.count(LetterGrade::A), 2);
        assert_eq!(stats.distribution.count(LetterGrade::B), 1);
        assert_eq!(stats.distribution.count(LetterGrade::C), 0);
        assert_eq!(stats.distribution.count(LetterGrade::D), 0);
        assert_eq!(stats.distribution.count(LetterGrade::F), 1);
        assert_eq!(stats.distribution.total(), stats.total_students);
    }

    #[test]
    fn test_fractional_averages_are_not_truncated() {
        let students = vec![
            Student::new("S1", "Alice", &[89, 90, 90, 90]),
            Student::new("S2", "Bob", &[89, 90, 90, 90]),
        ];

        let stats = aggregate(&students);
        assert!((stats.class_average - 89.75).abs() < 1e-9);
    }
}
